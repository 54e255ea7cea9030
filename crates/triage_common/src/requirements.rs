//! Shared requirement term-sets for enforcement and evaluation.
//!
//! A requirement is a canonical phrase plus the lowercase substrings that
//! count as satisfying it. The enforcer injects canonical phrasings when
//! terms are missing; the evaluator resolves expectation phrases through
//! the alias table. Both go through this module so the two sides never
//! drift apart.

use crate::ticket::{Signals, Ticket};
use crate::triage::Category;

/// A named requirement resolving to a set of required substrings.
///
/// Terms need not be contiguous or in order; presence anywhere in the
/// (lowercased) haystack satisfies the requirement.
#[derive(Debug, Clone, Copy)]
pub struct Requirement {
    pub canonical: &'static str,
    pub terms: &'static [&'static str],
}

impl Requirement {
    /// True when every term appears somewhere in `haystack`.
    /// `haystack` must already be lowercased.
    pub fn is_met(&self, haystack: &str) -> bool {
        self.terms.iter().all(|term| haystack.contains(term))
    }
}

/// Clarifying questions that must be present for account tickets.
pub const ACCOUNT_QUESTIONS: &[Requirement] = &[
    Requirement {
        canonical: "What email/username are you using?",
        terms: &["email", "username"],
    },
    Requirement {
        canonical: "Which device and browser/app version are you using?",
        terms: &["device", "browser"],
    },
    Requirement {
        canonical: "What time (and timezone) did you try logging in?",
        terms: &["time"],
    },
];

/// Clarifying questions that must be present for billing tickets.
pub const BILLING_QUESTIONS: &[Requirement] = &[
    Requirement {
        canonical: "Can you share the invoice ID(s) for the charges?",
        terms: &["invoice", "id"],
    },
    Requirement {
        canonical: "What are the last 4 digits of the card (or payment method) used?",
        terms: &["last", "4"],
    },
    Requirement {
        canonical: "What are the dates of the charges?",
        terms: &["date", "charge"],
    },
];

/// Internal actions that must be present for outage tickets.
pub const OUTAGE_ACTIONS: &[Requirement] = &[
    Requirement {
        canonical: "Check status page",
        terms: &["status", "page"],
    },
    Requirement {
        canonical: "Check error rate/latency dashboards",
        terms: &["error", "rate"],
    },
    Requirement {
        canonical: "Open incident and page on-call if not already engaged",
        terms: &["open", "incident"],
    },
];

/// Internal actions that must be present for feature tickets.
pub const FEATURE_ACTIONS: &[Requirement] = &[
    Requirement {
        canonical: "Log feature request",
        terms: &["log", "feature"],
    },
    Requirement {
        canonical: "Capture use case",
        terms: &["capture", "use case"],
    },
];

/// Internal actions that must be present for security tickets.
pub const SECURITY_ACTIONS: &[Requirement] = &[
    Requirement {
        canonical: "Force logout sessions (invalidate all active sessions)",
        terms: &["force", "logout", "sessions"],
    },
    Requirement {
        canonical: "Reset credentials",
        terms: &["reset", "credentials"],
    },
    Requirement {
        canonical: "Review audit logs",
        terms: &["review", "audit", "logs"],
    },
];

/// Extra question required when an outage ticket is ambiguous about
/// "200 errors" (occurrence count vs HTTP 200 responses).
pub const AMBIGUOUS_200_QUESTION: Requirement = Requirement {
    canonical: "Do you mean 200 error occurrences or HTTP 200 responses?",
    terms: &["200", "http"],
};

/// Extra actions required alongside the 200-ambiguity question.
pub const AMBIGUOUS_200_ACTIONS: &[Requirement] = &[
    Requirement {
        canonical: "Check monitoring dashboards",
        terms: &["monitoring", "dashboards"],
    },
    Requirement {
        canonical: "Confirm status codes",
        terms: &["status", "codes"],
    },
];

/// Phrases that must never reach a customer.
pub const FORBIDDEN_PHRASES: &[&str] = &[
    "share your password",
    "send your password",
    "share your 2fa",
    "share your 2fa codes",
];

/// Evaluation aliases: expectation phrase resolving to required terms.
const ALIASES: &[Requirement] = &[
    Requirement {
        canonical: "device/browser",
        terms: &["device", "browser"],
    },
    Requirement {
        canonical: "time of attempt",
        terms: &["time", "timezone"],
    },
    Requirement {
        canonical: "date of charge",
        terms: &["date", "charge"],
    },
    Requirement {
        canonical: "force logout sessions",
        terms: &["force logout", "sessions"],
    },
    Requirement {
        canonical: "check monitoring dashboards",
        terms: &["monitoring", "dashboards"],
    },
    Requirement {
        canonical: "confirm status codes",
        terms: &["status codes", "http"],
    },
];

/// Questions the enforcer requires for a category.
pub fn required_questions(category: Category) -> &'static [Requirement] {
    match category {
        Category::Account => ACCOUNT_QUESTIONS,
        Category::Billing => BILLING_QUESTIONS,
        _ => &[],
    }
}

/// Actions the enforcer requires for a category.
pub fn required_actions(category: Category) -> &'static [Requirement] {
    match category {
        Category::Outage => OUTAGE_ACTIONS,
        Category::Feature => FEATURE_ACTIONS,
        Category::Security => SECURITY_ACTIONS,
        _ => &[],
    }
}

/// Whether the ticket is ambiguous about "200 errors".
pub fn has_200_ambiguity(ticket: &Ticket, signals: &Signals) -> bool {
    let desc = ticket.description.to_lowercase();
    desc.contains("200 errors")
        || signals
            .ambiguity_notes
            .iter()
            .any(|note| note.to_lowercase().contains("200"))
}

/// Alias-aware phrase check used by the evaluation matcher.
///
/// Direct substring match first; otherwise, if the phrase has a registered
/// alias, all alias terms must appear. `haystack` must be lowercased.
pub fn requirement_met(haystack: &str, phrase: &str) -> bool {
    let phrase_lc = phrase.to_lowercase();
    if haystack.contains(&phrase_lc) {
        return true;
    }
    ALIASES
        .iter()
        .find(|alias| alias.canonical == phrase_lc)
        .map(|alias| alias.is_met(haystack))
        .unwrap_or(false)
}
