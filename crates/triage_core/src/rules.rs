//! Deterministic rule brain.
//!
//! Ordered predicate cascade over lowercased ticket text and signal fields;
//! the FIRST matching predicate wins, so branch order is fixed and
//! significant. Always available: keeps the pipeline wiring testable and
//! regression runs stable regardless of model behavior.
//!
//! Confidence values are hand-tuned constants per branch, kept for
//! regression compatibility. They are not derived from evidence strength.

use crate::brain::Brain;
use async_trait::async_trait;
use tracing::debug;
use triage_common::requirements::has_200_ambiguity;
use triage_common::{
    Category, Classification, Priority, ResponseDraft, Signals, Ticket, TriageError,
};

pub struct RuleBrain;

#[async_trait]
impl Brain for RuleBrain {
    async fn classify(
        &self,
        ticket: &Ticket,
        signals: &Signals,
    ) -> Result<Classification, TriageError> {
        Ok(classify_ticket(ticket, signals))
    }

    async fn draft_reply(
        &self,
        ticket: &Ticket,
        classification: &Classification,
        signals: &Signals,
    ) -> Result<ResponseDraft, TriageError> {
        Ok(draft_reply(ticket, classification, signals))
    }
}

fn lc(value: &str) -> String {
    value.trim().to_lowercase()
}

fn lc_opt(value: &Option<String>) -> String {
    value.as_deref().map(lc).unwrap_or_default()
}

fn classification(
    category: Category,
    priority: Priority,
    routing: &str,
    tags: &[&str],
    confidence: f64,
) -> Classification {
    Classification {
        category,
        priority,
        routing: routing.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        confidence,
    }
}

/// Classify a ticket through the fixed predicate cascade.
pub fn classify_ticket(ticket: &Ticket, signals: &Signals) -> Classification {
    let title = lc(&ticket.title);
    let desc = lc(&ticket.description);

    let http_family = lc_opt(&signals.http_status_family);
    let symptom = lc_opt(&signals.symptom_type);
    let suspected = lc_opt(&signals.suspected_area);
    let scope = lc_opt(&signals.impact_scope);

    let result = if is_security_issue(&title, &desc, signals.security_risk) {
        classification(
            Category::Security,
            Priority::P0,
            "Security",
            &["security", "account"],
            0.80,
        )
    } else if is_outage_explicit(&title, &desc, &scope, &http_family) {
        classification(
            Category::Outage,
            Priority::P0,
            "SRE / On-Call",
            &["outage", "availability"],
            0.80,
        )
    } else if is_outage_error_spike(&scope, &symptom, signals.error_count) {
        classification(
            Category::Outage,
            Priority::P1,
            "SRE / On-Call",
            &["outage", "degraded"],
            0.65,
        )
    } else if is_billing(&desc, signals.money_involved) {
        classification(Category::Billing, Priority::P2, "Billing", &["billing"], 0.70)
    } else if is_feature_request(&title, &desc, &symptom) {
        classification(
            Category::Feature,
            Priority::P3,
            "Product / PM",
            &["feature-request"],
            0.65,
        )
    } else if is_auth_issue(&desc, &suspected, &symptom) {
        classification(Category::Account, Priority::P1, "Auth", &["auth", "login"], 0.65)
    } else {
        classification(Category::Other, Priority::P3, "Support", &["triage"], 0.55)
    };

    debug!(
        "rule brain: category={} priority={} confidence={:.2}",
        result.category, result.priority, result.confidence
    );
    result
}

fn is_security_issue(title: &str, desc: &str, security_risk: bool) -> bool {
    security_risk
        || title.contains("security")
        || desc.contains("unknown location")
        || desc.contains("hacked")
        || desc.contains("account was accessed")
        || desc.contains("2fa")
}

fn is_outage_explicit(title: &str, desc: &str, scope: &str, http_family: &str) -> bool {
    if scope != "many_users" {
        return false;
    }
    http_family == "5xx"
        || desc.contains("timeout")
        || desc.contains("502")
        || desc.contains("503")
        || title.contains("app down")
        || title.contains("outage")
}

fn is_outage_error_spike(scope: &str, symptom: &str, error_count: Option<i64>) -> bool {
    if scope != "many_users" {
        return false;
    }
    symptom == "error_rate_spike" || error_count.map_or(false, |n| n >= 50)
}

fn is_billing(desc: &str, money_involved: bool) -> bool {
    money_involved || desc.contains("charged") || desc.contains("refund")
}

fn is_feature_request(title: &str, desc: &str, symptom: &str) -> bool {
    symptom == "feature_request"
        || title.contains("feature")
        || desc.contains("request")
        || desc.contains("add")
}

fn is_auth_issue(desc: &str, suspected: &str, symptom: &str) -> bool {
    symptom == "auth_failure"
        || suspected == "auth"
        || desc.contains("login")
        || desc.contains("password")
        || desc.contains("reset")
        || desc.contains("403")
}

/// Fixed clarifying questions and internal actions per category.
fn questions_and_actions(category: Category) -> (Vec<String>, Vec<String>) {
    let (questions, actions): (&[&str], &[&str]) = match category {
        Category::Account => (
            &[
                "What email/username are you using?",
                "Which device and browser/app version are you using?",
                "What time (and timezone) did you try logging in?",
            ],
            &[
                "Check auth logs for 403 around the reported time",
                "Verify password reset token flow and session invalidation",
            ],
        ),
        Category::Billing => (
            &[
                "Can you share the invoice ID(s) for the charges?",
                "What are the dates of the charges?",
                "What are the last 4 digits of the card (or payment method) used?",
            ],
            &[
                "Look up subscription and payment provider transactions",
                "Confirm duplicate invoice and initiate refund workflow if applicable",
            ],
        ),
        Category::Outage => (
            &[
                "Are you seeing this across multiple regions or one region?",
                "Do you have example request IDs/timestamps we can correlate?",
            ],
            &[
                "Check status page",
                "Check error rate/latency dashboards",
                "Open incident and page on-call if not already engaged",
            ],
        ),
        Category::Feature => (
            &[
                "What’s the main use case for CSV export (reporting, finance, sharing)?",
                "Which fields do you need included in the export?",
            ],
            &[
                "Log feature request in backlog",
                "Capture use case and expected output format",
            ],
        ),
        Category::Security => (
            &[
                "Do you recognize the location/device shown in the login activity?",
                "When did you first notice the changes, and what changed?",
            ],
            &[
                "Force logout sessions (invalidate all active sessions)",
                "Reset credentials and verify 2FA is enabled",
                "Review audit logs for suspicious activity",
            ],
        ),
        Category::Bug | Category::Other => (
            &["Can you share steps to reproduce and any screenshots or error messages?"],
            &["Collect details and route to the appropriate team"],
        ),
    };

    (
        questions.iter().map(|q| q.to_string()).collect(),
        actions.iter().map(|a| a.to_string()).collect(),
    )
}

/// Draft the reply from the fixed per-category table.
pub fn draft_reply(
    ticket: &Ticket,
    classification: &Classification,
    signals: &Signals,
) -> ResponseDraft {
    let title = ticket.title.trim();
    let (mut questions, mut actions) = questions_and_actions(classification.category);

    // Outage ambiguity special case: clarify "200 errors" up front
    if classification.category == Category::Outage && has_200_ambiguity(ticket, signals) {
        questions.insert(
            0,
            "Do you mean 200 error occurrences or HTTP 200 responses?".to_string(),
        );
        actions.insert(0, "Confirm status codes".to_string());
        actions.insert(0, "Check monitoring dashboards".to_string());
    }

    let category_upper = classification.category.to_string().to_uppercase();
    let summary = if title.is_empty() {
        format!("{} triage", category_upper)
    } else {
        format!("{} triage for: {}", category_upper, title)
    };

    let customer_reply = format_customer_reply(&questions);

    ResponseDraft {
        summary,
        customer_reply,
        questions,
        actions,
    }
}

fn format_customer_reply(questions: &[String]) -> String {
    format!(
        "Thanks for reporting this. I’m going to help you get this resolved.\n\n\
         To move quickly, could you confirm:\n- {}",
        questions.join("\n- ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn many_users() -> Signals {
        Signals {
            impact_scope: Some("many_users".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_security_wins_over_billing_words() {
        let ticket = Ticket::new(
            "Weird activity",
            "hacked, account was accessed from unknown location. I want a refund",
        );
        let c = classify_ticket(&ticket, &Signals::default());
        assert_eq!(c.category, Category::Security);
        assert_eq!(c.priority, Priority::P0);
        assert_eq!(c.routing, "Security");
        assert_eq!(c.confidence, 0.80);
    }

    #[test]
    fn test_security_from_signal_flag() {
        let signals = Signals {
            security_risk: true,
            ..Default::default()
        };
        let c = classify_ticket(&Ticket::new("Odd", "nothing specific"), &signals);
        assert_eq!(c.category, Category::Security);
    }

    #[test]
    fn test_explicit_outage_needs_many_users() {
        let ticket = Ticket::new("App down", "503 everywhere, timeouts");

        let c = classify_ticket(&ticket, &Signals::default());
        assert_ne!(c.category, Category::Outage);

        let c = classify_ticket(&ticket, &many_users());
        assert_eq!(c.category, Category::Outage);
        assert_eq!(c.priority, Priority::P0);
        assert_eq!(c.confidence, 0.80);
        assert_eq!(c.tags, vec!["outage", "availability"]);
    }

    #[test]
    fn test_explicit_outage_from_5xx_family() {
        let signals = Signals {
            impact_scope: Some("many_users".to_string()),
            http_status_family: Some("5xx".to_string()),
            ..Default::default()
        };
        let c = classify_ticket(&Ticket::new("Errors", "lots of failures"), &signals);
        assert_eq!(c.category, Category::Outage);
        assert_eq!(c.priority, Priority::P0);
    }

    #[test]
    fn test_error_spike_outage_is_p1() {
        let signals = Signals {
            impact_scope: Some("many_users".to_string()),
            symptom_type: Some("error_rate_spike".to_string()),
            ..Default::default()
        };
        let c = classify_ticket(&Ticket::new("Errors rising", "error counts climbing"), &signals);
        assert_eq!(c.category, Category::Outage);
        assert_eq!(c.priority, Priority::P1);
        assert_eq!(c.confidence, 0.65);
    }

    #[test]
    fn test_error_spike_outage_from_count_threshold() {
        let mut signals = many_users();
        signals.error_count = Some(49);
        let c = classify_ticket(&Ticket::new("Errors", "some failures"), &signals);
        assert_ne!(c.category, Category::Outage);

        signals.error_count = Some(50);
        let c = classify_ticket(&Ticket::new("Errors", "some failures"), &signals);
        assert_eq!(c.category, Category::Outage);
        assert_eq!(c.priority, Priority::P1);
    }

    #[test]
    fn test_billing_from_text_or_flag() {
        let c = classify_ticket(
            &Ticket::new("Charge", "I was charged twice"),
            &Signals::default(),
        );
        assert_eq!(c.category, Category::Billing);
        assert_eq!(c.priority, Priority::P2);
        assert_eq!(c.confidence, 0.70);

        let signals = Signals {
            money_involved: true,
            ..Default::default()
        };
        let c = classify_ticket(&Ticket::new("Payment", "something is off"), &signals);
        assert_eq!(c.category, Category::Billing);
    }

    #[test]
    fn test_feature_request() {
        let c = classify_ticket(
            &Ticket::new("Feature: CSV export", "please consider"),
            &Signals::default(),
        );
        assert_eq!(c.category, Category::Feature);
        assert_eq!(c.priority, Priority::P3);
        assert_eq!(c.routing, "Product / PM");
    }

    #[test]
    fn test_auth_issue() {
        let c = classify_ticket(
            &Ticket::new("Cannot get in", "login fails with 403 after password reset"),
            &Signals::default(),
        );
        assert_eq!(c.category, Category::Account);
        assert_eq!(c.priority, Priority::P1);
        assert_eq!(c.routing, "Auth");
        assert_eq!(c.confidence, 0.65);
    }

    #[test]
    fn test_fallback_other() {
        let c = classify_ticket(
            &Ticket::new("Question", "Where can I find the docs?"),
            &Signals::default(),
        );
        assert_eq!(c.category, Category::Other);
        assert_eq!(c.priority, Priority::P3);
        assert_eq!(c.routing, "Support");
        assert_eq!(c.confidence, 0.55);
    }

    #[test]
    fn test_draft_reply_summary_includes_title() {
        let ticket = Ticket::new("Cannot log in", "login fails");
        let c = classify_ticket(&ticket, &Signals::default());
        let draft = draft_reply(&ticket, &c, &Signals::default());
        assert_eq!(draft.summary, "ACCOUNT triage for: Cannot log in");
        assert!(draft.customer_reply.contains("- What email/username are you using?"));
    }

    #[test]
    fn test_draft_reply_summary_without_title() {
        let ticket = Ticket::new("", "login fails");
        let c = classify_ticket(&ticket, &Signals::default());
        let draft = draft_reply(&ticket, &c, &Signals::default());
        assert_eq!(draft.summary, "ACCOUNT triage");
    }

    #[test]
    fn test_draft_reply_outage_200_ambiguity_prepends() {
        let ticket = Ticket::new(
            "Users report 200 errors",
            "We are seeing 200 errors spike since 10am",
        );
        let signals = Signals {
            impact_scope: Some("many_users".to_string()),
            symptom_type: Some("error_rate_spike".to_string()),
            ..Default::default()
        };
        let c = classify_ticket(&ticket, &signals);
        assert_eq!(c.category, Category::Outage);

        let draft = draft_reply(&ticket, &c, &signals);
        assert_eq!(
            draft.questions[0],
            "Do you mean 200 error occurrences or HTTP 200 responses?"
        );
        assert_eq!(draft.actions[0], "Check monitoring dashboards");
        assert_eq!(draft.actions[1], "Confirm status codes");
    }

    #[test]
    fn test_draft_reply_no_forbidden_phrases() {
        for category in [
            Category::Account,
            Category::Billing,
            Category::Outage,
            Category::Security,
            Category::Feature,
            Category::Other,
        ] {
            let c = classification(category, Priority::P2, "X", &[], 0.5);
            let draft = draft_reply(&Ticket::default(), &c, &Signals::default());
            let combined =
                format!("{} {}", draft.customer_reply, draft.questions.join(" ")).to_lowercase();
            assert!(!combined.contains("share your password"));
            assert!(!combined.contains("share your 2fa"));
        }
    }
}
