//! Behavioral invariant enforcement.
//!
//! Deterministic post-processing that injects category-required clarifying
//! questions and internal actions missing from brain output, then scrubs
//! unsafe content. Idempotent: re-applying to an already enforced result is
//! a no-op. Injection runs before the safety scan, so injected text is also
//! subject to scrubbing.

use crate::requirements::{
    has_200_ambiguity, required_actions, required_questions, Requirement,
    AMBIGUOUS_200_ACTIONS, AMBIGUOUS_200_QUESTION, FORBIDDEN_PHRASES,
};
use crate::ticket::{Signals, Ticket};
use crate::triage::{Category, TriageResult};
use tracing::debug;

/// Replacement reply used when the draft asked the user for credentials.
const SAFE_REPLY: &str = "Thanks for reporting this — we’ll help you get this resolved. \
Please do not share passwords or 2FA codes.";

/// Enforce category-specific behavioral invariants on `result` in place.
pub fn enforce(result: &mut TriageResult, ticket: &Ticket, signals: &Signals) {
    inject_questions(&mut result.questions, required_questions(result.category));
    inject_actions(&mut result.actions, required_actions(result.category));

    if result.category == Category::Outage && has_200_ambiguity(ticket, signals) {
        inject_questions(&mut result.questions, &[AMBIGUOUS_200_QUESTION]);
        inject_actions(&mut result.actions, AMBIGUOUS_200_ACTIONS);
    }

    scrub_unsafe(result);
}

/// Append each requirement's canonical question unless its terms already
/// appear somewhere in the joined question text. Matching is deliberately
/// lenient: terms scattered across unrelated questions still count.
fn inject_questions(questions: &mut Vec<String>, requirements: &[Requirement]) {
    let mut text = questions.join(" ").to_lowercase();
    for req in requirements {
        if !req.is_met(&text) {
            debug!("injecting required question: {}", req.canonical);
            questions.push(req.canonical.to_string());
            text = questions.join(" ").to_lowercase();
        }
    }
}

fn inject_actions(actions: &mut Vec<String>, requirements: &[Requirement]) {
    let mut text = actions.join(" ").to_lowercase();
    for req in requirements {
        if !req.is_met(&text) {
            debug!("injecting required action: {}", req.canonical);
            actions.push(req.canonical.to_string());
            text = actions.join(" ").to_lowercase();
        }
    }
}

/// Replace the reply wholesale if it (or any question) requests secrets.
fn scrub_unsafe(result: &mut TriageResult) {
    let combined = format!("{} {}", result.customer_reply, result.questions.join(" ")).to_lowercase();
    for phrase in FORBIDDEN_PHRASES {
        if combined.contains(phrase) {
            debug!("forbidden phrase in reply, replacing: {}", phrase);
            result.customer_reply = SAFE_REPLY.to_string();
            return;
        }
    }
}
