//! Contract normalization.
//!
//! Final pass guaranteeing schema-level non-emptiness, independent of
//! category. Runs strictly after the enforcer so its generic fill-ins can
//! never satisfy the enforcer's term checks spuriously.

use crate::triage::{Category, TriageResult};

/// Generic acknowledgement used when the brain left the reply blank.
const GENERIC_ACK: &str = "Thanks for reporting this — we’ll help you get this resolved.";

/// Routing fallback per category when the brain left routing blank.
pub fn default_routing(category: Category) -> &'static str {
    match category {
        Category::Account => "Auth",
        Category::Billing => "Billing",
        Category::Outage => "SRE / On-Call",
        Category::Security => "Security",
        Category::Feature => "Product / PM",
        Category::Bug => "Engineering",
        Category::Other => "Support",
    }
}

/// Guarantee non-empty routing and customer_reply on `result` in place.
pub fn normalize(result: &mut TriageResult) {
    if result.routing.trim().is_empty() {
        result.routing = default_routing(result.category).to_string();
    }

    if result.customer_reply.trim().is_empty() {
        result.customer_reply = if result.questions.is_empty() {
            GENERIC_ACK.to_string()
        } else {
            format!(
                "{}\n\nTo move quickly, could you confirm:\n- {}",
                GENERIC_ACK,
                result.questions.join("\n- ")
            )
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::Priority;

    fn result_with(category: Category, routing: &str, reply: &str) -> TriageResult {
        TriageResult {
            category,
            priority: Priority::P3,
            routing: routing.to_string(),
            tags: vec![],
            confidence: 0.5,
            summary: String::new(),
            customer_reply: reply.to_string(),
            questions: vec![],
            actions: vec![],
            prompt_version: "triage/v1".to_string(),
            model_version: "models/triage/v1.json".to_string(),
        }
    }

    #[test]
    fn test_empty_routing_uses_category_default() {
        let mut r = result_with(Category::Outage, "  ", "done");
        normalize(&mut r);
        assert_eq!(r.routing, "SRE / On-Call");

        let mut r = result_with(Category::Bug, "", "done");
        normalize(&mut r);
        assert_eq!(r.routing, "Engineering");
    }

    #[test]
    fn test_existing_routing_kept() {
        let mut r = result_with(Category::Outage, "Platform SRE", "done");
        normalize(&mut r);
        assert_eq!(r.routing, "Platform SRE");
    }

    #[test]
    fn test_empty_reply_synthesized_from_questions() {
        let mut r = result_with(Category::Account, "Auth", "");
        r.questions = vec!["What email are you using?".to_string(), "Which device?".to_string()];
        normalize(&mut r);
        assert!(r.customer_reply.contains("could you confirm"));
        assert!(r.customer_reply.contains("- What email are you using?"));
        assert!(r.customer_reply.contains("- Which device?"));
    }

    #[test]
    fn test_empty_reply_without_questions_is_generic() {
        let mut r = result_with(Category::Other, "Support", "   ");
        normalize(&mut r);
        assert_eq!(r.customer_reply, GENERIC_ACK);
    }

    #[test]
    fn test_nonempty_reply_untouched() {
        let mut r = result_with(Category::Other, "Support", "Already answered.");
        normalize(&mut r);
        assert_eq!(r.customer_reply, "Already answered.");
    }
}
