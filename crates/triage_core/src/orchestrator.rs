//! Triage orchestration.
//!
//! Sequences classify, draft, merge, enforce, normalize. The order is
//! load-bearing: enforcement must see the raw brain output before
//! normalization fills gaps, otherwise generic fill-in text could satisfy
//! the enforcer's term checks spuriously.

use crate::brain::Brain;
use tracing::debug;
use triage_common::{enforcer, normalizer, Signals, Ticket, TriageConfig, TriageError, TriageResult};

/// Produce the final contract-satisfying result for one ticket.
pub async fn triage(
    brain: &dyn Brain,
    config: &TriageConfig,
    ticket: &Ticket,
    signals: &Signals,
) -> Result<TriageResult, TriageError> {
    let classification = brain.classify(ticket, signals).await?;
    debug!(
        "classified: category={} priority={} confidence={:.2}",
        classification.category, classification.priority, classification.confidence
    );

    let draft = brain.draft_reply(ticket, &classification, signals).await?;

    let mut result = TriageResult {
        category: classification.category,
        priority: classification.priority,
        routing: classification.routing,
        tags: classification.tags,
        confidence: classification.confidence,
        summary: draft.summary,
        customer_reply: draft.customer_reply,
        questions: draft.questions,
        actions: draft.actions,
        prompt_version: config.prompt_version.clone(),
        model_version: config.model_version.clone(),
    };

    enforcer::enforce(&mut result, ticket, signals);
    normalizer::normalize(&mut result);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::Brain;
    use crate::rules::RuleBrain;
    use async_trait::async_trait;
    use triage_common::{Category, Classification, Priority, ResponseDraft};

    /// Brain that returns deliberately incomplete output, standing in for
    /// an unpredictable external model.
    struct EmptyBrain(Category);

    #[async_trait]
    impl Brain for EmptyBrain {
        async fn classify(
            &self,
            _ticket: &Ticket,
            _signals: &Signals,
        ) -> Result<Classification, TriageError> {
            Ok(Classification {
                category: self.0,
                priority: Priority::P2,
                routing: String::new(),
                tags: vec![],
                confidence: 0.4,
            })
        }

        async fn draft_reply(
            &self,
            _ticket: &Ticket,
            _classification: &Classification,
            _signals: &Signals,
        ) -> Result<ResponseDraft, TriageError> {
            Ok(ResponseDraft::default())
        }
    }

    #[tokio::test]
    async fn test_triage_output_is_never_empty() {
        let config = TriageConfig::default();
        let tickets = [
            Ticket::new("Cannot log in", "login fails with 403"),
            Ticket::new("Charged twice", "I was charged twice, refund please"),
            Ticket::new("", ""),
        ];

        for ticket in &tickets {
            let result = triage(&RuleBrain, &config, ticket, &Signals::default())
                .await
                .unwrap();
            assert!(!result.routing.trim().is_empty());
            assert!(!result.customer_reply.trim().is_empty());
        }
    }

    #[tokio::test]
    async fn test_triage_stamps_versions() {
        let config = TriageConfig {
            prompt_version: "triage/v2".to_string(),
            model_version: "models/triage/v2.json".to_string(),
            use_ollama: false,
        };
        let result = triage(
            &RuleBrain,
            &config,
            &Ticket::new("Anything", "at all"),
            &Signals::default(),
        )
        .await
        .unwrap();
        assert_eq!(result.prompt_version, "triage/v2");
        assert_eq!(result.model_version, "models/triage/v2.json");
    }

    #[tokio::test]
    async fn test_empty_brain_output_is_repaired() {
        let config = TriageConfig::default();
        for category in [
            Category::Account,
            Category::Billing,
            Category::Outage,
            Category::Security,
            Category::Feature,
        ] {
            let result = triage(
                &EmptyBrain(category),
                &config,
                &Ticket::new("t", "d"),
                &Signals::default(),
            )
            .await
            .unwrap();

            assert!(!result.routing.is_empty(), "routing empty for {category}");
            assert!(!result.customer_reply.is_empty());

            // Every category-required term set must be satisfied even though
            // the brain supplied nothing.
            let q_text = result.questions.join(" ").to_lowercase();
            for req in triage_common::requirements::required_questions(category) {
                assert!(req.is_met(&q_text), "{category}: missing {:?}", req.canonical);
            }
            let a_text = result.actions.join(" ").to_lowercase();
            for req in triage_common::requirements::required_actions(category) {
                assert!(req.is_met(&a_text), "{category}: missing {:?}", req.canonical);
            }
        }
    }

    #[tokio::test]
    async fn test_enforcement_sees_raw_output_before_normalization() {
        // The empty brain produces no reply; normalization synthesizes one
        // from the questions that enforcement injected, so the synthesized
        // reply must list the injected questions.
        let config = TriageConfig::default();
        let result = triage(
            &EmptyBrain(Category::Account),
            &config,
            &Ticket::new("t", "d"),
            &Signals::default(),
        )
        .await
        .unwrap();
        assert!(result.customer_reply.contains("What email/username are you using?"));
    }
}
