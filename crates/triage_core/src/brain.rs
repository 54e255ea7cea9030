//! Brain capability - classification and reply drafting.
//!
//! Two implementations share this contract: the deterministic rule brain
//! and the Ollama-backed brain. The variant is chosen once at process
//! start from configuration, not by runtime type inspection.

use crate::ollama::OllamaBrain;
use crate::rules::RuleBrain;
use async_trait::async_trait;
use tracing::info;
use triage_common::{
    Classification, ModelConfig, ResponseDraft, Signals, Ticket, TriageConfig, TriageError,
};

#[async_trait]
pub trait Brain: Send + Sync {
    /// Assign category, priority, routing, tags and confidence.
    async fn classify(
        &self,
        ticket: &Ticket,
        signals: &Signals,
    ) -> Result<Classification, TriageError>;

    /// Draft summary, customer reply, clarifying questions and actions.
    async fn draft_reply(
        &self,
        ticket: &Ticket,
        classification: &Classification,
        signals: &Signals,
    ) -> Result<ResponseDraft, TriageError>;
}

/// Select the brain variant from process configuration.
///
/// Loading the model config is the only fallible step; the deterministic
/// brain always constructs.
pub fn select_brain(config: &TriageConfig) -> Result<Box<dyn Brain>, TriageError> {
    if config.use_ollama {
        let model_cfg = ModelConfig::load(&config.model_version)?;
        info!(
            "using ollama brain: model={} prompts={}",
            model_cfg.model, config.prompt_version
        );
        Ok(Box::new(OllamaBrain::new(
            model_cfg,
            config.prompt_version.clone(),
        )?))
    } else {
        info!("using deterministic rule brain");
        Ok(Box::new(RuleBrain))
    }
}
