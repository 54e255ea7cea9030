//! Process-wide configuration.
//!
//! Read once at startup, held immutable, and passed explicitly into the
//! orchestrator. Never ambient mutable state.

use crate::error::TriageError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prompt version used when PROMPT_VERSION is unset.
pub const DEFAULT_PROMPT_VERSION: &str = "triage/v1";

/// Model config path used when MODEL_VERSION is unset.
pub const DEFAULT_MODEL_VERSION: &str = "models/triage/v1.json";

/// Process configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Identifier selecting the versioned prompt templates
    pub prompt_version: String,
    /// Path to the model configuration document; also stamped on results
    pub model_version: String,
    /// Selects the external-model brain instead of the deterministic one
    pub use_ollama: bool,
}

impl TriageConfig {
    pub fn from_env() -> Self {
        Self {
            prompt_version: std::env::var("PROMPT_VERSION")
                .unwrap_or_else(|_| DEFAULT_PROMPT_VERSION.to_string()),
            model_version: std::env::var("MODEL_VERSION")
                .unwrap_or_else(|_| DEFAULT_MODEL_VERSION.to_string()),
            use_ollama: std::env::var("USE_OLLAMA").map(|v| v == "1").unwrap_or(false),
        }
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            prompt_version: DEFAULT_PROMPT_VERSION.to_string(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            use_ollama: false,
        }
    }
}

/// Model endpoint configuration, loaded from a JSON document.
///
/// `model` is required; everything else has defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_top_p() -> f64 {
    0.9
}

fn default_timeout_sec() -> u64 {
    60
}

impl ModelConfig {
    /// Load and parse the model configuration document.
    ///
    /// A missing required key is a configuration error, fatal at startup of
    /// the external-model brain.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TriageError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            TriageError::Config(format!("invalid model config {}: {}", path.display(), e))
        })
    }
}
