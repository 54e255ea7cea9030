//! Error types for the triage pipeline.
//!
//! Only the external-model brain produces transport/format errors; the
//! deterministic path never fails. Schema-validation failures and
//! expectation mismatches are soft verdict data, not errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    /// Missing or invalid model configuration; fatal at startup
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request failure or non-success HTTP status from the model endpoint;
    /// propagated, never retried here
    #[error("Model transport error: {0}")]
    Transport(String),

    /// Model output contained no locatable JSON object; carries a
    /// truncated excerpt of the offending text
    #[error("Model did not return JSON. Got: {0}")]
    ModelFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
