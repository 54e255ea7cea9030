//! Triage Core - Brain capability and orchestration.
//!
//! Two interchangeable brains (deterministic rules, Ollama-backed) behind
//! one contract, plus the orchestrator that turns their output into a
//! contract-satisfying result.

pub mod brain;
pub mod ollama;
pub mod orchestrator;
pub mod prompts;
pub mod rules;

pub use brain::{select_brain, Brain};
pub use orchestrator::triage;
