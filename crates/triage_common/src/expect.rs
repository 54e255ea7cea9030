//! Expectation specs and evaluation verdicts.

use crate::triage::{Category, Priority, TriageResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Human-authored expectation for one evaluation case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expectation {
    pub category: Category,

    #[serde(default)]
    pub priority_in: Vec<Priority>,

    /// Any-match: routing must contain at least one of these substrings
    #[serde(default)]
    pub routing_contains: Vec<String>,

    #[serde(default)]
    pub min_confidence: f64,

    /// Alias-aware phrase checks against the questions
    #[serde(default)]
    pub must_ask_about: Vec<String>,

    /// Direct substring checks against the actions
    #[serde(default)]
    pub must_include_actions: Vec<String>,

    /// Phrases that must not appear in customer_reply + summary
    #[serde(default)]
    pub must_not_say: Vec<String>,
}

/// One named expectation check with its diagnostic details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub details: Value,
}

impl Check {
    pub fn new(name: &str, ok: bool, details: Value) -> Self {
        Self {
            name: name.to_string(),
            ok,
            details,
        }
    }
}

/// Outcome of evaluating one case: schema validity plus every check,
/// reported regardless of overall pass/fail so partial failures stay
/// diagnosable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseVerdict {
    pub id: String,
    pub passed: bool,
    pub schema_ok: bool,
    pub schema_err: Option<String>,
    pub checks: Vec<Check>,
    pub output: TriageResult,
}
