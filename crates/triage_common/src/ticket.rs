//! Ticket and signal inputs.
//!
//! Both arrive from upstream and are consumed read-only. Every signal field
//! is optional; malformed or missing hints must never break classification.

use serde::{Deserialize, Serialize};

/// Raw user-submitted support request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Ticket {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Structured hints extracted upstream of classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    /// HTTP status family seen in the ticket, e.g. "5xx"
    #[serde(default)]
    pub http_status_family: Option<String>,

    /// Symptom class, e.g. "error_rate_spike", "auth_failure", "feature_request"
    #[serde(default)]
    pub symptom_type: Option<String>,

    /// Subsystem the reporter suspects, e.g. "auth"
    #[serde(default)]
    pub suspected_area: Option<String>,

    /// Blast radius, e.g. "many_users"
    #[serde(default)]
    pub impact_scope: Option<String>,

    #[serde(default)]
    pub security_risk: bool,

    #[serde(default)]
    pub money_involved: bool,

    /// Reported error occurrence count, if the ticket mentioned one
    #[serde(default)]
    pub error_count: Option<i64>,

    /// Free-text notes about ambiguous wording in the ticket
    #[serde(default)]
    pub ambiguity_notes: Vec<String>,
}
