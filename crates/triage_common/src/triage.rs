//! Classification and triage result types.

use serde::{Deserialize, Serialize};

/// Ticket category assigned by a brain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Account,
    Billing,
    Outage,
    Security,
    Feature,
    Bug,
    Other,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Account => "account",
            Self::Billing => "billing",
            Self::Outage => "outage",
            Self::Security => "security",
            Self::Feature => "feature",
            Self::Bug => "bug",
            Self::Other => "other",
        };
        write!(f, "{}", s)
    }
}

impl Category {
    /// Lenient parse: external models may emit anything, and the repair
    /// pipeline owns correctness, so unknown strings map to Other.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "account" => Self::Account,
            "billing" => Self::Billing,
            "outage" => Self::Outage,
            "security" => Self::Security,
            "feature" => Self::Feature,
            "bug" => Self::Bug,
            _ => Self::Other,
        }
    }
}

/// Ticket priority, P0 highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        };
        write!(f, "{}", s)
    }
}

impl Priority {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "P0" => Some(Self::P0),
            "P1" => Some(Self::P1),
            "P2" => Some(Self::P2),
            "P3" => Some(Self::P3),
            _ => None,
        }
    }
}

/// Output of a brain's classify step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub priority: Priority,
    pub routing: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub confidence: f64,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            category: Category::Other,
            priority: Priority::P3,
            routing: String::new(),
            tags: Vec::new(),
            confidence: 0.5,
        }
    }
}

/// Output of a brain's draft_reply step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseDraft {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub customer_reply: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Final triage output: classification + draft + version stamps.
///
/// After enforcement and normalization, routing and customer_reply are
/// non-empty and no forbidden phrase appears in the reply or questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    pub category: Category,
    pub priority: Priority,
    pub routing: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub confidence: f64,

    pub summary: String,
    pub customer_reply: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,

    pub prompt_version: String,
    pub model_version: String,
}
