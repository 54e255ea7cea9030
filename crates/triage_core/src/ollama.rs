//! Ollama-backed brain.
//!
//! The only I/O-performing classifier variant: renders a versioned prompt
//! with the ticket/signals embedded as JSON, issues one generate call to
//! the local model endpoint, and parses the response text as strict JSON.
//! Transport and format failures propagate; callers decide about retries.

use crate::brain::Brain;
use crate::prompts;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use triage_common::{
    Category, Classification, ModelConfig, Priority, ResponseDraft, Signals, Ticket, TriageError,
};

/// Maximum characters of model output quoted in a format error.
const FORMAT_ERROR_EXCERPT_CHARS: usize = 200;

pub struct OllamaBrain {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f64,
    top_p: f64,
    prompt_version: String,
    prompt_root: PathBuf,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaBrain {
    pub fn new(cfg: ModelConfig, prompt_version: String) -> Result<Self, TriageError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_sec))
            .build()
            .map_err(|e| TriageError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            prompt_version,
            prompt_root: PathBuf::from(prompts::PROMPTS_DIR),
        })
    }

    /// Override the prompt template root (tests, relocated installs).
    pub fn with_prompt_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.prompt_root = root.into();
        self
    }

    async fn generate(&self, prompt: &str) -> Result<String, TriageError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                top_p: self.top_p,
            },
        };

        info!("[>]  model call [{}] ({} chars)", self.model, prompt.len());

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TriageError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TriageError::Transport(format!(
                "model endpoint returned {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TriageError::Transport(format!("unreadable response body: {}", e)))?;

        info!("[<]  model response ({} chars)", body.response.len());
        Ok(body.response)
    }
}

#[async_trait]
impl Brain for OllamaBrain {
    async fn classify(
        &self,
        ticket: &Ticket,
        signals: &Signals,
    ) -> Result<Classification, TriageError> {
        let template = prompts::load_prompt(&self.prompt_root, &self.prompt_version, "classify")?;
        let prompt = prompts::render(
            &template,
            &[
                ("ticket_json", serde_json::to_string(ticket)?),
                ("signals_json", serde_json::to_string(signals)?),
            ],
        );

        let text = self.generate(&prompt).await?;
        let value = json_object(&text)?;
        Ok(classification_from_value(&value))
    }

    async fn draft_reply(
        &self,
        ticket: &Ticket,
        classification: &Classification,
        signals: &Signals,
    ) -> Result<ResponseDraft, TriageError> {
        let template = prompts::load_prompt(&self.prompt_root, &self.prompt_version, "respond")?;
        let prompt = prompts::render(
            &template,
            &[
                ("ticket_json", serde_json::to_string(ticket)?),
                ("signals_json", serde_json::to_string(signals)?),
                ("classification_json", serde_json::to_string(classification)?),
            ],
        );

        let text = self.generate(&prompt).await?;
        let value = json_object(&text)?;
        Ok(draft_from_value(&value))
    }
}

/// Locate and parse the JSON object in model output text.
///
/// Whole-string parse first, then the substring between the first `{` and
/// the last `}`. Anything else is a format error carrying a truncated
/// excerpt of the offending text.
pub fn json_object(text: &str) -> Result<Value, TriageError> {
    let trimmed = text.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        if let Ok(value) = serde_json::from_str(trimmed) {
            return Ok(value);
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            if let Ok(value) = serde_json::from_str(&trimmed[start..=end]) {
                debug!("extracted embedded JSON object from model output");
                return Ok(value);
            }
        }
    }

    let excerpt: String = trimmed.chars().take(FORMAT_ERROR_EXCERPT_CHARS).collect();
    Err(TriageError::ModelFormat(excerpt))
}

/// Build a Classification from model JSON with safe defaults for missing
/// or null fields. Partial model output must never panic.
pub fn classification_from_value(v: &Value) -> Classification {
    Classification {
        category: v
            .get("category")
            .and_then(Value::as_str)
            .map(Category::parse)
            .unwrap_or(Category::Other),
        priority: v
            .get("priority")
            .and_then(Value::as_str)
            .and_then(Priority::from_str)
            .unwrap_or(Priority::P3),
        routing: v
            .get("routing")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        tags: string_list(v.get("tags")),
        confidence: v.get("confidence").and_then(Value::as_f64).unwrap_or(0.5),
    }
}

/// Build a ResponseDraft from model JSON with safe defaults.
pub fn draft_from_value(v: &Value) -> ResponseDraft {
    ResponseDraft {
        summary: string_field(v.get("summary")),
        customer_reply: string_field(v.get("customer_reply")),
        questions: string_list(v.get("questions")),
        actions: string_list(v.get("actions")),
    }
}

fn string_field(v: Option<&Value>) -> String {
    v.and_then(Value::as_str).unwrap_or_default().to_string()
}

fn string_list(v: Option<&Value>) -> Vec<String> {
    v.and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|x| x.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
