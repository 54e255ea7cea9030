//! Versioned prompt templates.
//!
//! Templates live under `prompts/{version}/{name}.md` and are rendered by
//! literal `{{name}}` token replacement. No escaping, no conditionals.

use std::path::Path;
use triage_common::TriageError;

/// Default root directory containing versioned prompt templates.
pub const PROMPTS_DIR: &str = "prompts";

/// Load a prompt template as raw text.
pub fn load_prompt(root: &Path, version: &str, name: &str) -> Result<String, TriageError> {
    let path = root.join(version).join(format!("{}.md", name));
    Ok(std::fs::read_to_string(path)?)
}

/// Replace each `{{key}}` token with its value. Unknown tokens are left
/// in place.
pub fn render(template: &str, variables: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (key, value) in variables {
        out = out.replace(&format!("{{{{{}}}}}", key), value);
    }
    out
}
