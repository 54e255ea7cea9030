//! Prompt regression evaluation.
//!
//! Runs every dataset case through the orchestrator, validates the output
//! against the published schema, and applies the expectation checks. Every
//! check reports its own ok/details regardless of overall pass/fail so a
//! partial failure stays diagnosable. Schema failures are captured in the
//! verdict, never thrown.

use anyhow::{anyhow, Context, Result};
use jsonschema::{Draft, JSONSchema};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use triage_common::{
    requirements, CaseVerdict, Check, Expectation, Signals, Ticket, TriageConfig,
};
use triage_core::{orchestrator, select_brain, Brain};

use crate::output;

/// One evaluation dataset record.
#[derive(Debug, Deserialize)]
pub struct EvalCase {
    pub id: String,
    pub ticket: Ticket,
    #[serde(default)]
    pub signals: Signals,
    pub expect: Expectation,
}

/// Aggregate outcome of one evaluation run.
#[derive(Debug, Clone, Copy)]
pub struct EvalSummary {
    pub passed: usize,
    pub total: usize,
}

/// Load newline-delimited JSON cases; blank lines are skipped.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<EvalCase>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading dataset {}", path.display()))?;

    let mut cases = Vec::new();
    for (lineno, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let case: EvalCase = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: invalid case", path.display(), lineno + 1))?;
        cases.push(case);
    }
    Ok(cases)
}

/// Load and compile the published output schema.
pub fn load_schema(path: impl AsRef<Path>) -> Result<JSONSchema> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading schema {}", path.display()))?;
    let doc: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing schema {}", path.display()))?;

    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&doc)
        .map_err(|e| anyhow!("invalid schema {}: {}", path.display(), e))
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let h = haystack.to_lowercase();
    needles.iter().any(|n| h.contains(&n.to_lowercase()))
}

/// Run one case and collect its verdict.
pub async fn run_case(
    brain: &dyn Brain,
    config: &TriageConfig,
    schema: &JSONSchema,
    case: &EvalCase,
) -> Result<CaseVerdict> {
    let output = orchestrator::triage(brain, config, &case.ticket, &case.signals).await?;
    let expect = &case.expect;

    let output_value = serde_json::to_value(&output)?;
    let (schema_ok, schema_err) = match schema.validate(&output_value) {
        Ok(()) => (true, None),
        Err(errors) => {
            let joined = errors.map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
            (false, Some(joined))
        }
    };

    let mut checks = Vec::new();

    checks.push(Check::new(
        "category",
        output.category == expect.category,
        json!({"got": output.category, "want": expect.category}),
    ));

    checks.push(Check::new(
        "priority_in",
        expect.priority_in.is_empty() || expect.priority_in.contains(&output.priority),
        json!({"got": output.priority, "allowed": expect.priority_in}),
    ));

    if expect.routing_contains.is_empty() {
        checks.push(Check::new("routing_contains", true, Value::Null));
    } else {
        checks.push(Check::new(
            "routing_contains",
            contains_any(&output.routing, &expect.routing_contains),
            json!({"got": output.routing, "need_any": expect.routing_contains}),
        ));
    }

    checks.push(Check::new(
        "min_confidence",
        output.confidence >= expect.min_confidence,
        json!({"got": output.confidence, "min": expect.min_confidence}),
    ));

    if expect.must_ask_about.is_empty() {
        checks.push(Check::new("must_ask_about", true, Value::Null));
    } else {
        let q_text = output.questions.join(" ").to_lowercase();
        let missing: Vec<&String> = expect
            .must_ask_about
            .iter()
            .filter(|phrase| !requirements::requirement_met(&q_text, phrase))
            .collect();
        checks.push(Check::new(
            "must_ask_about",
            missing.is_empty(),
            json!({"missing": missing}),
        ));
    }

    if expect.must_include_actions.is_empty() {
        checks.push(Check::new("must_include_actions", true, Value::Null));
    } else {
        let a_text = output.actions.join(" ").to_lowercase();
        let missing: Vec<&String> = expect
            .must_include_actions
            .iter()
            .filter(|item| !a_text.contains(&item.to_lowercase()))
            .collect();
        checks.push(Check::new(
            "must_include_actions",
            missing.is_empty(),
            json!({"missing": missing}),
        ));
    }

    if expect.must_not_say.is_empty() {
        checks.push(Check::new("must_not_say", true, Value::Null));
    } else {
        let text = format!("{} {}", output.customer_reply, output.summary).to_lowercase();
        let found: Vec<&String> = expect
            .must_not_say
            .iter()
            .filter(|phrase| text.contains(&phrase.to_lowercase()))
            .collect();
        checks.push(Check::new(
            "must_not_say",
            found.is_empty(),
            json!({"found": found}),
        ));
    }

    let passed = schema_ok && checks.iter().all(|c| c.ok);

    Ok(CaseVerdict {
        id: case.id.clone(),
        passed,
        schema_ok,
        schema_err,
        checks,
        output,
    })
}

/// Run the whole dataset and print the summary.
pub async fn run(dataset_path: &str, schema_path: &str) -> Result<EvalSummary> {
    let config = TriageConfig::from_env();
    let brain = select_brain(&config).context("selecting brain")?;
    let schema = load_schema(schema_path)?;
    let cases = load_dataset(dataset_path)?;

    let mut verdicts = Vec::with_capacity(cases.len());
    for case in &cases {
        let verdict = run_case(brain.as_ref(), &config, &schema, case)
            .await
            .with_context(|| format!("running case {}", case.id))?;
        verdicts.push(verdict);
    }

    output::print_summary(&verdicts);

    Ok(EvalSummary {
        passed: verdicts.iter().filter(|v| v.passed).count(),
        total: verdicts.len(),
    })
}
