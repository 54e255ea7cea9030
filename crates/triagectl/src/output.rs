//! Colored evaluation output.

use owo_colors::OwoColorize;
use triage_common::CaseVerdict;

/// Print the pass/fail summary with per-check failure detail and a JSON
/// snapshot of each failing output.
pub fn print_summary(verdicts: &[CaseVerdict]) {
    let passed = verdicts.iter().filter(|v| v.passed).count();
    println!("\nPrompt Regression Results: {}/{} passed\n", passed, verdicts.len());

    for verdict in verdicts {
        if verdict.passed {
            println!("[{}] {}", "PASS".green(), verdict.id);
        } else {
            println!("[{}] {}", "FAIL".red(), verdict.id);
        }

        if let Some(err) = &verdict.schema_err {
            println!("  - Schema error: {}", err);
        }

        for check in verdict.checks.iter().filter(|c| !c.ok) {
            println!("  - Check failed: {}  details={}", check.name, check.details);
        }

        if !verdict.passed {
            println!("  - Output snapshot:");
            match serde_json::to_string_pretty(&verdict.output) {
                Ok(pretty) => println!("{}", pretty),
                Err(e) => println!("    (unprintable: {})", e),
            }
        }
        println!();
    }
}
