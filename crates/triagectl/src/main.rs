//! Triage Control - runs the evaluation dataset against the output schema
//! and prints a pass/fail summary with per-check failure detail.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use triagectl::eval;

#[derive(Parser)]
#[command(name = "triagectl")]
#[command(about = "Ticket triage - prompt regression runner", long_about = None)]
#[command(version)]
struct Cli {
    /// Evaluation dataset (newline-delimited JSON cases)
    #[arg(long, default_value = "eval/datasets/prompt_regression.jsonl")]
    dataset: String,

    /// Output schema the final result must validate against
    #[arg(long, default_value = "schemas/triage_output.schema.json")]
    schema: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .init();

    let cli = Cli::parse();
    let summary = eval::run(&cli.dataset, &cli.schema).await?;

    if summary.passed < summary.total {
        std::process::exit(1);
    }
    Ok(())
}
