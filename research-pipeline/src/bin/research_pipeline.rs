/*
┌─────────────────────────────────────────────────────────────────────────────┐
│                          RESEARCH PIPELINE                                   │
└─────────────────────────────────────────────────────────────────────────────┘

  Stage 1: RETRIEVAL
    ├─> Web search (Tavily), max N results
    └─> Output: question + ordered sources

         ↓

  Stage 2: SYNTHESIS
    ├─> Prompt: question + numbered source snippets
    └─> Output: 3-5 themed insights, conflicts, gaps

         ↓

  Stage 3: COMPOSITION
    ├─> Prompt: question + analysis
    ├─> Report body from the model
    └─> Local "## Sources" block appended

         ↓

  Stage 4: REVIEW
    ├─> Prompt: question + full report
    └─> Output: score, strengths, improvements

EXAMPLE COMMANDS:

  # One question, report on stdout
  research-pipeline "What are the latest trends in RAG architecture?"

  # Save to research_report_<question>.md
  research-pipeline --save "What is RAG?"

  # JSON with every record field, 5 minute limit
  research-pipeline --format json --timeout-secs 300 "What is RAG?"

  # One run per stdin line
  research-pipeline --interactive
*/

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use research_pipeline::config::PipelineConfig;
use research_pipeline::pipeline::cli::{
    failure_hint, read_question, Args, EXIT_FAILURE, EXIT_USAGE, USAGE_WARNING,
};
use research_pipeline::pipeline::output::{render, save_report};
use research_pipeline::pipeline::{Pipeline, ReviewRecord};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.needs_question() {
        eprintln!("{}", USAGE_WARNING);
        eprintln!("Usage: research-pipeline \"<question>\"  (or --interactive)");
        std::process::exit(EXIT_USAGE);
    }

    let config = PipelineConfig::from(&args);
    let pipeline = match Pipeline::from_config(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("Please check your API keys in the .env file and try again.");
            std::process::exit(EXIT_FAILURE);
        }
    };

    if args.interactive {
        return interactive(&pipeline, &args).await;
    }

    let question = args.question().unwrap_or_default();
    match answer(&pipeline, &args, question).await {
        Ok(()) => Ok(()),
        Err(e) => {
            report_failure(&e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

/// One pipeline invocation, optionally bounded by a wall-clock timeout
async fn run_once(pipeline: &Pipeline, question: &str, timeout_secs: Option<u64>) -> Result<ReviewRecord> {
    match timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), pipeline.run(question))
            .await
            .map_err(|_| anyhow!("research run exceeded {}s timeout", secs))?
            .map_err(Into::into),
        None => pipeline.run(question).await.map_err(Into::into),
    }
}

/// Run, print and optionally save one report
async fn answer(pipeline: &Pipeline, args: &Args, question: &str) -> Result<()> {
    let record = run_once(pipeline, question, args.timeout_secs).await?;
    let rendered = render(&record, args.format)?;

    eprintln!("\x1b[32m✅ Research Complete!\x1b[0m");
    println!("{}", rendered);

    if let Some(path) = args.destination(question) {
        let saved = save_report(&path, &rendered).await?;
        eprintln!("📥 Report saved to: {}", saved.display());
    }
    Ok(())
}

fn report_failure(error: &anyhow::Error) {
    eprintln!("❌ An error occurred: {:#}", error);
    eprintln!("{}", failure_hint(error));
}

/// Each stdin line is an independent invocation; failures do not end the loop
async fn interactive(pipeline: &Pipeline, args: &Args) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stderr = tokio::io::stderr();

    loop {
        stderr
            .write_all(b"\nWhat would you like to research? > ")
            .await
            .context("Failed to write prompt")?;
        stderr.flush().await.context("Failed to flush prompt")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        let Some(question) = read_question(&line) else {
            eprintln!("{}", USAGE_WARNING);
            continue;
        };

        eprintln!("🔄 Multi-agent workflow in progress...");
        if let Err(e) = answer(pipeline, args, question).await {
            report_failure(&e);
        }
    }
    Ok(())
}
