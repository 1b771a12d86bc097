//! CLI argument parsing for the research pipeline

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    PipelineConfig, DEFAULT_ANTHROPIC_BASE_URL, DEFAULT_MAX_RESULTS, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TAVILY_BASE_URL,
};
use crate::error::{BackendKind, PipelineError};
use crate::pipeline::output::{report_file_name, OutputFormat};
use crate::pipeline::workflow::failed_backend;

/// Exit status when no question was supplied
pub const EXIT_USAGE: i32 = 2;
/// Exit status when configuration or a stage failed
pub const EXIT_FAILURE: i32 = 1;

pub const USAGE_WARNING: &str = "⚠️ Please enter a research question first.";

/// Research Pipeline CLI Arguments
#[derive(Parser, Debug, Clone)]
#[command(
    name = "research-pipeline",
    about = "Search the web, analyze, write and review a research report for one question"
)]
pub struct Args {
    /// Research question
    pub question: Option<String>,

    /// Read questions from stdin, one per line, running the pipeline for each
    #[arg(short, long, conflicts_with = "question")]
    pub interactive: bool,

    /// Write the rendered report to this path
    #[arg(short, long, conflicts_with_all = ["save", "interactive"])]
    pub output: Option<PathBuf>,

    /// Write the report to research_report_<question>.md in the current directory
    #[arg(long)]
    pub save: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Wall-clock limit for one pipeline invocation, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Anthropic API key for the generation backend
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    /// Model used for analysis, writing and review
    #[arg(long, env = "RESEARCH_PIPELINE_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum tokens per generation call
    #[arg(long, env = "RESEARCH_PIPELINE_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: usize,

    /// Anthropic API base URL
    #[arg(long, env = "ANTHROPIC_BASE_URL", default_value = DEFAULT_ANTHROPIC_BASE_URL)]
    pub anthropic_base_url: String,

    /// Tavily API key for the search backend
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    pub tavily_api_key: Option<String>,

    /// Number of web results to retrieve
    #[arg(long, env = "RESEARCH_PIPELINE_MAX_RESULTS", default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    /// Tavily API base URL
    #[arg(long, env = "TAVILY_BASE_URL", default_value = DEFAULT_TAVILY_BASE_URL)]
    pub tavily_base_url: String,

    /// HTTP timeout for each backend request, in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
}

impl Args {
    /// The question, if one was given and is not blank
    pub fn question(&self) -> Option<&str> {
        self.question
            .as_deref()
            .filter(|q| !q.trim().is_empty())
    }

    /// One-shot mode without a usable question: print usage, exit with [`EXIT_USAGE`]
    pub fn needs_question(&self) -> bool {
        !self.interactive && self.question().is_none()
    }

    /// Where the rendered report for `question` is written, if anywhere
    pub fn destination(&self, question: &str) -> Option<PathBuf> {
        match (&self.output, self.save) {
            (Some(path), _) => Some(path.clone()),
            (None, true) => Some(PathBuf::from(report_file_name(question))),
            (None, false) => None,
        }
    }
}

/// Question typed on one interactive line; `None` means re-prompt
pub fn read_question(line: &str) -> Option<&str> {
    let question = line.trim();
    (!question.is_empty()).then_some(question)
}

/// Follow-up line shown under a failed run
pub fn failure_hint(error: &anyhow::Error) -> &'static str {
    match error.downcast_ref::<PipelineError>().and_then(failed_backend) {
        Some(BackendKind::Search) => "Please check TAVILY_API_KEY in the .env file and try again.",
        Some(BackendKind::Generation) => {
            "Please check ANTHROPIC_API_KEY in the .env file and try again."
        }
        None => "Please check your API keys in the .env file and try again.",
    }
}

impl From<&Args> for PipelineConfig {
    fn from(args: &Args) -> Self {
        PipelineConfig {
            anthropic_api_key: args.anthropic_api_key.clone(),
            model: args.model.clone(),
            max_tokens: args.max_tokens,
            anthropic_base_url: args.anthropic_base_url.clone(),
            tavily_api_key: args.tavily_api_key.clone(),
            max_results: args.max_results,
            tavily_base_url: args.tavily_base_url.clone(),
            request_timeout_secs: args.request_timeout_secs,
        }
    }
}
