//! Presentation helpers: display text, JSON rendering and report files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use research_pipeline_sdk::log_report_saved;
use serde::Serialize;
use tokio::fs;

use crate::pipeline::types::ReviewRecord;

pub const REVIEW_HEADING: &str = "## Quality Review";

/// How the final record is rendered for the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Report body, then the review under its own heading
pub fn final_output(record: &ReviewRecord) -> String {
    format!(
        "{}\n\n---\n\n{}\n\n{}\n",
        record.report_text(),
        REVIEW_HEADING,
        record.review_text()
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    #[serde(flatten)]
    record: &'a ReviewRecord,
}

pub fn render(record: &ReviewRecord, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(final_output(record)),
        OutputFormat::Json => {
            let report = JsonReport {
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                record,
            };
            serde_json::to_string_pretty(&report).context("failed to serialize report")
        }
    }
}

/// `research_report_<first 30 chars>.md`
///
/// Anything other than alphanumerics, `-` and `_` becomes `_`, so the name is
/// always a single path component.
pub fn report_file_name(question: &str) -> String {
    let stem: String = question
        .chars()
        .take(30)
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("research_report_{}.md", stem)
}

/// Write rendered output to `path`, creating parent directories
pub async fn save_report(path: &Path, contents: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    log_report_saved!(path.display());
    Ok(path.to_path_buf())
}
