//! Stage execution with automatic logging

use std::future::Future;

use research_pipeline_sdk::{
    log_error_console, log_stage_complete, log_stage_complete_console, log_stage_failed,
    log_stage_start, log_stage_start_console,
};

use crate::error::{PipelineError, Stage};

/// Console title and progress line for a stage
pub fn stage_banner(stage: Stage) -> (&'static str, &'static str) {
    match stage {
        Stage::Retrieval => ("🔍 Researcher", "Researcher Agent: Searching the web..."),
        Stage::Synthesis => ("🧠 Analyst", "Analyst Agent: Analyzing research data..."),
        Stage::Composition => ("✍️ Writer", "Writer Agent: Creating final report..."),
        Stage::Review => ("✅ Quality Checker", "Quality Checker Agent: Reviewing report..."),
    }
}

/// Execute a single stage with automatic logging
///
/// Wraps stage execution with:
/// - `log_stage_start` and a console banner before execution
/// - `log_stage_complete` on success
/// - `log_stage_failed` on error
///
/// The executor returns `(record, summary)`; only the record is handed back.
///
/// # Example
/// ```rust,ignore
/// let record = execute_stage(Stage::Retrieval, || async {
///     let record = retrieve(search, query, 5).await?;
///     let summary = format!("{} sources", record.sources().len());
///     Ok((record, summary))
/// })
/// .await?;
/// ```
pub async fn execute_stage<F, Fut, R>(stage: Stage, executor: F) -> Result<R, PipelineError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(R, String), PipelineError>>,
{
    let (title, description) = stage_banner(stage);

    log_stage_start!(stage.number(), stage.name(), Stage::ALL.len());
    log_stage_start_console!(stage.number(), title, description);

    match executor().await {
        Ok((record, summary)) => {
            log_stage_complete!(stage.number(), stage.name(), summary);
            log_stage_complete_console!(stage.number());
            Ok(record)
        }
        Err(e) => {
            log_stage_failed!(stage.number(), stage.name(), e.to_string());
            log_error_console!(format!("{} stage failed: {}", stage.name(), e));
            Err(e)
        }
    }
}
