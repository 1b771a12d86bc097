// Re-export async trait for convenience
pub use async_trait::async_trait;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix written in front of every structured event on stderr.
pub const EVENT_PREFIX: &str = "__PIPELINE_EVENT__:";

/// Structured logging events emitted while a pipeline invocation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineLog {
    /// Invocation accepted a question and is about to run stage 1
    RunStarted {
        run_id: Uuid,
        question: String,
    },
    /// All four stages finished
    RunCompleted {
        run_id: Uuid,
        elapsed_ms: u64,
    },
    /// Invocation aborted at some stage
    RunFailed {
        run_id: Uuid,
        error: String,
    },
    /// Stage started
    StageStarted {
        stage: usize,
        name: String,
        total_stages: usize,
    },
    /// Stage completed
    StageCompleted {
        stage: usize,
        name: String,
        summary: Option<String>,
    },
    /// Stage failed
    StageFailed {
        stage: usize,
        name: String,
        error: String,
    },
    /// Outbound call to a backend started
    BackendCall {
        stage: usize,
        backend: String,
        request_bytes: usize,
    },
    /// Final report written to disk
    ReportSaved {
        file_path: String,
    },
}

impl PipelineLog {
    /// Render this event as a single prefixed line
    pub fn to_line(&self) -> Option<String> {
        serde_json::to_string(self)
            .ok()
            .map(|json| format!("{}{}", EVENT_PREFIX, json))
    }

    /// Emit this log event to stderr
    pub fn emit(&self) {
        if let Some(line) = self.to_line() {
            use std::io::Write;
            eprintln!("{}", line);
            let _ = std::io::stderr().flush();
        }
    }
}

/// Helper macros for pipeline logging
#[macro_export]
macro_rules! log_run_start {
    ($run_id:expr, $question:expr) => {
        $crate::PipelineLog::RunStarted {
            run_id: $run_id,
            question: $question.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_run_complete {
    ($run_id:expr, $elapsed_ms:expr) => {
        $crate::PipelineLog::RunCompleted {
            run_id: $run_id,
            elapsed_ms: $elapsed_ms,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_run_failed {
    ($run_id:expr, $error:expr) => {
        $crate::PipelineLog::RunFailed {
            run_id: $run_id,
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_stage_start {
    ($stage:expr, $name:expr, $total:expr) => {
        $crate::PipelineLog::StageStarted {
            stage: $stage,
            name: $name.to_string(),
            total_stages: $total,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_stage_complete {
    ($stage:expr, $name:expr) => {
        $crate::PipelineLog::StageCompleted {
            stage: $stage,
            name: $name.to_string(),
            summary: None,
        }
        .emit();
    };
    ($stage:expr, $name:expr, $summary:expr) => {
        $crate::PipelineLog::StageCompleted {
            stage: $stage,
            name: $name.to_string(),
            summary: Some($summary.to_string()),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_stage_failed {
    ($stage:expr, $name:expr, $error:expr) => {
        $crate::PipelineLog::StageFailed {
            stage: $stage,
            name: $name.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_backend_call {
    ($stage:expr, $backend:expr, $bytes:expr) => {
        $crate::PipelineLog::BackendCall {
            stage: $stage,
            backend: $backend.to_string(),
            request_bytes: $bytes,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_report_saved {
    ($path:expr) => {
        $crate::PipelineLog::ReportSaved {
            file_path: $path.to_string(),
        }
        .emit();
    };
}

/// Handle identifying one pipeline invocation
#[derive(Debug, Clone)]
pub struct RunHandle {
    pub id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl RunHandle {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Milliseconds since the handle was created
    pub fn elapsed_ms(&self) -> u64 {
        (chrono::Utc::now() - self.started_at)
            .num_milliseconds()
            .max(0) as u64
    }
}

impl Default for RunHandle {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Console Logging Macros
// ============================================================================
// Colored, human-readable progress lines. They go to stderr so that stdout
// carries nothing but the rendered report.
// ============================================================================

/// Logs the start of a pipeline stage with a header and description.
///
/// # Example
/// ```
/// use research_pipeline_sdk::log_stage_start_console;
/// log_stage_start_console!(1, "🔍 Researcher", "Searching the web...");
/// ```
///
/// Outputs:
/// ```text
/// ═══ STAGE 1: 🔍 Researcher ═══
/// Searching the web...
/// ```
#[macro_export]
macro_rules! log_stage_start_console {
    ($stage:expr, $title:expr, $description:expr) => {
        eprintln!("\x1b[1;36m═══ STAGE {}: {} ═══\x1b[0m", $stage, $title);
        eprintln!("\x1b[36m{}\x1b[0m", $description);
    };
}

/// Logs the completion of a pipeline stage.
///
/// # Example
/// ```
/// use research_pipeline_sdk::log_stage_complete_console;
/// log_stage_complete_console!(1);
/// ```
///
/// Outputs:
/// ```text
/// ✓ Stage 1 complete
/// ```
#[macro_export]
macro_rules! log_stage_complete_console {
    ($stage:expr) => {
        eprintln!("\x1b[32m✓ Stage {} complete\x1b[0m", $stage);
    };
}

/// Logs a failure line in red.
///
/// # Example
/// ```
/// use research_pipeline_sdk::log_error_console;
/// log_error_console!("search backend unreachable");
/// ```
#[macro_export]
macro_rules! log_error_console {
    ($message:expr) => {
        eprintln!("\x1b[31m✗ {}\x1b[0m", $message);
    };
}
