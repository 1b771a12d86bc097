//! Error taxonomy for pipeline invocations
//!
//! Only two things can go wrong once the process is configured: the caller
//! supplied no question, or a backend call failed. Missing fields inside an
//! individual search result are not errors; the retrieval stage fills them
//! with defaults instead.

use std::fmt;

use thiserror::Error;

/// The four pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Retrieval,
    Synthesis,
    Composition,
    Review,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Retrieval,
        Stage::Synthesis,
        Stage::Composition,
        Stage::Review,
    ];

    /// 1-based position in the pipeline
    pub fn number(self) -> usize {
        match self {
            Stage::Retrieval => 1,
            Stage::Synthesis => 2,
            Stage::Composition => 3,
            Stage::Review => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Retrieval => "Retrieval",
            Stage::Synthesis => "Synthesis",
            Stage::Composition => "Composition",
            Stage::Review => "Review",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which external service raised a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Search,
    Generation,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Search => f.write_str("search"),
            BackendKind::Generation => f.write_str("generation"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Empty or whitespace-only question; never reaches a backend
    #[error("no research question supplied")]
    Input,

    #[error("{stage} stage failed: {backend} backend error: {source}")]
    Backend {
        stage: Stage,
        backend: BackendKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn backend(stage: Stage, backend: BackendKind, source: anyhow::Error) -> Self {
        PipelineError::Backend {
            stage,
            backend,
            source: source.into(),
        }
    }

    /// Stage that raised the error, if it came from a backend call
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::Backend { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, PipelineError::Input)
    }
}
