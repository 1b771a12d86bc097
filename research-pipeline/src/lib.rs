// Backend traits and HTTP clients (web search, text generation)
pub mod backends;

// Process-wide configuration
pub mod config;

// Error taxonomy
pub mod error;

// Research pipeline: records, prompts, stages, driver
pub mod pipeline;

// Stage execution helpers
pub mod pipeline_utils;

pub use error::{BackendKind, PipelineError, Stage};
