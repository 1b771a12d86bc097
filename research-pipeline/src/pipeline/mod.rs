//! Research pipeline module
//!
//! Four stages composed strictly in sequence: web retrieval, thematic
//! synthesis, report composition and quality review. Each stage consumes its
//! predecessor's record and produces the next one.

pub mod citations;
pub mod cli;
pub mod output;
pub mod prompts;
pub mod stage1_retrieve;
pub mod stage2_synthesize;
pub mod stage3_compose;
pub mod stage4_review;
pub mod types;
pub mod workflow;

// Re-export commonly used types
pub use output::{final_output, OutputFormat};
pub use types::{
    CompositionRecord, Query, RetrievalRecord, ReviewRecord, SourceItem, StageMarker,
    StageRecord, SynthesisRecord,
};
pub use workflow::{run_research_pipeline, Pipeline, PipelineSettings};
