//! Stage 4: Quality review of the composed report
//!
//! The score is requested from the backend but never parsed here; the reply
//! is opaque text for the reader.

use research_pipeline_sdk::log_backend_call;

use crate::backends::GenerationBackend;
use crate::error::{BackendKind, PipelineError, Stage};
use crate::pipeline::prompts::review_prompt;
use crate::pipeline::types::{CompositionRecord, ReviewRecord};

pub async fn review(
    generation: &dyn GenerationBackend,
    record: CompositionRecord,
) -> Result<ReviewRecord, PipelineError> {
    let prompt = review_prompt(&record);
    log_backend_call!(Stage::Review.number(), BackendKind::Generation, prompt.len());

    let feedback = generation
        .generate(&prompt)
        .await
        .map_err(|e| PipelineError::backend(Stage::Review, BackendKind::Generation, e))?;

    Ok(ReviewRecord::new(record, feedback))
}
