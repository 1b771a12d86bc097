//! Stage 3: Report composition
//!
//! The report body comes from the generation backend; the citation block is
//! appended locally from the carried-forward sources.

use research_pipeline_sdk::log_backend_call;

use crate::backends::GenerationBackend;
use crate::error::{BackendKind, PipelineError, Stage};
use crate::pipeline::citations::render_citations;
use crate::pipeline::prompts::report_prompt;
use crate::pipeline::types::{CompositionRecord, StageRecord, SynthesisRecord};

pub async fn compose(
    generation: &dyn GenerationBackend,
    record: SynthesisRecord,
) -> Result<CompositionRecord, PipelineError> {
    let prompt = report_prompt(&record);
    log_backend_call!(Stage::Composition.number(), BackendKind::Generation, prompt.len());

    let body = generation
        .generate(&prompt)
        .await
        .map_err(|e| PipelineError::backend(Stage::Composition, BackendKind::Generation, e))?;

    let report = body + &render_citations(record.sources());
    Ok(CompositionRecord::new(record, report))
}
