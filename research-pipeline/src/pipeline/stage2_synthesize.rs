//! Stage 2: Thematic analysis of the retrieved sources

use research_pipeline_sdk::log_backend_call;

use crate::backends::GenerationBackend;
use crate::error::{BackendKind, PipelineError, Stage};
use crate::pipeline::prompts::analysis_prompt;
use crate::pipeline::types::{RetrievalRecord, SynthesisRecord};

/// One generation call; the reply becomes `analysis_text` unmodified
pub async fn synthesize(
    generation: &dyn GenerationBackend,
    record: RetrievalRecord,
) -> Result<SynthesisRecord, PipelineError> {
    let prompt = analysis_prompt(&record);
    log_backend_call!(Stage::Synthesis.number(), BackendKind::Generation, prompt.len());

    let analysis = generation
        .generate(&prompt)
        .await
        .map_err(|e| PipelineError::backend(Stage::Synthesis, BackendKind::Generation, e))?;

    if analysis.is_empty() {
        tracing::warn!("generation backend returned an empty analysis");
    }

    Ok(SynthesisRecord::new(record, analysis))
}
