//! Stage 1: Web retrieval
//!
//! One search call, results normalized into [`SourceItem`]s. Partial metadata
//! is tolerated; only a failed call aborts the stage.

use research_pipeline_sdk::log_backend_call;

use crate::backends::SearchBackend;
use crate::error::{BackendKind, PipelineError, Stage};
use crate::pipeline::types::{Query, RetrievalRecord, SourceItem};

/// Query the search backend once and keep its relevance order
pub async fn retrieve(
    search: &dyn SearchBackend,
    query: Query,
    max_results: usize,
) -> Result<RetrievalRecord, PipelineError> {
    log_backend_call!(Stage::Retrieval.number(), BackendKind::Search, query.as_str().len());

    let raw = search
        .search(query.as_str(), max_results)
        .await
        .map_err(|e| PipelineError::backend(Stage::Retrieval, BackendKind::Search, e))?;

    if raw.len() > max_results {
        tracing::warn!(
            returned = raw.len(),
            max_results,
            "search backend returned more results than requested; truncating"
        );
    }

    let sources: Vec<SourceItem> = raw
        .into_iter()
        .take(max_results)
        .map(SourceItem::from_raw)
        .collect();

    Ok(RetrievalRecord::new(query, sources))
}
