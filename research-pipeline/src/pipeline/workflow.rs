//! Pipeline driver
//!
//! Runs retrieval → synthesis → composition → review strictly in order,
//! handing each stage's record to the next by value. The first failing stage
//! ends the invocation; there is no retry and no partial result.
//!
//! The primary entry point is [`Pipeline::run`]. Backends are injected at
//! construction so several invocations can share (or not share) clients.

use std::sync::Arc;
use std::time::Duration;

use research_pipeline_sdk::{log_run_complete, log_run_failed, log_run_start, RunHandle};

use crate::backends::{AnthropicGeneration, GenerationBackend, SearchBackend, TavilySearch};
use crate::config::{PipelineConfig, DEFAULT_MAX_RESULTS};
use crate::error::{BackendKind, PipelineError, Stage};
use crate::pipeline::{
    stage1_retrieve::retrieve,
    stage2_synthesize::synthesize,
    stage3_compose::compose,
    stage4_review::review,
    types::{Query, ReviewRecord, StageRecord},
};
use crate::pipeline_utils::execute_stage;

/// Per-driver knobs that are not backend credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Result count requested from the search backend
    pub max_results: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl From<&PipelineConfig> for PipelineSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            max_results: config.max_results,
        }
    }
}

/// The driver: two injected backends and the retrieval page size
///
/// # Examples
///
/// ```no_run
/// use research_pipeline::config::PipelineConfig;
/// use research_pipeline::pipeline::{final_output, Pipeline};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = PipelineConfig {
///     anthropic_api_key: Some("sk-ant-...".to_string()),
///     tavily_api_key: Some("tvly-...".to_string()),
///     ..Default::default()
/// };
/// let pipeline = Pipeline::from_config(&config)?;
/// let record = pipeline.run("What are the latest trends in RAG architecture?").await?;
/// println!("{}", final_output(&record));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Pipeline {
    search: Arc<dyn SearchBackend>,
    generation: Arc<dyn GenerationBackend>,
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(
        search: Arc<dyn SearchBackend>,
        generation: Arc<dyn GenerationBackend>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            search,
            generation,
            settings,
        }
    }

    /// Build the HTTP backends described by `config`
    pub fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let timeout = Duration::from_secs(config.request_timeout_secs);

        let search = TavilySearch::new(
            config.tavily_api_key.clone().unwrap_or_default(),
            config.tavily_base_url.clone(),
            timeout,
        )
        .map_err(|e| PipelineError::Config(format!("{:#}", e)))?;

        let generation = AnthropicGeneration::new(
            config.anthropic_api_key.clone().unwrap_or_default(),
            config.model.clone(),
            config.max_tokens,
            config.anthropic_base_url.clone(),
            timeout,
        )
        .map_err(|e| PipelineError::Config(format!("{:#}", e)))?;

        Ok(Self::new(
            Arc::new(search),
            Arc::new(generation),
            PipelineSettings::from(config),
        ))
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Run all four stages for one question
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Input`] if `question` is empty or whitespace; no
    ///   backend is contacted
    /// - [`PipelineError::Backend`] naming the first stage whose backend call
    ///   failed; later stages never run
    pub async fn run(&self, question: &str) -> Result<ReviewRecord, PipelineError> {
        let query = Query::new(question)?;

        let handle = RunHandle::new();
        log_run_start!(handle.id, query);
        tracing::debug!(run_id = %handle.id, "pipeline run started");

        match self.execute(query).await {
            Ok(record) => {
                log_run_complete!(handle.id, handle.elapsed_ms());
                Ok(record)
            }
            Err(e) => {
                log_run_failed!(handle.id, e);
                Err(e)
            }
        }
    }

    async fn execute(&self, query: Query) -> Result<ReviewRecord, PipelineError> {
        let search = self.search.as_ref();
        let generation = self.generation.as_ref();
        let max_results = self.settings.max_results;

        let retrieved = execute_stage(Stage::Retrieval, move || async move {
            let record = retrieve(search, query, max_results).await?;
            let summary = format!("{} sources", record.sources().len());
            Ok((record, summary))
        })
        .await?;

        let analyzed = execute_stage(Stage::Synthesis, move || async move {
            let record = synthesize(generation, retrieved).await?;
            let summary = format!("{} chars of analysis", record.analysis_text().len());
            Ok((record, summary))
        })
        .await?;

        let composed = execute_stage(Stage::Composition, move || async move {
            let record = compose(generation, analyzed).await?;
            let summary = format!("{} chars of report", record.report_text().len());
            Ok((record, summary))
        })
        .await?;

        execute_stage(Stage::Review, move || async move {
            let record = review(generation, composed).await?;
            let summary = format!("{} chars of review", record.review_text().len());
            Ok((record, summary))
        })
        .await
    }
}

/// Build a pipeline from `config` and run it once
pub async fn run_research_pipeline(
    config: &PipelineConfig,
    question: &str,
) -> Result<ReviewRecord, PipelineError> {
    // Blank input is reported as such even when credentials are missing
    Query::new(question)?;
    Pipeline::from_config(config)?.run(question).await
}

/// Backend that raised a failure, for callers that only hold the error
pub fn failed_backend(error: &PipelineError) -> Option<BackendKind> {
    match error {
        PipelineError::Backend { backend, .. } => Some(*backend),
        _ => None,
    }
}
