//! External collaborators: web search and text generation
//!
//! Both are black boxes behind a trait so the driver can be handed real HTTP
//! clients in production and counting fakes in tests.

use anyhow::Result;
use research_pipeline_sdk::async_trait;
use serde::Deserialize;

mod anthropic;
mod tavily;

pub use anthropic::AnthropicGeneration;
pub use tavily::TavilySearch;

/// One ranked hit as returned by a search backend, before normalization
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Web search: query string in, ranked results out
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawSearchResult>>;
}

/// Text generation: prompt in, full reply text out
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
