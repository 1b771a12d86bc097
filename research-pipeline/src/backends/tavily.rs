use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use research_pipeline_sdk::async_trait;
use serde::{Deserialize, Serialize};

use super::{RawSearchResult, SearchBackend};

pub struct TavilySearch {
    api_key: String,
    base_url: String,
    client: Client,
}

impl TavilySearch {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build Tavily HTTP client")?;
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl SearchBackend for TavilySearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RawSearchResult>> {
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", self.api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).context("invalid Tavily API key")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let body = SearchRequest { query, max_results };
        let url = format!("{}/search", self.base_url);
        tracing::debug!(%url, max_results, "calling Tavily search");
        let resp = self
            .client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .context("failed to call Tavily search API")?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            bail!("Tavily returned {}: {}", status, text);
        }
        let text = resp
            .text()
            .await
            .context("failed to read Tavily response body")?;
        parse_search_body(&text)
    }
}

/// Decode a Tavily response body; a missing `results` array means no hits
pub(crate) fn parse_search_body(body: &str) -> Result<Vec<RawSearchResult>> {
    let parsed: SearchResponse =
        serde_json::from_str(body).context("failed to parse Tavily response")?;
    Ok(parsed.results)
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawSearchResult>,
}
