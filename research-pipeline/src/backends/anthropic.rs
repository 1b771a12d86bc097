use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use research_pipeline_sdk::async_trait;
use serde::{Deserialize, Serialize};

use super::GenerationBackend;

pub struct AnthropicGeneration {
    api_key: String,
    model: String,
    max_tokens: usize,
    base_url: String,
    client: Client,
}

impl AnthropicGeneration {
    pub fn new(
        api_key: String,
        model: String,
        max_tokens: usize,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build Anthropic HTTP client")?;
        Ok(Self {
            api_key,
            model,
            max_tokens,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl GenerationBackend for AnthropicGeneration {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(self.api_key.trim()).context("invalid Anthropic API key")?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let body = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user",
                content: vec![AnthropicContentBlock {
                    kind: "text",
                    text: prompt,
                }],
            }],
        };
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling Anthropic messages API");
        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .headers(headers)
            .json(&body)
            .send()
            .await
            .context("failed to call Anthropic messages API")?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            bail!("Anthropic returned {}: {}", status, text);
        }
        let text = resp
            .text()
            .await
            .context("failed to read Anthropic response body")?;
        parse_messages_body(&text)
    }
}

/// Join every text block of a messages response; an empty reply is returned as-is
pub(crate) fn parse_messages_body(body: &str) -> Result<String> {
    let parsed: AnthropicResponse =
        serde_json::from_str(body).context("failed to parse Anthropic response")?;
    if parsed.stop_reason.as_deref() == Some("max_tokens") {
        tracing::warn!("Anthropic reply truncated at max_tokens");
    }
    let answer = parsed
        .content
        .into_iter()
        .filter_map(|block| match block {
            AnthropicResponseBlock::Text { text } => Some(text),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(answer)
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: usize,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: Vec<AnthropicContentBlock<'a>>,
}

#[derive(Serialize)]
struct AnthropicContentBlock<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicResponseBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AnthropicResponseBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}
