//! Process-wide configuration
//!
//! Values are read once at start-up (CLI flags with environment fallbacks,
//! see [`crate::pipeline::cli::Args`]) and never change afterwards.

use crate::error::PipelineError;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: usize = 4096;
pub const DEFAULT_MAX_RESULTS: usize = 5;
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_TAVILY_BASE_URL: &str = "https://api.tavily.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Credentials and limits for both backends
///
/// # Examples
///
/// ```
/// use research_pipeline::config::PipelineConfig;
///
/// let config = PipelineConfig {
///     anthropic_api_key: Some("sk-ant-test".to_string()),
///     tavily_api_key: Some("tvly-test".to_string()),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_results, 5);
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Generation backend credential
    pub anthropic_api_key: Option<String>,
    /// Generation backend model identifier
    pub model: String,
    /// Max output length per generation call
    pub max_tokens: usize,
    pub anthropic_base_url: String,
    /// Search backend credential
    pub tavily_api_key: Option<String>,
    /// Result count requested from the search backend
    pub max_results: usize,
    pub tavily_base_url: String,
    /// Transport timeout for the HTTP clients
    pub request_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_string(),
            tavily_api_key: None,
            max_results: DEFAULT_MAX_RESULTS,
            tavily_base_url: DEFAULT_TAVILY_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

// Keys stay out of debug output.
impl std::fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("anthropic_api_key", &self.anthropic_api_key.as_ref().map(|_| "<set>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("tavily_api_key", &self.tavily_api_key.as_ref().map(|_| "<set>"))
            .field("max_results", &self.max_results)
            .field("tavily_base_url", &self.tavily_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl PipelineConfig {
    /// Check that both credentials are present and limits are usable
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !has_value(&self.anthropic_api_key) {
            return Err(PipelineError::Config(
                "ANTHROPIC_API_KEY must be set for the generation backend".to_string(),
            ));
        }
        if !has_value(&self.tavily_api_key) {
            return Err(PipelineError::Config(
                "TAVILY_API_KEY must be set for the search backend".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(PipelineError::Config("model must not be empty".to_string()));
        }
        if self.max_results == 0 {
            return Err(PipelineError::Config(
                "max_results must be at least 1".to_string(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(PipelineError::Config(
                "max_tokens must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn has_value(key: &Option<String>) -> bool {
    key.as_deref().map(|k| !k.trim().is_empty()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> PipelineConfig {
        PipelineConfig {
            anthropic_api_key: Some("sk-ant".to_string()),
            tavily_api_key: Some("tvly".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_results, 5);
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.model, "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_missing_keys_rejected() {
        let config = PipelineConfig::default();
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));

        let config = PipelineConfig {
            tavily_api_key: Some("   ".to_string()),
            ..configured()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("TAVILY_API_KEY"));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let config = PipelineConfig {
            max_results: 0,
            ..configured()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            max_tokens: 0,
            ..configured()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_keys() {
        let rendered = format!("{:?}", configured());
        assert!(!rendered.contains("sk-ant"));
        assert!(rendered.contains("<set>"));
    }
}
