//! Live end-to-end test
//!
//! Requires ANTHROPIC_API_KEY and TAVILY_API_KEY.
//! Run with: cargo test -- --ignored

use research_pipeline::config::PipelineConfig;
use research_pipeline::pipeline::{run_research_pipeline, StageRecord};

#[tokio::test]
#[ignore] // Requires Anthropic and Tavily API access
async fn test_live_pipeline() {
    dotenv::dotenv().ok();
    let config = PipelineConfig {
        anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
        tavily_api_key: std::env::var("TAVILY_API_KEY").ok(),
        max_results: 3,
        ..Default::default()
    };

    let record = run_research_pipeline(&config, "What is retrieval-augmented generation?")
        .await
        .expect("live run should succeed");

    assert!(record.sources().len() <= 3);
    assert!(record.report_text().contains("## Sources"));
    assert!(!record.review_text().is_empty());
}
