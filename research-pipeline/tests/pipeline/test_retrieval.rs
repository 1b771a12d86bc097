//! Retrieval stage through the public API

use research_pipeline::backends::RawSearchResult;
use research_pipeline::pipeline::stage1_retrieve::retrieve;
use research_pipeline::pipeline::{Query, StageMarker, StageRecord};
use research_pipeline::{BackendKind, PipelineError, Stage};

use super::common::{hit, CountingSearch};

#[tokio::test]
async fn test_k_results_in_backend_order() {
    for k in 0..=5 {
        let results: Vec<RawSearchResult> = (0..k)
            .map(|i| hit(&format!("T{}", i), &format!("http://u/{}", i), "c"))
            .collect();
        let search = CountingSearch::new(results);

        let record = retrieve(&search, Query::new("q").unwrap(), 5).await.unwrap();

        assert_eq!(record.sources().len(), k);
        for (i, source) in record.sources().iter().enumerate() {
            assert_eq!(source.title, format!("T{}", i));
        }
        assert_eq!(record.stage(), StageMarker::Retrieved);
    }
}

#[tokio::test]
async fn test_partial_metadata_defaults() {
    let search = CountingSearch::new(vec![RawSearchResult {
        title: None,
        url: None,
        content: Some("snippet only".to_string()),
    }]);

    let record = retrieve(&search, Query::new("q").unwrap(), 5).await.unwrap();

    let source = &record.sources()[0];
    assert_eq!(source.title, "No title");
    assert_eq!(source.url, "");
    assert_eq!(source.snippet, "snippet only");
}

#[tokio::test]
async fn test_backend_failure_is_search_error() {
    let search = CountingSearch::failing();

    let err = retrieve(&search, Query::new("q").unwrap(), 5).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Backend {
            stage: Stage::Retrieval,
            backend: BackendKind::Search,
            ..
        }
    ));
    assert_eq!(search.calls(), 1);
}
