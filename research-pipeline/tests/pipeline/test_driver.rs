//! Driver sequencing and fail-whole behaviour

use std::sync::Arc;

use research_pipeline::pipeline::{StageMarker, StageRecord};
use research_pipeline::{BackendKind, PipelineError, Stage};

use super::common::{pipeline, rag_hit, CountingSearch, EchoLengthGeneration};

#[tokio::test]
async fn test_end_to_end_rag_question() {
    let search = Arc::new(CountingSearch::new(vec![rag_hit()]));
    let generation = Arc::new(EchoLengthGeneration::new());

    let record = pipeline(&search, &generation).run("What is RAG?").await.unwrap();

    assert_eq!(record.stage(), StageMarker::Reviewed);
    assert_eq!(record.query().as_str(), "What is RAG?");
    assert_eq!(record.sources().len(), 1);
    assert!(record
        .report_text()
        .ends_with("## Sources\n1. [RAG Explained](http://x)\n"));
    assert!(!record.review_text().is_empty());

    // Echo backend: report body is the length of the composition prompt
    let prompts = generation.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(record.report_text().starts_with(&prompts[1].len().to_string()));
    assert_eq!(record.review_text(), prompts[2].len().to_string());
}

#[tokio::test]
async fn test_each_stage_feeds_the_next() {
    let search = Arc::new(CountingSearch::new(vec![rag_hit()]));
    let generation = Arc::new(EchoLengthGeneration::new());

    let record = pipeline(&search, &generation).run("What is RAG?").await.unwrap();

    let prompts = generation.prompts();
    assert!(prompts[0].contains("Source 1: RAG Explained"));
    // Composition prompt carries the analysis reply (length of prompt 0)
    assert!(prompts[1].contains(&format!("Analysis:\n{}", prompts[0].len())));
    // Review prompt carries the full composed report
    assert!(prompts[2].contains(record.report_text()));
}

#[tokio::test]
async fn test_blank_questions_reach_no_backend() {
    let search = Arc::new(CountingSearch::new(vec![rag_hit()]));
    let generation = Arc::new(EchoLengthGeneration::new());
    let driver = pipeline(&search, &generation);

    for question in ["", "   ", "\n\t"] {
        let err = driver.run(question).await.unwrap_err();
        assert!(matches!(err, PipelineError::Input));
    }
    assert_eq!(search.calls(), 0);
    assert_eq!(generation.calls(), 0);
}

#[tokio::test]
async fn test_search_failure_skips_generation() {
    let search = Arc::new(CountingSearch::failing());
    let generation = Arc::new(EchoLengthGeneration::new());

    let err = pipeline(&search, &generation).run("What is RAG?").await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Retrieval));
    assert_eq!(search.calls(), 1);
    assert_eq!(generation.calls(), 0);
}

#[tokio::test]
async fn test_generation_failure_stops_at_failing_stage() {
    let cases = [
        (1, Stage::Synthesis),
        (2, Stage::Composition),
        (3, Stage::Review),
    ];

    for (failing_call, expected_stage) in cases {
        let search = Arc::new(CountingSearch::new(vec![rag_hit()]));
        let generation = Arc::new(EchoLengthGeneration::failing_on_call(failing_call));

        let err = pipeline(&search, &generation).run("What is RAG?").await.unwrap_err();

        match err {
            PipelineError::Backend { stage, backend, .. } => {
                assert_eq!(stage, expected_stage);
                assert_eq!(backend, BackendKind::Generation);
            }
            other => panic!("unexpected error: {other}"),
        }
        // No later stage made a call
        assert_eq!(generation.calls(), failing_call);
    }
}

#[tokio::test]
async fn test_concurrent_runs_share_backends() {
    let search = Arc::new(CountingSearch::new(vec![rag_hit()]));
    let generation = Arc::new(EchoLengthGeneration::new());
    let driver = pipeline(&search, &generation);

    let a = driver.clone();
    let b = driver.clone();
    let (first, second) = tokio::join!(a.run("first question"), b.run("second question"));

    assert_eq!(first.unwrap().query().as_str(), "first question");
    assert_eq!(second.unwrap().query().as_str(), "second question");
    assert_eq!(search.calls(), 2);
    assert_eq!(generation.calls(), 6);
}
