//! Local, deterministic formatting: citation block and final display text

use std::sync::Arc;

use research_pipeline::pipeline::citations::render_citations;
use research_pipeline::pipeline::output::{render, OutputFormat};
use research_pipeline::pipeline::{final_output, SourceItem, StageRecord};

use super::common::{hit, pipeline, rag_hit, CountingSearch, EchoLengthGeneration};

fn sources(n: usize) -> Vec<SourceItem> {
    (1..=n)
        .map(|i| SourceItem {
            title: format!("Source {}", i),
            url: format!("https://example.org/{}", i),
            snippet: format!("snippet {}", i),
        })
        .collect()
}

#[test]
fn test_citation_lines_match_source_count() {
    for n in 0..=6 {
        let block = render_citations(&sources(n));
        let numbered: Vec<&str> = block.lines().skip_while(|l| *l != "## Sources").skip(1).collect();

        assert_eq!(numbered.len(), n);
        for (idx, line) in numbered.iter().enumerate() {
            let expected = format!("{}. [Source {}](https://example.org/{})", idx + 1, idx + 1, idx + 1);
            assert_eq!(*line, expected);
        }
    }
}

#[test]
fn test_citation_block_is_byte_identical_across_calls() {
    let list = sources(4);
    let first = render_citations(&list);
    let second = render_citations(&list);
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[tokio::test]
async fn test_report_ends_with_citations_in_retrieval_order() {
    let search = Arc::new(CountingSearch::new(vec![
        hit("Beta", "http://b", "b"),
        hit("Alpha", "http://a", "a"),
    ]));
    let generation = Arc::new(EchoLengthGeneration::new());

    let record = pipeline(&search, &generation).run("order?").await.unwrap();

    assert!(record
        .report_text()
        .ends_with("## Sources\n1. [Beta](http://b)\n2. [Alpha](http://a)\n"));
}

#[tokio::test]
async fn test_final_output_is_stable() {
    let search = Arc::new(CountingSearch::new(vec![rag_hit()]));
    let generation = Arc::new(EchoLengthGeneration::new());

    let record = pipeline(&search, &generation).run("What is RAG?").await.unwrap();

    let first = final_output(&record);
    let second = final_output(&record);
    assert_eq!(first, second);
    assert!(first.starts_with(record.report_text()));
    assert!(first.contains("\n## Quality Review\n"));
    assert!(first.trim_end().ends_with(record.review_text()));
    assert_eq!(render(&record, OutputFormat::Markdown).unwrap(), first);
    assert_eq!(record.sources().len(), 1);
}
