//! Citation block rendering
//!
//! Always produced locally from the retrieval order, never by the generation
//! backend, so numbering and links are exact.

use crate::pipeline::types::SourceItem;

pub const SOURCES_HEADING: &str = "## Sources";

/// `## Sources` followed by one `N. [title](url)` line per source, 1-based
///
/// ```
/// use research_pipeline::pipeline::{citations::render_citations, SourceItem};
///
/// let sources = vec![SourceItem {
///     title: "RAG Explained".to_string(),
///     url: "http://x".to_string(),
///     snippet: String::new(),
/// }];
/// assert_eq!(render_citations(&sources), "\n\n## Sources\n1. [RAG Explained](http://x)\n");
/// ```
pub fn render_citations(sources: &[SourceItem]) -> String {
    let mut block = format!("\n\n{}\n", SOURCES_HEADING);
    for (idx, source) in sources.iter().enumerate() {
        block.push_str(&format!("{}. [{}]({})\n", idx + 1, source.title, source.url));
    }
    block
}
