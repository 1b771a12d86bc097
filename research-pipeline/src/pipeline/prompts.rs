//! Prompt builders for the three generation stages
//!
//! Pure string construction, kept apart from the backend calls so prompt
//! content can be checked without any network I/O.

use crate::pipeline::types::{
    CompositionRecord, RetrievalRecord, SourceItem, StageRecord, SynthesisRecord,
};

/// Numbered title + snippet blocks, one per source, in retrieval order
pub fn render_source_context(sources: &[SourceItem]) -> String {
    let mut context = String::new();
    for (idx, source) in sources.iter().enumerate() {
        context.push_str(&format!(
            "\n\nSource {}: {}\n{}\n",
            idx + 1,
            source.title,
            source.snippet
        ));
    }
    context
}

/// Stage 2: ask for 3-5 themed insights, conflicts and gaps
pub fn analysis_prompt(record: &RetrievalRecord) -> String {
    format!(
        r#"You are an expert analyst. Your job is to analyze research data and extract key insights.

Research Question: {}

Research Data:
{}

Your task:
1. Identify the 3-5 most important insights from this research
2. Organize them into clear themes
3. Note any conflicting information
4. Highlight gaps in the research

Format your response as:
- Key Insight 1: [insight]
- Key Insight 2: [insight]
- etc.

Be concise but thorough."#,
        record.query(),
        render_source_context(record.sources())
    )
}

/// Stage 3: ask for the four-section report
pub fn report_prompt(record: &SynthesisRecord) -> String {
    format!(
        r#"You are an expert technical writer. Your job is to create a clear, well-structured research report.

Research Question: {}

Analysis:
{}

Your task:
Write a professional research report with these sections:
1. Executive Summary (2-3 sentences)
2. Key Findings (organized by theme)
3. Detailed Insights (expand on the findings)
4. Conclusion (1-2 sentences)

Use clear headers, bullet points where helpful, and maintain a professional tone.
Make it easy to scan and understand."#,
        record.query(),
        record.analysis_text()
    )
}

/// Stage 4: ask for a 1-10 score with strengths and improvements
pub fn review_prompt(record: &CompositionRecord) -> String {
    format!(
        r#"You are a quality assurance expert. Your job is to review research reports for quality and completeness.

Research Question: {}

Report:
{}

Your task:
Evaluate this report on:
1. Completeness - Does it fully answer the question?
2. Clarity - Is it easy to understand?
3. Structure - Is it well-organized?
4. Accuracy - Are claims supported by the research?

Provide:
- A quality score (1-10)
- 2-3 specific strengths
- 2-3 specific improvements (if score < 8)

Format:
Score: [X/10]
Strengths: [list]
Improvements: [list if needed]"#,
        record.query(),
        record.report_text()
    )
}
