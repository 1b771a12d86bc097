//! Records handed from stage to stage
//!
//! Each record type is produced by exactly one stage. Fields are crate-private
//! so a record cannot be assembled (or its stage marker forged) from outside;
//! callers read them through accessors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::backends::RawSearchResult;
use crate::error::PipelineError;

/// The user's question, guaranteed to contain non-whitespace text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Query(String);

impl Query {
    pub fn new(question: impl Into<String>) -> Result<Self, PipelineError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(PipelineError::Input);
        }
        Ok(Self(question))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A normalized search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SourceItem {
    pub const DEFAULT_TITLE: &'static str = "No title";

    /// Fill missing fields with their defaults instead of failing
    pub fn from_raw(raw: RawSearchResult) -> Self {
        Self {
            title: raw.title.unwrap_or_else(|| Self::DEFAULT_TITLE.to_string()),
            url: raw.url.unwrap_or_default(),
            snippet: raw.content.unwrap_or_default(),
        }
    }
}

/// Which stage produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageMarker {
    #[serde(rename = "retrieved")]
    Retrieved,
    #[serde(rename = "analyzed")]
    Synthesized,
    #[serde(rename = "composed")]
    Composed,
    #[serde(rename = "reviewed")]
    Reviewed,
}

/// Behaviour shared by every record in the chain
pub trait StageRecord {
    const STAGE: StageMarker;

    fn query(&self) -> &Query;

    fn sources(&self) -> &[SourceItem];

    fn stage(&self) -> StageMarker {
        Self::STAGE
    }
}

/// Output of the retrieval stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalRecord {
    pub(crate) query: Query,
    pub(crate) sources: Vec<SourceItem>,
    pub(crate) stage: StageMarker,
}

impl RetrievalRecord {
    pub(crate) fn new(query: Query, sources: Vec<SourceItem>) -> Self {
        Self {
            query,
            sources,
            stage: Self::STAGE,
        }
    }
}

impl StageRecord for RetrievalRecord {
    const STAGE: StageMarker = StageMarker::Retrieved;

    fn query(&self) -> &Query {
        &self.query
    }

    fn sources(&self) -> &[SourceItem] {
        &self.sources
    }
}

/// Output of the synthesis stage: sources carried forward plus analysis prose
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisRecord {
    pub(crate) query: Query,
    pub(crate) sources: Vec<SourceItem>,
    pub(crate) analysis_text: String,
    pub(crate) stage: StageMarker,
}

impl SynthesisRecord {
    pub(crate) fn new(previous: RetrievalRecord, analysis_text: String) -> Self {
        Self {
            query: previous.query,
            sources: previous.sources,
            analysis_text,
            stage: Self::STAGE,
        }
    }

    pub fn analysis_text(&self) -> &str {
        &self.analysis_text
    }
}

impl StageRecord for SynthesisRecord {
    const STAGE: StageMarker = StageMarker::Synthesized;

    fn query(&self) -> &Query {
        &self.query
    }

    fn sources(&self) -> &[SourceItem] {
        &self.sources
    }
}

/// Output of the composition stage; `report_text` ends with the citation block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionRecord {
    pub(crate) query: Query,
    pub(crate) sources: Vec<SourceItem>,
    pub(crate) report_text: String,
    pub(crate) stage: StageMarker,
}

impl CompositionRecord {
    pub(crate) fn new(previous: SynthesisRecord, report_text: String) -> Self {
        Self {
            query: previous.query,
            sources: previous.sources,
            report_text,
            stage: Self::STAGE,
        }
    }

    pub fn report_text(&self) -> &str {
        &self.report_text
    }
}

impl StageRecord for CompositionRecord {
    const STAGE: StageMarker = StageMarker::Composed;

    fn query(&self) -> &Query {
        &self.query
    }

    fn sources(&self) -> &[SourceItem] {
        &self.sources
    }
}

/// Terminal record: everything the caller gets to see
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRecord {
    pub(crate) query: Query,
    pub(crate) report_text: String,
    pub(crate) sources: Vec<SourceItem>,
    pub(crate) review_text: String,
    pub(crate) stage: StageMarker,
}

impl ReviewRecord {
    pub(crate) fn new(previous: CompositionRecord, review_text: String) -> Self {
        Self {
            query: previous.query,
            report_text: previous.report_text,
            sources: previous.sources,
            review_text,
            stage: Self::STAGE,
        }
    }

    pub fn report_text(&self) -> &str {
        &self.report_text
    }

    pub fn review_text(&self) -> &str {
        &self.review_text
    }
}

impl StageRecord for ReviewRecord {
    const STAGE: StageMarker = StageMarker::Reviewed;

    fn query(&self) -> &Query {
        &self.query
    }

    fn sources(&self) -> &[SourceItem] {
        &self.sources
    }
}
