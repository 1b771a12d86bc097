//! Fake backends shared by the pipeline tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use research_pipeline::backends::{GenerationBackend, RawSearchResult, SearchBackend};
use research_pipeline::pipeline::{Pipeline, PipelineSettings};
use research_pipeline_sdk::async_trait;

/// Search fake with a call counter
pub struct CountingSearch {
    results: Vec<RawSearchResult>,
    fail: bool,
    calls: AtomicUsize,
}

impl CountingSearch {
    pub fn new(results: Vec<RawSearchResult>) -> Self {
        Self {
            results,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(vec![])
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchBackend for CountingSearch {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<RawSearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.results.clone())
    }
}

/// Generation fake that echoes the prompt length, optionally failing on call `n`
pub struct EchoLengthGeneration {
    fail_on_call: Option<usize>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl EchoLengthGeneration {
    pub fn new() -> Self {
        Self {
            fail_on_call: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on_call(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for EchoLengthGeneration {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail_on_call == Some(call) {
            return Err(anyhow!("529 overloaded"));
        }
        Ok(prompt.len().to_string())
    }
}

pub fn hit(title: &str, url: &str, content: &str) -> RawSearchResult {
    RawSearchResult {
        title: Some(title.to_string()),
        url: Some(url.to_string()),
        content: Some(content.to_string()),
    }
}

pub fn rag_hit() -> RawSearchResult {
    hit("RAG Explained", "http://x", "RAG combines retrieval and generation.")
}

pub fn pipeline(search: &Arc<CountingSearch>, generation: &Arc<EchoLengthGeneration>) -> Pipeline {
    Pipeline::new(search.clone(), generation.clone(), PipelineSettings::default())
}
