//! In-memory backends for exercising the search without network access.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

use crate::content::{ContentBackend, ContentError};
use crate::embeddings::{EmbeddingBackend, EmbeddingError};


#[derive(Default)]
pub(crate) struct StubContent {
    pages: HashMap<String, Vec<String>>,
    aliases: HashMap<String, String>,
    summaries: HashMap<String, String>,
    vanished: HashSet<String>,
    cancel_on_links: Option<(String, CancellationToken)>,
    title_calls: AtomicUsize,
    link_calls: AtomicUsize,
    summary_calls: AtomicUsize,
}

impl StubContent {
    /// Every title mentioned in `edges` becomes an existing page.
    pub(crate) fn from_edges(edges: &[(&str, &[&str])]) -> Self {
        let mut stub = Self::default();
        for (page, links) in edges {
            stub.pages
                .insert(page.to_string(), links.iter().map(|l| l.to_string()).collect());
        }
        for (_, links) in edges {
            for link in *links {
                stub.pages.entry(link.to_string()).or_default();
            }
        }
        stub
    }

    pub(crate) fn with_alias(mut self, alias: &str, title: &str) -> Self {
        self.aliases.insert(alias.to_string(), title.to_string());
        self
    }

    pub(crate) fn with_summary(mut self, title: &str, summary: &str) -> Self {
        self.summaries.insert(title.to_string(), summary.to_string());
        self
    }

    /// The page still canonicalizes but its link listing reports it missing.
    pub(crate) fn with_vanished(mut self, title: &str) -> Self {
        self.vanished.insert(title.to_string());
        self
    }

    /// Fetching `title`'s links cancels `token` before the links are returned.
    pub(crate) fn with_cancel_on_links(mut self, title: &str, token: CancellationToken) -> Self {
        self.cancel_on_links = Some((title.to_string(), token));
        self
    }

    pub(crate) fn title_calls(&self) -> usize {
        self.title_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn link_calls(&self) -> usize {
        self.link_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentBackend for StubContent {
    async fn canonical_title(&self, name: &str) -> Result<String, ContentError> {
        self.title_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(title) = self.aliases.get(name) {
            return Ok(title.clone());
        }
        if self.pages.contains_key(name) {
            return Ok(name.to_string());
        }
        Err(ContentError::NotFound(name.to_string()))
    }

    async fn links(&self, title: &str) -> Result<Vec<String>, ContentError> {
        self.link_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((trigger, token)) = &self.cancel_on_links {
            if trigger == title {
                token.cancel();
            }
        }
        if self.vanished.contains(title) {
            return Err(ContentError::NotFound(title.to_string()));
        }
        self.pages
            .get(title)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(title.to_string()))
    }

    async fn summary(&self, title: &str) -> Result<String, ContentError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        if !self.pages.contains_key(title) {
            return Err(ContentError::NotFound(title.to_string()));
        }
        Ok(self.summaries.get(title).cloned().unwrap_or_default())
    }

    fn backend_name(&self) -> &str {
        "stub"
    }
}


pub(crate) struct StubEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    fallback: Vec<f32>,
    calls: Mutex<Vec<Vec<String>>>,
    failures: Mutex<VecDeque<EmbeddingError>>,
}

impl StubEmbedder {
    /// Texts without an explicit vector embed to `fallback`.
    pub(crate) fn new(vectors: &[(&str, [f32; 2])], fallback: [f32; 2]) -> Self {
        Self {
            vectors: vectors
                .iter()
                .map(|(text, v)| (text.to_string(), v.to_vec()))
                .collect(),
            fallback: fallback.to_vec(),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
        }
    }

    /// Queues an error returned by the next call (each queued error is used once).
    pub(crate) fn fail_next(&self, err: EmbeddingError) {
        self.failures.lock().push_back(err);
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl EmbeddingBackend for StubEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.lock().push(texts.to_vec());
        if let Some(err) = self.failures.lock().pop_front() {
            return Err(err);
        }
        Ok(texts
            .iter()
            .map(|t| self.vectors.get(t).cloned().unwrap_or_else(|| self.fallback.clone()))
            .collect())
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-2d"
    }
}


pub(crate) fn status_error(status: u16) -> EmbeddingError {
    EmbeddingError::Status {
        status,
        message: format!("stub status {status}"),
    }
}
