

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::models::{Embedding, Node};
use super::scoring::heuristic_score;
use super::similarity::cosine_similarity;
use crate::core::config::WikiseekConfig;
use crate::core::error::SearchError;
use crate::core::rate_limit::RateGovernor;
use crate::embeddings::{EmbeddingBackend, EmbeddingError};


const INITIAL_RETRY_DELAY_MS: u64 = 500;

const MAX_RETRY_DELAY_MS: u64 = 8000;


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluatorStats {
    pub backend_calls: usize,
    pub retries: usize,
    pub texts_embedded: usize,
}


/// Embedding calls gated by a [`RateGovernor`], with a bounded retry on transient failures.
pub struct HeuristicEvaluator {
    backend: Arc<dyn EmbeddingBackend>,
    governor: Arc<RateGovernor>,
    max_batch_size: usize,
    max_retries: u32,
    retry_delay: Duration,
    stats: Mutex<EvaluatorStats>,
}

impl HeuristicEvaluator {
    pub fn new(
        backend: Arc<dyn EmbeddingBackend>,
        governor: Arc<RateGovernor>,
        max_batch_size: usize,
        max_retries: u32,
    ) -> Self {
        info!(
            "HeuristicEvaluator initialized: provider={}, budget={}/{:?}, batch={}, retries={}",
            backend.provider_name(),
            governor.max_calls(),
            governor.period(),
            max_batch_size,
            max_retries
        );

        Self {
            backend,
            governor,
            max_batch_size: max_batch_size.max(1),
            max_retries,
            retry_delay: Duration::from_millis(INITIAL_RETRY_DELAY_MS),
            stats: Mutex::new(EvaluatorStats::default()),
        }
    }

    pub fn from_config(
        backend: Arc<dyn EmbeddingBackend>,
        config: &WikiseekConfig,
    ) -> Result<Self, SearchError> {
        let governor = RateGovernor::new(config.rate_limit_calls, config.rate_limit_period())?;
        Ok(Self::new(
            backend,
            Arc::new(governor),
            config.max_batch_size,
            config.embedding_retries,
        ))
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Embeddings aligned with `texts`. An empty input makes no backend call.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, SearchError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut embeddings = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.max_batch_size) {
            let batch = self.call_with_retry(chunk).await?;
            if batch.len() != chunk.len() {
                return Err(SearchError::embedding(
                    None,
                    format!(
                        "{} returned {} embeddings for {} inputs",
                        self.backend.provider_name(),
                        batch.len(),
                        chunk.len()
                    ),
                ));
            }
            embeddings.extend(batch);
        }
        Ok(embeddings)
    }

    pub async fn embed_one(&self, text: &str) -> Result<Embedding, SearchError> {
        let mut batch = self.embed_batch(&[text.to_string()]).await?;
        batch
            .pop()
            .ok_or_else(|| SearchError::embedding(None, "empty embedding response"))
    }

    /// Heuristic score of each title against `target`, aligned with `titles`.
    pub async fn score_candidates(
        &self,
        titles: &[Node],
        target: &[f32],
    ) -> Result<Vec<f64>, SearchError> {
        let embeddings = self.embed_batch(titles).await?;
        titles
            .iter()
            .zip(embeddings.iter())
            .map(|(title, embedding)| -> Result<f64, SearchError> {
                let similarity = cosine_similarity(embedding, target)?;
                Ok(heuristic_score(title, similarity))
            })
            .collect()
    }

    async fn call_with_retry(&self, chunk: &[String]) -> Result<Vec<Embedding>, SearchError> {
        let mut attempt = 0u32;
        let mut delay = self.retry_delay;

        loop {
            self.governor.acquire().await;
            self.stats.lock().backend_calls += 1;
            debug!("Embedding batch of {} (attempt {})", chunk.len(), attempt + 1);

            match self.backend.embed(chunk).await {
                Ok(batch) => {
                    self.stats.lock().texts_embedded += chunk.len();
                    return Ok(batch);
                }
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    self.stats.lock().retries += 1;
                    warn!(
                        "Embedding call failed ({}), retry {}/{} in {:?}",
                        e, attempt, self.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(Duration::from_millis(MAX_RETRY_DELAY_MS));
                }
                Err(e) => return Err(Self::surface(e)),
            }
        }
    }

    fn surface(err: EmbeddingError) -> SearchError {
        warn!("Embedding backend error: {}", err);
        err.into()
    }

    pub fn stats(&self) -> EvaluatorStats {
        *self.stats.lock()
    }

    pub fn provider_name(&self) -> &str {
        self.backend.provider_name()
    }
}
