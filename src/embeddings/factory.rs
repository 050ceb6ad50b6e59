

use std::sync::Arc;
use tracing::info;

use super::base::{EmbeddingBackend, EmbeddingError};
use super::cohere::CohereEmbedder;
use super::openai::OpenAiEmbedder;
use super::EmbeddingProviderKind;
use crate::core::config::WikiseekConfig;


pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    pub fn from_config(
        config: &WikiseekConfig,
    ) -> Result<Arc<dyn EmbeddingBackend>, EmbeddingError> {
        let api_key = config.embedding_api_key.clone().unwrap_or_default();
        let backend: Arc<dyn EmbeddingBackend> = match config.embedding_provider {
            EmbeddingProviderKind::Cohere => Arc::new(CohereEmbedder::new(
                api_key,
                config.embedding_model(),
                config.embedding_url.clone(),
                config.timeout(),
            )?),
            EmbeddingProviderKind::OpenAi => Arc::new(OpenAiEmbedder::new(
                api_key,
                config.embedding_model(),
                config.embedding_url.clone(),
                config.timeout(),
            )?),
        };

        info!(
            "Embedding backend ready: provider={}, model={}",
            backend.provider_name(),
            backend.model_name()
        );
        Ok(backend)
    }
}
