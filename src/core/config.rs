

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::ConfigError;
use crate::embeddings::EmbeddingProviderKind;
use crate::search::{SearchConfig, SearchStrategy, TargetText};


const ENV_PREFIX: &str = "WIKISEEK";


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiseekConfig {

    pub wiki_api_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,


    pub embedding_provider: EmbeddingProviderKind,
    pub embedding_model: Option<String>,
    pub embedding_url: Option<String>,
    pub embedding_api_key: Option<String>,


    pub rate_limit_calls: usize,
    pub rate_limit_period_secs: u64,
    pub max_batch_size: usize,
    pub embedding_retries: u32,


    pub max_discovered: Option<usize>,
    pub target_text: TargetText,
    pub strategy: SearchStrategy,
}

impl Default for WikiseekConfig {
    fn default() -> Self {
        Self {
            wiki_api_url: crate::DEFAULT_WIKI_API_URL.to_string(),
            user_agent: format!("wikiseek/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,

            embedding_provider: EmbeddingProviderKind::Cohere,
            embedding_model: None,
            embedding_url: None,
            embedding_api_key: None,

            rate_limit_calls: crate::DEFAULT_RATE_LIMIT_CALLS,
            rate_limit_period_secs: crate::DEFAULT_RATE_LIMIT_PERIOD_SECS,
            max_batch_size: crate::DEFAULT_MAX_BATCH_SIZE,
            embedding_retries: 1,

            max_discovered: None,
            target_text: TargetText::Summary,
            strategy: SearchStrategy::Guided,
        }
    }
}

impl WikiseekConfig {
    /// Loads defaults, then the optional file, then `WIKISEEK_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let mut loaded: Self = builder.build()?.try_deserialize()?;
        if loaded.embedding_api_key.is_none() {
            loaded.embedding_api_key = loaded.provider_key_from_env();
        }
        loaded.validate()?;
        Ok(loaded)
    }

    fn provider_key_from_env(&self) -> Option<String> {
        let var = match self.embedding_provider {
            EmbeddingProviderKind::Cohere => "COHERE_API_KEY",
            EmbeddingProviderKind::OpenAi => "OPENAI_API_KEY",
        };
        std::env::var(var).ok().filter(|key| !key.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_limit_calls == 0 {
            return Err(ConfigError::Invalid("rate_limit_calls must be > 0".to_string()));
        }
        if self.rate_limit_period_secs == 0 {
            return Err(ConfigError::Invalid(
                "rate_limit_period_secs must be > 0".to_string(),
            ));
        }
        if self.max_batch_size == 0 {
            return Err(ConfigError::Invalid("max_batch_size must be > 0".to_string()));
        }
        if self.max_discovered == Some(0) {
            return Err(ConfigError::Invalid("max_discovered must be > 0".to_string()));
        }

        Url::parse(&self.wiki_api_url)
            .map_err(|e| ConfigError::Invalid(format!("wiki_api_url: {e}")))?;
        if let Some(url) = &self.embedding_url {
            Url::parse(url).map_err(|e| ConfigError::Invalid(format!("embedding_url: {e}")))?;
        }
        Ok(())
    }

    /// Configured model, or the provider's default when unset.
    pub fn embedding_model(&self) -> &str {
        self.embedding_model
            .as_deref()
            .unwrap_or_else(|| self.embedding_provider.default_model())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn rate_limit_period(&self) -> Duration {
        Duration::from_secs(self.rate_limit_period_secs)
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            strategy: self.strategy,
            target_text: self.target_text,
            max_discovered: self.max_discovered,
        }
    }
}
