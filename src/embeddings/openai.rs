

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::base::{ensure_count, post_json, EmbeddingBackend, EmbeddingError};

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_OPENAI_MODEL: &str = "text-embedding-3-small";


#[derive(Serialize)]
struct OpenAIEmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OpenAIEmbeddingResponse {
    data: Vec<OpenAIEmbeddingData>,
}

#[derive(Deserialize)]
struct OpenAIEmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}


/// Client for any OpenAI-compatible `/embeddings` endpoint.
pub struct OpenAiEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiEmbedder {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(EmbeddingError::MissingApiKey("openai".to_string()));
        }
        let model = model.into();
        let base = base_url.unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string());
        let endpoint = format!("{}/embeddings", base.trim_end_matches('/'));

        info!("OpenAiEmbedder initialized: model={}, endpoint={}", model, endpoint);

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint,
            model,
            api_key: api_key.trim().to_string(),
        })
    }
}


fn parse_embedding_response(body: &str, expected: usize) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let mut parsed: OpenAIEmbeddingResponse = serde_json::from_str(body)?;
    parsed.data.sort_by_key(|entry| entry.index);
    let embeddings: Vec<Vec<f32>> = parsed.data.into_iter().map(|d| d.embedding).collect();
    ensure_count(&embeddings, expected, "openai")?;
    Ok(embeddings)
}

#[async_trait]
impl EmbeddingBackend for OpenAiEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = OpenAIEmbeddingRequest {
            model: &self.model,
            input: texts,
        };
        let body = post_json(&self.client, &self.endpoint, &self.api_key, &request).await?;
        let embeddings = parse_embedding_response(&body, texts.len())?;

        debug!("OpenAI returned {} embeddings", embeddings.len());
        Ok(embeddings)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
