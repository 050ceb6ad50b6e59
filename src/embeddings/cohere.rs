

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::base::{ensure_count, post_json, EmbeddingBackend, EmbeddingError};

pub const DEFAULT_COHERE_URL: &str = "https://api.cohere.ai";

pub const DEFAULT_COHERE_MODEL: &str = "embed-english-v3.0";


#[derive(Serialize)]
struct CohereEmbedRequest<'a> {
    texts: &'a [String],
    model: &'a str,
    input_type: &'a str,
    truncate: &'a str,
}

#[derive(Deserialize)]
struct CohereEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}


pub struct CohereEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl CohereEmbedder {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(EmbeddingError::MissingApiKey("cohere".to_string()));
        }
        let model = model.into();
        let base = base_url.unwrap_or_else(|| DEFAULT_COHERE_URL.to_string());
        let endpoint = format!("{}/v1/embed", base.trim_end_matches('/'));

        info!("CohereEmbedder initialized: model={}, endpoint={}", model, endpoint);

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint,
            model,
            api_key: api_key.trim().to_string(),
        })
    }
}


fn parse_embed_response(body: &str, expected: usize) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let parsed: CohereEmbedResponse = serde_json::from_str(body)?;
    ensure_count(&parsed.embeddings, expected, "cohere")?;
    Ok(parsed.embeddings)
}

#[async_trait]
impl EmbeddingBackend for CohereEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = CohereEmbedRequest {
            texts,
            model: &self.model,
            input_type: "clustering",
            truncate: "END",
        };
        let body = post_json(&self.client, &self.endpoint, &self.api_key, &request).await?;
        let embeddings = parse_embed_response(&body, texts.len())?;

        debug!("Cohere returned {} embeddings", embeddings.len());
        Ok(embeddings)
    }

    fn provider_name(&self) -> &str {
        "cohere"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
