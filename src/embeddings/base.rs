

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;


#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API key required for provider {0}")]
    MissingApiKey(String),
}

impl EmbeddingError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether repeating the same request may succeed (quota pressure, server or transport faults).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            Self::Http(err) => {
                err.is_timeout()
                    || err.is_connect()
                    || err.is_request()
                    || err.status().is_some_and(|s| s.is_server_error())
            }
            _ => false,
        }
    }
}


/// Maps an ordered batch of texts to embeddings, one per input, in input order.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;
}


#[async_trait]
impl EmbeddingBackend for Arc<dyn EmbeddingBackend> {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed(texts).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}


pub(crate) async fn post_json<B: Serialize + Sync>(
    client: &Client,
    url: &str,
    api_key: &str,
    body: &B,
) -> Result<String, EmbeddingError> {
    let response = client
        .post(url)
        .bearer_auth(api_key)
        .json(body)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        return Ok(text);
    }

    debug!("Embedding request to {} failed with {}", url, status);
    Err(EmbeddingError::Status {
        status: status.as_u16(),
        message: error_message(&text),
    })
}


pub(crate) fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error").and_then(|e| e.get("message")))
                .and_then(|m| m.as_str())
        })
        .map(str::to_string)
        .unwrap_or_else(|| crate::truncate_for_log(body.trim(), 200))
}


pub(crate) fn ensure_count(
    embeddings: &[Vec<f32>],
    expected: usize,
    provider: &str,
) -> Result<(), EmbeddingError> {
    if embeddings.len() != expected {
        return Err(EmbeddingError::InvalidResponse(format!(
            "{} returned {} embeddings for {} inputs",
            provider,
            embeddings.len(),
            expected
        )));
    }
    Ok(())
}
