

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::base::{ContentBackend, ContentError};
use crate::core::config::WikiseekConfig;


const MAX_CONTINUATIONS: usize = 100;


#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
    #[serde(default, rename = "continue")]
    continuation: Option<HashMap<String, serde_json::Value>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<QueryPage>,
}

#[derive(Debug, Deserialize)]
struct QueryPage {
    #[serde(default)]
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    links: Vec<PageLink>,
    #[serde(default)]
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PageLink {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    #[serde(default)]
    info: String,
}


/// MediaWiki Action API client.
pub struct WikipediaClient {
    client: Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new(
        api_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, ContentError> {
        let api_url = api_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        info!("WikipediaClient initialized: api={}", api_url);

        Ok(Self { client, api_url })
    }

    pub fn from_config(config: &WikiseekConfig) -> Result<Self, ContentError> {
        Self::new(config.wiki_api_url.clone(), &config.user_agent, config.timeout())
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<QueryResponse, ContentError> {
        let mut request: Vec<(&str, &str)> = vec![
            ("action", "query"),
            ("format", "json"),
            ("formatversion", "2"),
            ("redirects", "1"),
        ];
        request.extend_from_slice(params);

        let body = self
            .client
            .get(&self.api_url)
            .query(&request)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_response(&body)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}


fn parse_response(body: &str) -> Result<QueryResponse, ContentError> {
    let response: QueryResponse = serde_json::from_str(body)?;
    if let Some(error) = response.error {
        return Err(ContentError::Api {
            code: error.code,
            info: error.info,
        });
    }
    Ok(response)
}


fn single_page(response: QueryResponse, requested: &str) -> Result<QueryPage, ContentError> {
    let page = response
        .query
        .and_then(|q| q.pages.into_iter().next())
        .ok_or_else(|| ContentError::NotFound(requested.to_string()))?;

    if page.missing || page.invalid || page.title.is_empty() {
        return Err(ContentError::NotFound(requested.to_string()));
    }
    Ok(page)
}


fn link_continuation(response: &QueryResponse) -> Option<String> {
    response
        .continuation
        .as_ref()
        .and_then(|c| c.get("plcontinue"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

#[async_trait]
impl ContentBackend for WikipediaClient {
    async fn canonical_title(&self, name: &str) -> Result<String, ContentError> {
        let response = self.query(&[("titles", name)]).await?;
        let page = single_page(response, name)?;
        debug!("Resolved '{}' -> '{}'", name, page.title);
        Ok(page.title)
    }

    async fn links(&self, title: &str) -> Result<Vec<String>, ContentError> {
        let mut links = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_CONTINUATIONS {
            let response = {
                let mut params = vec![
                    ("titles", title),
                    ("prop", "links"),
                    ("plnamespace", "0"),
                    ("pllimit", "max"),
                ];
                if let Some(ref token) = cursor {
                    params.push(("plcontinue", token.as_str()));
                }
                self.query(&params).await?
            };
            let next = link_continuation(&response);
            let page = single_page(response, title)?;
            links.extend(page.links.into_iter().map(|l| l.title));

            match next {
                Some(token) => cursor = Some(token),
                None => {
                    debug!("Fetched {} links for '{}'", links.len(), title);
                    return Ok(links);
                }
            }
        }

        warn!(
            "Link listing for '{}' truncated after {} pages ({} links)",
            title,
            MAX_CONTINUATIONS,
            links.len()
        );
        Ok(links)
    }

    async fn summary(&self, title: &str) -> Result<String, ContentError> {
        let response = self
            .query(&[
                ("titles", title),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
            ])
            .await?;
        let page = single_page(response, title)?;
        Ok(page.extract.unwrap_or_default().trim().to_string())
    }

    fn backend_name(&self) -> &str {
        "wikipedia"
    }
}
