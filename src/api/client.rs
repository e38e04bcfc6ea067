use crate::api::models::{BackendResponse, IndexingStarted, IndexingStatus, LogicalFailure};
use crate::config::{Config, SearchMode};
use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),
    #[error("Backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Search failed: {0}")]
    Logical(#[from] LogicalFailure),
}

/// Source of search results for the search page
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a search and return the raw payload; the page decides how to read it
    async fn search_images(&self, query: &str) -> Result<Value, ClientError>;
}

/// HTTP client for the image search and semantic indexing endpoints.
///
/// Every call is a single request: no retries, no caching. Transport and
/// HTTP status failures are errors; a `success: false` envelope from the
/// semantic endpoints is returned as-is for the caller to inspect.
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
    search_limit: usize,
    mode: SearchMode,
}

impl SearchClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent("picto-search/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            search_limit: config.search_limit,
            mode: config.search_mode,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Keyword search. Returns whatever JSON the backend sent; an empty body
    /// is `null`.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Value, ClientError> {
        let url = format!("{}/search/", self.base_url);
        debug!("GET {} q={:?} limit={}", url, query, limit);

        let limit = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await?;

        let bytes = check_status(response).await?.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Semantic search. Logical failures come back as `success: false`.
    pub async fn semantic_search(
        &self,
        query: &str,
    ) -> Result<BackendResponse<Value>, ClientError> {
        let url = format!(
            "{}/semantic/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        read_envelope(response).await
    }

    /// Ask the backend to start indexing images
    pub async fn trigger_indexing(&self) -> Result<BackendResponse<IndexingStarted>, ClientError> {
        let url = format!("{}/semantic/index", self.base_url);
        debug!("POST {}", url);

        let response = self.client.post(&url).send().await?;
        read_envelope(response).await
    }

    /// One status poll; callers decide the interval
    pub async fn get_indexing_status(
        &self,
    ) -> Result<BackendResponse<IndexingStatus>, ClientError> {
        let url = format!("{}/semantic/status", self.base_url);

        let response = self.client.get(&url).send().await?;
        read_envelope(response).await
    }
}

#[async_trait]
impl SearchBackend for SearchClient {
    async fn search_images(&self, query: &str) -> Result<Value, ClientError> {
        match self.mode {
            SearchMode::Keyword => self.search(query, self.search_limit).await,
            SearchMode::Semantic => {
                let envelope = self.semantic_search(query).await?;
                match envelope.into_result() {
                    Ok(data) => Ok(data.unwrap_or(Value::Null)),
                    Err(failure) => {
                        warn!("Semantic search for {:?} failed: {}", query, failure);
                        Err(failure.into())
                    }
                }
            }
        }
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Backend request failed with {}: {}", status, body);
    Err(ClientError::Status { status, body })
}

async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<BackendResponse<T>, ClientError> {
    let bytes = check_status(response).await?.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
