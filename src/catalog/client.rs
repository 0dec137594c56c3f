//! HTTP client for the gateway's search route.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::catalog::record::{ProductRecord, SearchQuery};

/// A search that could not produce a product list.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure or timeout talking to the gateway.
    #[error("request to gateway failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Gateway answered with a non-2xx status.
    #[error("gateway responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The body is not a JSON array.
    #[error("gateway returned an unreadable product list: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Client for a gateway at `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Underlying HTTP client, shared with photo probing.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// `GET <gateway>/productos?search=<term>`, results in backend order.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<ProductRecord>, ClientError> {
        let url = format!("{}/productos", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("search", query.as_param())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        let records: Vec<ProductRecord> = serde_json::from_slice(&bytes)?;

        tracing::debug!(term = %query.as_param(), count = records.len(), "Search completed");
        Ok(records)
    }
}
