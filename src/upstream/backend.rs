//! The backend data source the search route forwards to.
//!
//! # Responsibilities
//! - Hold the outbound HTTP client and the resolved search URL
//! - Forward a raw query string verbatim
//! - Enforce connect and total timeouts on every call
//! - Check the backend answered 2xx with a JSON body

use axum::body::Bytes;
use axum::http::{header, HeaderValue};
use std::time::Duration;
use url::Url;

use crate::config::GatewayConfig;
use crate::http::request::X_REQUEST_ID;
use crate::upstream::error::{GatewayError, GatewayResult};

/// A successful backend answer, relayed to the caller untouched.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Content type announced by the backend (JSON if it sent none).
    pub content_type: HeaderValue,
    /// Raw body bytes.
    pub body: Bytes,
}

/// Handle on the backend search endpoint.
///
/// Built once per configuration and shared read-only between requests.
#[derive(Debug, Clone)]
pub struct Upstream {
    client: reqwest::Client,
    search_url: Url,
    timeout_secs: u64,
}

impl Upstream {
    /// Build the handle from a validated configuration.
    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        let base = config.upstream.base_url.trim_end_matches('/');
        let search_url = Url::parse(&format!("{}{}", base, config.upstream.search_path))?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.upstream_secs))
            .build()
            .map_err(GatewayError::Client)?;

        Ok(Self {
            client,
            search_url,
            timeout_secs: config.timeouts.upstream_secs,
        })
    }

    /// Full URL of the backend search endpoint, without query.
    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Target URL for one forwarded request.
    ///
    /// The inbound query string is attached as-is; an empty one is dropped.
    pub fn target(&self, raw_query: Option<&str>) -> Url {
        let mut url = self.search_url.clone();
        url.set_query(raw_query.filter(|q| !q.is_empty()));
        url
    }

    /// Forward one search and wait for the backend's answer.
    pub async fn fetch(&self, raw_query: Option<&str>, request_id: &str) -> GatewayResult<UpstreamResponse> {
        let url = self.target(raw_query);

        tracing::debug!(request_id = %request_id, url = %url, "Forwarding search to backend");

        let response = self
            .client
            .get(url)
            .header(X_REQUEST_ID, request_id)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::BadStatus(status));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));

        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        // Relay the exact bytes, but only once we know they are JSON.
        serde_json::from_slice::<serde::de::IgnoredAny>(&body).map_err(GatewayError::Malformed)?;

        Ok(UpstreamResponse { content_type, body })
    }

    fn classify(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.timeout_secs)
        } else {
            GatewayError::Unreachable(err)
        }
    }
}
