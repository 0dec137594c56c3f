//! Forwarding failures.

use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while forwarding a search to the backend.
///
/// Callers never see the variant: every case is reported with the same
/// 500 envelope. The variant only shows up in logs and metric labels.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connection refused, reset, DNS failure, or the body could not be read.
    #[error("backend unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// The backend call exceeded the configured upstream timeout.
    #[error("backend did not answer within {0} seconds")]
    Timeout(u64),

    /// Backend answered with a non-2xx status.
    #[error("backend responded with status {0}")]
    BadStatus(StatusCode),

    /// Backend answered 2xx but the body is not JSON.
    #[error("backend returned a malformed body: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The configured backend address cannot be turned into a request URL.
    #[error("invalid backend address: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The outbound HTTP client could not be constructed.
    #[error("failed to build backend client: {0}")]
    Client(#[source] reqwest::Error),
}

impl GatewayError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Unreachable(_) => "unreachable",
            GatewayError::Timeout(_) => "timeout",
            GatewayError::BadStatus(_) => "bad_status",
            GatewayError::Malformed(_) => "malformed",
            GatewayError::InvalidUrl(_) => "invalid_url",
            GatewayError::Client(_) => "client",
        }
    }
}

/// Result type for forwarding operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
