//! Error responses returned to gateway callers.
//!
//! # Design Decisions
//! - Every forwarding failure maps to 500 with one envelope shape
//! - `error` is a fixed message; `details` carries the underlying failure

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::upstream::GatewayError;

/// Fixed human-readable message for every forwarding failure.
pub const GATEWAY_ERROR_MESSAGE: &str = "Error in the API gateway";

/// JSON body of a failed search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub details: String,
}

impl ErrorEnvelope {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            error: GATEWAY_ERROR_MESSAGE.to_string(),
            details: details.into(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let envelope = ErrorEnvelope::new(self.to_string());
        (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_any_failure_becomes_500_envelope() {
        let response = GatewayError::BadStatus(StatusCode::NOT_FOUND).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let envelope: ErrorEnvelope = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope.error, GATEWAY_ERROR_MESSAGE);
        assert!(envelope.details.contains("404"));
    }
}
