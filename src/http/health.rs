use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub status: String,
    pub version: String,
}

/// `GET /health`: liveness only, the backend is not probed.
pub async fn get_health() -> Json<SystemStatus> {
    Json(SystemStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
