//! Product search forwarding route.

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::time::Instant;

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /productos`: forward the query string to the backend and relay its answer.
pub async fn search_products(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers).to_string();

    // Snapshot the handle; a concurrent reload does not affect this request.
    let upstream = state.upstream.load_full();

    match upstream.fetch(query.as_deref(), &request_id).await {
        Ok(found) => {
            tracing::debug!(
                request_id = %request_id,
                bytes = found.body.len(),
                "Backend answered"
            );
            metrics::record_search("ok", StatusCode::OK.as_u16(), start_time);
            (StatusCode::OK, [(header::CONTENT_TYPE, found.content_type)], found.body).into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                kind = e.kind(),
                error = %e,
                "Search forwarding failed"
            );
            metrics::record_search(e.kind(), StatusCode::INTERNAL_SERVER_ERROR.as_u16(), start_time);
            e.into_response()
        }
    }
}
