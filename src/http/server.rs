//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, CORS, request ID)
//! - Bind server to listener
//! - Swap the upstream handle when a new configuration arrives
//! - Stop accepting on shutdown and drain in-flight requests

use arc_swap::ArcSwap;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{CorsConfig, GatewayConfig};
use crate::http::health::get_health;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, X_REQUEST_ID};
use crate::http::search::search_products;
use crate::lifecycle::shutdown::ShutdownSignal;
use crate::observability::metrics;
use crate::upstream::{GatewayError, GatewayResult, Upstream};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<ArcSwap<Upstream>>,
}

/// HTTP server for the product gateway.
pub struct HttpServer {
    router: Router,
    upstream: Arc<ArcSwap<Upstream>>,
    /// Deadline baked into the router; fixed until restart.
    request_secs: u64,
}

/// Why a reloaded configuration was not applied.
#[derive(Debug, Error)]
enum ReloadError {
    #[error("timeouts.upstream_secs ({upstream}) must be below the running request timeout ({request})")]
    OutlivesRequest { upstream: u64, request: u64 },

    #[error(transparent)]
    Upstream(#[from] GatewayError),
}

/// Build the upstream for a reloaded configuration.
///
/// The request timeout layer keeps its startup value, so the new upstream
/// deadline is checked against that rather than the file's own.
fn reload_upstream(request_secs: u64, config: &GatewayConfig) -> Result<Upstream, ReloadError> {
    let upstream = config.timeouts.upstream_secs;
    if upstream >= request_secs {
        return Err(ReloadError::OutlivesRequest {
            upstream,
            request: request_secs,
        });
    }
    if config.timeouts.request_secs != request_secs {
        tracing::warn!(
            running = request_secs,
            requested = config.timeouts.request_secs,
            "timeouts.request_secs changes need a restart"
        );
    }
    Ok(Upstream::from_config(config)?)
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let upstream = Arc::new(ArcSwap::from_pointee(Upstream::from_config(&config)?));

        let state = AppState {
            upstream: upstream.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            upstream,
            request_secs: config.timeouts.request_secs,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/productos", get(search_products))
            .route("/health", get(get_health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(cors_layer(&config.cors))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<GatewayConfig>,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.upstream.load().search_url(),
            "HTTP server starting"
        );

        let upstream = self.upstream.clone();
        let request_secs = self.request_secs;
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                match reload_upstream(request_secs, &new_config) {
                    Ok(next) => {
                        tracing::info!(upstream = %next.search_url(), "Upstream reloaded");
                        upstream.store(Arc::new(next));
                        metrics::record_config_reload(true);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Rejected reloaded upstream, keeping current one");
                        metrics::record_config_reload(false);
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.allows_any() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| HeaderValue::from_str(o.trim_end_matches('/')).ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .expose_headers([X_REQUEST_ID])
}
