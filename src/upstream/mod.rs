//! Upstream subsystem: the backend data source behind the gateway.
//!
//! # Data Flow
//! ```text
//! search handler
//!     → backend.rs (attach raw query, send with timeout)
//!     → backend answers 2xx + JSON  → UpstreamResponse (bytes + content type)
//!     → anything else               → error.rs (GatewayError)
//! ```
//!
//! # Design Decisions
//! - No retries: a failed call is terminal for that request
//! - Every call carries a deadline; an unresponsive backend cannot pin a handler
//! - The body is validated as JSON but never re-serialized

pub mod backend;
pub mod error;

pub use backend::{Upstream, UpstreamResponse};
pub use error::{GatewayError, GatewayResult};
