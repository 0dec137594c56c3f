//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (add or keep request ID)
//!     → search.rs (forward raw query to the upstream)
//!     → response.rs (failures as a 500 JSON envelope)
//!     → Send to client
//! ```

pub mod health;
pub mod request;
pub mod response;
pub mod search;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::{ErrorEnvelope, GATEWAY_ERROR_MESSAGE};
pub use server::{AppState, HttpServer};
