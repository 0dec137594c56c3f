//! Aggregation/display client.
//!
//! # Data Flow
//! ```text
//! search term
//!     → session.rs (ticket per search, newest wins)
//!     → client.rs (GET <gateway>/productos?search=…)
//!     → record.rs (defensive decode of each product)
//!     → offers.rs (align prices/providers/urls into rows)
//!     → photo.rs (photo or default image)
//!     → render.rs (comparison tables)
//! ```

pub mod client;
pub mod offers;
pub mod photo;
pub mod record;
pub mod render;
pub mod session;

pub use client::{CatalogClient, ClientError};
pub use offers::{normalize_offers, Cell, Row, PLACEHOLDER};
pub use photo::{PhotoSlot, DEFAULT_PHOTO};
pub use record::{OfferValue, OneOrMany, ProductRecord, SearchQuery};
pub use render::{build_views, render, verify_photos, ProductView, RenderOptions};
pub use session::{Applied, SearchSession, SearchTicket};
