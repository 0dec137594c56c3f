//! Product photo resolution.
//!
//! A record's photo is either its own URL or the fixed default image. Once a
//! slot falls back it stays there for the rest of that render: the product's own
//! URL is never tried again.

use std::time::Duration;

/// Image shown when a product has no photo or its photo fails to load.
pub const DEFAULT_PHOTO: &str = "https://via.placeholder.com/150?text=No+image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSlot {
    Remote(String),
    Fallback,
}

impl PhotoSlot {
    /// Slot for a record's photo URL; absent or blank URLs fall back immediately.
    pub fn resolve(photo_url: Option<&str>) -> Self {
        match photo_url.map(str::trim) {
            Some(url) if !url.is_empty() => PhotoSlot::Remote(url.to_string()),
            _ => PhotoSlot::Fallback,
        }
    }

    /// The photo failed to load. Permanent.
    pub fn mark_failed(&mut self) {
        *self = PhotoSlot::Fallback;
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, PhotoSlot::Fallback)
    }

    /// URL to display.
    pub fn url(&self) -> &str {
        match self {
            PhotoSlot::Remote(url) => url,
            PhotoSlot::Fallback => DEFAULT_PHOTO,
        }
    }

    /// Try to load the remote photo; on any failure switch to the default.
    ///
    /// Fallback slots are left alone.
    pub async fn verify(&mut self, client: &reqwest::Client, timeout: Duration) {
        let PhotoSlot::Remote(url) = &*self else {
            return;
        };

        let loaded = match client.head(url.as_str()).timeout(timeout).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Photo probe failed");
                false
            }
        };

        if !loaded {
            tracing::debug!(url = %url, "Using default photo");
            self.mark_failed();
        }
    }
}
