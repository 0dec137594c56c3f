//! Terminal rendering of a result set as per-product comparison tables.

use comfy_table::{presets::UTF8_BORDERS_ONLY, ContentArrangement, Table};
use std::time::Duration;

use crate::catalog::offers::{normalize_offers, Cell, Row};
use crate::catalog::photo::PhotoSlot;
use crate::catalog::record::ProductRecord;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit OSC 8 hyperlinks instead of raw URLs in the link column.
    pub hyperlinks: bool,
}

/// A product ready to draw: title, resolved photo and aligned offer rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub title: String,
    pub photo: PhotoSlot,
    pub rows: Vec<Row>,
}

impl ProductView {
    pub fn from_record(record: &ProductRecord) -> Self {
        Self {
            title: record.title.clone(),
            photo: PhotoSlot::resolve(record.photo_url.as_deref()),
            rows: normalize_offers(record),
        }
    }
}

/// Build views for a whole result set, in order.
pub fn build_views(records: &[ProductRecord]) -> Vec<ProductView> {
    records.iter().map(ProductView::from_record).collect()
}

/// Probe every remote photo, replacing broken ones with the default image.
pub async fn verify_photos(views: &mut [ProductView], client: &reqwest::Client, timeout: Duration) {
    for view in views.iter_mut() {
        view.photo.verify(client, timeout).await;
    }
}

/// Render the result set. An empty set renders a single notice line.
pub fn render(views: &[ProductView], options: RenderOptions) -> String {
    if views.is_empty() {
        return "No products found.\n".to_string();
    }

    let mut out = String::new();
    for view in views {
        let title = if view.title.is_empty() { "(untitled)" } else { view.title.as_str() };
        out.push_str(title);
        out.push('\n');
        out.push_str("Photo: ");
        out.push_str(view.photo.url());
        out.push('\n');

        if view.rows.is_empty() {
            out.push_str("  no offers\n\n");
            continue;
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_BORDERS_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Price", "Provider", "Link"]);

        for row in &view.rows {
            table.add_row(vec![
                row.price.to_string(),
                row.provider.to_string(),
                link_text(&row.url, options),
            ]);
        }

        out.push_str(&table.to_string());
        out.push_str("\n\n");
    }
    out
}

fn link_text(cell: &Cell, options: RenderOptions) -> String {
    match cell {
        Cell::Link(url) if options.hyperlinks => {
            format!("\x1b]8;;{url}\x1b\\View product\x1b]8;;\x1b\\")
        }
        other => other.to_string(),
    }
}
