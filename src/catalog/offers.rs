//! Aligning a record's parallel offer attributes into table rows.

use std::fmt;

use crate::catalog::record::ProductRecord;

/// Text shown wherever an offer attribute is missing.
pub const PLACEHOLDER: &str = "-";

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Plain value.
    Value(String),
    /// A purchase URL, rendered as an external link.
    Link(String),
    /// Nothing at this index.
    Placeholder,
}

impl Cell {
    fn value(value: Option<String>) -> Self {
        value.map_or(Cell::Placeholder, Cell::Value)
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Cell::Placeholder)
    }

    /// Text shown in the cell.
    pub fn text(&self) -> &str {
        match self {
            Cell::Value(s) | Cell::Link(s) => s,
            Cell::Placeholder => PLACEHOLDER,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// One purchasing option: the i-th price, provider and URL of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub price: Cell,
    pub provider: Cell,
    pub url: Cell,
}

/// Align the price, provider and URL sequences of `record` by index.
///
/// Yields as many rows as the longest sequence; shorter ones are padded with
/// placeholders. Scalars count as one-element sequences. Never fails.
pub fn normalize_offers(record: &ProductRecord) -> Vec<Row> {
    let row_count = record
        .prices
        .len()
        .max(record.providers.len())
        .max(record.urls.len());

    (0..row_count)
        .map(|i| Row {
            price: Cell::value(record.prices.get(i).map(ToString::to_string)),
            provider: Cell::value(record.providers.get(i).cloned()),
            url: record
                .urls
                .get(i)
                .map_or(Cell::Placeholder, |u| Cell::Link(u.clone())),
        })
        .collect()
}
