//! Product records as returned by the backend.
//!
//! Backend payloads are untyped: the same attribute may be a scalar or an
//! array, fields go by several names depending on which collector produced
//! the product, and entries may be missing or `null`. Decoding here never
//! fails for a JSON value; anything unusable becomes a hole that renders as
//! a placeholder.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};
use std::fmt;

const TITLE_KEYS: &[&str] = &["title", "nombre", "product_title", "name"];
const PHOTO_KEYS: &[&str] = &["photoUrl", "photo_url", "product_photo", "imagen", "image"];
const PRICE_KEYS: &[&str] = &["prices", "precio", "price", "product_price"];
const PROVIDER_KEYS: &[&str] = &["providers", "product_provider", "fuente", "source"];
const URL_KEYS: &[&str] = &["urls", "product_url", "url"];

/// The free-text part of a search. Empty means no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: Option<String>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
        }
    }

    /// Term as sent on the wire (`search=` when absent).
    pub fn as_param(&self) -> &str {
        self.term.as_deref().unwrap_or("")
    }
}

/// A price as the backend sent it: a JSON number or free text ("1.299,00 €").
#[derive(Debug, Clone, PartialEq)]
pub enum OfferValue {
    Number(Number),
    Text(String),
}

impl OfferValue {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(OfferValue::Number(n.clone())),
            Value::String(s) => non_blank(s).map(OfferValue::Text),
            _ => None,
        }
    }
}

impl fmt::Display for OfferValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferValue::Number(n) => write!(f, "{}", n),
            OfferValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OfferValue {
    fn from(n: i64) -> Self {
        OfferValue::Number(n.into())
    }
}

impl From<&str> for OfferValue {
    fn from(s: &str) -> Self {
        OfferValue::Text(s.to_string())
    }
}

/// One offer attribute: absent, a single scalar, or a sequence with holes.
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    None,
    One(T),
    Many(Vec<Option<T>>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::None
    }
}

impl<T> OneOrMany<T> {
    /// Number of positions, holes included. A scalar counts as one.
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::None => 0,
            OneOrMany::One(_) => 1,
            OneOrMany::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `index`, `None` when out of range or a hole.
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            OneOrMany::None => None,
            OneOrMany::One(value) => (index == 0).then_some(value),
            OneOrMany::Many(items) => items.get(index).and_then(Option::as_ref),
        }
    }

    fn decode(value: Option<&Value>, item: impl Fn(&Value) -> Option<T>) -> Self {
        match value {
            None | Some(Value::Null) => OneOrMany::None,
            Some(Value::Array(items)) => OneOrMany::Many(items.iter().map(&item).collect()),
            // A present scalar always occupies one position, usable or not.
            Some(scalar) => match item(scalar) {
                Some(value) => OneOrMany::One(value),
                None => OneOrMany::Many(vec![None]),
            },
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        OneOrMany::Many(items.into_iter().map(Some).collect())
    }
}

/// One logical product and its parallel offer attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRecord {
    pub title: String,
    pub photo_url: Option<String>,
    pub prices: OneOrMany<OfferValue>,
    pub providers: OneOrMany<String>,
    pub urls: OneOrMany<String>,
}

impl ProductRecord {
    /// Decode a record from any JSON value. Never fails.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self {
            title: first_text(object, TITLE_KEYS).unwrap_or_default(),
            photo_url: first_text(object, PHOTO_KEYS),
            prices: OneOrMany::decode(first_present(object, PRICE_KEYS), OfferValue::from_json),
            providers: OneOrMany::decode(first_present(object, PROVIDER_KEYS), label),
            urls: OneOrMany::decode(first_present(object, URL_KEYS), text),
        }
    }
}

impl<'de> Deserialize<'de> for ProductRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

fn first_present<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| !value.is_null())
}

fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|key| object.get(*key)).find_map(text)
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn text(value: &Value) -> Option<String> {
    value.as_str().and_then(non_blank)
}

// Providers are names, but some collectors emit numeric store ids.
fn label(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        other => text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_canonical_shape() {
        let record = ProductRecord::from_json(&json!({
            "title": "Laptop",
            "photoUrl": "http://img/1.png",
            "prices": [10, "20.5"],
            "providers": ["A", "B"],
            "urls": ["http://a", "http://b"],
        }));

        assert_eq!(record.title, "Laptop");
        assert_eq!(record.photo_url.as_deref(), Some("http://img/1.png"));
        assert_eq!(record.prices.len(), 2);
        assert_eq!(record.prices.get(1), Some(&OfferValue::Text("20.5".into())));
        assert_eq!(record.providers.get(0).map(String::as_str), Some("A"));
    }

    #[test]
    fn test_decodes_legacy_field_names() {
        let record: ProductRecord = serde_json::from_value(json!({
            "nombre": "X",
            "precio": 5,
            "fuente": "https://webscraper.io",
        }))
        .unwrap();

        assert_eq!(record.title, "X");
        assert_eq!(record.prices, OneOrMany::One(OfferValue::from(5)));
        assert_eq!(record.providers.len(), 1);
        assert!(record.urls.is_empty());
        assert_eq!(record.photo_url, None);
    }

    #[test]
    fn test_first_alias_wins_without_duplicate_errors() {
        let record = ProductRecord::from_json(&json!({
            "precio": 5,
            "price": 7,
            "product_title": "Amazon item",
            "title": "",
        }));

        assert_eq!(record.prices, OneOrMany::One(OfferValue::from(5)));
        assert_eq!(record.title, "Amazon item");
    }

    #[test]
    fn test_garbage_becomes_holes() {
        let record = ProductRecord::from_json(&json!({
            "title": 42,
            "prices": [null, true, {"x": 1}, 3],
            "providers": "",
            "urls": [[], "http://x"],
            "photoUrl": "   ",
        }));

        assert_eq!(record.title, "");
        assert_eq!(record.prices.len(), 4);
        assert_eq!(record.prices.get(0), None);
        assert_eq!(record.prices.get(3), Some(&OfferValue::from(3)));
        assert_eq!(record.providers.len(), 1);
        assert_eq!(record.providers.get(0), None);
        assert_eq!(record.urls.get(0), None);
        assert_eq!(record.urls.get(1).map(String::as_str), Some("http://x"));
        assert_eq!(record.photo_url, None);
    }

    #[test]
    fn test_non_object_element_decodes_to_empty_record() {
        let records: Vec<ProductRecord> = serde_json::from_str(r#"[1, "x", {"title": "ok"}]"#).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], ProductRecord::default());
        assert_eq!(records[2].title, "ok");
    }

    #[test]
    fn test_unusable_scalars_keep_their_position() {
        let record = ProductRecord::from_json(&json!({
            "precio": "",
            "fuente": true,
            "url": {},
        }));

        assert_eq!(record.prices, OneOrMany::Many(vec![None]));
        assert_eq!(record.providers.len(), 1);
        assert_eq!(record.urls.len(), 1);
        assert_eq!(record.urls.get(0), None);
    }

    #[test]
    fn test_scalar_get_only_at_zero() {
        let one = OneOrMany::One("A".to_string());
        assert_eq!(one.get(0).map(String::as_str), Some("A"));
        assert_eq!(one.get(1), None);
    }

    #[test]
    fn test_number_display() {
        assert_eq!(OfferValue::from(10).to_string(), "10");
        let value = OfferValue::from_json(&json!(10.5)).unwrap();
        assert_eq!(value.to_string(), "10.5");
    }

    #[test]
    fn test_search_query_param() {
        assert_eq!(SearchQuery::default().as_param(), "");
        assert_eq!(SearchQuery::new("laptop").as_param(), "laptop");
    }
}
