//! Normalization of list envelopes.
//!
//! The backend is inconsistent about how it wraps collections. Depending on the
//! route a list arrives as a bare array, as `{"<key>": [...]}` (for example
//! `roles`, `users`, `questions`), or as `{"data": [...]}`. Every list call in
//! the gateway goes through [`normalize_list`] or [`normalize_page`], which
//! resolve the shapes in this priority order:
//!
//! 1. the body itself is an array;
//! 2. the body is an object whose `key` member is an array;
//! 3. the body is an object whose `data` member is an array;
//! 4. anything else is an empty list.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::EnvelopeError;

/// One page of a collection plus the backend's total count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

fn split_envelope(body: Value, key: &str) -> (Vec<Value>, Option<u64>) {
    match body {
        Value::Array(items) => (items, None),
        Value::Object(mut map) => {
            let total = map.get("total").and_then(Value::as_u64);
            let items = match map.remove(key) {
                Some(Value::Array(items)) => items,
                _ => match map.remove("data") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                },
            };
            (items, total)
        }
        _ => (Vec::new(), None),
    }
}

/// Extract the items of a list envelope.
///
/// # Errors
/// Returns [`EnvelopeError::Decode`] if an item does not match `T`.
pub fn normalize_list<T: DeserializeOwned>(body: Value, key: &str) -> Result<Vec<T>, EnvelopeError> {
    let (items, _) = split_envelope(body, key);
    Ok(serde_json::from_value(Value::Array(items))?)
}

/// Extract the items and the total count of a paginated envelope.
///
/// A missing or zero `total` falls back to the number of items received,
/// so a bare-array reply never counts past the page it was limited to.
///
/// # Errors
/// Returns [`EnvelopeError::Decode`] if an item does not match `T`.
pub fn normalize_page<T: DeserializeOwned>(body: Value, key: &str) -> Result<Page<T>, EnvelopeError> {
    let (items, total) = split_envelope(body, key);
    let received = items.len() as u64;
    let items: Vec<T> = serde_json::from_value(Value::Array(items))?;
    let total = match total {
        Some(total) if total > 0 => total,
        _ => received,
    };
    Ok(Page { items, total })
}

/// Extract a single record that may be wrapped as `{"<key>": {...}}` or
/// `{"data": {...}}`; any other body is taken as the record itself.
///
/// # Errors
/// Returns [`EnvelopeError::Decode`] if the record does not match `T`.
pub fn normalize_item<T: DeserializeOwned>(body: Value, key: &str) -> Result<T, EnvelopeError> {
    let wrapped = [key, "data"]
        .into_iter()
        .find_map(|k| body.get(k).filter(|inner| inner.is_object()).cloned());
    Ok(serde_json::from_value(wrapped.unwrap_or(body))?)
}
