//! Structural filtering of persisted and imported data
//!
//! Loads are forgiving: a malformed entry inside an otherwise-valid array
//! is dropped rather than failing the whole load, and settings degrade per
//! field. Only a wrong top-level shape, or a non-empty array with nothing
//! salvageable, surfaces as an error.

use serde_json::Value;

use crate::error::{Result, VaultError};
use crate::models::{Book, Settings, SortDirection, SortField, TimeUnit};

/// A record set recovered from raw persisted data
#[derive(Debug, Clone)]
pub struct ParsedLibrary {
    /// The structurally valid records, in original order
    pub books: Vec<Book>,
    /// How many entries were dropped as malformed
    pub dropped: usize,
}

/// Filter a raw persisted value down to its structurally valid records.
///
/// An entry is structurally valid when it deserializes as a record with at
/// least an `id` and a `title`; every other field takes its default.
/// An empty array is a legitimately empty library, not an error.
pub fn parse_books(value: &Value) -> Result<ParsedLibrary> {
    let entries = value.as_array().ok_or(VaultError::NotAnArray)?;

    let mut books = Vec::with_capacity(entries.len());
    let mut dropped = 0usize;
    for entry in entries {
        match serde_json::from_value::<Book>(entry.clone()) {
            Ok(book) => books.push(book),
            Err(_) => dropped += 1,
        }
    }

    if books.is_empty() && !entries.is_empty() {
        return Err(VaultError::NoValidRecords);
    }

    Ok(ParsedLibrary { books, dropped })
}

/// Parse a JSON string into its structurally valid records.
pub fn parse_books_str(json: &str) -> Result<ParsedLibrary> {
    let value: Value = serde_json::from_str(json)?;
    parse_books(&value)
}

/// Recover settings from a raw persisted value.
///
/// Each field falls back to its default independently when missing or
/// malformed; this never fails.
pub fn parse_settings(value: &Value) -> Settings {
    let mut settings = Settings::default();
    let Some(map) = value.as_object() else {
        return settings;
    };

    if let Some(field) = get::<SortField>(map, "sortField") {
        settings.sort_field = field;
    }
    if let Some(direction) = get::<SortDirection>(map, "sortDirection") {
        settings.sort_direction = direction;
    }
    if let Some(speed) = get::<f64>(map, "pagesPerUnit").or_else(|| get(map, "pagesPerHour")) {
        if speed > 0.0 {
            settings.pages_per_unit = speed;
        }
    }
    if let Some(unit) = get::<TimeUnit>(map, "unit").or_else(|| get(map, "baseUnit")) {
        settings.unit = unit;
    }
    if let Some(target) = get::<u32>(map, "target") {
        settings.target = target;
    }

    settings
}

fn get<T: serde::de::DeserializeOwned>(
    map: &serde_json::Map<String, Value>,
    key: &str,
) -> Option<T> {
    map.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}
