//! Data models for Book Vault
//!
//! Defines the core data structures: Book records, partial-update patches,
//! display settings, and search state. Serialized field names are camelCase
//! to stay compatible with previously exported vault files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book record in the vault
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque unique identifier, assigned at creation
    pub id: String,
    /// Book title
    pub title: String,
    /// Author name
    #[serde(default)]
    pub author: String,
    /// Page count
    #[serde(default)]
    pub pages: u32,
    /// Single organizational tag
    #[serde(default)]
    pub tag: String,
    /// Calendar date the book was added (ISO `YYYY-MM-DD`)
    ///
    /// Kept as a plain string: the date rule is a syntactic range check
    /// that accepts days 01-31 for every month, and a typed date would
    /// reject values the contract accepts.
    #[serde(default)]
    pub date_added: String,
    /// Optional cover image as a data URI
    #[serde(
        default,
        alias = "cover_image",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_image: Option<String>,
    /// When this record was created (stamped by the store)
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// When this record was last updated (stamped by the store)
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Merge partial fields onto this record and refresh `updated_at`.
    ///
    /// `id` and `created_at` are never touched.
    pub fn merge(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(pages) = patch.pages {
            self.pages = pages;
        }
        if let Some(tag) = patch.tag {
            self.tag = tag;
        }
        if let Some(date_added) = patch.date_added {
            self.date_added = date_added;
        }
        if let Some(cover_image) = patch.cover_image {
            self.cover_image = Some(cover_image);
        }
        self.updated_at = Utc::now();
    }
}

/// Field values for a book about to be created
///
/// The store assigns the id and timestamps; everything else comes from
/// already-validated input.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub pages: u32,
    pub tag: String,
    pub date_added: String,
    pub cover_image: Option<String>,
}

/// Partial fields for updating an existing book
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<u32>,
    pub tag: Option<String>,
    pub date_added: Option<String>,
    pub cover_image: Option<String>,
}

/// Field a record list can be sorted by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    Author,
    Pages,
    Tag,
    DateAdded,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Pages => "pages",
            SortField::Tag => "tag",
            SortField::DateAdded => "dateAdded",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            "pages" => Ok(SortField::Pages),
            "tag" => Ok(SortField::Tag),
            "dateAdded" | "date-added" | "date" => Ok(SortField::DateAdded),
            other => Err(format!("unknown sort field: '{}'", other)),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction: '{}'", other)),
        }
    }
}

/// Unit used for the reading-time estimate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Hours,
    Minutes,
}

impl TimeUnit {
    /// Short label used when displaying estimates
    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Hours => "h",
            TimeUnit::Minutes => "min",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
        }
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hours" | "h" => Ok(TimeUnit::Hours),
            "minutes" | "min" => Ok(TimeUnit::Minutes),
            other => Err(format!("unknown unit: '{}'", other)),
        }
    }
}

/// Display and goal settings
///
/// Every field has an independent default so partially-present or
/// partially-malformed persisted settings degrade per field rather than
/// resetting wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Field the record list is sorted by
    #[serde(default = "default_sort_field")]
    pub sort_field: SortField,
    /// Sort direction
    #[serde(default)]
    pub sort_direction: SortDirection,
    /// Reading speed in pages per unit of time
    #[serde(default = "default_pages_per_unit", alias = "pagesPerHour")]
    pub pages_per_unit: f64,
    /// Unit the reading-time estimate is reported in
    #[serde(default, alias = "baseUnit")]
    pub unit: TimeUnit,
    /// Goal: number of books to collect
    #[serde(default = "default_target")]
    pub target: u32,
}

fn default_sort_field() -> SortField {
    SortField::DateAdded
}

fn default_pages_per_unit() -> f64 {
    30.0
}

fn default_target() -> u32 {
    50
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sort_field: default_sort_field(),
            sort_direction: SortDirection::default(),
            pages_per_unit: default_pages_per_unit(),
            unit: TimeUnit::default(),
            target: default_target(),
        }
    }
}

/// Transient search state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Free text, possibly a regular expression
    pub query: String,
    /// Whether matching is case sensitive
    pub case_sensitive: bool,
}

impl SearchState {
    pub fn new(query: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            query: query.into(),
            case_sensitive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        let now = Utc::now();
        Book {
            id: "book-1".to_string(),
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            pages: 412,
            tag: "SciFi".to_string(),
            date_added: "2024-01-01".to_string(),
            cover_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_merge_applies_partial_fields() {
        let mut book = sample_book();
        book.merge(BookPatch {
            pages: Some(500),
            ..BookPatch::default()
        });
        assert_eq!(book.pages, 500);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.id, "book-1");
    }

    #[test]
    fn test_merge_refreshes_updated_at() {
        let mut book = sample_book();
        let original = book.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(10));
        book.merge(BookPatch::default());
        assert!(book.updated_at > original);
    }

    #[test]
    fn test_book_serializes_camel_case() {
        let book = sample_book();
        let json = serde_json::to_value(&book).unwrap();
        assert!(json.get("dateAdded").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        // Absent cover image is omitted entirely
        assert!(json.get("coverImage").is_none());
    }

    #[test]
    fn test_book_accepts_snake_case_cover_image() {
        let json = serde_json::json!({
            "id": "book-2",
            "title": "The Hobbit",
            "cover_image": "data:image/png;base64,AAAA"
        });
        let book: Book = serde_json::from_value(json).unwrap();
        assert_eq!(book.cover_image.as_deref(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_book_serialization_round_trip() {
        let book = sample_book();
        let json = serde_json::to_string(&book).unwrap();
        let deserialized: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(book, deserialized);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sort_field, SortField::DateAdded);
        assert_eq!(settings.sort_direction, SortDirection::Descending);
        assert_eq!(settings.pages_per_unit, 30.0);
        assert_eq!(settings.unit, TimeUnit::Hours);
        assert_eq!(settings.target, 50);
    }

    #[test]
    fn test_settings_accepts_legacy_field_names() {
        let settings: Settings =
            serde_json::from_str(r#"{"pagesPerHour": 45, "baseUnit": "minutes"}"#).unwrap();
        assert_eq!(settings.pages_per_unit, 45.0);
        assert_eq!(settings.unit, TimeUnit::Minutes);
    }

    #[test]
    fn test_sort_field_from_str() {
        assert_eq!("title".parse::<SortField>().unwrap(), SortField::Title);
        assert_eq!("dateAdded".parse::<SortField>().unwrap(), SortField::DateAdded);
        assert!("isbn".parse::<SortField>().is_err());
    }
}
