//! Book Vault Core Library
//!
//! This crate provides the core functionality for Book Vault, a
//! personal-library bookkeeping tool: record validation, search matching,
//! the filter/sort pipeline, and aggregate reading statistics.
//!
//! Everything here is a pure, synchronous computation over in-memory data.
//! Persistence and display belong to the calling layer; the core consumes
//! raw persisted values (filtering out malformed entries) and returns plain
//! values or recoverable errors.
//!
//! # Quick Start
//!
//! ```
//! use bookvault_core::{BookStore, NewBook, SearchState, Settings, run_query};
//!
//! let mut store = BookStore::new();
//! store.add(NewBook {
//!     title: "Dune".to_string(),
//!     author: "Herbert".to_string(),
//!     pages: 412,
//!     tag: "SciFi".to_string(),
//!     date_added: "2024-01-01".to_string(),
//!     cover_image: None,
//! });
//!
//! let view = run_query(
//!     store.list(),
//!     &SearchState::new("dune", false),
//!     &Settings::default(),
//! );
//! assert_eq!(view.len(), 1);
//! ```
//!
//! # Modules
//!
//! - `models`: Record, settings, and search-state data structures
//! - `validate`: Pattern-based field validation
//! - `search`: Query matching and match highlighting
//! - `store`: In-memory ordered record store
//! - `query`: Filter + sort pipeline
//! - `stats`: Aggregate statistics
//! - `import`: Structural filtering of persisted data

pub mod error;
pub mod import;
pub mod models;
pub mod query;
pub mod search;
pub mod stats;
pub mod store;
pub mod validate;

pub use error::{Result, VaultError};
pub use import::{parse_books, parse_books_str, parse_settings, ParsedLibrary};
pub use models::{
    Book, BookPatch, NewBook, SearchState, Settings, SortDirection, SortField, TimeUnit,
};
pub use query::run_query;
pub use search::{highlight, matches, MARK_CLOSE, MARK_OPEN};
pub use stats::{compute_stats, tag_counts, trend_days, LibraryStats, ReadingEstimate};
pub use store::BookStore;
pub use validate::{
    validate_all, validate_author, validate_date, validate_field, validate_pages, validate_tag,
    validate_title, BookForm, Field, ValidationReport,
};
