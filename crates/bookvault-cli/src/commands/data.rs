//! Export and import command handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

use bookvault_core::{parse_books_str, BookStore};

use crate::output::Output;
use crate::storage::VaultStorage;

/// Default export file name
const EXPORT_FILE: &str = "book-vault-export.json";

/// Export the library as pretty-printed JSON
pub fn export(storage: &VaultStorage, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let store = storage.load_library()?;
    let path = path.unwrap_or_else(|| PathBuf::from(EXPORT_FILE));

    let json =
        serde_json::to_string_pretty(store.list()).context("Failed to serialize library")?;
    fs::write(&path, json).with_context(|| format!("Failed to write export to {:?}", path))?;

    output.success(&format!(
        "Exported {} book(s) to {}",
        store.len(),
        path.display()
    ));
    Ok(())
}

/// Import a JSON file, replacing the library.
///
/// Structurally invalid entries are dropped; the whole import only fails
/// when the file is not an array or contains nothing salvageable.
pub fn import(storage: &VaultStorage, path: PathBuf, output: &Output) -> Result<()> {
    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;

    let parsed = parse_books_str(&content)
        .with_context(|| format!("Failed to import {:?}", path))?;

    if parsed.dropped > 0 {
        warn!("Skipped {} malformed record(s) in {:?}", parsed.dropped, path);
        output.message(&format!(
            "Skipped {} malformed record(s)",
            parsed.dropped
        ));
    }

    let store = BookStore::from_books(parsed.books);
    storage.save_library(&store).context("Failed to save library")?;

    output.success(&format!("Imported {} book(s)", store.len()));
    Ok(())
}
