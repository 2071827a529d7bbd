//! JSON file persistence for the library and settings
//!
//! Records and settings are stored as JSON files under the configured data
//! directory. Writes are atomic (write to temp file, then rename) so a file
//! is never left half-written. Loads run through the core's structural
//! filtering: malformed records are dropped and logged rather than failing
//! the whole load.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use bookvault_core::{parse_books_str, parse_settings, BookStore, Settings};

/// Persistence layer for the vault's JSON files
pub struct VaultStorage {
    config: crate::config::Config,
}

impl VaultStorage {
    /// Create a storage handler with the given configuration
    pub fn new(config: crate::config::Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &crate::config::Config {
        &self.config
    }

    /// Load the library, or an empty one if no file exists yet.
    ///
    /// Structurally invalid entries are dropped and logged.
    pub fn load_library(&self) -> Result<BookStore> {
        let path = self.config.library_path();

        if !path.exists() {
            return Ok(BookStore::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read library from {:?}", path))?;

        let parsed = parse_books_str(&content)
            .with_context(|| format!("Failed to load library from {:?}", path))?;

        if parsed.dropped > 0 {
            warn!(
                "Dropped {} malformed record(s) while loading {:?}",
                parsed.dropped, path
            );
        }

        Ok(BookStore::from_books(parsed.books))
    }

    /// Save the library using an atomic write
    pub fn save_library(&self, store: &BookStore) -> Result<()> {
        let path = self.config.library_path();
        let json = serde_json::to_string_pretty(store.list())
            .context("Failed to serialize library")?;

        atomic_write(&path, json.as_bytes())
            .with_context(|| format!("Failed to save library to {:?}", path))
    }

    /// Load settings, falling back to defaults field by field.
    ///
    /// A missing or unreadable settings file yields the defaults.
    pub fn load_settings(&self) -> Result<Settings> {
        let path = self.config.settings_path();

        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        match serde_json::from_str(&content) {
            Ok(value) => Ok(parse_settings(&value)),
            Err(err) => {
                warn!("Settings file {:?} is not valid JSON ({}), using defaults", path, err);
                Ok(Settings::default())
            }
        }
    }

    /// Save settings using an atomic write
    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let path = self.config.settings_path();
        let json =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        atomic_write(&path, json.as_bytes())
            .with_context(|| format!("Failed to save settings to {:?}", path))
    }
}

/// Write bytes to a file atomically: temp file in the same directory, then
/// rename over the target.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .with_context(|| format!("Failed to create temp file {:?}", temp_path))?;

    file.write_all(data)
        .with_context(|| format!("Failed to write to temp file {:?}", temp_path))?;

    file.sync_all()
        .with_context(|| format!("Failed to sync temp file {:?}", temp_path))?;

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename {:?} to {:?}", temp_path, path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use bookvault_core::NewBook;

    fn storage_in(dir: &Path) -> VaultStorage {
        VaultStorage::new(Config {
            data_dir: dir.to_path_buf(),
        })
    }

    fn draft(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Herbert".to_string(),
            pages: 412,
            tag: "SciFi".to_string(),
            date_added: "2024-01-01".to_string(),
            cover_image: None,
        }
    }

    #[test]
    fn test_missing_library_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        let store = storage.load_library().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_library_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());

        let mut store = BookStore::new();
        store.add(draft("Dune"));
        store.add(draft("The Hobbit"));
        storage.save_library(&store).unwrap();

        let loaded = storage.load_library().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.list()[0].title, "Dune");
        assert_eq!(loaded.list(), store.list());
    }

    #[test]
    fn test_load_drops_malformed_entries() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());

        fs::write(
            storage.config().library_path(),
            r#"[{"id": "b1", "title": "Dune"}, {"pages": 9}]"#,
        )
        .unwrap();

        let store = storage.load_library().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].title, "Dune");
    }

    #[test]
    fn test_load_rejects_wrong_shape() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());

        fs::write(storage.config().library_path(), r#"{"not": "an array"}"#).unwrap();
        assert!(storage.load_library().is_err());
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());

        let mut settings = Settings::default();
        settings.target = 12;
        storage.save_settings(&settings).unwrap();

        let loaded = storage.load_settings().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());

        fs::write(storage.config().settings_path(), "{{{{").unwrap();
        let loaded = storage.load_settings().unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.json");
        atomic_write(&target, b"[]").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "[]");
        assert!(!dir.path().join("out.tmp").exists());
    }
}
