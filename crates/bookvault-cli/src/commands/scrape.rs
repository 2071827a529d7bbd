//! Scrape command handler

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use bookvault_core::NewBook;

use crate::commands::book::today_iso;
use crate::output::Output;
use crate::scrape::extract_books;
use crate::storage::VaultStorage;

/// Page count assigned to scraped books until the user edits them
const SCRAPED_PAGES: u32 = 100;
/// Tag assigned to scraped books
const SCRAPED_TAG: &str = "Scraped";

/// Extract books from an HTML file and save them to the vault
pub fn run(storage: &VaultStorage, file: PathBuf, output: &Output) -> Result<()> {
    let html =
        fs::read_to_string(&file).with_context(|| format!("Failed to read {:?}", file))?;

    let found = extract_books(&html);
    debug!("Found {} candidate book(s) in {:?}", found.len(), file);

    if found.is_empty() {
        output.message("No books found. Expected markup like <h3>Title</h3><p class=\"author\">Author</p>.");
        return Ok(());
    }

    let mut store = storage.load_library()?;
    let today = today_iso();
    for item in &found {
        store.add(NewBook {
            title: item.title.clone(),
            author: item.author.clone(),
            pages: SCRAPED_PAGES,
            tag: SCRAPED_TAG.to_string(),
            date_added: today.clone(),
            cover_image: None,
        });
    }

    storage.save_library(&store).context("Failed to save library")?;

    output.success(&format!("Saved {} scraped book(s)", found.len()));
    Ok(())
}
