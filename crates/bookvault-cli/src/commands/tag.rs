//! Tag command handlers

use anyhow::Result;

use bookvault_core::tag_counts;

use crate::output::Output;
use crate::storage::VaultStorage;

/// List all tags with usage counts
pub fn list(storage: &VaultStorage, output: &Output) -> Result<()> {
    let store = storage.load_library()?;
    let tags = tag_counts(store.list());
    output.print_tags(&tags);
    Ok(())
}
