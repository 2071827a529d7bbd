//! Stats command handler

use anyhow::Result;
use chrono::Local;

use bookvault_core::compute_stats;

use crate::output::Output;
use crate::storage::VaultStorage;

/// Show aggregate statistics for the library
pub fn show(storage: &VaultStorage, output: &Output) -> Result<()> {
    let store = storage.load_library()?;
    let settings = storage.load_settings()?;

    let today = Local::now().date_naive();
    let stats = compute_stats(store.list(), &settings, today);
    output.print_stats(&stats, &settings, today);
    Ok(())
}
