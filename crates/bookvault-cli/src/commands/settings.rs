//! Settings command handlers

use anyhow::{bail, Context, Result};

use bookvault_core::{Settings, SortDirection, SortField, TimeUnit};

use crate::output::{Output, OutputFormat};
use crate::storage::VaultStorage;

/// Show current display and goal settings
pub fn show(storage: &VaultStorage, output: &Output) -> Result<()> {
    let settings = storage.load_settings()?;

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        OutputFormat::Quiet => {
            println!("{}", settings.sort_field.as_str());
        }
        OutputFormat::Human => {
            println!("Settings:");
            println!("  sort_field:     {}", settings.sort_field.as_str());
            println!("  sort_direction: {}", settings.sort_direction.as_str());
            println!("  pages_per_unit: {}", settings.pages_per_unit);
            println!("  unit:           {}", settings.unit.as_str());
            println!("  target:         {}", settings.target);
        }
    }

    Ok(())
}

/// Set a settings value
pub fn set(storage: &VaultStorage, key: String, value: String, output: &Output) -> Result<()> {
    let mut settings = storage.load_settings()?;

    apply(&mut settings, &key, &value)?;

    storage
        .save_settings(&settings)
        .context("Failed to save settings")?;

    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn apply(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    match key {
        "sort_field" | "sortField" => {
            settings.sort_field = value.parse::<SortField>().map_err(anyhow::Error::msg)?;
        }
        "sort_direction" | "sortDirection" => {
            settings.sort_direction = value.parse::<SortDirection>().map_err(anyhow::Error::msg)?;
        }
        "pages_per_unit" | "pagesPerUnit" => {
            let speed: f64 = value
                .parse()
                .context("Invalid value for pages_per_unit. Use a number.")?;
            if speed <= 0.0 {
                bail!("pages_per_unit must be positive");
            }
            settings.pages_per_unit = speed;
        }
        "unit" => {
            settings.unit = value.parse::<TimeUnit>().map_err(anyhow::Error::msg)?;
        }
        "target" => {
            settings.target = value
                .parse()
                .context("Invalid value for target. Use a non-negative whole number.")?;
        }
        _ => {
            bail!(
                "Unknown settings key: '{}'\n\
                 Valid keys: sort_field, sort_direction, pages_per_unit, unit, target",
                key
            );
        }
    }
    Ok(())
}
