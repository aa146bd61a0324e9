//! `pitchcraft config` handler.

use pitchcraft::{JsonError, PitchcraftResult, ProviderConfig};
use std::path::Path;

/// Print the effective provider configuration as JSON.
pub fn show_config(file: Option<&Path>) -> PitchcraftResult<()> {
    let config = match file {
        Some(path) => ProviderConfig::from_file(path)?,
        None => ProviderConfig::load()?,
    };
    let rendered = serde_json::to_string_pretty(&config)
        .map_err(|e| JsonError::new("configuration", e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}
