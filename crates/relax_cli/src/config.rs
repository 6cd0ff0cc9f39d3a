//! Settings file loading.

use anyhow::{Context, Result};
use relax_core::settings::SimulationSettings;
use std::fs;
use std::path::Path;

/// Parse TOML settings text. Keys that are left out keep their defaults.
pub fn parse_settings(text: &str) -> Result<SimulationSettings> {
    let settings: SimulationSettings = toml::from_str(text)?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings from `path`, or the defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> Result<SimulationSettings> {
    let Some(path) = path else {
        return Ok(SimulationSettings::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    parse_settings(&text).with_context(|| format!("Invalid settings file {}", path.display()))
}
