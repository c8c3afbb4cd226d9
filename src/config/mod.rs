//! Configuration module for searchfront
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;

/// Environment variable pointing at an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "SEARCHFRONT_SETTINGS_PATH";

/// First existing settings file, checking `SEARCHFRONT_SETTINGS_PATH` first
pub fn find_settings_file() -> Option<PathBuf> {
    let explicit = std::env::var(SETTINGS_PATH_VAR).ok().map(PathBuf::from);

    let mut candidates: Vec<PathBuf> = explicit.into_iter().collect();
    candidates.extend([
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/searchfront/settings.yml"),
    ]);
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("searchfront/settings.yml"));
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Load settings from `path` (or defaults when `None`) and apply
/// environment overrides
pub fn load(path: Option<&PathBuf>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}
