//! Loading and saving [`LogSettings`].
//!
//! Settings resolve in this priority order:
//! 1. Environment variables (`RIOLOG_OUTPUT`, `RIOLOG_PATH`)
//! 2. Values loaded from file
//! 3. Default values (all sinks, default path)

use riolog_types::{LogSettings, RioLogError, Result};
use std::fs;
use std::path::Path;

/// Overrides the sink selection, e.g. `console|file` or `3`.
pub const OUTPUT_ENV: &str = "RIOLOG_OUTPUT";

/// Overrides the log file path template.
pub const PATH_ENV: &str = "RIOLOG_PATH";

/// Load settings from `path` and apply environment overrides.
///
/// A missing file yields the defaults.
pub fn load(path: impl AsRef<Path>) -> Result<LogSettings> {
    load_with_env(path, |key| std::env::var(key).ok())
}

/// [`load`] with an explicit environment lookup.
pub fn load_with_env(path: impl AsRef<Path>, lookup: impl Fn(&str) -> Option<String>) -> Result<LogSettings> {
    let mut settings = read(path.as_ref())?;
    apply_overrides(&mut settings, lookup)?;
    Ok(settings)
}

/// Apply `RIOLOG_OUTPUT` and `RIOLOG_PATH` from `lookup`.
pub fn apply_overrides(settings: &mut LogSettings, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(output) = lookup(OUTPUT_ENV) {
        settings.output = output
            .parse()
            .map_err(|e| RioLogError::Config(format!("Invalid {}: {}", OUTPUT_ENV, e)))?;
    }
    if let Some(path) = lookup(PATH_ENV) {
        settings.path = Some(path);
    }
    Ok(())
}

/// Write settings to `path`, as JSON for `.json` files and YAML otherwise.
pub fn save(settings: &LogSettings, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let content = if is_json(path) {
        serde_json::to_string_pretty(settings)?
    } else {
        serde_yaml::to_string(settings)?
    };

    fs::write(path, content)
        .map_err(|e| RioLogError::Config(format!("Failed to write settings file: {}", e)))
}

fn read(path: &Path) -> Result<LogSettings> {
    if !path.exists() {
        return Ok(LogSettings::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| RioLogError::Config(format!("Failed to read settings file: {}", e)))?;

    let settings = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(settings)
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
