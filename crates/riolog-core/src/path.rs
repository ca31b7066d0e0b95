//! Log path resolution.
//!
//! The file sink writes next to the running executable unless told
//! otherwise: `<exe dir>/logging/log_.txt`. The rolling appender inserts the
//! date between the file stem and the extension.

use riolog_types::{bail, RioLogError, Result};
use std::path::{Path, PathBuf};

/// Directory created beside the executable for log files.
pub const LOG_DIR_NAME: &str = "logging";

/// File name template for the default log path.
pub const LOG_FILE_NAME: &str = "log_.txt";

/// Locates the directory of the running executable.
#[cfg_attr(test, mockall::automock)]
pub trait ExeLocator: Send + Sync {
    /// Directory containing the running executable.
    fn executable_dir(&self) -> Result<PathBuf>;
}

/// [`ExeLocator`] backed by [`std::env::current_exe`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentExe;

impl ExeLocator for CurrentExe {
    fn executable_dir(&self) -> Result<PathBuf> {
        let exe = std::env::current_exe()
            .map_err(|e| RioLogError::Path(format!("Cannot locate running executable: {}", e)))?;
        let Some(dir) = exe.parent() else {
            bail!(Path, "Executable has no parent directory: {}", exe.display());
        };
        Ok(dir.to_path_buf())
    }
}

/// The default log path for the given executable location.
pub fn default_log_path(locator: &dyn ExeLocator) -> Result<PathBuf> {
    Ok(locator.executable_dir()?.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

/// Resolve a user supplied path, falling back to [`default_log_path`] when it
/// is absent or blank.
pub fn resolve_log_path(path: Option<&str>, locator: &dyn ExeLocator) -> Result<PathBuf> {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => Ok(expand_path(path)),
        None => default_log_path(locator),
    }
}

/// Expand a leading tilde to the home directory.
pub fn expand_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    path.to_path_buf()
}

/// A log path split into the pieces the rolling appender needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingTarget {
    /// Directory holding the log files
    pub directory: PathBuf,
    /// File name before the date
    pub prefix: String,
    /// Extension after the date, if any
    pub suffix: Option<String>,
}

impl RollingTarget {
    /// Split `path` at its last `.`: `logs/log_.txt` becomes directory
    /// `logs`, prefix `log_`, suffix `txt`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            bail!(Path, "Log path has no file name: {}", path.display());
        };

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (prefix, suffix) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem.to_string(), Some(ext.to_string())),
            _ => (file_name.to_string(), None),
        };

        Ok(Self { directory, prefix, suffix })
    }
}
