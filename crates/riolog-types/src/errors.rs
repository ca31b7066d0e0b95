//! Error types for logger setup and teardown.

use thiserror::Error;

/// The main error type for rio-logging operations.
///
/// Disabled logging (`Output::NONE`) is never reported through this type;
/// it is a normal outcome of setup.
#[derive(Error, Debug)]
pub enum RioLogError {
    /// Configuration-related error (settings files, sink selection text)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The log path could not be resolved
    #[error("Log path error: {0}")]
    Path(String),

    /// A sink could not be created
    #[error("Sink error: {0}")]
    Sink(String),

    /// The process-wide subscriber could not be installed
    #[error("Install error: {0}")]
    Install(String),

    /// Flushing or releasing the sinks failed
    #[error("Flush error: {0}")]
    Flush(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Broken internal invariant
    #[error("Internal logger error: {0}")]
    Bug(String),
}

/// A specialized Result type for rio-logging operations.
pub type Result<T> = std::result::Result<T, RioLogError>;

/// Return early with the given `RioLogError` variant and message.
///
/// # Example
///
/// ```
/// use riolog_types::{bail, Result};
///
/// fn check(name: &str) -> Result<()> {
///     if name.is_empty() {
///         bail!(Config, "empty sink name");
///     }
///     Ok(())
/// }
///
/// assert!(check("").is_err());
/// assert!(check("console").is_ok());
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::RioLogError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::RioLogError::$variant(format!($fmt, $($arg)*)))
    };
}
