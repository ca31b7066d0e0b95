//! Configuration types and structures.

use serde::{Deserialize, Serialize};
use crate::Output;

/// Persisted logger settings.
///
/// `output` is stored as its bit value so existing configuration files that
/// carry a plain number keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Sinks to attach
    #[serde(default)]
    pub output: Output,
    /// Log file path template; blank or absent selects the default path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl LogSettings {
    /// Settings for the given sinks at the default path.
    pub fn new(output: Output) -> Self {
        Self { output, path: None }
    }

    /// Set the log file path template.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// The path template, or `None` when it is absent or blank.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.trim().is_empty())
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self::new(Output::ALL)
    }
}
