//! Adapting the engine to the `log` crate facade.
//!
//! Consumers written against [`log::Log`] get a [`FacadeLogger`] bound to a
//! category. Its records land in the same process-wide engine as the native
//! [`Logger`](crate::Logger), tagged with a `category` field.

use riolog_types::{RioLogError, Result};
use std::any::type_name;
use std::fmt;
use tracing::level_filters::LevelFilter;

/// Hands out facade loggers that forward to the process-wide engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggerFactory {
    _private: (),
}

impl LoggerFactory {
    /// Create a factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// A facade logger categorized by the type name of `T`.
    pub fn create_logger<T: ?Sized>(&self) -> FacadeLogger {
        self.create_logger_named(type_name::<T>())
    }

    /// A facade logger with an explicit category.
    pub fn create_logger_named(&self, category: impl Into<String>) -> FacadeLogger {
        FacadeLogger {
            category: category.into(),
        }
    }

    /// Route the `log` crate's macros into the engine.
    ///
    /// Can succeed once per process; the record target becomes the category.
    pub fn bridge_log_crate(&self) -> Result<()> {
        log::set_boxed_logger(Box::new(self.create_logger::<LoggerFactory>()))
            .map_err(|e| RioLogError::Install(format!("A log crate logger is already installed: {}", e)))?;
        log::set_max_level(log::LevelFilter::Debug);
        Ok(())
    }
}

/// A `log`-facade logger bound to a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacadeLogger {
    category: String,
}

impl FacadeLogger {
    /// The category attached to records written through the helpers.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Write a record at `level` under this logger's category.
    pub fn log_message(&self, level: log::Level, message: impl fmt::Display) {
        log::Log::log(
            self,
            &log::Record::builder()
                .args(format_args!("{}", message))
                .level(level)
                .target(&self.category)
                .build(),
        );
    }

    /// Write a TRACE record.
    pub fn trace(&self, message: impl fmt::Display) {
        self.log_message(log::Level::Trace, message);
    }

    /// Write a DEBUG record.
    pub fn debug(&self, message: impl fmt::Display) {
        self.log_message(log::Level::Debug, message);
    }

    /// Write an INFO record.
    pub fn info(&self, message: impl fmt::Display) {
        self.log_message(log::Level::Info, message);
    }

    /// Write a WARN record.
    pub fn warn(&self, message: impl fmt::Display) {
        self.log_message(log::Level::Warn, message);
    }

    /// Write an ERROR record.
    pub fn error(&self, message: impl fmt::Display) {
        self.log_message(log::Level::Error, message);
    }
}

fn as_tracing(level: log::Level) -> tracing::Level {
    match level {
        log::Level::Error => tracing::Level::ERROR,
        log::Level::Warn => tracing::Level::WARN,
        log::Level::Info => tracing::Level::INFO,
        log::Level::Debug => tracing::Level::DEBUG,
        log::Level::Trace => tracing::Level::TRACE,
    }
}

impl log::Log for FacadeLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        LevelFilter::current() >= as_tracing(metadata.level())
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let category = record.target();
        let message = record.args();
        match record.level() {
            log::Level::Error => tracing::error!(category, "{}", message),
            log::Level::Warn => tracing::warn!(category, "{}", message),
            log::Level::Info => tracing::info!(category, "{}", message),
            log::Level::Debug => tracing::debug!(category, "{}", message),
            log::Level::Trace => tracing::trace!(category, "{}", message),
        }
    }

    fn flush(&self) {
        if let Some(logger) = crate::current() {
            // log::Log::flush cannot report failures
            let _ = logger.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Billing;

    #[test]
    fn test_default_category_is_factory_type() {
        let logger = LoggerFactory::new().create_logger::<LoggerFactory>();
        assert_eq!(logger.category(), type_name::<LoggerFactory>());
        assert!(logger.category().ends_with("LoggerFactory"));
    }

    #[test]
    fn test_category_from_type() {
        let logger = LoggerFactory::new().create_logger::<Billing>();
        assert!(logger.category().ends_with("tests::Billing"));
    }

    #[test]
    fn test_named_category() {
        let logger = LoggerFactory::new().create_logger_named("payments");
        assert_eq!(logger.category(), "payments");
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(as_tracing(log::Level::Error), tracing::Level::ERROR);
        assert_eq!(as_tracing(log::Level::Trace), tracing::Level::TRACE);
    }
}
