//! Logger setup.
//!
//! [`LoggerInitializer`] turns a sink selection and an optional path into a
//! running logger: it resolves the path, builds the sinks, installs them as
//! the process-wide logger at a fixed DEBUG minimum, and writes the startup
//! banner.
//!
//! ## Example
//!
//! ```no_run
//! use riolog_core::{setup_and_start, Flushable};
//! use riolog_types::Output;
//!
//! let logger = setup_and_start(Output::CONSOLE | Output::FILE, None)?;
//! if let Some(logger) = &logger {
//!     logger.info("service ready");
//! }
//! logger.close_and_flush()?;
//! # Ok::<(), riolog_types::RioLogError>(())
//! ```

use crate::engine::Engine;
use crate::facade::FacadeLogger;
use crate::logger::Logger;
use crate::path::{resolve_log_path, CurrentExe, ExeLocator};
use crate::sinks::{self, SinkSet, SinkWriter, SinkWriters};
use crate::time;
use riolog_types::{LogSettings, Output, Result};
use std::fmt;
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;

/// First part of the startup record; the local `HH:MM:SS` time follows.
pub const STARTED_BANNER: &str = "------ Logging started -----  ";

/// Records below this level are discarded.
pub const MINIMUM_LEVEL: LevelFilter = LevelFilter::DEBUG;

/// Builds and installs the process-wide logger.
#[derive(Clone)]
pub struct LoggerInitializer {
    locator: Arc<dyn ExeLocator>,
    writers: SinkWriters,
}

impl LoggerInitializer {
    /// Default path next to the running executable, console on stdout.
    pub fn new() -> Self {
        Self {
            locator: Arc::new(CurrentExe),
            writers: SinkWriters::default(),
        }
    }

    /// Locate the executable through `locator` when deriving the default path.
    pub fn with_locator(mut self, locator: impl ExeLocator + 'static) -> Self {
        self.locator = Arc::new(locator);
        self
    }

    /// Write console records to `writer` instead of stdout. Disables ANSI.
    pub fn with_console_writer(mut self, writer: SinkWriter) -> Self {
        self.writers.console = writer;
        self.writers.console_ansi = false;
        self
    }

    /// Write debugger records to `writer`.
    pub fn with_debugger_writer(mut self, writer: SinkWriter) -> Self {
        self.writers.debugger = writer;
        self
    }

    /// Force ANSI colors on the console sink on or off.
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.writers.console_ansi = ansi;
        self
    }

    /// Set up the sinks in `output` and make them the process-wide logger.
    ///
    /// A logger that was current before is flushed and released.
    ///
    /// Returns `Ok(None)` for [`Output::NONE`]: nothing is installed and no
    /// banner is written. A blank or absent `log_path` selects
    /// `<exe dir>/logging/log_.txt`; the path is only resolved when the file
    /// sink is requested.
    pub fn setup_and_start(&self, output: Output, log_path: Option<&str>) -> Result<Option<Logger>> {
        if output.is_empty() {
            return Ok(None);
        }

        let log_path = if output.contains(Output::FILE) {
            Some(resolve_log_path(log_path, self.locator.as_ref())?)
        } else {
            None
        };

        let engine = Engine::global()?;
        let SinkSet { layers, attached } = sinks::build(output, log_path.as_deref(), &self.writers)?;
        let logger = Logger::new(output, log_path, attached);
        if let Some(previous) = engine.replace(logger.clone(), layers, MINIMUM_LEVEL)? {
            previous.release()?;
        }

        logger.info(format_args!("{}{}", STARTED_BANNER, time::local_clock()));
        Ok(Some(logger))
    }

    /// [`setup_and_start`](Self::setup_and_start), adapted for `log` facade
    /// consumers.
    pub fn setup_and_start_as_facade(&self, output: Output, log_path: Option<&str>) -> Result<Option<FacadeLogger>> {
        Ok(self.setup_and_start(output, log_path)?.map(|logger| logger.as_facade()))
    }

    /// Set up from persisted settings.
    pub fn setup_from_settings(&self, settings: &LogSettings) -> Result<Option<Logger>> {
        self.setup_and_start(settings.output, settings.path())
    }
}

impl Default for LoggerInitializer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerInitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerInitializer")
            .field("writers", &self.writers)
            .finish_non_exhaustive()
    }
}

/// Set up the process-wide logger with default writers and path.
pub fn setup_and_start(output: Output, log_path: Option<&str>) -> Result<Option<Logger>> {
    LoggerInitializer::new().setup_and_start(output, log_path)
}

/// Set up the process-wide logger and adapt it for `log` facade consumers.
pub fn setup_and_start_as_facade(output: Output, log_path: Option<&str>) -> Result<Option<FacadeLogger>> {
    LoggerInitializer::new().setup_and_start_as_facade(output, log_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::LoggerFactory;
    use crate::flush::close_and_flush;
    use crate::path::MockExeLocator;
    use crate::testing::{lock_engine, Capture};
    use regex::Regex;
    use riolog_types::RioLogError;
    use std::path::{Path, PathBuf};

    struct Harness {
        console: Capture,
        debugger: Capture,
        dir: tempfile::TempDir,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                console: Capture::default(),
                debugger: Capture::default(),
                dir: tempfile::tempdir().unwrap(),
            }
        }

        fn initializer(&self) -> LoggerInitializer {
            let exe_dir = self.dir.path().to_path_buf();
            let mut locator = MockExeLocator::new();
            locator
                .expect_executable_dir()
                .returning(move || Ok(exe_dir.clone()));

            LoggerInitializer::new()
                .with_locator(locator)
                .with_console_writer(self.console.writer())
                .with_debugger_writer(self.debugger.writer())
        }

        fn log_dir(&self) -> PathBuf {
            self.dir.path().join("logging")
        }

        fn file_contents(&self) -> String {
            let mut text = String::new();
            let Ok(entries) = std::fs::read_dir(self.log_dir()) else {
                return text;
            };
            for entry in entries {
                text.push_str(&std::fs::read_to_string(entry.unwrap().path()).unwrap());
            }
            text
        }
    }

    #[test]
    fn test_none_installs_nothing() {
        let _guard = lock_engine();
        close_and_flush().unwrap();
        let harness = Harness::new();

        let logger = harness.initializer().setup_and_start(Output::NONE, None).unwrap();
        assert!(logger.is_none());
        assert!(crate::current().is_none());
        assert!(harness.console.contents().is_empty());
        assert!(harness.debugger.contents().is_empty());
        assert!(!harness.log_dir().exists());
    }

    #[test]
    fn test_each_subset_attaches_exactly_its_sinks() {
        let _guard = lock_engine();
        for bits in 1u8..8 {
            let output = Output::from_bits(bits).unwrap();
            let harness = Harness::new();

            let logger = harness.initializer().setup_and_start(output, None).unwrap().unwrap();
            close_and_flush().unwrap();

            assert_eq!(logger.sinks(), output);
            assert_eq!(harness.console.contents().contains(STARTED_BANNER), output.contains(Output::CONSOLE));
            assert_eq!(harness.debugger.contents().contains(STARTED_BANNER), output.contains(Output::DEBUGGER));
            assert_eq!(harness.file_contents().contains(STARTED_BANNER), output.contains(Output::FILE));
            assert_eq!(logger.log_path().is_some(), output.contains(Output::FILE));
        }
    }

    #[test]
    fn test_all_matches_union() {
        let _guard = lock_engine();
        let union = Output::CONSOLE | Output::FILE | Output::DEBUGGER;

        let mut seen = Vec::new();
        for output in [Output::ALL, union] {
            let harness = Harness::new();
            let logger = harness.initializer().setup_and_start(output, None).unwrap().unwrap();
            close_and_flush().unwrap();
            seen.push((
                logger.sinks(),
                harness.console.contents().contains(STARTED_BANNER),
                harness.debugger.contents().contains(STARTED_BANNER),
                harness.file_contents().contains(STARTED_BANNER),
            ));
        }
        assert_eq!(seen[0], seen[1]);
        assert_eq!(seen[0], (Output::ALL, true, true, true));
    }

    #[test]
    fn test_default_path_beside_executable() {
        let _guard = lock_engine();
        let harness = Harness::new();

        let logger = harness.initializer().setup_and_start(Output::FILE, None).unwrap().unwrap();
        close_and_flush().unwrap();

        assert_eq!(logger.log_path(), Some(harness.log_dir().join("log_.txt").as_path()));
        let names: Vec<String> = std::fs::read_dir(harness.log_dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with("log_"));
        assert!(names[0].ends_with(".txt"));
    }

    #[test]
    fn test_explicit_path_is_used() {
        let _guard = lock_engine();
        let harness = Harness::new();
        let path = harness.dir.path().join("custom").join("app.log");

        let logger = harness
            .initializer()
            .setup_and_start(Output::FILE, path.to_str())
            .unwrap()
            .unwrap();
        close_and_flush().unwrap();

        assert_eq!(logger.log_path(), Some(path.as_path()));
        assert!(harness.dir.path().join("custom").is_dir());
        assert!(!harness.log_dir().exists());
    }

    #[test]
    fn test_banner_has_clock() {
        let _guard = lock_engine();
        let harness = Harness::new();

        harness.initializer().setup_and_start(Output::CONSOLE, None).unwrap();
        close_and_flush().unwrap();

        let banner = Regex::new(r"------ Logging started -----  \d{2}:\d{2}:\d{2}").unwrap();
        assert!(banner.is_match(&harness.console.contents()));
    }

    #[test]
    fn test_minimum_level_is_debug() {
        let _guard = lock_engine();
        let harness = Harness::new();

        let logger = harness.initializer().setup_and_start(Output::CONSOLE, None).unwrap().unwrap();
        logger.debug("debug record");
        logger.trace("trace record");
        close_and_flush().unwrap();

        let text = harness.console.contents();
        assert!(text.contains("debug record"));
        assert!(!text.contains("trace record"));
    }

    #[test]
    fn test_setup_replaces_current() {
        let _guard = lock_engine();
        let (first, second) = (Harness::new(), Harness::new());

        let old = first.initializer().setup_and_start(Output::CONSOLE, None).unwrap().unwrap();
        let new = second.initializer().setup_and_start(Output::CONSOLE, None).unwrap().unwrap();
        assert!(!old.is_current());
        assert!(new.is_current());
        assert!(old.is_closed());
        assert!(!new.is_closed());

        old.info("routed to current");
        close_and_flush().unwrap();

        assert!(!first.console.contents().contains("routed to current"));
        assert!(second.console.contents().contains("routed to current"));
    }

    #[test]
    fn test_unwritable_path_fails() {
        let _guard = lock_engine();
        let harness = Harness::new();
        let blocker = harness.dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let path = blocker.join("log_.txt");

        let result = harness.initializer().setup_and_start(Output::FILE, path.to_str());
        assert!(matches!(result, Err(RioLogError::Io(_))));
    }

    #[test]
    fn test_locator_not_consulted_without_file_sink() {
        let _guard = lock_engine();
        let console = Capture::default();
        let mut locator = MockExeLocator::new();
        locator.expect_executable_dir().times(0);

        let logger = LoggerInitializer::new()
            .with_locator(locator)
            .with_console_writer(console.writer())
            .setup_and_start(Output::CONSOLE, None)
            .unwrap()
            .unwrap();
        close_and_flush().unwrap();
        assert_eq!(logger.log_path(), None::<&Path>);
    }

    #[test]
    fn test_facade_setup_writes_with_category() {
        let _guard = lock_engine();
        let harness = Harness::new();

        let facade = harness
            .initializer()
            .setup_and_start_as_facade(Output::CONSOLE, None)
            .unwrap()
            .unwrap();
        facade.info("through the facade");
        close_and_flush().unwrap();

        assert_eq!(facade.category(), std::any::type_name::<LoggerFactory>());
        let text = harness.console.contents();
        assert!(text.contains(STARTED_BANNER));
        assert!(text.contains("through the facade"));
        assert!(text.contains("category="));
    }

    #[test]
    fn test_facade_none() {
        let _guard = lock_engine();
        let facade = LoggerInitializer::new().setup_and_start_as_facade(Output::NONE, None).unwrap();
        assert!(facade.is_none());
    }

    #[test]
    fn test_log_crate_bridge() {
        let _guard = lock_engine();
        let harness = Harness::new();

        harness.initializer().setup_and_start(Output::CONSOLE, None).unwrap();
        LoggerFactory::new().bridge_log_crate().unwrap();
        log::info!(target: "bridged", "from the log crate");
        close_and_flush().unwrap();

        let text = harness.console.contents();
        assert!(text.contains("from the log crate"));
        assert!(text.contains("bridged"));
    }

    #[test]
    fn test_setup_from_settings() {
        let _guard = lock_engine();
        let harness = Harness::new();
        let settings = LogSettings::new(Output::DEBUGGER);

        let logger = harness.initializer().setup_from_settings(&settings).unwrap().unwrap();
        close_and_flush().unwrap();

        assert_eq!(logger.sinks(), Output::DEBUGGER);
        assert!(harness.debugger.contents().contains(STARTED_BANNER));
        assert!(harness.console.contents().is_empty());
    }
}
