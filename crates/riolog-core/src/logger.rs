//! The native logger handle.

use crate::facade::{FacadeLogger, LoggerFactory};
use crate::sinks::AttachedSink;
use parking_lot::Mutex;
use riolog_types::{Output, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::Level;

/// Handle to a configured logger.
///
/// Clones share the same sinks. Records are written through the process-wide
/// engine, so a handle whose logger has been replaced or closed writes to
/// whatever is current (or nowhere). Closing through any handle closes the
/// shared engine; see [`Flushable`](crate::Flushable).
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    output: Output,
    log_path: Option<PathBuf>,
    sinks: Mutex<Vec<AttachedSink>>,
    closed: AtomicBool,
}

impl Logger {
    pub(crate) fn new(output: Output, log_path: Option<PathBuf>, sinks: Vec<AttachedSink>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                output,
                log_path,
                sinks: Mutex::new(sinks),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// The sinks this logger was set up with.
    pub fn sinks(&self) -> Output {
        self.inner.output
    }

    /// Resolved file sink path; `None` without a file sink.
    pub fn log_path(&self) -> Option<&Path> {
        self.inner.log_path.as_deref()
    }

    /// Whether the sinks have been flushed and released, by a close or by
    /// another setup replacing this logger.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Whether this is the process-wide current logger.
    pub fn is_current(&self) -> bool {
        crate::current().is_some_and(|current| current.same_as(self))
    }

    fn same_as(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Write a record at `level`.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        match level {
            Level::TRACE => tracing::trace!("{}", message),
            Level::DEBUG => tracing::debug!("{}", message),
            Level::INFO => tracing::info!("{}", message),
            Level::WARN => tracing::warn!("{}", message),
            _ => tracing::error!("{}", message),
        }
    }

    /// Write a TRACE record. Dropped by the fixed DEBUG minimum.
    pub fn trace(&self, message: impl fmt::Display) {
        self.log(Level::TRACE, message);
    }

    /// Write a DEBUG record.
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::DEBUG, message);
    }

    /// Write an INFO record.
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::INFO, message);
    }

    /// Write a WARN record.
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::WARN, message);
    }

    /// Write an ERROR record.
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::ERROR, message);
    }

    /// Adapt into a facade logger whose category is the factory type.
    pub fn as_facade(&self) -> FacadeLogger {
        LoggerFactory::new().create_logger::<LoggerFactory>()
    }

    /// Adapt into a facade logger categorized by `T`.
    pub fn as_facade_for<T: ?Sized>(&self) -> FacadeLogger {
        LoggerFactory::new().create_logger::<T>()
    }

    /// Flush every sink without closing.
    pub(crate) fn flush(&self) -> Result<()> {
        for sink in self.inner.sinks.lock().iter() {
            sink.flush()?;
        }
        Ok(())
    }

    /// Flush and drop the sinks. The file sink closes when its last writer
    /// goes away, which is here once the engine has detached.
    pub(crate) fn release(&self) -> Result<()> {
        let sinks = std::mem::take(&mut *self.inner.sinks.lock());
        self.inner.closed.store(true, Ordering::Release);
        sinks.iter().try_for_each(AttachedSink::flush)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sinks", &self.inner.output)
            .field("log_path", &self.inner.log_path)
            .field("closed", &self.is_closed())
            .finish()
    }
}
