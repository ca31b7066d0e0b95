//! Sink construction.
//!
//! Each selected [`Output`] flag becomes one `fmt` layer. The writer behind
//! every layer is also kept by the [`Logger`](crate::Logger) handle so the
//! sinks can be flushed on close.

use crate::path::RollingTarget;
use crate::time::CLOCK_FORMAT;
use riolog_types::{bail, Output, RioLogError, Result};
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::Metadata;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};
use tracing_subscriber::{Layer, Registry};

/// Timestamp format for file records.
const FILE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %:z";

pub(crate) type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// A writer shared between a formatting layer and the logger handle.
#[derive(Clone)]
pub struct SinkWriter(Arc<BoxMakeWriter>);

impl SinkWriter {
    /// Wrap any `MakeWriter`, e.g. `std::io::stdout` or a closure.
    pub fn new<M>(make_writer: M) -> Self
    where
        M: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self(Arc::new(BoxMakeWriter::new(make_writer)))
    }

    /// Standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout)
    }

    /// The debugger channel, see [`DebuggerWriter`].
    pub fn debugger() -> Self {
        Self::new(DebuggerWriter::default)
    }

    /// Flush whatever the underlying writer buffers.
    pub fn flush(&self) -> io::Result<()> {
        self.0.make_writer().flush()
    }
}

impl fmt::Debug for SinkWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SinkWriter").finish()
    }
}

impl<'a> MakeWriter<'a> for SinkWriter {
    type Writer = Box<dyn Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.0.make_writer()
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.0.make_writer_for(meta)
    }
}

/// Writes records to an attached debugger.
///
/// On Windows this is `OutputDebugStringW`. Elsewhere there is no debugger
/// channel, so records go to stderr.
#[derive(Debug, Default)]
pub struct DebuggerWriter {
    _private: (),
}

impl Write for DebuggerWriter {
    #[cfg(windows)]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        use windows_sys::Win32::System::Diagnostics::Debug::OutputDebugStringW;

        let mut wide: Vec<u16> = String::from_utf8_lossy(buf).encode_utf16().collect();
        wide.push(0);
        // SAFETY: `wide` is NUL terminated and outlives the call.
        unsafe { OutputDebugStringW(wide.as_ptr()) };
        Ok(buf.len())
    }

    #[cfg(not(windows))]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write(buf)
    }

    #[cfg(windows)]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[cfg(not(windows))]
    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Writers for the console and debugger sinks.
///
/// The file sink writer is always created from the log path.
#[derive(Debug, Clone)]
pub struct SinkWriters {
    /// Console sink writer
    pub console: SinkWriter,
    /// Whether the console sink emits ANSI colors
    pub console_ansi: bool,
    /// Debugger sink writer
    pub debugger: SinkWriter,
}

impl Default for SinkWriters {
    fn default() -> Self {
        Self {
            console: SinkWriter::stdout(),
            console_ansi: console::colors_enabled(),
            debugger: SinkWriter::debugger(),
        }
    }
}

/// A sink attached to a logger.
#[derive(Debug, Clone)]
pub struct AttachedSink {
    kind: Output,
    writer: SinkWriter,
}

impl AttachedSink {
    /// Which sink this is; exactly one flag.
    pub fn kind(&self) -> Output {
        self.kind
    }

    pub(crate) fn flush(&self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| RioLogError::Flush(format!("{} sink: {}", self.kind, e)))
    }
}

pub(crate) struct SinkSet {
    pub(crate) layers: Vec<BoxedLayer>,
    pub(crate) attached: Vec<AttachedSink>,
}

/// Build one layer per flag in `output`.
///
/// `log_path` must be present when `output` contains [`Output::FILE`].
pub(crate) fn build(output: Output, log_path: Option<&Path>, writers: &SinkWriters) -> Result<SinkSet> {
    let mut set = SinkSet {
        layers: Vec::new(),
        attached: Vec::new(),
    };

    if output.contains(Output::CONSOLE) {
        let writer = writers.console.clone();
        set.layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(writer.clone())
                .with_ansi(writers.console_ansi)
                .with_target(false)
                .with_timer(ChronoLocal::new(CLOCK_FORMAT.to_string()))
                .boxed(),
        );
        set.attached.push(AttachedSink { kind: Output::CONSOLE, writer });
    }

    if output.contains(Output::FILE) {
        let Some(path) = log_path else {
            bail!(Bug, "file sink requested without a log path");
        };
        let writer = rolling_file(path)?;
        set.layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(writer.clone())
                .with_ansi(false)
                .with_timer(ChronoLocal::new(FILE_TIME_FORMAT.to_string()))
                .boxed(),
        );
        set.attached.push(AttachedSink { kind: Output::FILE, writer });
    }

    if output.contains(Output::DEBUGGER) {
        let writer = writers.debugger.clone();
        set.layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(writer.clone())
                .with_ansi(false)
                .with_timer(ChronoLocal::new(CLOCK_FORMAT.to_string()))
                .boxed(),
        );
        set.attached.push(AttachedSink { kind: Output::DEBUGGER, writer });
    }

    Ok(set)
}

/// Open a daily rolling appender for `path`, creating its directory.
fn rolling_file(path: &Path) -> Result<SinkWriter> {
    let target = RollingTarget::from_path(path)?;
    std::fs::create_dir_all(&target.directory)?;

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(target.prefix);
    if let Some(suffix) = target.suffix {
        builder = builder.filename_suffix(suffix);
    }

    let appender = builder.build(&target.directory).map_err(|e| {
        RioLogError::Sink(format!("Cannot open log file in {}: {}", target.directory.display(), e))
    })?;
    Ok(SinkWriter::new(appender))
}
