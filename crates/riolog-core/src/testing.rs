//! Test support: serialized access to the global engine and capturing
//! writers.

use crate::sinks::SinkWriter;
use parking_lot::{const_mutex, Mutex, MutexGuard};
use std::io;
use std::sync::Arc;

static ENGINE_LOCK: Mutex<()> = const_mutex(());

/// Hold while a test sets up or closes the process-wide logger.
pub(crate) fn lock_engine() -> MutexGuard<'static, ()> {
    ENGINE_LOCK.lock()
}

/// In-memory sink output.
#[derive(Debug, Clone, Default)]
pub(crate) struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub(crate) fn writer(&self) -> SinkWriter {
        let capture = self.clone();
        SinkWriter::new(move || capture.clone())
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
