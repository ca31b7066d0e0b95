//! Flushing and closing the process-wide logger.
//!
//! Both the native [`Logger`] and the [`FacadeLogger`] are [`Flushable`].
//! Whichever handle is used, the close acts on the one process-wide engine:
//! after it returns, no handle writes anywhere until the next setup.

use crate::engine::{Detached, Engine};
use crate::facade::FacadeLogger;
use crate::logger::Logger;
use async_trait::async_trait;
use riolog_types::{RioLogError, Result};
use tokio::runtime::Handle;
use tokio::task::JoinError;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;

/// Logged before a synchronous close.
pub const FLUSHING: &str = "Flushing logger... =====LOG END";

/// Logged before an asynchronous flush starts.
pub const FLUSHING_ASYNC: &str = "Flushing logger asynchronously...";

/// Logged once an asynchronous flush has completed.
pub const FLUSHED: &str = "Logger flushed. =====LOG END";

/// Something that can close the process-wide logger.
#[async_trait]
pub trait Flushable: Send + Sync {
    /// Flush and release every sink, blocking until done.
    fn close_and_flush(&self) -> Result<()> {
        close_and_flush()
    }

    /// Flush and release every sink without blocking the caller's executor.
    ///
    /// Under Tokio the sink I/O runs on the blocking pool; under any other
    /// executor it runs inline.
    async fn close_and_flush_async(&self) -> Result<()> {
        close_and_flush_async().await
    }
}

impl Flushable for Logger {}

impl Flushable for FacadeLogger {}

/// Setup hands back `None` for disabled logging; closing that is a no-op.
#[async_trait]
impl<T: Flushable> Flushable for Option<T> {
    fn close_and_flush(&self) -> Result<()> {
        match self {
            Some(logger) => logger.close_and_flush(),
            None => Ok(()),
        }
    }

    async fn close_and_flush_async(&self) -> Result<()> {
        match self {
            Some(logger) => logger.close_and_flush_async().await,
            None => Ok(()),
        }
    }
}

/// Close the current logger. Does nothing when none is installed.
pub fn close_and_flush() -> Result<()> {
    let Some(engine) = active_engine() else {
        return Ok(());
    };

    info!("{}", FLUSHING);
    match engine.detach()? {
        Some(detached) => finish(detached, None),
        None => Ok(()),
    }
}

/// Close the current logger, running sink I/O on the blocking pool.
///
/// Outside a Tokio runtime the sinks are flushed on the calling thread.
pub async fn close_and_flush_async() -> Result<()> {
    let Some(engine) = active_engine() else {
        return Ok(());
    };

    info!("{}", FLUSHING_ASYNC);
    let Some(detached) = engine.detach()? else {
        return Ok(());
    };

    match Handle::try_current() {
        Ok(runtime) => runtime
            .spawn_blocking(move || finish(detached, Some(FLUSHED)))
            .await
            .map_err(join_failed)?,
        Err(_) => finish(detached, Some(FLUSHED)),
    }
}

fn active_engine() -> Option<&'static Engine> {
    Engine::get().filter(|engine| engine.current().is_some())
}

/// Flush detached sinks, write `last` as their final record, release them.
fn finish(detached: Detached, last: Option<&str>) -> Result<()> {
    let Detached { logger, layers } = detached;
    logger.flush()?;
    if let Some(message) = last {
        let subscriber = tracing_subscriber::registry().with(layers);
        tracing::subscriber::with_default(subscriber, || info!("{}", message));
    }
    logger.release()
}

fn join_failed(e: JoinError) -> RioLogError {
    RioLogError::Flush(format!("Flush task did not complete: {}", e))
}
