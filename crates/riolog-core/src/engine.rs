//! The process-wide logging engine.
//!
//! One `tracing` subscriber is installed as the global default the first
//! time a logger is set up. Its sink stack and level filter sit behind
//! reload handles, so later setups swap sinks instead of installing a second
//! subscriber. The engine also owns the current [`Logger`] slot.
//!
//! Lifecycle: written by setup and close, read by everything else. Setup is
//! not meant to race with itself or with a close.

use crate::logger::Logger;
use crate::sinks::BoxedLayer;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use riolog_types::{RioLogError, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::{reload, Registry};

pub(crate) type SinkStack = Vec<BoxedLayer>;
type SinkLayer = reload::Layer<SinkStack, Registry>;
type SinkHandle = reload::Handle<SinkStack, Registry>;
type LevelHandle = reload::Handle<LevelFilter, Layered<SinkLayer, Registry>>;

static ENGINE: OnceCell<Engine> = OnceCell::new();

/// A logger removed from the engine together with its layers.
pub(crate) struct Detached {
    pub(crate) logger: Logger,
    pub(crate) layers: SinkStack,
}

pub(crate) struct Engine {
    sinks: SinkHandle,
    level: LevelHandle,
    current: RwLock<Option<Logger>>,
}

impl Engine {
    /// The engine, installing the global subscriber on first use.
    pub(crate) fn global() -> Result<&'static Engine> {
        ENGINE.get_or_try_init(Self::install)
    }

    /// The engine if a logger was ever set up.
    pub(crate) fn get() -> Option<&'static Engine> {
        ENGINE.get()
    }

    fn install() -> Result<Self> {
        let (sink_layer, sinks) = reload::Layer::new(SinkStack::new());
        let (level_layer, level) = reload::Layer::new(LevelFilter::OFF);

        let subscriber = tracing_subscriber::registry().with(sink_layer).with(level_layer);
        tracing::subscriber::set_global_default(subscriber).map_err(|e| {
            RioLogError::Install(format!("Another global subscriber is already installed: {}", e))
        })?;

        Ok(Self {
            sinks,
            level,
            current: RwLock::new(None),
        })
    }

    /// Make `logger` current and route every record to `layers`.
    ///
    /// Returns the logger that was current before.
    pub(crate) fn replace(&self, logger: Logger, layers: SinkStack, level: LevelFilter) -> Result<Option<Logger>> {
        let mut current = self.current.write();
        self.sinks.reload(layers).map_err(reload_failed)?;
        self.level.reload(level).map_err(reload_failed)?;
        Ok(current.replace(logger))
    }

    /// Stop accepting records and take the sink stack out of the engine.
    ///
    /// Once this returns, no record from any thread reaches the detached
    /// layers through the global subscriber. Returns `None` when no logger
    /// was current.
    pub(crate) fn detach(&self) -> Result<Option<Detached>> {
        let mut current = self.current.write();
        self.level.reload(LevelFilter::OFF).map_err(reload_failed)?;
        let mut layers = SinkStack::new();
        self.sinks
            .modify(|stack| layers = std::mem::take(stack))
            .map_err(reload_failed)?;
        Ok(current.take().map(|logger| Detached { logger, layers }))
    }

    pub(crate) fn current(&self) -> Option<Logger> {
        self.current.read().clone()
    }
}

fn reload_failed(e: reload::Error) -> RioLogError {
    RioLogError::Bug(format!("Global subscriber is gone: {}", e))
}
