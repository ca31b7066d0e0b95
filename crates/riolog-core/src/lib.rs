//! # Rio Logging Core
//!
//! Process-wide logger setup on top of `tracing`.
//!
//! This crate provides:
//!
//! - **Setup**: [`setup_and_start`] attaches the console, daily rolling file
//!   and debugger sinks selected by an [`Output`](riolog_types::Output)
//!   bitmask, at a fixed DEBUG minimum, and writes a startup banner
//! - **Facade**: [`setup_and_start_as_facade`] and [`LoggerFactory`] adapt the
//!   logger to the `log` crate's [`Log`](log::Log) trait
//! - **Teardown**: [`Flushable`] closes the process-wide logger, blocking or
//!   async, from either kind of handle
//! - **Settings**: persisted [`LogSettings`](riolog_types::LogSettings) with
//!   environment overrides
//!
//! ## Example
//!
//! ```no_run
//! use riolog_core::{setup_and_start_as_facade, Flushable};
//! use riolog_types::Output;
//!
//! # async fn run() -> riolog_types::Result<()> {
//! let logger = setup_and_start_as_facade(Output::ALL, None)?;
//! if let Some(logger) = &logger {
//!     logger.info("ready");
//! }
//! logger.close_and_flush_async().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod engine;
pub mod facade;
pub mod flush;
pub mod initializer;
pub mod logger;
pub mod path;
pub mod settings;
pub mod sinks;
pub mod time;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use facade::{FacadeLogger, LoggerFactory};
pub use flush::{close_and_flush, close_and_flush_async, Flushable};
pub use initializer::{setup_and_start, setup_and_start_as_facade, LoggerInitializer};
pub use logger::Logger;
pub use riolog_types::{Output, RioLogError, Result};

/// The process-wide current logger, if one is set up and not closed.
///
/// Prefer passing the handle returned by setup; this accessor exists for
/// code that cannot.
pub fn current() -> Option<Logger> {
    engine::Engine::get().and_then(engine::Engine::current)
}
