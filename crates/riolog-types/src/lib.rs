//! # Rio Logging Types
//!
//! Types shared by the rio-logging crates:
//!
//! - [`Output`], the sink selection bitmask (`Console = 1`, `File = 2`,
//!   `Debugger = 4`, `All = 7`)
//! - [`LogSettings`], the persisted form of a logger configuration
//! - [`RioLogError`] and the [`Result`] alias
//!
//! ## Example
//!
//! ```
//! use riolog_types::Output;
//!
//! let sinks = Output::CONSOLE | Output::DEBUGGER;
//! assert!(sinks.contains(Output::CONSOLE));
//! assert!(!sinks.contains(Output::FILE));
//! assert_eq!(Output::ALL.bits(), 7);
//! assert_eq!("console|debug".parse::<Output>().unwrap(), sinks);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod config;

// Re-export common types for convenience
pub use errors::{RioLogError, Result};
pub use enums::Output;
pub use config::LogSettings;
