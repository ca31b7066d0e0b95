//! Sink selection flags.

use bitflags::bitflags;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use crate::bail;
use crate::errors::{RioLogError, Result};

bitflags! {
    /// Which sinks a logger writes to.
    ///
    /// The bit values are persisted in configuration files and must not
    /// change: `Console = 1`, `File = 2`, `Debugger = 4`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Output: u8 {
        /// Standard output
        const CONSOLE = 1;
        /// Daily rolling log file
        const FILE = 1 << 1;
        /// Attached debugger (stderr when no debugger channel exists)
        const DEBUGGER = 1 << 2;
    }
}

impl Output {
    /// Logging disabled.
    pub const NONE: Self = Self::empty();

    /// Every known sink. Always the union of the named flags.
    pub const ALL: Self = Self::all();

    const LABELS: [(Output, &'static str); 3] = [
        (Output::CONSOLE, "Console"),
        (Output::FILE, "File"),
        (Output::DEBUGGER, "Debugger"),
    ];
}

impl Default for Output {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        if *self == Self::ALL {
            return f.write_str("All");
        }

        let labels: Vec<&str> = Self::LABELS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, label)| *label)
            .collect();
        f.write_str(&labels.join(" | "))
    }
}

impl FromStr for Output {
    type Err = RioLogError;

    /// Parse `"console | file"`, `"Console,Debug"`, `"all"`, `"none"` or a
    /// raw bit value such as `"5"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!(Config, "Empty sink selection");
        }

        if let Ok(bits) = s.parse::<u8>() {
            let Some(output) = Self::from_bits(bits) else {
                bail!(Config, "Invalid sink bits: {}", bits);
            };
            return Ok(output);
        }

        let mut output = Self::NONE;
        for part in s.split(['|', ',']).map(str::trim) {
            output |= match part.to_lowercase().as_str() {
                "none" => Self::NONE,
                "all" => Self::ALL,
                "console" => Self::CONSOLE,
                "file" => Self::FILE,
                "debug" | "debugger" => Self::DEBUGGER,
                _ => bail!(Config, "Invalid sink: '{}'", part),
            };
        }
        Ok(output)
    }
}

impl Serialize for Output {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for Output {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bits(u64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Bits(bits) => u8::try_from(bits)
                .ok()
                .and_then(Output::from_bits)
                .ok_or_else(|| D::Error::custom(format!("invalid sink bits: {}", bits))),
            Repr::Text(text) => text.parse().map_err(D::Error::custom),
        }
    }
}
