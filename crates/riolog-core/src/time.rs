//! Clock formatting for log records.

use chrono::{Local, Timelike};

/// `strftime` pattern for the startup banner clock.
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Format a time of day as `HH:MM:SS`, 24-hour, zero padded.
pub fn clock(time: &impl Timelike) -> String {
    format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())
}

/// The current local wall-clock time as `HH:MM:SS`.
pub fn local_clock() -> String {
    clock(&Local::now())
}
