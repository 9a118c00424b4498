//! Time-related utilities with clock abstraction for testability.
//!
//! Chat timestamps are produced by the sender as an opaque display label.
//! The server never parses them; only the client creates and shows them.

use chrono::{DateTime, Local};

/// Format used for the display label attached to outgoing messages
pub const TIME_LABEL_FORMAT: &str = "%H:%M";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current local time
    fn now(&self) -> DateTime<Local>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Local>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<Local>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.fixed_time
    }
}

/// Build the `HH:MM` display label for the given time
pub fn time_label(time: &DateTime<Local>) -> String {
    time.format(TIME_LABEL_FORMAT).to_string()
}

/// Build the `HH:MM` display label for the current time of `clock`
pub fn current_time_label(clock: &dyn Clock) -> String {
    time_label(&clock.now())
}
