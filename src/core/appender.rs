//! Appender trait for the console sink

use super::{error::Result, log_entry::LogEntry};

/// Synchronous destination for console-bound entries
///
/// Called from whichever thread issued the log call, so implementations
/// must tolerate concurrent `append` calls.
pub trait Appender: Send + Sync {
    fn append(&self, entry: &LogEntry) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
