//! Console appender implementation

use crate::core::{Appender, LogEntry, LogLevel, Result};
use std::io::Write;

/// Standard stream a console line is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

impl ConsoleStream {
    /// Error and Fatal go to stderr, everything else to stdout
    pub fn for_level(level: LogLevel) -> Self {
        if level.is_error_stream() {
            ConsoleStream::Stderr
        } else {
            ConsoleStream::Stdout
        }
    }
}

/// Writes one tab-separated line per entry
///
/// Entries above `Warning` go to stderr, the rest to stdout. Each line is
/// written with a single `write_all` on a locked stream so lines from
/// different threads do not interleave.
pub struct ConsoleAppender {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    /// Render the message in bold, as terminals showing the ingestion
    /// server's console output do
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format the line exactly as it will be written
    pub fn format_line(&self, entry: &LogEntry) -> String {
        #[cfg(feature = "console")]
        if self.use_colors {
            use colored::Colorize;
            let message = entry.message().bold().to_string();
            return entry.console_line_with_message(&message);
        }

        entry.console_line()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        let line = self.format_line(entry);

        match ConsoleStream::for_level(entry.level()) {
            ConsoleStream::Stderr => {
                let mut stderr = std::io::stderr().lock();
                stderr.write_all(line.as_bytes())?;
                stderr.flush()?;
            }
            ConsoleStream::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(line.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
