//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. The message is
//! only formatted when the logger would accept the level.
//!
//! # Examples
//!
//! ```
//! use rust_seq_logger::prelude::*;
//! use rust_seq_logger::{info, warning};
//!
//! let runtime = LoggingRuntime::new();
//! let logger = runtime.logger("Server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Properties travel separately from the message template
//! logger.warning_with("Disk {Mount} almost full", props!["Mount" => "/var", "Free" => 0.07]);
//! ```

/// Build a `Vec<Property>` from `key => value` pairs.
///
/// Values may be of any type implementing `Display`; they are converted to
/// text immediately.
///
/// # Examples
///
/// ```
/// use rust_seq_logger::props;
///
/// let properties = props!["Attempt" => 3, "Host" => "db-1", "Attempt" => 4];
/// assert_eq!(properties.len(), 3);
/// assert_eq!(properties[1].value(), "db-1");
/// ```
#[macro_export]
macro_rules! props {
    () => {
        ::std::vec::Vec::<$crate::Property>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Property::new($key, $value)),+]
    };
}

/// Log a message with automatic formatting.
///
/// Formatting is skipped when the level is below both of the logger's
/// thresholds.
///
/// # Examples
///
/// ```
/// # use rust_seq_logger::prelude::*;
/// # let runtime = LoggingRuntime::new();
/// # let logger = runtime.logger("Docs");
/// use rust_seq_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if level >= logger.console_level() || level >= logger.remote_level() {
            logger.log(level, format!($($arg)+));
        }
    }};
}

/// Log a verbose-level message.
///
/// # Examples
///
/// ```
/// # use rust_seq_logger::prelude::*;
/// # let runtime = LoggingRuntime::new();
/// # let logger = runtime.logger("Docs");
/// use rust_seq_logger::verbose;
/// verbose!(logger, "Entering function: calculate()");
/// ```
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Verbose, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_seq_logger::prelude::*;
/// # let runtime = LoggingRuntime::new();
/// # let logger = runtime.logger("Docs");
/// use rust_seq_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_seq_logger::prelude::*;
/// # let runtime = LoggingRuntime::new();
/// # let logger = runtime.logger("Docs");
/// use rust_seq_logger::info;
/// info!(logger, "User {} logged in", "alice");
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_seq_logger::prelude::*;
/// # let runtime = LoggingRuntime::new();
/// # let logger = runtime.logger("Docs");
/// use rust_seq_logger::warning;
/// warning!(logger, "Memory usage high: {}%", 85);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_seq_logger::prelude::*;
/// # let runtime = LoggingRuntime::new();
/// # let logger = runtime.logger("Docs");
/// use rust_seq_logger::error;
/// error!(logger, "Failed to connect: {}", "connection refused");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use rust_seq_logger::prelude::*;
/// # let runtime = LoggingRuntime::new();
/// # let logger = runtime.logger("Docs");
/// use rust_seq_logger::fatal;
/// fatal!(logger, "Critical system failure: {}", "out of memory");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
