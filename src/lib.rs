//! # Rust Seq Logger
//!
//! A structured, leveled logging client that buffers events per logger,
//! enriches them with contextual properties, mirrors them to the console and
//! ships them in batches to a Seq server as CLEF.
//!
//! ## Features
//!
//! - **Dual routing**: console and remote sinks with independent thresholds
//! - **Enrichment**: per-logger and global properties and enrichers that may
//!   raise or lower an event's level
//! - **Batching**: one background dispatcher drains every logger on an interval
//! - **Orderly shutdown**: pending events are flushed before the dispatcher exits

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, HttpTransport};
    pub use crate::core::{
        Appender, CounterEnricher, DispatchStats, DispatcherState, Enricher, LevelAdjustment,
        LogContext, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, LoggingRuntime,
        Property, Result, RuntimeBuilder, SeqConfig, ThreadIdEnricher, ThreadNameEnricher,
        Transport, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::props;
}

pub use appenders::{ConsoleAppender, HttpTransport};
pub use core::{
    Appender, CounterEnricher, DispatchStats, DispatcherState, Enricher, LevelAdjustment,
    LogContext, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError, LoggingRuntime, Property,
    Result, RuntimeBuilder, SeqConfig, ThreadIdEnricher, ThreadNameEnricher, Transport,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
