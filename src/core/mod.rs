//! Core logger types and traits

pub mod appender;
pub mod clef;
pub mod config;
pub mod dispatcher;
pub mod enricher;
pub mod error;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod property;
mod registry;
pub mod runtime;
pub mod stats;
pub mod timestamp;
pub mod transport;

pub use appender::Appender;
pub use clef::{encode_batch, encode_entry};
pub use config::{SeqConfig, DEFAULT_DISPATCH_INTERVAL};
pub use dispatcher::{DispatcherState, DEFAULT_SHUTDOWN_TIMEOUT};
pub use enricher::{CounterEnricher, Enricher, LevelAdjustment, ThreadIdEnricher, ThreadNameEnricher};
pub use error::{LoggerError, Result};
pub use log_context::LogContext;
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_LOGGER_NAME, MAX_LOGGER_NAME_LEN};
pub use property::Property;
pub use runtime::{LoggingRuntime, RuntimeBuilder};
pub use stats::DispatchStats;
pub use transport::Transport;
