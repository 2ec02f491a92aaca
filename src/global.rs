//! Process-wide convenience API
//!
//! A lazily created [`LoggingRuntime`] for applications that want one logging
//! context for the whole process. Statics are never dropped, so call
//! [`shutdown`] before exiting to send what is still queued.
//!
//! # Example
//!
//! ```no_run
//! use rust_seq_logger::global;
//! use rust_seq_logger::prelude::*;
//!
//! global::add_global_property("Application", "inventory");
//! global::init(SeqConfig::new("127.0.0.1:5341"));
//!
//! let logger = global::logger("Startup");
//! logger.info("Ready");
//! global::log_warning_with("Cache {Name} is cold", props!["Name" => "sku"]);
//!
//! global::shutdown();
//! ```

use crate::core::{
    DispatcherState, Enricher, LogLevel, Logger, LoggingRuntime, Property, Result, SeqConfig,
};
use std::fmt;
use std::sync::OnceLock;

static GLOBAL: OnceLock<LoggingRuntime> = OnceLock::new();

/// The process-wide runtime, created on first use
pub fn runtime() -> &'static LoggingRuntime {
    GLOBAL.get_or_init(LoggingRuntime::new)
}

/// Configure the process-wide runtime and start its dispatcher
pub fn init(config: SeqConfig) -> DispatcherState {
    runtime().init(config)
}

/// Stop the dispatcher and send everything still queued
pub fn shutdown() -> bool {
    runtime().shutdown()
}

pub fn flush() -> Result<()> {
    runtime().flush()
}

pub fn add_global_property<K, V>(key: K, value: V)
where
    K: Into<String>,
    V: fmt::Display,
{
    runtime().add_global_property(key, value);
}

pub fn add_global_enricher<E: Enricher + 'static>(enricher: E) {
    runtime().add_global_enricher(enricher);
}

pub fn set_base_levels(console: LogLevel, remote: LogLevel) {
    runtime().set_base_levels(console, remote);
}

pub fn logger(name: &str) -> Logger {
    runtime().logger(name)
}

/// Log through the process-wide default logger
pub fn log(level: LogLevel, message: impl Into<String>) {
    runtime().default_logger().log(level, message);
}

pub fn log_with(level: LogLevel, message: impl Into<String>, properties: Vec<Property>) {
    runtime().default_logger().log_with(level, message, properties);
}

pub fn log_verbose(message: impl Into<String>) {
    log(LogLevel::Verbose, message);
}

pub fn log_debug(message: impl Into<String>) {
    log(LogLevel::Debug, message);
}

pub fn log_info(message: impl Into<String>) {
    log(LogLevel::Info, message);
}

pub fn log_warning(message: impl Into<String>) {
    log(LogLevel::Warning, message);
}

pub fn log_error(message: impl Into<String>) {
    log(LogLevel::Error, message);
}

pub fn log_fatal(message: impl Into<String>) {
    log(LogLevel::Fatal, message);
}

pub fn log_verbose_with(message: impl Into<String>, properties: Vec<Property>) {
    log_with(LogLevel::Verbose, message, properties);
}

pub fn log_debug_with(message: impl Into<String>, properties: Vec<Property>) {
    log_with(LogLevel::Debug, message, properties);
}

pub fn log_info_with(message: impl Into<String>, properties: Vec<Property>) {
    log_with(LogLevel::Info, message, properties);
}

pub fn log_warning_with(message: impl Into<String>, properties: Vec<Property>) {
    log_with(LogLevel::Warning, message, properties);
}

pub fn log_error_with(message: impl Into<String>, properties: Vec<Property>) {
    log_with(LogLevel::Error, message, properties);
}

pub fn log_fatal_with(message: impl Into<String>, properties: Vec<Property>) {
    log_with(LogLevel::Fatal, message, properties);
}
