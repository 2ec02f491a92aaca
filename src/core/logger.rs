//! Logger instances: per-instance thresholds, properties, enrichers and queue

use super::{
    enricher::Enricher,
    log_context::LogContext,
    log_entry::LogEntry,
    log_level::LogLevel,
    property::Property,
    registry::{PendingQueue, RegistryHandle},
    runtime::{LoggingRuntime, Shared},
};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;

/// Longest logger name kept; longer names are truncated
pub const MAX_LOGGER_NAME_LEN: usize = 31;

/// Name of the default instance owned by each runtime
pub const DEFAULT_LOGGER_NAME: &str = "Default";

fn bounded_name(name: &str) -> Arc<str> {
    match name.char_indices().nth(MAX_LOGGER_NAME_LEN) {
        Some((cut, _)) => Arc::from(&name[..cut]),
        None => Arc::from(name),
    }
}

/// State of one logger, shared with the dispatcher for the default instance
pub(crate) struct LoggerCore {
    shared: Arc<Shared>,
    id: u32,
    name: Arc<str>,
    handle: RegistryHandle,
    is_default: bool,
    console_level: RwLock<LogLevel>,
    remote_level: RwLock<LogLevel>,
    properties: RwLock<Vec<Property>>,
    enrichers: RwLock<Vec<Box<dyn Enricher>>>,
    queue: PendingQueue,
}

impl LoggerCore {
    pub(crate) fn log(&self, level: LogLevel, message: impl Into<String>, properties: Vec<Property>) {
        let console_level = *self.console_level.read();
        let remote_level = *self.remote_level.read();
        let remote_open = self.shared.remote_open();
        if level < console_level && (!remote_open || level < remote_level) {
            return;
        }

        let context = self.make_context(level, properties);
        let entry = LogEntry::new(message.into(), context);

        if entry.level() >= console_level {
            let console = self.shared.console();
            if let Err(e) = console.append(&entry) {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", console.name(), e);
            }
        }

        if remote_open && entry.level() >= remote_level {
            self.queue.lock().push(entry);
        }
    }

    /// Call properties, then instance properties, then global properties;
    /// then instance enrichers followed by global enrichers.
    fn make_context(&self, level: LogLevel, mut properties: Vec<Property>) -> LogContext {
        properties.extend(self.properties.read().iter().cloned());
        self.shared.extend_with_global_properties(&mut properties);

        let mut context = LogContext::new(level, Arc::clone(&self.name), properties);
        for enricher in self.enrichers.read().iter() {
            enricher.enrich(&mut context);
        }
        self.shared.apply_global_enrichers(&mut context);
        context
    }

    pub(crate) fn set_levels(&self, console: LogLevel, remote: LogLevel) {
        *self.console_level.write() = console;
        *self.remote_level.write() = remote;
    }
}

/// A named logger with its own thresholds, properties, enrichers and queue
///
/// Console-bound events are written synchronously from the calling thread;
/// remote-bound events are queued until the dispatcher drains them. Dropping a
/// logger hands its queued events to the runtime's default logger.
///
/// # Example
///
/// ```
/// use rust_seq_logger::prelude::*;
///
/// let runtime = LoggingRuntime::new();
/// let logger = runtime
///     .logger_builder("Billing")
///     .console_level(LogLevel::Warning)
///     .remote_level(LogLevel::Debug)
///     .property("Service", "billing")
///     .build();
///
/// logger.debug("Queued for the server only");
/// logger.info_with("Invoice {InvoiceId} issued", props!["InvoiceId" => 1042]);
/// assert_eq!(logger.pending_count(), 2);
/// ```
pub struct Logger {
    core: Arc<LoggerCore>,
}

impl Logger {
    /// Create a logger using the runtime's base thresholds
    pub fn new(runtime: &LoggingRuntime, name: &str) -> Self {
        runtime.logger(name)
    }

    #[must_use]
    pub fn builder(runtime: &LoggingRuntime, name: &str) -> LoggerBuilder {
        runtime.logger_builder(name)
    }

    pub(crate) fn create(
        shared: Arc<Shared>,
        name: &str,
        levels: (LogLevel, LogLevel),
        properties: Vec<Property>,
        enrichers: Vec<Box<dyn Enricher>>,
        is_default: bool,
    ) -> Self {
        let queue: PendingQueue = Arc::new(Mutex::new(Vec::new()));
        let id = shared.next_logger_id();
        let handle = shared.register(Arc::clone(&queue), is_default);

        Self {
            core: Arc::new(LoggerCore {
                shared,
                id,
                name: bounded_name(name),
                handle,
                is_default,
                console_level: RwLock::new(levels.0),
                remote_level: RwLock::new(levels.1),
                properties: RwLock::new(properties),
                enrichers: RwLock::new(enrichers),
                queue,
            }),
        }
    }

    pub(crate) fn core(&self) -> &Arc<LoggerCore> {
        &self.core
    }

    pub fn id(&self) -> u32 {
        self.core.id
    }

    pub fn name(&self) -> &str {
        &self.core.name
    }

    /// Whether this is the runtime's default instance
    pub fn is_default(&self) -> bool {
        self.core.is_default
    }

    pub fn console_level(&self) -> LogLevel {
        *self.core.console_level.read()
    }

    pub fn remote_level(&self) -> LogLevel {
        *self.core.remote_level.read()
    }

    pub fn set_console_level(&self, level: LogLevel) {
        *self.core.console_level.write() = level;
    }

    pub fn set_remote_level(&self, level: LogLevel) {
        *self.core.remote_level.write() = level;
    }

    /// Attach a property to every future event of this logger
    pub fn add_property<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.core.properties.write().push(Property::new(key, value));
    }

    /// Register an enricher that runs before the global enrichers
    pub fn add_enricher<E: Enricher + 'static>(&self, enricher: E) {
        self.core.enrichers.write().push(Box::new(enricher));
    }

    /// Entries queued for the remote sink and not yet drained
    pub fn pending_count(&self) -> usize {
        self.core.queue.lock().len()
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.core.log(level, message, Vec::new());
    }

    pub fn log_with(&self, level: LogLevel, message: impl Into<String>, properties: Vec<Property>) {
        self.core.log(level, message, properties);
    }

    #[inline]
    pub fn verbose(&self, message: impl Into<String>) {
        self.log(LogLevel::Verbose, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    #[inline]
    pub fn verbose_with(&self, message: impl Into<String>, properties: Vec<Property>) {
        self.log_with(LogLevel::Verbose, message, properties);
    }

    #[inline]
    pub fn debug_with(&self, message: impl Into<String>, properties: Vec<Property>) {
        self.log_with(LogLevel::Debug, message, properties);
    }

    #[inline]
    pub fn info_with(&self, message: impl Into<String>, properties: Vec<Property>) {
        self.log_with(LogLevel::Info, message, properties);
    }

    #[inline]
    pub fn warning_with(&self, message: impl Into<String>, properties: Vec<Property>) {
        self.log_with(LogLevel::Warning, message, properties);
    }

    #[inline]
    pub fn error_with(&self, message: impl Into<String>, properties: Vec<Property>) {
        self.log_with(LogLevel::Error, message, properties);
    }

    #[inline]
    pub fn fatal_with(&self, message: impl Into<String>, properties: Vec<Property>) {
        self.log_with(LogLevel::Fatal, message, properties);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.core.id)
            .field("name", &self.core.name)
            .field("is_default", &self.core.is_default)
            .field("console_level", &self.console_level())
            .field("remote_level", &self.remote_level())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // The default instance is retired by its runtime's shutdown
        if !self.core.is_default {
            self.core.shared.retire(self.core.handle, &self.core.queue);
        }
    }
}

/// Builder for constructing a Logger with a fluent API
///
/// Thresholds that are not set explicitly are copied from the runtime's
/// base thresholds when `build` is called.
///
/// # Example
/// ```
/// use rust_seq_logger::prelude::*;
///
/// let runtime = LoggingRuntime::new();
/// let logger = runtime
///     .logger_builder("Importer")
///     .console_level(LogLevel::Info)
///     .property("Batch", 7)
///     .enricher(ThreadIdEnricher)
///     .build();
/// assert_eq!(logger.console_level(), LogLevel::Info);
/// ```
pub struct LoggerBuilder {
    shared: Arc<Shared>,
    name: String,
    console_level: Option<LogLevel>,
    remote_level: Option<LogLevel>,
    properties: Vec<Property>,
    enrichers: Vec<Box<dyn Enricher>>,
}

impl LoggerBuilder {
    pub(crate) fn new(shared: Arc<Shared>, name: &str) -> Self {
        Self {
            shared,
            name: name.to_string(),
            console_level: None,
            remote_level: None,
            properties: Vec::new(),
            enrichers: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_level(mut self, level: LogLevel) -> Self {
        self.console_level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn remote_level(mut self, level: LogLevel) -> Self {
        self.remote_level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn property<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.properties.push(Property::new(key, value));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn properties(mut self, properties: Vec<Property>) -> Self {
        self.properties.extend(properties);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enricher<E: Enricher + 'static>(mut self, enricher: E) -> Self {
        self.enrichers.push(Box::new(enricher));
        self
    }

    /// Build and register the Logger
    pub fn build(self) -> Logger {
        let (base_console, base_remote) = self.shared.base_levels();
        let levels = (
            self.console_level.unwrap_or(base_console),
            self.remote_level.unwrap_or(base_remote),
        );
        Logger::create(
            self.shared,
            &self.name,
            levels,
            self.properties,
            self.enrichers,
            false,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Appender, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl Appender for Arc<Lines> {
        fn append(&self, entry: &LogEntry) -> Result<()> {
            self.0.lock().push(entry.console_line());
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "lines"
        }
    }

    fn runtime() -> (LoggingRuntime, Arc<Lines>) {
        let lines = Arc::new(Lines::default());
        let runtime = LoggingRuntime::builder()
            .console(Arc::clone(&lines))
            .build();
        (runtime, lines)
    }

    #[test]
    fn test_name_is_truncated() {
        let (runtime, _) = runtime();
        let long = "ThisLoggerNameIsDefinitelyLongerThanAllowed";
        let logger = runtime.logger(long);
        assert_eq!(logger.name().chars().count(), MAX_LOGGER_NAME_LEN);
        assert!(long.starts_with(logger.name()));
    }

    #[test]
    fn test_name_truncation_respects_char_boundaries() {
        let name: String = "é".repeat(40);
        let bounded = bounded_name(&name);
        assert_eq!(bounded.chars().count(), MAX_LOGGER_NAME_LEN);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let (runtime, _) = runtime();
        let a = runtime.logger("a");
        let b = runtime.logger("b");
        assert!(b.id() > a.id());
        assert!(a.id() > runtime.default_logger().id());
    }

    #[test]
    fn test_cheap_reject_skips_enrichers() {
        let (runtime, lines) = runtime();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let logger = runtime
            .logger_builder("Quiet")
            .console_level(LogLevel::Warning)
            .remote_level(LogLevel::Warning)
            .enricher(move |_: &mut LogContext| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        logger.debug("dropped");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(logger.pending_count(), 0);
        assert!(lines.0.lock().is_empty());

        logger.warning("kept");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(logger.pending_count(), 1);
        assert_eq!(lines.0.lock().len(), 1);
    }

    #[test]
    fn test_property_order_call_local_global() {
        let (runtime, _) = runtime();
        runtime.add_global_property("Global", "g");
        let logger = runtime
            .logger_builder("Order")
            .remote_level(LogLevel::Verbose)
            .property("Local", "l")
            .build();
        logger.add_property("Later", "x");

        logger.info_with("ordered", vec![Property::new("Call", "c")]);

        let core = logger.core();
        let queue = core.queue.lock();
        let keys: Vec<&str> = queue[0].properties().iter().map(Property::key).collect();
        assert_eq!(keys, vec!["Call", "Local", "Later", "Global"]);
    }

    #[test]
    fn test_drop_hands_queue_to_default() {
        let (runtime, _) = runtime();
        let logger = runtime
            .logger_builder("Short")
            .remote_level(LogLevel::Verbose)
            .build();
        logger.info("one");
        logger.info("two");
        drop(logger);

        assert_eq!(runtime.default_logger().pending_count(), 2);
    }
}
