//! Process-scoped logging context
//!
//! A [`LoggingRuntime`] owns the registry of live loggers, the global property
//! and enricher lists, the base thresholds, the default logger and the
//! dispatcher. Loggers hold a shared reference to the runtime state, so they
//! may outlive the runtime handle safely.

use super::{
    appender::Appender,
    config::SeqConfig,
    dispatcher::{drain_and_send, DispatchSettings, Dispatcher, DispatcherState, DEFAULT_SHUTDOWN_TIMEOUT},
    enricher::Enricher,
    error::{LoggerError, Result},
    log_context::LogContext,
    log_entry::LogEntry,
    log_level::LogLevel,
    logger::{Logger, LoggerBuilder, DEFAULT_LOGGER_NAME},
    property::Property,
    registry::{PendingQueue, Registry, RegistryHandle},
    stats::DispatchStats,
    transport::Transport,
};
use crate::appenders::{ConsoleAppender, HttpTransport};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Level both sinks accept before `init` supplies the configured thresholds
const INITIAL_BASE_LEVEL: LogLevel = LogLevel::Verbose;

/// State shared by every logger of one runtime and by the dispatcher
pub(crate) struct Shared {
    registry: Mutex<Registry>,
    base_levels: RwLock<(LogLevel, LogLevel)>,
    global_properties: RwLock<Vec<Property>>,
    global_enrichers: RwLock<Vec<Box<dyn Enricher>>>,
    console: Box<dyn Appender>,
    next_logger_id: AtomicU32,
    state: Mutex<DispatcherState>,
    remote_open: AtomicBool,
    remote_available: AtomicBool,
    stats: DispatchStats,
}

impl Shared {
    fn new(console: Box<dyn Appender>) -> Self {
        Self {
            registry: Mutex::new(Registry::new()),
            base_levels: RwLock::new((INITIAL_BASE_LEVEL, INITIAL_BASE_LEVEL)),
            global_properties: RwLock::new(Vec::new()),
            global_enrichers: RwLock::new(Vec::new()),
            console,
            next_logger_id: AtomicU32::new(0),
            state: Mutex::new(DispatcherState::Uninitialized),
            remote_open: AtomicBool::new(true),
            remote_available: AtomicBool::new(true),
            stats: DispatchStats::new(),
        }
    }

    pub(crate) fn console(&self) -> &dyn Appender {
        self.console.as_ref()
    }

    pub(crate) fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    pub(crate) fn next_logger_id(&self) -> u32 {
        self.next_logger_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn base_levels(&self) -> (LogLevel, LogLevel) {
        *self.base_levels.read()
    }

    fn set_base_levels(&self, console: LogLevel, remote: LogLevel) {
        *self.base_levels.write() = (console, remote);
    }

    pub(crate) fn state(&self) -> DispatcherState {
        *self.state.lock()
    }

    pub(crate) fn set_state(&self, state: DispatcherState) {
        *self.state.lock() = state;
        if state == DispatcherState::Finished {
            self.remote_open.store(false, Ordering::Release);
        }
    }

    /// Whether remote-bound entries may still be queued
    ///
    /// Entries logged before `init` are kept for the dispatcher. Once it has
    /// finished, or decided never to run, nothing would drain them.
    pub(crate) fn remote_open(&self) -> bool {
        self.remote_open.load(Ordering::Acquire)
    }

    pub(crate) fn set_remote_available(&self, available: bool) {
        self.remote_available.store(available, Ordering::Release);
    }

    pub(crate) fn extend_with_global_properties(&self, properties: &mut Vec<Property>) {
        properties.extend(self.global_properties.read().iter().cloned());
    }

    pub(crate) fn apply_global_enrichers(&self, context: &mut LogContext) {
        for enricher in self.global_enrichers.read().iter() {
            enricher.enrich(context);
        }
    }

    pub(crate) fn register(&self, queue: PendingQueue, is_default: bool) -> RegistryHandle {
        let mut registry = self.registry.lock();
        let handle = registry.insert(queue);
        if is_default {
            registry.set_default(handle);
        }
        handle
    }

    /// Remove a logger and move its pending entries to the default queue
    pub(crate) fn retire(&self, handle: RegistryHandle, queue: &PendingQueue) {
        let mut registry = self.registry.lock();
        registry.remove(handle);

        let orphaned = std::mem::take(&mut *queue.lock());
        if orphaned.is_empty() {
            return;
        }

        match registry.default_queue() {
            Some(default_queue) => default_queue.lock().extend(orphaned),
            None => {
                self.stats.record_abandoned(orphaned.len());
                eprintln!(
                    "[LOGGER WARNING] No default logger to take over {} pending log events; \
                     they were discarded.",
                    orphaned.len()
                );
            }
        }
    }

    pub(crate) fn drain_registry(&self) -> Vec<LogEntry> {
        self.registry.lock().drain_all()
    }

    fn flush_console(&self) {
        if let Err(e) = self.console.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush appender '{}': {}", self.console.name(), e);
        }
    }

    fn abandon_pending(&self) {
        let abandoned = self.drain_registry().len();
        if abandoned > 0 {
            self.stats.record_abandoned(abandoned);
            eprintln!(
                "[LOGGER WARNING] Discarding {} log events that can no longer be sent",
                abandoned
            );
        }
    }
}

/// Owner of the registry, global lists, default logger and dispatcher
///
/// # Example
///
/// ```no_run
/// use rust_seq_logger::prelude::*;
/// use std::time::Duration;
///
/// let runtime = LoggingRuntime::new();
/// runtime.add_global_property("Application", "inventory");
/// runtime.init(
///     SeqConfig::new("127.0.0.1:5341")
///         .with_dispatch_interval(Duration::from_millis(500)),
/// );
///
/// let logger = runtime.logger("Worker");
/// logger.info_with("Processed {Count} items", props!["Count" => 12]);
///
/// runtime.shutdown();
/// ```
pub struct LoggingRuntime {
    shared: Arc<Shared>,
    default: Logger,
    config: OnceLock<SeqConfig>,
    transport_override: Mutex<Option<Arc<dyn Transport>>>,
    dispatcher: Mutex<Option<Dispatcher>>,
}

impl LoggingRuntime {
    /// Runtime writing to the process console and sending over HTTP
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    fn from_parts(console: Box<dyn Appender>, transport: Option<Arc<dyn Transport>>) -> Self {
        let shared = Arc::new(Shared::new(console));
        let default = Logger::create(
            Arc::clone(&shared),
            DEFAULT_LOGGER_NAME,
            shared.base_levels(),
            Vec::new(),
            Vec::new(),
            true,
        );
        Self {
            shared,
            default,
            config: OnceLock::new(),
            transport_override: Mutex::new(transport),
            dispatcher: Mutex::new(None),
        }
    }

    /// Apply the configuration and start the dispatcher
    ///
    /// Only the first call has any effect; later calls return the current
    /// state. Blocks until the dispatcher is running or has decided not to run.
    /// Problems are reported through the default logger, never returned.
    pub fn init(&self, config: SeqConfig) -> DispatcherState {
        let mut dispatcher = self.dispatcher.lock();
        if self.shared.state() != DispatcherState::Uninitialized {
            return self.shared.state();
        }
        self.shared.set_state(DispatcherState::Initializing);

        if let Err(e) = config.validate() {
            return self.abort_start(e);
        }

        self.shared
            .set_base_levels(config.console_level, config.remote_level);
        self.default
            .core()
            .set_levels(config.console_level, config.remote_level);
        let config = self.config.get_or_init(|| config);

        let transport = match self.transport_override.lock().take() {
            Some(transport) => transport,
            None => match HttpTransport::new(config) {
                Ok(transport) => Arc::new(transport) as Arc<dyn Transport>,
                Err(e) => return self.abort_start(e),
            },
        };

        let settings = DispatchSettings {
            interval: config.dispatch_interval,
            health_check_timeout: config.health_check_timeout,
            allow_without_remote: config.allow_without_remote,
        };

        match Dispatcher::start(
            Arc::clone(&self.shared),
            Arc::clone(self.default.core()),
            transport,
            settings,
        ) {
            Ok(Some(started)) => *dispatcher = Some(started),
            // The worker declined to run; what it queued during startup is stranded
            Ok(None) => self.shared.abandon_pending(),
            Err(e) => return self.abort_start(e),
        }
        self.shared.state()
    }

    fn abort_start(&self, error: LoggerError) -> DispatcherState {
        self.shared.set_state(DispatcherState::Finished);
        self.default.error_with(
            "Logging dispatcher could not start: {Error}",
            vec![Property::new("Error", error)],
        );
        self.shared.abandon_pending();
        DispatcherState::Finished
    }

    /// Configuration accepted by the first `init` call
    pub fn config(&self) -> Option<&SeqConfig> {
        self.config.get()
    }

    pub fn state(&self) -> DispatcherState {
        self.shared.state()
    }

    pub fn is_initialized(&self) -> bool {
        self.config.get().is_some()
    }

    /// `false` once a health check failed
    pub fn remote_available(&self) -> bool {
        self.shared.remote_available.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> &DispatchStats {
        self.shared.stats()
    }

    /// The runtime's own logger, used by the dispatcher for its diagnostics
    pub fn default_logger(&self) -> &Logger {
        &self.default
    }

    /// Create a logger using the current base thresholds
    pub fn logger(&self, name: &str) -> Logger {
        self.logger_builder(name).build()
    }

    #[must_use]
    pub fn logger_builder(&self, name: &str) -> LoggerBuilder {
        LoggerBuilder::new(Arc::clone(&self.shared), name)
    }

    /// Thresholds copied into loggers created from now on
    pub fn base_levels(&self) -> (LogLevel, LogLevel) {
        self.shared.base_levels()
    }

    /// Change the thresholds for loggers created from now on
    ///
    /// Existing loggers keep the thresholds they were created with.
    pub fn set_base_levels(&self, console: LogLevel, remote: LogLevel) {
        self.shared.set_base_levels(console, remote);
    }

    /// Attach a property to every event of every logger of this runtime
    pub fn add_global_property<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.shared
            .global_properties
            .write()
            .push(Property::new(key, value));
    }

    /// Register an enricher that runs after each logger's own enrichers
    pub fn add_global_enricher<E: Enricher + 'static>(&self, enricher: E) {
        self.shared.global_enrichers.write().push(Box::new(enricher));
    }

    /// Number of live loggers, the default logger included
    pub fn logger_count(&self) -> usize {
        self.shared.registry.lock().len()
    }

    /// Entries waiting in any logger's queue
    pub fn pending_count(&self) -> usize {
        self.shared.registry.lock().pending()
    }

    /// Run one drain-and-send cycle on the dispatcher thread and wait for it
    pub fn flush(&self) -> Result<()> {
        let dispatcher = self.dispatcher.lock();
        match dispatcher.as_ref() {
            Some(dispatcher) => dispatcher.flush(),
            None => Err(LoggerError::DispatcherNotRunning),
        }
    }

    /// Stop the dispatcher and send whatever is still queued
    ///
    /// Waits up to [`DEFAULT_SHUTDOWN_TIMEOUT`] for the dispatcher thread.
    pub fn shutdown(&self) -> bool {
        self.shutdown_with_timeout(DEFAULT_SHUTDOWN_TIMEOUT)
    }

    /// Stop the dispatcher, waiting up to `timeout`, then run a final flush
    ///
    /// Returns `true` if the dispatcher thread exited within the timeout.
    /// Calling it again is harmless.
    pub fn shutdown_with_timeout(&self, timeout: Duration) -> bool {
        let mut slot = self.dispatcher.lock();
        let Some(mut dispatcher) = slot.take() else {
            // Never started, startup aborted, or already shut down
            self.shared.set_state(DispatcherState::Finished);
            self.shared.abandon_pending();
            self.shared.flush_console();
            return true;
        };

        self.shared.set_state(DispatcherState::Terminating);
        let clean = dispatcher.stop(timeout);
        drain_and_send(&self.shared, dispatcher.transport(), self.default.core());
        self.shared.set_state(DispatcherState::Finished);
        self.shared.flush_console();
        clean
    }
}

impl Default for LoggingRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LoggingRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for LoggingRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingRuntime")
            .field("state", &self.state())
            .field("config", &self.config.get())
            .field("loggers", &self.logger_count())
            .finish()
    }
}

/// Builder for a runtime with custom sinks
///
/// # Example
/// ```
/// use rust_seq_logger::prelude::*;
///
/// let runtime = LoggingRuntime::builder()
///     .console(ConsoleAppender::with_colors(false))
///     .build();
/// assert_eq!(runtime.state(), DispatcherState::Uninitialized);
/// ```
pub struct RuntimeBuilder {
    console: Option<Box<dyn Appender>>,
    transport: Option<Arc<dyn Transport>>,
}

impl RuntimeBuilder {
    pub fn new() -> Self {
        Self {
            console: None,
            transport: None,
        }
    }

    /// Replace the console sink
    #[must_use = "builder methods return a new value"]
    pub fn console<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.console = Some(Box::new(appender));
        self
    }

    /// Use this transport instead of building an `HttpTransport` at `init`
    #[must_use = "builder methods return a new value"]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> LoggingRuntime {
        let console = self
            .console
            .unwrap_or_else(|| Box::new(ConsoleAppender::new()));
        LoggingRuntime::from_parts(console, self.transport)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
