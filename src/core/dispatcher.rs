//! Background dispatcher: health gating, periodic drain-and-send, shutdown
//!
//! The dispatcher thread is owned by the runtime's default logger. It is
//! controlled through a command channel and reports its settled startup state
//! through a one-shot readiness channel, so `init` never returns before the
//! dispatcher is either running or known not to run.

use super::{
    clef::encode_batch,
    error::{LoggerError, Result},
    log_level::LogLevel,
    logger::LoggerCore,
    property::Property,
    runtime::Shared,
    transport::Transport,
};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default time to wait for the dispatcher thread during shutdown (5 seconds)
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const DISPATCHER_THREAD_NAME: &str = "seq-dispatcher";

/// Lifecycle of the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Uninitialized,
    Initializing,
    HealthCheck,
    Running,
    Terminating,
    Finished,
}

impl fmt::Display for DispatcherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DispatcherState::Uninitialized => "uninitialized",
            DispatcherState::Initializing => "initializing",
            DispatcherState::HealthCheck => "health-check",
            DispatcherState::Running => "running",
            DispatcherState::Terminating => "terminating",
            DispatcherState::Finished => "finished",
        };
        f.write_str(name)
    }
}

enum Command {
    Flush(Sender<()>),
    Stop,
}

/// Settings the worker needs from the configuration
pub(crate) struct DispatchSettings {
    pub(crate) interval: Duration,
    pub(crate) health_check_timeout: Option<Duration>,
    pub(crate) allow_without_remote: bool,
}

/// Move every pending entry into one batch and attempt a single send
///
/// A failed batch is dropped and reported through `reporter` at Error level.
pub(crate) fn drain_and_send(shared: &Shared, transport: &dyn Transport, reporter: &LoggerCore) {
    let batch = shared.drain_registry();
    if batch.is_empty() {
        return;
    }

    let count = batch.len();
    let result = encode_batch(&batch).and_then(|body| transport.send_batch(&body));
    drop(batch);

    match result {
        Ok(()) => shared.stats().record_sent(count),
        Err(e) => {
            shared.stats().record_failed(count);
            reporter.log(
                LogLevel::Error,
                "Failed to send {EventCount} log events to {Endpoint}: {Error}",
                vec![
                    Property::new("EventCount", count),
                    Property::new("Endpoint", transport.endpoint()),
                    Property::new("Error", e),
                ],
            );
        }
    }
}

/// Handle to a running dispatcher thread
pub(crate) struct Dispatcher {
    control: Sender<Command>,
    handle: Option<thread::JoinHandle<()>>,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    /// Spawn the worker and block until it reports its settled state
    ///
    /// Returns `None` when the worker decided not to run.
    pub(crate) fn start(
        shared: Arc<Shared>,
        reporter: Arc<LoggerCore>,
        transport: Arc<dyn Transport>,
        settings: DispatchSettings,
    ) -> Result<Option<Self>> {
        let (control_tx, control_rx) = unbounded();
        let (ready_tx, ready_rx) = bounded(1);

        let worker = DispatchWorker {
            shared: Arc::clone(&shared),
            reporter,
            transport: Arc::clone(&transport),
            settings,
            control: control_rx,
        };

        let handle = thread::Builder::new()
            .name(DISPATCHER_THREAD_NAME.to_string())
            .spawn(move || worker.run(ready_tx))?;

        match ready_rx.recv() {
            Ok(DispatcherState::Running) => Ok(Some(Self {
                control: control_tx,
                handle: Some(handle),
                transport,
            })),
            Ok(_) => {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Dispatcher thread panicked after startup: {:?}", e);
                }
                Ok(None)
            }
            Err(_) => {
                // Worker exited without reporting, which only happens on panic
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Dispatcher thread panicked during startup: {:?}", e);
                }
                shared.set_state(DispatcherState::Finished);
                Ok(None)
            }
        }
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Run one drain-and-send cycle on the worker and wait for it
    pub(crate) fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = bounded(1);
        self.control
            .send(Command::Flush(ack_tx))
            .map_err(|_| LoggerError::ChannelSendError)?;
        ack_rx.recv().map_err(|_| LoggerError::ChannelReceiveError)
    }

    /// Ask the worker to exit and wait up to `timeout` for it
    ///
    /// Returns `true` if the worker exited cleanly within the timeout.
    pub(crate) fn stop(&mut self, timeout: Duration) -> bool {
        let _ = self.control.send(Command::Stop);

        let Some(handle) = self.handle.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Dispatcher thread panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Dispatcher thread did not finish within {:?} timeout. \
                     Continuing with the final flush.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

struct DispatchWorker {
    shared: Arc<Shared>,
    reporter: Arc<LoggerCore>,
    transport: Arc<dyn Transport>,
    settings: DispatchSettings,
    control: Receiver<Command>,
}

impl DispatchWorker {
    fn run(self, ready: Sender<DispatcherState>) {
        if let Some(timeout) = self.settings.health_check_timeout {
            self.shared.set_state(DispatcherState::HealthCheck);
            if !self.probe(timeout) {
                self.shared.set_remote_available(false);
                if !self.settings.allow_without_remote {
                    // Finished first, so this report goes to the console only
                    self.shared.set_state(DispatcherState::Finished);
                    self.reporter.log(
                        LogLevel::Error,
                        "Log server at {Endpoint} is not available, dispatcher will not start",
                        vec![Property::new("Endpoint", self.transport.endpoint())],
                    );
                    let _ = ready.send(DispatcherState::Finished);
                    return;
                }
                self.reporter.log(
                    LogLevel::Warning,
                    "Log server at {Endpoint} is not available, continuing without remote delivery",
                    vec![Property::new("Endpoint", self.transport.endpoint())],
                );
            }
        }

        self.shared.set_state(DispatcherState::Running);
        let _ = ready.send(DispatcherState::Running);
        drop(ready);

        loop {
            match self.control.recv_timeout(self.settings.interval) {
                Err(RecvTimeoutError::Timeout) => self.cycle(),
                Ok(Command::Flush(ack)) => {
                    self.cycle();
                    let _ = ack.send(());
                }
                Ok(Command::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn cycle(&self) {
        drain_and_send(&self.shared, self.transport.as_ref(), &self.reporter);
    }

    fn probe(&self, timeout: Duration) -> bool {
        match self.transport.health_check(timeout) {
            Ok(true) => true,
            Ok(false) => {
                self.reporter.log(
                    LogLevel::Warning,
                    "Log server at {Endpoint} reported it is not ready",
                    vec![Property::new("Endpoint", self.transport.endpoint())],
                );
                false
            }
            Err(e) => {
                self.reporter.log(
                    LogLevel::Warning,
                    "Health check failed: {Error}",
                    vec![Property::new("Error", e)],
                );
                false
            }
        }
    }
}
