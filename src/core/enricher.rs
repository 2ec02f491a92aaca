//! Enrichers add properties to, or adjust the level of, a context under construction
//!
//! Instance enrichers run before global enrichers, and both lists run in
//! registration order, so later enrichers see what earlier ones added.

use super::log_context::LogContext;
use std::sync::atomic::{AtomicU64, Ordering};

/// Callback invoked once per accepted event while its context is assembled
///
/// Closures taking `&mut LogContext` implement this trait, so ad hoc
/// enrichers need no dedicated type.
///
/// # Example
///
/// ```
/// use rust_seq_logger::core::{Enricher, LogContext, LogLevel};
///
/// struct Hostname(String);
///
/// impl Enricher for Hostname {
///     fn enrich(&self, context: &mut LogContext) {
///         context.add("Host", &self.0);
///     }
/// }
///
/// let escalate_failures = |ctx: &mut LogContext| {
///     if ctx.get("Outcome") == Some("failed") {
///         ctx.raise_level();
///     }
/// };
/// # let _: Box<dyn Enricher> = Box::new(escalate_failures);
/// # let _: Box<dyn Enricher> = Box::new(Hostname("web-1".into()));
/// ```
pub trait Enricher: Send + Sync {
    fn enrich(&self, context: &mut LogContext);
}

impl<F> Enricher for F
where
    F: Fn(&mut LogContext) + Send + Sync,
{
    fn enrich(&self, context: &mut LogContext) {
        self(context)
    }
}

/// Adds the calling thread's id as `ThreadId`
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadIdEnricher;

impl Enricher for ThreadIdEnricher {
    fn enrich(&self, context: &mut LogContext) {
        context.add("ThreadId", format!("{:?}", std::thread::current().id()));
    }
}

/// Adds the calling thread's name as `ThreadName`, when it has one
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadNameEnricher;

impl Enricher for ThreadNameEnricher {
    fn enrich(&self, context: &mut LogContext) {
        if let Some(name) = std::thread::current().name() {
            context.add("ThreadName", name);
        }
    }
}

/// Direction a [`CounterEnricher`] moves the level once its threshold is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelAdjustment {
    Raise,
    Lower,
    Keep,
}

/// Counts the events it sees and records the count as a property
///
/// The counter starts at zero and is incremented before each event, so the
/// first event records `1`. Once the count exceeds `threshold` the level is
/// adjusted one step per event.
#[derive(Debug)]
pub struct CounterEnricher {
    key: String,
    counter: AtomicU64,
    threshold: u64,
    adjustment: LevelAdjustment,
}

impl CounterEnricher {
    pub fn new(key: impl Into<String>, threshold: u64, adjustment: LevelAdjustment) -> Self {
        Self {
            key: key.into(),
            counter: AtomicU64::new(0),
            threshold,
            adjustment,
        }
    }

    /// Number of events enriched so far
    pub fn count(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl Enricher for CounterEnricher {
    fn enrich(&self, context: &mut LogContext) {
        let value = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        context.add(self.key.as_str(), value);
        if value > self.threshold {
            match self.adjustment {
                LevelAdjustment::Raise => context.raise_level(),
                LevelAdjustment::Lower => context.lower_level(),
                LevelAdjustment::Keep => {}
            }
        }
    }
}
