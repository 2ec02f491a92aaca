//! Dispatcher counters
//!
//! Tracks how many batches and events reached the log server, how many were
//! dropped after a failed send and how many were abandoned at shutdown.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by the dispatcher
///
/// # Example
///
/// ```
/// use rust_seq_logger::DispatchStats;
///
/// let stats = DispatchStats::new();
/// stats.record_sent(10);
/// stats.record_failed(4);
///
/// assert_eq!(stats.events_sent(), 10);
/// assert_eq!(stats.events_dropped(), 4);
/// assert_eq!(stats.batches_failed(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DispatchStats {
    /// Drain cycles that produced a non-empty batch
    batches_sent: AtomicU64,

    /// Batches whose send failed
    batches_failed: AtomicU64,

    /// Events delivered in successful batches
    events_sent: AtomicU64,

    /// Events lost with failed batches
    events_dropped: AtomicU64,

    /// Events still pending when the dispatcher could no longer send them
    events_abandoned: AtomicU64,
}

impl DispatchStats {
    pub const fn new() -> Self {
        Self {
            batches_sent: AtomicU64::new(0),
            batches_failed: AtomicU64::new(0),
            events_sent: AtomicU64::new(0),
            events_dropped: AtomicU64::new(0),
            events_abandoned: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn batches_sent(&self) -> u64 {
        self.batches_sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn batches_failed(&self) -> u64 {
        self.batches_failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_sent(&self) -> u64 {
        self.events_sent.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_dropped(&self) -> u64 {
        self.events_dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_abandoned(&self) -> u64 {
        self.events_abandoned.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sent(&self, events: usize) {
        self.batches_sent.fetch_add(1, Ordering::Relaxed);
        self.events_sent.fetch_add(events as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failed(&self, events: usize) {
        self.batches_failed.fetch_add(1, Ordering::Relaxed);
        self.events_dropped.fetch_add(events as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_abandoned(&self, events: usize) {
        self.events_abandoned.fetch_add(events as u64, Ordering::Relaxed);
    }

    /// Percentage of events lost to failed sends (0.0 - 100.0)
    pub fn drop_rate(&self) -> f64 {
        let sent = self.events_sent();
        let dropped = self.events_dropped();
        let total = sent + dropped;

        if total == 0 {
            0.0
        } else {
            (dropped as f64 / total as f64) * 100.0
        }
    }
}
