//! Transport trait for the remote sink

use super::error::Result;
use std::time::Duration;

/// Delivers encoded batches to the log server
///
/// The dispatcher calls `send_batch` at most once per drain cycle with a
/// newline-delimited CLEF body. Failures are not retried.
pub trait Transport: Send + Sync {
    /// Deliver one batch; non-success responses are errors
    fn send_batch(&self, body: &str) -> Result<()>;

    /// Probe readiness, giving up after `timeout`
    fn health_check(&self, timeout: Duration) -> Result<bool>;

    /// Where batches are sent, for diagnostics
    fn endpoint(&self) -> &str;
}
