//! Timestamp formatting for console lines and CLEF events
//!
//! Events carry local wall-clock time with millisecond precision, rendered as
//! `YYYY-MM-DDThh:mm:ss.mmm`.

use chrono::{DateTime, Local};

/// strftime pattern used for every rendered timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Length of a rendered timestamp
pub const TIMESTAMP_LEN: usize = 23;

/// Format a local timestamp
///
/// # Examples
///
/// ```
/// use rust_seq_logger::core::timestamp::{format_timestamp, TIMESTAMP_LEN};
/// use chrono::Local;
///
/// let rendered = format_timestamp(&Local::now());
/// assert_eq!(rendered.len(), TIMESTAMP_LEN);
/// ```
#[must_use]
pub fn format_timestamp(datetime: &DateTime<Local>) -> String {
    datetime.format(TIMESTAMP_FORMAT).to_string()
}
