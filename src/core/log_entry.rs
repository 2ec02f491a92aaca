//! Log entry structure

use super::log_context::LogContext;
use super::log_level::LogLevel;
use super::property::Property;
use super::timestamp::format_timestamp;
use chrono::{DateTime, Local};

/// An accepted log event: message template, frozen context and capture time
#[derive(Debug, Clone)]
pub struct LogEntry {
    message: String,
    context: LogContext,
    timestamp: DateTime<Local>,
}

impl LogEntry {
    pub fn new(message: String, context: LogContext) -> Self {
        Self {
            message,
            context,
            timestamp: Local::now(),
        }
    }

    /// Build an entry with an explicit capture time
    pub fn with_timestamp(message: String, context: LogContext, timestamp: DateTime<Local>) -> Self {
        Self {
            message,
            context,
            timestamp,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn level(&self) -> LogLevel {
        self.context.level()
    }

    pub fn logger_name(&self) -> &str {
        self.context.logger_name()
    }

    pub fn properties(&self) -> &[Property] {
        self.context.properties()
    }

    pub fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }

    pub fn formatted_timestamp(&self) -> String {
        format_timestamp(&self.timestamp)
    }

    /// Render the console line, newline included
    ///
    /// Layout: `timestamp\tname\t[LVL]\tmessage\t\tk1=v1 k2=v2\n`
    pub fn console_line(&self) -> String {
        self.console_line_with_message(&self.message)
    }

    pub(crate) fn console_line_with_message(&self, message: &str) -> String {
        format!(
            "{}\t{}\t[{}]\t{}\t\t{}\n",
            self.formatted_timestamp(),
            self.logger_name(),
            self.level().short_name(),
            message,
            self.context.format_fields()
        )
    }
}
