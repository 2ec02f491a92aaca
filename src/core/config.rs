//! One-time process configuration for the dispatcher

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default interval between drain-and-send cycles
pub const DEFAULT_DISPATCH_INTERVAL: Duration = Duration::from_secs(1);

/// Path and query of the raw CLEF ingestion endpoint
pub const INGEST_PATH: &str = "/api/events/raw?clef";

/// Path of the health endpoint
pub const HEALTH_PATH: &str = "/health";

/// Settings consumed once per process by `LoggingRuntime::init`
///
/// # Example
///
/// ```
/// use rust_seq_logger::{LogLevel, SeqConfig};
/// use std::time::Duration;
///
/// let config = SeqConfig::new("127.0.0.1:5341")
///     .with_console_level(LogLevel::Info)
///     .with_dispatch_interval(Duration::from_millis(250))
///     .with_health_check(Duration::from_secs(1), true);
///
/// assert_eq!(config.ingest_url(), "http://127.0.0.1:5341/api/events/raw?clef");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeqConfig {
    /// Host and port of the log server, without scheme
    pub address: String,
    /// Base threshold for the console sink
    pub console_level: LogLevel,
    /// Base threshold for the remote sink
    pub remote_level: LogLevel,
    pub dispatch_interval: Duration,
    /// Sent as `X-Seq-ApiKey` when present
    pub api_key: Option<String>,
    /// Probe `/health` before starting when set
    pub health_check_timeout: Option<Duration>,
    /// Keep running console-only when the health probe fails
    pub allow_without_remote: bool,
}

impl SeqConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_console_level(mut self, level: LogLevel) -> Self {
        self.console_level = level;
        self
    }

    #[must_use]
    pub fn with_remote_level(mut self, level: LogLevel) -> Self {
        self.remote_level = level;
        self
    }

    #[must_use]
    pub fn with_dispatch_interval(mut self, interval: Duration) -> Self {
        self.dispatch_interval = interval;
        self
    }

    /// Empty keys are treated as no key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = if api_key.is_empty() { None } else { Some(api_key) };
        self
    }

    #[must_use]
    pub fn with_health_check(mut self, timeout: Duration, allow_without_remote: bool) -> Self {
        self.health_check_timeout = Some(timeout);
        self.allow_without_remote = allow_without_remote;
        self
    }

    pub fn ingest_url(&self) -> String {
        format!("http://{}{}", self.address, INGEST_PATH)
    }

    pub fn health_url(&self) -> String {
        format!("http://{}{}", self.address, HEALTH_PATH)
    }

    /// Check that the settings can drive a dispatcher
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(LoggerError::config("SeqConfig", "address must not be empty"));
        }
        if self.address.contains("://") {
            return Err(LoggerError::config(
                "SeqConfig",
                format!("address '{}' must not include a scheme", self.address),
            ));
        }
        if self.dispatch_interval.is_zero() {
            return Err(LoggerError::config(
                "SeqConfig",
                "dispatch interval must be non-zero",
            ));
        }
        if self.health_check_timeout.is_some_and(|t| t.is_zero()) {
            return Err(LoggerError::config(
                "SeqConfig",
                "health check timeout must be non-zero",
            ));
        }
        Ok(())
    }
}

impl Default for SeqConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            console_level: LogLevel::Debug,
            remote_level: LogLevel::Verbose,
            dispatch_interval: DEFAULT_DISPATCH_INTERVAL,
            api_key: None,
            health_check_timeout: None,
            allow_without_remote: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SeqConfig::new("seq:5341");
        assert_eq!(config.console_level, LogLevel::Debug);
        assert_eq!(config.remote_level, LogLevel::Verbose);
        assert_eq!(config.dispatch_interval, DEFAULT_DISPATCH_INTERVAL);
        assert!(config.api_key.is_none());
        assert!(config.health_check_timeout.is_none());
        assert!(!config.allow_without_remote);
    }

    #[test]
    fn test_urls() {
        let config = SeqConfig::new("10.0.0.5:5341");
        assert_eq!(config.ingest_url(), "http://10.0.0.5:5341/api/events/raw?clef");
        assert_eq!(config.health_url(), "http://10.0.0.5:5341/health");
    }

    #[test]
    fn test_empty_api_key_is_none() {
        assert!(SeqConfig::new("a:1").with_api_key("").api_key.is_none());
        assert_eq!(
            SeqConfig::new("a:1").with_api_key("k").api_key.as_deref(),
            Some("k")
        );
    }

    #[test]
    fn test_validate() {
        assert!(SeqConfig::new("seq:5341").validate().is_ok());
        assert!(SeqConfig::new("").validate().is_err());
        assert!(SeqConfig::new("http://seq:5341").validate().is_err());
        assert!(SeqConfig::new("seq:5341")
            .with_dispatch_interval(Duration::ZERO)
            .validate()
            .is_err());
        assert!(SeqConfig::new("seq:5341")
            .with_health_check(Duration::ZERO, true)
            .validate()
            .is_err());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: SeqConfig = serde_json::from_str(
            r#"{"address":"logs:5341","remote_level":"Warning","allow_without_remote":true}"#,
        )
        .expect("parse config");

        assert_eq!(config.address, "logs:5341");
        assert_eq!(config.remote_level, LogLevel::Warning);
        assert_eq!(config.console_level, LogLevel::Debug);
        assert!(config.allow_without_remote);
    }
}
