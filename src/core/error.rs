//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Request could not be delivered to the log server
    #[error("Failed to reach log server at '{endpoint}': {message}")]
    Transport { endpoint: String, message: String },

    /// Log server answered with a non-success status
    #[error("Log server at '{endpoint}' responded with status {status}")]
    HttpStatus { endpoint: String, status: u16 },

    /// Health probe failed or reported not ready
    #[error("Health check against '{endpoint}' failed: {message}")]
    HealthCheck { endpoint: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Channel send error
    #[error("Failed to send command to dispatcher")]
    ChannelSendError,

    /// Channel receive error
    #[error("Failed to receive reply from dispatcher")]
    ChannelReceiveError,

    /// Dispatcher has not been started or already finished
    #[error("Dispatcher is not running")]
    DispatcherNotRunning,
}

impl LoggerError {
    /// Create a transport error for an endpoint
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a non-success status error
    pub fn http_status(endpoint: impl Into<String>, status: u16) -> Self {
        LoggerError::HttpStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Create a health check error
    pub fn health_check(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::HealthCheck {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}
