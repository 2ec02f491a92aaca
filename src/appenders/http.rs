//! HTTP transport for a Seq-compatible ingestion server
//!
//! Batches are POSTed as newline-delimited CLEF to `/api/events/raw?clef`;
//! readiness is probed with a GET to `/health`.

use crate::core::{LoggerError, Result, SeqConfig, Transport};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;

/// Timeout applied to every batch request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-Seq-ApiKey";

/// Phrase in the health response body that signals readiness
pub const READINESS_PHRASE: &str = "in service";

/// Blocking HTTP transport
///
/// # Example
///
/// ```no_run
/// use rust_seq_logger::appenders::HttpTransport;
/// use rust_seq_logger::core::{SeqConfig, Transport};
///
/// let transport = HttpTransport::new(&SeqConfig::new("127.0.0.1:5341"))
///     .expect("Failed to build HTTP client");
/// transport
///     .send_batch("{\"@t\":\"2024-01-01T00:00:00.000\",\"@mt\":\"hello\"}\n")
///     .expect("Failed to send batch");
/// ```
pub struct HttpTransport {
    client: Client,
    ingest_url: String,
    health_url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Build a transport for the configured address
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &SeqConfig) -> Result<Self> {
        let ingest_url = config.ingest_url();
        let client = Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LoggerError::transport(&ingest_url, e.to_string()))?;

        Ok(Self {
            client,
            ingest_url,
            health_url: config.health_url(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }
}

impl Transport for HttpTransport {
    fn send_batch(&self, body: &str) -> Result<()> {
        let mut request = self
            .client
            .post(&self.ingest_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_owned());
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key.as_str());
        }

        let response = request
            .send()
            .map_err(|e| LoggerError::transport(&self.ingest_url, e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(LoggerError::http_status(&self.ingest_url, status.as_u16()))
        }
    }

    fn health_check(&self, timeout: Duration) -> Result<bool> {
        let response = self
            .client
            .get(&self.health_url)
            .timeout(timeout)
            .send()
            .map_err(|e| LoggerError::health_check(&self.health_url, e.to_string()))?;

        if response.status() == StatusCode::OK {
            return Ok(true);
        }

        let body = response
            .text()
            .map_err(|e| LoggerError::health_check(&self.health_url, e.to_string()))?;
        Ok(body.contains(READINESS_PHRASE))
    }

    fn endpoint(&self) -> &str {
        &self.ingest_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_follow_config() {
        let transport = HttpTransport::new(&SeqConfig::new("127.0.0.1:5341")).expect("client");
        assert_eq!(transport.endpoint(), "http://127.0.0.1:5341/api/events/raw?clef");
        assert_eq!(transport.health_url(), "http://127.0.0.1:5341/health");
    }

    #[test]
    fn test_send_without_server_fails() {
        // Port 1 is reserved and nothing listens there
        let transport = HttpTransport::new(&SeqConfig::new("127.0.0.1:1")).expect("client");
        let result = transport.send_batch("{}\n");
        assert!(matches!(result, Err(LoggerError::Transport { .. })));
    }

    #[test]
    fn test_health_check_without_server_fails() {
        let transport = HttpTransport::new(&SeqConfig::new("127.0.0.1:1")).expect("client");
        let result = transport.health_check(Duration::from_millis(200));
        assert!(matches!(result, Err(LoggerError::HealthCheck { .. })));
    }
}
