//! Sink implementations: the console appender and the HTTP transport

pub mod console;
pub mod http;

pub use console::{ConsoleAppender, ConsoleStream};
pub use http::HttpTransport;

// Re-export traits for convenience
pub use crate::core::{Appender, Transport};
