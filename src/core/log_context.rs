//! Per-event context assembled before a log entry is created
//!
//! A `LogContext` is mutable only while enrichers run. Once it is moved into a
//! [`LogEntry`](super::LogEntry) it can no longer be changed.

use super::log_level::LogLevel;
use super::property::{format_properties, Property};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    level: LogLevel,
    logger_name: Arc<str>,
    properties: Vec<Property>,
}

impl LogContext {
    pub fn new(level: LogLevel, logger_name: Arc<str>, properties: Vec<Property>) -> Self {
        Self {
            level,
            logger_name,
            properties,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    /// Bump the level one step up, saturating at `Fatal`
    pub fn raise_level(&mut self) {
        self.level = self.level.raised();
    }

    /// Bump the level one step down, saturating at `Verbose`
    pub fn lower_level(&mut self) {
        self.level = self.level.lowered();
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    /// Append a property; existing properties with the same key are kept
    pub fn add<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.properties.push(Property::new(key, value));
    }

    /// First property value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key() == key)
            .map(Property::value)
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Format properties as key=value pairs
    pub fn format_fields(&self) -> String {
        format_properties(&self.properties)
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}
