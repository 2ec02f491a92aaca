//! Compact Log Event Format (CLEF) encoding
//!
//! Every entry becomes one JSON object on its own line:
//! `{"@t":..,"@mt":..,"@l":..,"Logger":..,"Key":"Value",...}`.
//! Property values are always JSON strings and duplicate keys are written as-is.

use super::error::Result;
use super::log_entry::LogEntry;
use serde::ser::{Serialize, SerializeMap, Serializer};

impl Serialize for LogEntry {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let properties = self.properties();
        let mut map = serializer.serialize_map(Some(4 + properties.len()))?;
        map.serialize_entry("@t", &self.formatted_timestamp())?;
        map.serialize_entry("@mt", self.message())?;
        map.serialize_entry("@l", self.level().name())?;
        map.serialize_entry("Logger", self.logger_name())?;
        for property in properties {
            map.serialize_entry(property.key(), property.value())?;
        }
        map.end()
    }
}

/// Encode one entry as a single-line JSON object
pub fn encode_entry(entry: &LogEntry) -> Result<String> {
    Ok(serde_json::to_string(entry)?)
}

/// Encode a batch as newline-delimited JSON, one object per line
pub fn encode_batch(entries: &[LogEntry]) -> Result<String> {
    let mut body = String::with_capacity(entries.len() * 128);
    for entry in entries {
        body.push_str(&encode_entry(entry)?);
        body.push('\n');
    }
    Ok(body)
}
