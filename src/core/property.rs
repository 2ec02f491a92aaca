//! Key-value properties attached to log events

use serde::{Deserialize, Serialize};
use std::fmt;

/// A key with a value that was turned into text when the property was created
///
/// Keys need not be unique within a list; duplicates are kept and emitted.
///
/// # Example
///
/// ```
/// use rust_seq_logger::Property;
///
/// let prop = Property::new("Attempt", 3);
/// assert_eq!(prop.key(), "Attempt");
/// assert_eq!(prop.value(), "3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Property {
    key: String,
    value: String,
}

impl Property {
    pub fn new(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl<K: Into<String>, V: fmt::Display> From<(K, V)> for Property {
    fn from((key, value): (K, V)) -> Self {
        Property::new(key, value)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Format properties as space separated `key=value` pairs
pub fn format_properties(properties: &[Property]) -> String {
    properties
        .iter()
        .map(Property::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
