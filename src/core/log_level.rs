//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum LogLevel {
    Verbose = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    /// All levels in ascending order of severity
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Level name as understood by the ingestion server (`@l` field)
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "Verbose",
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Information",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Fatal => "Fatal",
        }
    }

    /// Three-letter code used on the console
    pub fn short_name(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "VRB",
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warning => "WRN",
            LogLevel::Error => "ERR",
            LogLevel::Fatal => "FTL",
        }
    }

    /// One step more severe, saturating at `Fatal`
    #[must_use]
    pub fn raised(self) -> Self {
        match self {
            LogLevel::Verbose => LogLevel::Debug,
            LogLevel::Debug => LogLevel::Info,
            LogLevel::Info => LogLevel::Warning,
            LogLevel::Warning => LogLevel::Error,
            LogLevel::Error | LogLevel::Fatal => LogLevel::Fatal,
        }
    }

    /// One step less severe, saturating at `Verbose`
    #[must_use]
    pub fn lowered(self) -> Self {
        match self {
            LogLevel::Verbose | LogLevel::Debug => LogLevel::Verbose,
            LogLevel::Info => LogLevel::Debug,
            LogLevel::Warning => LogLevel::Info,
            LogLevel::Error => LogLevel::Warning,
            LogLevel::Fatal => LogLevel::Error,
        }
    }

    /// Whether console output for this level goes to stderr
    pub fn is_error_stream(&self) -> bool {
        *self > LogLevel::Warning
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "VERBOSE" | "VRB" | "TRACE" => Ok(LogLevel::Verbose),
            "DEBUG" | "DBG" => Ok(LogLevel::Debug),
            "INFO" | "INFORMATION" | "INF" => Ok(LogLevel::Info),
            "WARNING" | "WARN" | "WRN" => Ok(LogLevel::Warning),
            "ERROR" | "ERR" => Ok(LogLevel::Error),
            "FATAL" | "FTL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
