//! Level definitions for the front-end and the backend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a front-end log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum Level {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
    /// Panics in development builds of the front-end; logged as an error here
    DPanic = 4,
    Panic = 5,
    Fatal = 6,
}

impl Level {
    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::DPanic => "DPANIC",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    /// Map to the backend severity bucket.
    ///
    /// The backend has no fatal or panic distinction, so everything at
    /// `Error` and above collapses into [`BackendLevel::Error`].
    #[must_use]
    pub fn backend_level(&self) -> BackendLevel {
        match self {
            Level::Debug => BackendLevel::Debug,
            Level::Info => BackendLevel::Info,
            Level::Warn => BackendLevel::Warn,
            Level::Error | Level::DPanic | Level::Panic | Level::Fatal => BackendLevel::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "DPANIC" => Ok(Level::DPanic),
            "PANIC" => Ok(Level::Panic),
            "FATAL" => Ok(Level::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// The four severities a backend logger understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BackendLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl BackendLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            BackendLevel::Debug => "DEBUG",
            BackendLevel::Info => "INFO",
            BackendLevel::Warn => "WARN",
            BackendLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for BackendLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
