//! Structured error types shared across the quench crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload carried by every [`QuenchError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (names, values, sizes).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
}

impl ErrorInfo {
    /// Creates a new payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    /// Attaches a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Canonical error type for the quench engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum QuenchError {
    /// Configuration parsing and validation errors (fatal at startup).
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Sequential-recombination collaborator errors.
    #[error("cluster error: {0}")]
    Cluster(ErrorInfo),
    /// Observable precondition violations (skipped contributions).
    #[error("observable error: {0}")]
    Observable(ErrorInfo),
    /// Accumulator booking and merging errors.
    #[error("histogram error: {0}")]
    Histogram(ErrorInfo),
    /// Serialization errors for settings and exported reports.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl QuenchError {
    /// Returns the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            QuenchError::Config(info)
            | QuenchError::Cluster(info)
            | QuenchError::Observable(info)
            | QuenchError::Histogram(info)
            | QuenchError::Serde(info) => info,
        }
    }
}
