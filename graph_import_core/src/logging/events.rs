//! Event types for importer logging

use crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Logger severities, most severe first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    InternalError = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Verbose = 4,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::InternalError => "INTERNAL_ERROR",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
            Severity::Verbose => "VERBOSE",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Severity::InternalError | Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "internal_error" | "internal" | "0" => Ok(Severity::InternalError),
            "error" | "1" => Ok(Severity::Error),
            "warning" | "warn" | "2" => Ok(Severity::Warning),
            "info" | "3" => Ok(Severity::Info),
            "verbose" | "debug" | "4" => Ok(Severity::Verbose),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

/// Core log event structure
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    pub fn new(severity: Severity, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            message: message.to_string(),
            context: BTreeMap::new(),
        }
    }

    /// Add context data
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// Message clipped to the configured maximum length
    pub fn display_message(&self) -> &str {
        if self.message.len() <= MAX_LOG_MESSAGE_LENGTH {
            return &self.message;
        }
        let mut end = MAX_LOG_MESSAGE_LENGTH;
        while !self.message.is_char_boundary(end) {
            end -= 1;
        }
        &self.message[..end]
    }

    /// Format for display
    pub fn format(&self) -> String {
        let mut output = format!("[{}] {}", self.severity.as_str(), self.display_message());
        for (key, value) in &self.context {
            output.push_str(&format!(" {}={}", key, value));
        }
        output
    }

    /// Format as JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "severity": self.severity.as_str(),
            "message": self.display_message(),
        });

        if !self.context.is_empty() {
            json["context"] = serde_json::to_value(&self.context)?;
        }

        serde_json::to_string(&json)
    }
}
