//! Transient notification shown to the user, at most one at a time.

use serde::{Deserialize, Serialize};

/// Severity tag attached to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Neutral status
    Info,
    /// Operation succeeded
    Success,
    /// Something needs attention
    Warning,
    /// Operation failed
    Error,
}

impl Default for Severity {
    fn default() -> Self {
        Self::Info
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// A transient message with a severity tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Message text
    pub message: String,

    /// Severity tag
    pub severity: Severity,
}

impl Notification {
    /// Build a notification.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_defaults_to_info() {
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn severity_displays_lowercase() {
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
