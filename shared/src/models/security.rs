//! Security event data model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Severity of a security event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational finding.
    Low,
    /// Suspicious, worth a look.
    Medium,
    /// Likely an attack.
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Low
    }
}

/// A security observation emitted by a guard.
///
/// `blocked` is a label carried on the report. It does not mean the
/// guarded operation was prevented.
///
/// # Example
///
/// ```
/// use shared::models::{SecurityEvent, Severity};
///
/// let event = SecurityEvent::new("injection_attempt", Severity::High)
///     .with_detail("subkind", "potential_xss")
///     .with_blocked(true);
///
/// assert_eq!(event.detail_str("subkind"), Some("potential_xss"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityEvent {
    /// Event kind (e.g., "`injection_attempt`").
    #[serde(rename = "type")]
    pub kind: String,

    /// Severity of the finding.
    pub severity: Severity,

    /// Free-form details.
    #[serde(default)]
    pub details: HashMap<String, serde_json::Value>,

    /// Whether the report is labelled as blocked.
    #[serde(default)]
    pub blocked: bool,
}

impl SecurityEvent {
    /// Creates a new event with no details.
    #[must_use]
    pub fn new(kind: impl Into<String>, severity: Severity) -> Self {
        Self {
            kind: kind.into(),
            severity,
            details: HashMap::new(),
            blocked: false,
        }
    }

    /// Adds a detail to the event.
    #[must_use]
    pub fn with_detail(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Sets the `blocked` label.
    #[must_use]
    pub fn with_blocked(mut self, blocked: bool) -> Self {
        self.blocked = blocked;
        self
    }

    /// Returns a detail as a string slice, if it is one.
    #[must_use]
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(serde_json::Value::as_str)
    }
}
