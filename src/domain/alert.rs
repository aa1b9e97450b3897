// Alert domain model
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

/// A timestamped notice describing one detected anomaly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Always false; there is no resolution workflow.
    pub resolved: bool,
}

impl Alert {
    pub fn new(id: String, message: String, severity: Severity, timestamp: i64) -> Self {
        Self {
            id,
            message,
            severity,
            timestamp,
            resolved: false,
        }
    }
}
