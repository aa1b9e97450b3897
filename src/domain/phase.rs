// Phase domain models
use serde::Serialize;

use super::alert::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhaseKey {
    L1,
    L2,
    L3,
}

impl PhaseKey {
    /// Fixed display order of the phase cards.
    pub const ALL: [PhaseKey; 3] = [PhaseKey::L1, PhaseKey::L2, PhaseKey::L3];

    pub fn label(&self) -> &'static str {
        match self {
            PhaseKey::L1 => "Phase 1",
            PhaseKey::L2 => "Phase 2",
            PhaseKey::L3 => "Phase 3",
        }
    }
}

/// Health status shared by phases, load and the overall system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Normal,
    Warning,
    Critical,
    Pending,
}

impl Status {
    /// Escalate towards `incoming`: critical dominates warning, and neither
    /// is ever downgraded.
    pub fn elevate(self, incoming: Status) -> Status {
        match (self, incoming) {
            (_, Status::Critical) | (Status::Critical, _) => Status::Critical,
            (_, Status::Warning) => Status::Warning,
            (current, _) => current,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Normal => "Stable",
            Status::Warning => "Attention",
            Status::Critical => "Critical",
            Status::Pending => "Awaiting Data",
        }
    }
}

impl From<Severity> for Status {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Status::Warning,
            Severity::Critical => Status::Critical,
        }
    }
}

/// Sanitized reading of one phase. Every numeric field is finite or `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseReading {
    pub label: String,
    pub voltage: Option<f64>,
    pub frequency: Option<f64>,
    pub current: Option<f64>,
    pub power: Option<f64>,
    /// Strictly positive when present.
    pub power_factor: Option<f64>,
}

impl PhaseReading {
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            voltage: None,
            frequency: None,
            current: None,
            power: None,
            power_factor: None,
        }
    }

    /// Real power in watts: the reported value, else V × I, else nothing.
    pub fn effective_power(&self) -> Option<f64> {
        self.power.or_else(|| match (self.voltage, self.current) {
            (Some(voltage), Some(current)) => Some(voltage * current),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedPhase {
    pub key: PhaseKey,
    #[serde(flatten)]
    pub reading: PhaseReading,
    pub status: Status,
}

impl ClassifiedPhase {
    pub fn pending(key: PhaseKey) -> Self {
        Self {
            key,
            reading: PhaseReading::empty(key.label()),
            status: Status::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevate_never_downgrades() {
        assert_eq!(Status::Normal.elevate(Status::Warning), Status::Warning);
        assert_eq!(Status::Warning.elevate(Status::Critical), Status::Critical);
        assert_eq!(Status::Critical.elevate(Status::Warning), Status::Critical);
        assert_eq!(Status::Warning.elevate(Status::Normal), Status::Warning);
        assert_eq!(Status::Pending.elevate(Status::Normal), Status::Pending);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::Normal.label(), "Stable");
        assert_eq!(Status::Warning.label(), "Attention");
        assert_eq!(Status::Critical.label(), "Critical");
        assert_eq!(Status::Pending.label(), "Awaiting Data");
    }

    #[test]
    fn test_effective_power_falls_back_to_volt_amps() {
        let mut reading = PhaseReading::empty("Phase 1");
        assert_eq!(reading.effective_power(), None);

        reading.voltage = Some(230.0);
        reading.current = Some(2.0);
        assert_eq!(reading.effective_power(), Some(460.0));

        reading.power = Some(400.0);
        assert_eq!(reading.effective_power(), Some(400.0));
    }

    #[test]
    fn test_classified_phase_serializes_flat() {
        let phase = ClassifiedPhase::pending(PhaseKey::L2);
        let json = serde_json::to_value(&phase).unwrap();
        assert_eq!(json["key"], "L2");
        assert_eq!(json["label"], "Phase 2");
        assert_eq!(json["status"], "pending");
        assert!(json["powerFactor"].is_null());
    }
}
