// Metrics snapshot domain model
use serde::Serialize;

use super::alert::{Alert, Severity};
use super::phase::{ClassifiedPhase, PhaseKey, Status};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Epoch milliseconds, `None` when the sample carried no usable timestamp.
    pub timestamp: Option<i64>,
    /// Mean voltage across the phases that reported one.
    pub value: f64,
}

/// The sole output of the pipeline. Rebuilt from scratch for every batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub current: Option<f64>,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub trend: Vec<TrendPoint>,
    /// Always L1, L2, L3.
    pub phases: Vec<ClassifiedPhase>,
    pub last_updated: Option<i64>,
    pub stability: Option<u8>,
    /// Ascending by timestamp.
    pub alerts: Vec<Alert>,
    pub target: f64,
    pub total_current: Option<f64>,
    #[serde(rename = "totalPowerKW")]
    pub total_power_kw: Option<f64>,
    pub overall_power_factor: Option<f64>,
    pub load_percentage: Option<f64>,
    pub load_severity: Status,
    pub stale_severity: Option<Severity>,
    pub status: Status,
    /// Banner text for `status`.
    pub status_label: &'static str,
}

impl MetricsSnapshot {
    /// The "no data" snapshot.
    pub fn empty(target: f64) -> Self {
        Self {
            current: None,
            average: None,
            min: None,
            max: None,
            trend: Vec::new(),
            phases: PhaseKey::ALL.into_iter().map(ClassifiedPhase::pending).collect(),
            last_updated: None,
            stability: None,
            alerts: Vec::new(),
            target,
            total_current: None,
            total_power_kw: None,
            overall_power_factor: None,
            load_percentage: None,
            load_severity: Status::Pending,
            stale_severity: None,
            status: Status::Pending,
            status_label: Status::Pending.label(),
        }
    }

    pub fn phase(&self, key: PhaseKey) -> Option<&ClassifiedPhase> {
        self.phases.iter().find(|phase| phase.key == key)
    }
}

/// System-wide status: the highest tier among phases with data, the load
/// evaluation and staleness. Pending only while no phase has data and the
/// feed is not stale.
pub fn overall_status(
    phases: &[ClassifiedPhase],
    load_severity: Status,
    stale_severity: Option<Severity>,
) -> Status {
    let has_data = phases.iter().any(|phase| phase.status != Status::Pending);
    if !has_data && stale_severity.is_none() {
        return Status::Pending;
    }

    phases
        .iter()
        .map(|phase| phase.status)
        .chain(std::iter::once(load_severity))
        .chain(stale_severity.map(Status::from))
        .filter(|status| *status != Status::Pending)
        .reduce(Status::elevate)
        .unwrap_or(Status::Pending)
}
