// Threshold-based classification of one phase reading
use crate::application::clock::AlertIdSource;
use crate::domain::alert::{Alert, Severity};
use crate::domain::phase::{PhaseReading, Status};
use crate::infrastructure::config::{
    FrequencyThresholds, PowerFactorThresholds, Thresholds, VoltageThresholds,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseAssessment {
    pub status: Status,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq)]
struct Breach {
    severity: Severity,
    message: String,
}

impl Breach {
    fn new(severity: Severity, message: String) -> Self {
        Self { severity, message }
    }
}

/// Classify a reading against the thresholds. Each breached metric yields
/// one alert at the tier it reached, stamped with `timestamp`. The phase
/// status is the highest tier among its breaches; without breaches it is
/// `normal`, or `pending` when the phase has no voltage yet.
pub fn classify_phase(
    reading: &PhaseReading,
    thresholds: &Thresholds,
    timestamp: i64,
    ids: &dyn AlertIdSource,
) -> PhaseAssessment {
    let breaches: Vec<Breach> = [
        reading
            .voltage
            .and_then(|v| voltage_breach(&reading.label, v, &thresholds.voltage)),
        reading
            .frequency
            .and_then(|f| frequency_breach(&reading.label, f, &thresholds.frequency)),
        reading
            .power_factor
            .and_then(|pf| power_factor_breach(&reading.label, pf, &thresholds.power_factor)),
    ]
    .into_iter()
    .flatten()
    .collect();

    let baseline = if reading.voltage.is_some() {
        Status::Normal
    } else {
        Status::Pending
    };
    let status = breaches
        .iter()
        .map(|breach| Status::from(breach.severity))
        .reduce(Status::elevate)
        .unwrap_or(baseline);

    let alerts = breaches
        .into_iter()
        .map(|breach| Alert::new(ids.next_id(), breach.message, breach.severity, timestamp))
        .collect();

    PhaseAssessment { status, alerts }
}

fn voltage_breach(label: &str, voltage: f64, limits: &VoltageThresholds) -> Option<Breach> {
    let (severity, direction, limit) = if voltage <= limits.critical_low {
        (Severity::Critical, "at or below", limits.critical_low)
    } else if voltage >= limits.critical_high {
        (Severity::Critical, "at or above", limits.critical_high)
    } else if voltage <= limits.warning_low {
        (Severity::Warning, "at or below", limits.warning_low)
    } else if voltage >= limits.warning_high {
        (Severity::Warning, "at or above", limits.warning_high)
    } else {
        return None;
    };

    Some(Breach::new(
        severity,
        format!(
            "{} voltage {:.1} V {} {} limit {:.1} V",
            label,
            voltage,
            direction,
            tier(severity),
            limit
        ),
    ))
}

fn frequency_breach(label: &str, frequency: f64, limits: &FrequencyThresholds) -> Option<Breach> {
    let (severity, direction, limit) = if frequency <= limits.critical_min {
        (Severity::Critical, "at or below", limits.critical_min)
    } else if frequency >= limits.critical_max {
        (Severity::Critical, "at or above", limits.critical_max)
    } else if frequency < limits.warning_min {
        (Severity::Warning, "below", limits.warning_min)
    } else if frequency > limits.warning_max {
        (Severity::Warning, "above", limits.warning_max)
    } else {
        return None;
    };

    Some(Breach::new(
        severity,
        format!(
            "{} frequency {:.2} Hz {} {} limit {:.2} Hz",
            label,
            frequency,
            direction,
            tier(severity),
            limit
        ),
    ))
}

fn power_factor_breach(
    label: &str,
    power_factor: f64,
    limits: &PowerFactorThresholds,
) -> Option<Breach> {
    let (severity, limit) = if power_factor <= limits.critical {
        (Severity::Critical, limits.critical)
    } else if power_factor <= limits.warning {
        (Severity::Warning, limits.warning)
    } else {
        return None;
    };

    Some(Breach::new(
        severity,
        format!(
            "{} power factor {:.2} at or below {} limit {:.2}",
            label,
            power_factor,
            tier(severity),
            limit
        ),
    ))
}

fn tier(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "warning",
        Severity::Critical => "critical",
    }
}
