// System-wide totals across the phases of one sample
use crate::domain::phase::PhaseReading;

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// Mean of the phase voltages that are present.
    pub average_voltage: Option<f64>,
    /// Missing currents contribute nothing.
    pub total_current: Option<f64>,
    /// `None` when the summed power is exactly zero (no data, not zero load).
    pub total_power_kw: Option<f64>,
    pub overall_power_factor: Option<f64>,
}

pub fn aggregate(phases: &[PhaseReading]) -> Aggregate {
    let total_current = sum(phases.iter().filter_map(|p| p.current));

    let total_power_kw = sum(phases.iter().filter_map(PhaseReading::effective_power))
        .filter(|watts| *watts != 0.0)
        .map(|watts| watts / 1000.0);

    Aggregate {
        average_voltage: mean(phases.iter().filter_map(|p| p.voltage)),
        total_current,
        total_power_kw,
        overall_power_factor: mean(phases.iter().filter_map(|p| p.power_factor)),
    }
}

/// Sums of finite values can still overflow; that degrades to `None`.
fn sum(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    Some(values.into_iter().fold(0.0, |total, v| total + v)).filter(|total| total.is_finite())
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64).filter(|m| m.is_finite())
}
