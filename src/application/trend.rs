// Voltage trend series and the stability index derived from it
use crate::application::sanitizer::sanitize_number;
use crate::domain::snapshot::TrendPoint;
use crate::domain::telemetry::RawSample;

/// Stability reported when there are too few points to measure dispersion.
const DEFAULT_STABILITY: u8 = 100;

/// Build the averaged-voltage series over the window (oldest first).
/// Samples with no finite phase voltage are dropped.
pub fn build_trend(window: &[(Option<i64>, &RawSample)]) -> Vec<TrendPoint> {
    window
        .iter()
        .filter_map(|(timestamp, sample)| {
            let voltages: Vec<f64> = sample
                .phases()
                .into_iter()
                .filter_map(|phase| phase.and_then(|p| sanitize_number(&p.voltage)))
                .collect();
            let value = voltages.iter().sum::<f64>() / voltages.len() as f64;
            (!voltages.is_empty() && value.is_finite()).then_some(TrendPoint {
                timestamp: *timestamp,
                value,
            })
        })
        .collect()
}

/// Lowest and highest trend values, `None` for an empty series.
pub fn value_range(trend: &[TrendPoint]) -> (Option<f64>, Option<f64>) {
    let values = trend.iter().map(|point| point.value);
    (values.clone().reduce(f64::min), values.reduce(f64::max))
}

/// `round(100 - clamp(stdev, 0, 100))` over the trend values. Fewer than two
/// points count as perfectly stable.
pub fn stability(trend: &[TrendPoint]) -> u8 {
    if trend.len() < 2 {
        return DEFAULT_STABILITY;
    }

    let n = trend.len() as f64;
    let mean = trend.iter().map(|p| p.value).sum::<f64>() / n;
    let variance = trend.iter().map(|p| (p.value - mean).powi(2)).sum::<f64>() / n;
    let stdev = variance.sqrt();

    let dispersion = if stdev.is_nan() { 100.0 } else { stdev.clamp(0.0, 100.0) };
    (100.0 - dispersion).round() as u8
}
