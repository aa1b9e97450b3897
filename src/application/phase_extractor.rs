// Builds a sanitized phase reading from one raw phase sub-record
use crate::application::sanitizer::{sanitize_number, sanitize_power_factor};
use crate::domain::phase::PhaseReading;
use crate::domain::telemetry::RawPhase;

/// An absent sub-record yields an all-`None` reading.
pub fn extract_phase(raw: Option<&RawPhase>, label: &str) -> PhaseReading {
    let Some(raw) = raw else {
        return PhaseReading::empty(label);
    };

    PhaseReading {
        label: label.to_string(),
        voltage: sanitize_number(&raw.voltage),
        frequency: sanitize_number(&raw.frequency),
        current: sanitize_number(&raw.current),
        power: sanitize_number(&raw.power),
        power_factor: sanitize_power_factor(&raw.power_factor),
    }
}
