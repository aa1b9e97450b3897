// Snapshot builder - Orchestrates the pipeline stages into one metrics snapshot
use crate::application::aggregator::aggregate;
use crate::application::clock::{AlertIdSource, Clock};
use crate::application::load::evaluate_load;
use crate::application::phase_classifier::classify_phase;
use crate::application::phase_extractor::extract_phase;
use crate::application::sanitizer::resolve_timestamp;
use crate::application::staleness::evaluate_staleness;
use crate::application::trend::{build_trend, stability, value_range};
use crate::domain::alert::Alert;
use crate::domain::phase::{ClassifiedPhase, PhaseKey, PhaseReading};
use crate::domain::snapshot::{overall_status, MetricsSnapshot};
use crate::domain::telemetry::{RawBatch, RawSample};
use crate::infrastructure::config::DashboardConfig;
use serde_json::Value;
use std::sync::Arc;

/// Stateless between calls: every snapshot is derived only from the batch
/// handed in, the configuration and the injected clock.
#[derive(Clone)]
pub struct SnapshotBuilder {
    config: DashboardConfig,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn AlertIdSource>,
}

impl SnapshotBuilder {
    pub fn new(config: DashboardConfig, clock: Arc<dyn Clock>, ids: Arc<dyn AlertIdSource>) -> Self {
        Self { config, clock, ids }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Build from the JSON payload delivered by the feed.
    pub fn build_from_json(&self, payload: &Value) -> MetricsSnapshot {
        self.build(RawBatch::from_json(payload).as_ref())
    }

    pub fn build(&self, batch: Option<&RawBatch>) -> MetricsSnapshot {
        let Some(batch) = batch.filter(|b| !b.is_empty()) else {
            return MetricsSnapshot::empty(self.config.nominal_voltage);
        };

        let mut ordered: Vec<(Option<i64>, &RawSample)> = batch
            .samples
            .iter()
            .map(|(_, sample)| (resolve_timestamp(&sample.timestamp), sample))
            .collect();
        // Stable: samples with equal timestamps keep arrival order.
        ordered.sort_by_key(|(timestamp, _)| timestamp.unwrap_or(0));

        let start = ordered.len().saturating_sub(self.config.sparkline_points);
        let window = &ordered[start..];
        let Some(&(latest_timestamp, latest)) = window.last() else {
            return MetricsSnapshot::empty(self.config.nominal_voltage);
        };

        let now = self.clock.now_ms();
        tracing::debug!(
            "Building snapshot from {} samples ({} in window), latest at {:?}",
            ordered.len(),
            window.len(),
            latest_timestamp
        );

        let raw_phases = latest.phases();
        let readings: Vec<PhaseReading> = PhaseKey::ALL
            .iter()
            .zip(raw_phases)
            .map(|(key, raw)| extract_phase(raw, key.label()))
            .collect();

        let alert_time = latest_timestamp.unwrap_or(now);
        let (phases, phase_alerts): (Vec<ClassifiedPhase>, Vec<Vec<Alert>>) = PhaseKey::ALL
            .iter()
            .zip(&readings)
            .map(|(key, reading)| {
                let assessment =
                    classify_phase(reading, &self.config.thresholds, alert_time, self.ids.as_ref());
                let phase = ClassifiedPhase {
                    key: *key,
                    reading: reading.clone(),
                    status: assessment.status,
                };
                (phase, assessment.alerts)
            })
            .unzip();

        let totals = aggregate(&readings);

        let trend = build_trend(window);
        let (min, max) = value_range(&trend);
        let stability_index = stability(&trend);

        let load = evaluate_load(totals.total_power_kw, &self.config);
        let staleness = evaluate_staleness(
            latest_timestamp,
            now,
            self.config.stale_data_tolerance_ms,
            self.ids.as_ref(),
        );

        let alerts = order_alerts(phase_alerts, staleness.alert);
        if !alerts.is_empty() {
            tracing::debug!("Snapshot carries {} alerts", alerts.len());
        }

        let status = overall_status(&phases, load.severity, staleness.severity);

        MetricsSnapshot {
            current: totals.average_voltage,
            average: totals.average_voltage,
            min,
            max,
            trend,
            phases,
            last_updated: latest_timestamp,
            stability: Some(stability_index),
            alerts,
            target: self.config.nominal_voltage,
            total_current: totals.total_current,
            total_power_kw: totals.total_power_kw,
            overall_power_factor: totals.overall_power_factor,
            load_percentage: load.percentage,
            load_severity: load.severity,
            stale_severity: staleness.severity,
            status,
            status_label: status.label(),
        }
    }
}

/// Concatenate the per-stage alert lists, oldest first. Ties keep
/// generation order.
fn order_alerts(phase_alerts: Vec<Vec<Alert>>, stale_alert: Option<Alert>) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = phase_alerts.into_iter().flatten().chain(stale_alert).collect();
    alerts.sort_by_key(|alert| alert.timestamp);
    alerts
}
