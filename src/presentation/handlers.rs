// HTTP request handlers
use crate::domain::snapshot::MetricsSnapshot;
use crate::infrastructure::config::DashboardConfig;
use crate::presentation::app_state::AppState;
use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Effective dashboard configuration, so renderers can draw the same limits
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<DashboardConfig> {
    Json(state.snapshot_builder.config().clone())
}

/// Derive a metrics snapshot from one raw sample batch
pub async fn build_snapshot(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Json<MetricsSnapshot> {
    if !matches!(payload, Value::Null | Value::Object(_) | Value::Array(_)) {
        tracing::warn!("Ignoring raw batch that is neither an object nor an array");
    }

    let snapshot = state.snapshot_builder.build_from_json(&payload);
    tracing::debug!(
        "Snapshot built: status={:?}, alerts={}",
        snapshot.status,
        snapshot.alerts.len()
    );
    Json(snapshot)
}
