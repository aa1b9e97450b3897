// Router construction
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{build_snapshot, get_config, health_check};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/config", get(get_config))
        .route("/snapshot", post(build_snapshot))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::{FixedClock, SequentialAlertIds};
    use crate::application::snapshot_builder::SnapshotBuilder;
    use crate::infrastructure::config::DashboardConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const NOW: i64 = 1_700_000_000_000;

    fn app() -> Router {
        let snapshot_builder = SnapshotBuilder::new(
            DashboardConfig::default(),
            Arc::new(FixedClock(NOW)),
            Arc::new(SequentialAlertIds::default()),
        );
        router(Arc::new(AppState { snapshot_builder }))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_snapshot(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/snapshot")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_config_endpoint() {
        let response = app()
            .oneshot(Request::builder().uri("/config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["nominal_voltage"], 230.0);
        assert_eq!(json["thresholds"]["load"]["critical"], 95.0);
    }

    #[tokio::test]
    async fn test_snapshot_from_null_batch() {
        let response = app().oneshot(post_snapshot("null")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["loadSeverity"], "pending");
        assert_eq!(json["staleSeverity"], Value::Null);
        assert_eq!(json["target"], 230.0);
        assert_eq!(json["phases"][2]["status"], "pending");
    }

    #[tokio::test]
    async fn test_snapshot_from_batch() {
        let batch = json!({
            "-Nabc": {
                "timestamp": NOW - 200_000,
                "phase1": { "voltage": "230", "frequency": 50, "current": 4, "powerFactor": 0.9 },
                "phase2": { "voltage": 225 },
                "phase3": { "voltage": 235 }
            }
        });
        let response = app().oneshot(post_snapshot(&batch.to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["current"], 230.0);
        assert_eq!(json["stability"], 100);
        assert_eq!(json["staleSeverity"], "warning");
        assert_eq!(json["alerts"][0]["message"], "Data delayed by 200s");
        assert_eq!(json["alerts"][0]["resolved"], false);
        assert_eq!(json["phases"][0]["powerFactor"], 0.9);
        assert_eq!(json["totalPowerKW"], 0.92);
        assert_eq!(json["status"], "warning");
        assert_eq!(json["statusLabel"], "Attention");
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let response = app().oneshot(post_snapshot("{not json")).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
