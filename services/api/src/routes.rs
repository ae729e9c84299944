use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use credit_risk::workflows::credit::{credit_router, DecisionEvaluator, ScoringCapability};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_credit_routes<S>(evaluator: Arc<DecisionEvaluator<S>>) -> axum::Router
where
    S: ScoringCapability + ?Sized + 'static,
{
    credit_router(evaluator)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let halted = state
        .scoring_halted
        .load(std::sync::atomic::Ordering::Acquire);
    let status = if ready && !halted {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if halted {
        json!({ "status": "scoring_unavailable" })
    } else if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_risk::workflows::credit::{
        ApplicantRecord, EvaluationConfig, ScoringCapability, ScoringError,
    };
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    struct FixedScorer(f64);

    impl ScoringCapability for FixedScorer {
        fn score(&self, _record: &ApplicantRecord) -> Result<f64, ScoringError> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct MismatchScorer;

    impl ScoringCapability for MismatchScorer {
        fn score(&self, _record: &ApplicantRecord) -> Result<f64, ScoringError> {
            Err(ScoringError::SchemaMismatch("loan_grade: unknown category 'C'".to_string()))
        }

        fn name(&self) -> &str {
            "mismatch"
        }
    }

    fn state(ready: bool, scoring_halted: Arc<AtomicBool>) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            scoring_halted,
            metrics: Arc::new(recorder.handle()),
        }
    }

    async fn status_of(router: axum::Router, uri: &str) -> StatusCode {
        router
            .oneshot(
                axum::http::Request::get(uri)
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes")
            .status()
    }

    fn mount<S>(evaluator: Arc<DecisionEvaluator<S>>, ready: bool) -> axum::Router
    where
        S: ScoringCapability + 'static,
    {
        let halted = evaluator.halt_flag();
        with_credit_routes(evaluator).layer(Extension(state(ready, halted)))
    }

    fn router(ready: bool) -> axum::Router {
        let evaluator = Arc::new(DecisionEvaluator::new(
            Arc::new(FixedScorer(0.2)),
            EvaluationConfig::default(),
        ));
        mount(evaluator, ready)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_follows_flag() {
        assert_eq!(status_of(router(false), "/ready").await, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_of(router(true), "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_and_policy_routes_are_mounted() {
        assert_eq!(status_of(router(true), "/metrics").await, StatusCode::OK);
        assert_eq!(
            status_of(router(true), "/api/v1/credit/policy").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn readiness_drops_after_scoring_failure() {
        let evaluator = Arc::new(DecisionEvaluator::new(
            Arc::new(MismatchScorer),
            EvaluationConfig::default(),
        ));
        let router = mount(evaluator, true);
        assert_eq!(status_of(router.clone(), "/ready").await, StatusCode::OK);

        let body = serde_json::json!({
            "name": "Jane Doe",
            "person_age": 30,
            "person_income": 50000,
            "person_home_ownership": "RENT",
            "person_emp_length": 5.0,
            "loan_intent": "PERSONAL",
            "loan_amnt": 10000,
            "loan_int_rate": 13.5,
            "cb_person_default_on_file": "N",
            "cb_person_cred_hist_length": 6
        });
        let response = router
            .clone()
            .oneshot(
                axum::http::Request::post("/api/v1/credit/evaluations")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(
            status_of(router, "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
