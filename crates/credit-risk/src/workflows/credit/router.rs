use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use super::domain::{ApplicantInput, Decision};
use super::evaluation::{DecisionEvaluator, EvaluationError};
use super::scoring::ScoringCapability;
use super::view::DecisionView;

/// Body returned for a successfully scored application.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    pub decision: Decision,
    pub view: DecisionView,
    pub evaluated_at: DateTime<Utc>,
}

/// Router builder exposing the evaluation endpoints.
pub fn credit_router<S>(evaluator: Arc<DecisionEvaluator<S>>) -> Router
where
    S: ScoringCapability + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/credit/evaluations", post(evaluate_handler::<S>))
        .route("/api/v1/credit/policy", get(policy_handler::<S>))
        .with_state(evaluator)
}

pub(crate) async fn evaluate_handler<S>(
    State(evaluator): State<Arc<DecisionEvaluator<S>>>,
    axum::Json(input): axum::Json<ApplicantInput>,
) -> Response
where
    S: ScoringCapability + ?Sized + 'static,
{
    match evaluator.evaluate(&input) {
        Ok(decision) => {
            info!(verdict = decision.verdict.label(), "credit decision rendered");
            let body = EvaluationResponse {
                view: DecisionView::from_decision(&decision),
                decision,
                evaluated_at: Utc::now(),
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(EvaluationError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "message": error.user_message(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(EvaluationError::Scoring(err)) => {
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(EvaluationError::Halted) => {
            warn!("evaluation refused while scoring capability is halted");
            let payload = json!({
                "error": EvaluationError::Halted.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn policy_handler<S>(
    State(evaluator): State<Arc<DecisionEvaluator<S>>>,
) -> Response
where
    S: ScoringCapability + ?Sized + 'static,
{
    let config = evaluator.config();
    let payload = json!({
        "model": evaluator.scorer().name(),
        "threshold": config.threshold,
        "loan_grade": config.loan_grade,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
