use credit_risk::config::CreditConfig;
use credit_risk::error::AppError;
use credit_risk::workflows::credit::{DecisionEvaluator, LogisticModel, ScoringCapability};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) scoring_halted: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the model artifact once and wrap it in an evaluator shared by every request.
pub(crate) fn build_evaluator(
    config: &CreditConfig,
) -> Result<Arc<DecisionEvaluator<LogisticModel>>, AppError> {
    let model = Arc::new(LogisticModel::load(&config.model_path)?);
    let evaluation = config.evaluation_config();

    info!(
        model = model.name(),
        path = %config.model_path.display(),
        threshold = evaluation.threshold,
        loan_grade = %evaluation.loan_grade,
        "scoring capability ready"
    );

    Ok(Arc::new(DecisionEvaluator::new(model, evaluation)))
}

/// Parse an uppercase form label (`RENT`, `EDUCATION`, `Y`) into its enum.
pub(crate) fn parse_label<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    let label = raw.trim().to_ascii_uppercase();
    serde_json::from_value(serde_json::Value::String(label.clone()))
        .map_err(|_| format!("'{raw}' is not a recognised option ({label})"))
}

pub(crate) fn parse_bounded(raw: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a number ({err})"))?;
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside the allowed range {min}..={max}"))
    }
}

pub(crate) fn parse_emp_length(raw: &str) -> Result<f64, String> {
    parse_bounded(raw, 0.0, 60.0)
}

pub(crate) fn parse_interest_rate(raw: &str) -> Result<f64, String> {
    parse_bounded(raw, 0.0, 50.0)
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, String> {
    parse_bounded(raw, 0.0, f64::MAX)
}
