use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::credit::domain::{ApplicantInput, ApplicantRecord};
use crate::workflows::credit::evaluation::{DecisionEvaluator, EvaluationConfig};
use crate::workflows::credit::scoring::{LogisticModel, ScoringCapability, ScoringError};

pub(super) fn applicant() -> ApplicantInput {
    ApplicantInput {
        name: "Jane Doe".to_string(),
        ..ApplicantInput::default()
    }
}

pub(super) fn evaluation_config() -> EvaluationConfig {
    EvaluationConfig::default()
}

pub(super) fn evaluator<S>(scorer: Arc<S>) -> DecisionEvaluator<S>
where
    S: ScoringCapability,
{
    DecisionEvaluator::new(scorer, evaluation_config())
}

/// Returns the same probability for every record and keeps what it was sent.
pub(super) struct RecordingScorer {
    probability: f64,
    records: Mutex<Vec<ApplicantRecord>>,
}

impl RecordingScorer {
    pub(super) fn returning(probability: f64) -> Arc<Self> {
        Arc::new(Self {
            probability,
            records: Mutex::new(Vec::new()),
        })
    }

    pub(super) fn records(&self) -> Vec<ApplicantRecord> {
        self.records.lock().expect("scorer mutex poisoned").clone()
    }

    pub(super) fn calls(&self) -> usize {
        self.records.lock().expect("scorer mutex poisoned").len()
    }
}

impl ScoringCapability for RecordingScorer {
    fn score(&self, record: &ApplicantRecord) -> Result<f64, ScoringError> {
        self.records
            .lock()
            .expect("scorer mutex poisoned")
            .push(record.clone());
        Ok(self.probability)
    }

    fn name(&self) -> &str {
        "recording-stub"
    }
}

/// Rejects every record the way a model with a different schema would.
pub(super) struct SchemaMismatchScorer;

impl ScoringCapability for SchemaMismatchScorer {
    fn score(&self, _record: &ApplicantRecord) -> Result<f64, ScoringError> {
        Err(ScoringError::SchemaMismatch(
            "loan_grade: unknown category 'C'".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "mismatched-stub"
    }
}

/// Fails the first call with a schema mismatch, then scores normally.
#[derive(Default)]
pub(super) struct FailsOnceScorer {
    calls: AtomicUsize,
}

impl FailsOnceScorer {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ScoringCapability for FailsOnceScorer {
    fn score(&self, _record: &ApplicantRecord) -> Result<f64, ScoringError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(ScoringError::SchemaMismatch(
                "person_home_ownership: unknown category 'RENT'".to_string(),
            ))
        } else {
            Ok(0.1)
        }
    }

    fn name(&self) -> &str {
        "fails-once-stub"
    }
}

pub(super) const SAMPLE_MODEL: &str = r#"{
    "name": "credit-risk-logit",
    "version": "test",
    "intercept": -1.0,
    "numeric": [
        { "feature": "loan_percent_income", "mean": 0.17, "scale": 0.1, "weight": 1.2 },
        { "feature": "loan_int_rate", "mean": 11.0, "scale": 3.2, "weight": 0.6 },
        { "feature": "person_age", "weight": 0.0 }
    ],
    "categorical": [
        { "feature": "loan_grade", "weights": { "A": -0.8, "B": -0.3, "C": 0.1, "D": 1.4 } },
        { "feature": "cb_person_default_on_file", "weights": { "N": 0.0, "Y": 0.5 } },
        { "feature": "person_home_ownership", "weights": { "RENT": 0.4, "MORTGAGE": -0.3 }, "ignore_unknown": true }
    ]
}"#;

pub(super) fn sample_model() -> LogisticModel {
    LogisticModel::from_json_str(SAMPLE_MODEL).expect("sample model is valid")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
