mod config;
mod policy;
mod rules;

pub use config::{EvaluationConfig, DEFAULT_LOAN_GRADE, DEFAULT_THRESHOLD};
pub use rules::ValidationError;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::domain::{ApplicantInput, ApplicantRecord, Decision};
use super::scoring::{ScoringCapability, ScoringError};
use policy::decide_verdict;
use tracing::{debug, error};

/// Evaluator turning one submission into one decision.
///
/// The only state is the halt flag: once the scoring capability fails, every later evaluation
/// is refused until the process is restarted with a working model.
pub struct DecisionEvaluator<S: ?Sized> {
    config: EvaluationConfig,
    halted: Arc<AtomicBool>,
    scorer: Arc<S>,
}

impl<S> DecisionEvaluator<S>
where
    S: ScoringCapability + ?Sized,
{
    pub fn new(scorer: Arc<S>, config: EvaluationConfig) -> Self {
        Self {
            config,
            halted: Arc::new(AtomicBool::new(false)),
            scorer,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::Acquire)
    }

    /// Shared handle on the halt flag, for readiness probes.
    pub fn halt_flag(&self) -> Arc<AtomicBool> {
        self.halted.clone()
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn evaluate(&self, input: &ApplicantInput) -> Result<Decision, EvaluationError> {
        if self.is_halted() {
            return Err(EvaluationError::Halted);
        }

        rules::validate(input)?;

        let record = rules::assemble_record(input, &self.config);
        let default_probability = match self.score(&record) {
            Ok(probability) => probability,
            Err(err) => {
                self.halted.store(true, Ordering::Release);
                error!(
                    error = %err,
                    model = self.scorer.name(),
                    "scoring capability failed, refusing further evaluations"
                );
                return Err(err.into());
            }
        };

        let verdict = decide_verdict(default_probability, self.config.threshold);
        debug!(
            verdict = verdict.label(),
            default_probability,
            loan_percent_income = record.loan_percent_income,
            "credit application evaluated"
        );

        Ok(Decision {
            applicant: input.name.trim().to_string(),
            loan_percent_income: record.loan_percent_income,
            default_probability,
            threshold: self.config.threshold,
            verdict,
        })
    }

    fn score(&self, record: &ApplicantRecord) -> Result<f64, ScoringError> {
        let probability = self.scorer.score(record)?;
        if (0.0..=1.0).contains(&probability) {
            Ok(probability)
        } else {
            Err(ScoringError::ProbabilityOutOfRange(probability))
        }
    }
}

/// Error raised by a single evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("scoring capability unavailable after an earlier failure")]
    Halted,
}
