use serde::{Deserialize, Serialize};

pub const DEFAULT_THRESHOLD: f64 = 0.37;
pub const DEFAULT_LOAN_GRADE: &str = "C";

/// Decision policy constants applied to every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Default probability at or above which an application is rejected.
    pub threshold: f64,
    /// Grade sent to the model for every applicant. No grading rule exists yet, so this is a
    /// fixed placeholder rather than a value derived from the applicant.
    pub loan_grade: String,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            loan_grade: DEFAULT_LOAN_GRADE.to_string(),
        }
    }
}
