//! Scoring capability: the pre-trained classifier the evaluator consults.
//!
//! The evaluator only sees the [`ScoringCapability`] trait so tests can swap in deterministic
//! stubs. [`LogisticModel`] is the artifact-backed implementation loaded once at startup.

mod model;

pub use model::{CategoricalTerm, LogisticModel, NumericTerm};

use std::path::PathBuf;

use super::domain::ApplicantRecord;

/// Anything that can turn an applicant record into a probability of default.
pub trait ScoringCapability: Send + Sync {
    /// Probability of the positive (default) class, expected within `[0, 1]`.
    fn score(&self, record: &ApplicantRecord) -> Result<f64, ScoringError>;

    fn name(&self) -> &str;
}

/// Failures of the scoring capability. None of these are recoverable by the applicant.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("unable to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),
    #[error("record does not match model schema: {0}")]
    SchemaMismatch(String),
    #[error("model returned probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}
