//! Credit decision workflow: applicant intake, scoring and the approve/reject policy.

pub mod domain;
pub(crate) mod evaluation;
pub mod router;
pub mod scoring;
pub mod view;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantInput, ApplicantRecord, Decision, FeatureKind, FeatureValue, HomeOwnership,
    LoanIntent, PriorDefault, Verdict,
};
pub use evaluation::{
    DecisionEvaluator, EvaluationConfig, EvaluationError, ValidationError, DEFAULT_LOAN_GRADE,
    DEFAULT_THRESHOLD,
};
pub use router::credit_router;
pub use scoring::{LogisticModel, ScoringCapability, ScoringError};
pub use view::DecisionView;
