use super::super::domain::{ApplicantInput, ApplicantRecord};
use super::config::EvaluationConfig;

/// Input problems the applicant can correct and resubmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("empty name")]
    EmptyName,
    #[error("non-positive income")]
    NonPositiveIncome,
}

impl ValidationError {
    /// Message shown next to the form.
    pub const fn user_message(self) -> &'static str {
        match self {
            ValidationError::EmptyName => "Please enter your full name.",
            ValidationError::NonPositiveIncome => {
                "Annual Income must be greater than 0 to calculate Loan / Income Ratio."
            }
        }
    }
}

/// Checks run before any scoring. The first failing check wins.
pub(crate) fn validate(input: &ApplicantInput) -> Result<(), ValidationError> {
    if input.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if input.person_income.is_nan() || input.person_income <= 0.0 {
        return Err(ValidationError::NonPositiveIncome);
    }

    Ok(())
}

pub(crate) fn loan_percent_income(input: &ApplicantInput) -> f64 {
    input.loan_amnt / input.person_income
}

pub(crate) fn assemble_record(input: &ApplicantInput, config: &EvaluationConfig) -> ApplicantRecord {
    ApplicantRecord {
        person_age: input.person_age,
        person_income: input.person_income,
        person_home_ownership: input.person_home_ownership,
        person_emp_length: input.person_emp_length,
        loan_intent: input.loan_intent,
        loan_amnt: input.loan_amnt,
        loan_grade: config.loan_grade.clone(),
        loan_int_rate: input.loan_int_rate,
        loan_percent_income: loan_percent_income(input),
        cb_person_default_on_file: input.cb_person_default_on_file,
        cb_person_cred_hist_length: input.cb_person_cred_hist_length,
    }
}
