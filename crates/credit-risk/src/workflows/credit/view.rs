use serde::Serialize;

use super::domain::{Decision, Verdict};

/// Presentation of a decision as shown to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionView {
    pub applicant: String,
    pub loan_percent_income: String,
    pub default_probability: String,
    pub threshold: String,
    pub verdict: &'static str,
    pub message: String,
}

impl DecisionView {
    pub fn from_decision(decision: &Decision) -> Self {
        Self {
            applicant: decision.applicant.clone(),
            loan_percent_income: format!("{:.3}", decision.loan_percent_income),
            default_probability: format_percent(decision.default_probability),
            threshold: format_percent(decision.threshold),
            verdict: decision.verdict.label(),
            message: verdict_message(decision.verdict, &decision.applicant),
        }
    }
}

impl From<&Decision> for DecisionView {
    fn from(decision: &Decision) -> Self {
        Self::from_decision(decision)
    }
}

pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn verdict_message(verdict: Verdict, name: &str) -> String {
    match verdict {
        Verdict::Approved => format!(
            "Congratulations, {name}! Based on our assessment, your credit application is \
             approved. Our team may contact you for further steps."
        ),
        Verdict::Rejected => format!(
            "We're sorry, {name}. Based on our current evaluation, you are not eligible for \
             credit at this time. You may consider reapplying in the future as your financial \
             profile improves."
        ),
    }
}
