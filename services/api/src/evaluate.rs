use crate::infra::{
    build_evaluator, parse_amount, parse_emp_length, parse_interest_rate, parse_label,
};
use clap::Args;
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::telemetry;
use credit_risk::workflows::credit::{
    ApplicantInput, DecisionView, HomeOwnership, LoanIntent, PriorDefault,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Applicant full name
    #[arg(long)]
    pub(crate) name: String,
    /// Applicant age in years (18-100)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(18..=100))]
    pub(crate) age: u8,
    /// Annual income
    #[arg(long, default_value_t = 50_000.0, value_parser = parse_amount)]
    pub(crate) income: f64,
    /// Home ownership: RENT, OWN, MORTGAGE or OTHER
    #[arg(long, default_value = "RENT", value_parser = parse_label::<HomeOwnership>)]
    pub(crate) home_ownership: HomeOwnership,
    /// Employment length in years (0-60)
    #[arg(long, default_value_t = 5.0, value_parser = parse_emp_length)]
    pub(crate) emp_length: f64,
    /// Loan purpose: PERSONAL, EDUCATION, MEDICAL, VENTURE, HOMEIMPROVEMENT or DEBTCONSOLIDATION
    #[arg(long, default_value = "PERSONAL", value_parser = parse_label::<LoanIntent>)]
    pub(crate) loan_intent: LoanIntent,
    /// Requested loan amount
    #[arg(long, default_value_t = 10_000.0, value_parser = parse_amount)]
    pub(crate) loan_amount: f64,
    /// Interest rate in percent (0-50)
    #[arg(long, default_value_t = 13.5, value_parser = parse_interest_rate)]
    pub(crate) interest_rate: f64,
    /// Previous default on file: Y or N
    #[arg(long, default_value = "N", value_parser = parse_label::<PriorDefault>)]
    pub(crate) prior_default: PriorDefault,
    /// Credit history length in years (0-50)
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(0..=50))]
    pub(crate) credit_history: u8,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

impl EvaluateArgs {
    fn applicant(&self) -> ApplicantInput {
        ApplicantInput {
            name: self.name.clone(),
            person_age: self.age,
            person_income: self.income,
            person_home_ownership: self.home_ownership,
            person_emp_length: self.emp_length,
            loan_intent: self.loan_intent,
            loan_amnt: self.loan_amount,
            loan_int_rate: self.interest_rate,
            cb_person_default_on_file: self.prior_default,
            cb_person_cred_hist_length: self.credit_history,
        }
    }
}

pub(crate) fn run_evaluate(mut args: EvaluateArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(model) = args.model.take() {
        config.credit.model_path = model;
    }

    telemetry::init(&config.telemetry)?;

    let evaluator = build_evaluator(&config.credit)?;
    let decision = evaluator.evaluate(&args.applicant())?;

    println!("{}", render_decision(&DecisionView::from_decision(&decision)));
    Ok(())
}

pub(crate) fn render_decision(view: &DecisionView) -> String {
    let mut lines = vec![
        "Credit Risk Decision System".to_string(),
        "Credit Evaluation Result".to_string(),
        format!("  Applicant: {}", view.applicant),
        format!("  Loan / Income Ratio (auto): {}", view.loan_percent_income),
        format!("  Estimated Default Probability: {}", view.default_probability),
        format!("  Decision Threshold: {}", view.threshold),
        String::new(),
    ];
    lines.push(format!("[{}] {}", view.verdict.to_uppercase(), view.message));
    lines.join("\n")
}
