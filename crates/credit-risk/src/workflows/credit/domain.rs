use serde::{Deserialize, Serialize};

/// Housing situation declared on the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HomeOwnership {
    Rent,
    Own,
    Mortgage,
    Other,
}

impl HomeOwnership {
    pub const ALL: [HomeOwnership; 4] = [
        HomeOwnership::Rent,
        HomeOwnership::Own,
        HomeOwnership::Mortgage,
        HomeOwnership::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            HomeOwnership::Rent => "RENT",
            HomeOwnership::Own => "OWN",
            HomeOwnership::Mortgage => "MORTGAGE",
            HomeOwnership::Other => "OTHER",
        }
    }
}

/// Stated purpose of the requested loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanIntent {
    Personal,
    Education,
    Medical,
    Venture,
    HomeImprovement,
    DebtConsolidation,
}

impl LoanIntent {
    pub const ALL: [LoanIntent; 6] = [
        LoanIntent::Personal,
        LoanIntent::Education,
        LoanIntent::Medical,
        LoanIntent::Venture,
        LoanIntent::HomeImprovement,
        LoanIntent::DebtConsolidation,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LoanIntent::Personal => "PERSONAL",
            LoanIntent::Education => "EDUCATION",
            LoanIntent::Medical => "MEDICAL",
            LoanIntent::Venture => "VENTURE",
            LoanIntent::HomeImprovement => "HOMEIMPROVEMENT",
            LoanIntent::DebtConsolidation => "DEBTCONSOLIDATION",
        }
    }
}

/// Whether the credit bureau has a prior default on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorDefault {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl PriorDefault {
    pub const fn label(self) -> &'static str {
        match self {
            PriorDefault::Yes => "Y",
            PriorDefault::No => "N",
        }
    }
}

/// Raw applicant fields as submitted through the form.
///
/// Range constraints (age 18-100, employment 0-60, rate 0-50, history 0-50) are input hints
/// for the form surface; the evaluator only rejects an empty name or a non-positive income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantInput {
    pub name: String,
    pub person_age: u8,
    pub person_income: f64,
    pub person_home_ownership: HomeOwnership,
    pub person_emp_length: f64,
    pub loan_intent: LoanIntent,
    pub loan_amnt: f64,
    pub loan_int_rate: f64,
    pub cb_person_default_on_file: PriorDefault,
    pub cb_person_cred_hist_length: u8,
}

impl Default for ApplicantInput {
    /// Mirrors the initial values shown on the application form.
    fn default() -> Self {
        Self {
            name: String::new(),
            person_age: 30,
            person_income: 50_000.0,
            person_home_ownership: HomeOwnership::Rent,
            person_emp_length: 5.0,
            loan_intent: LoanIntent::Personal,
            loan_amnt: 10_000.0,
            loan_int_rate: 13.5,
            cb_person_default_on_file: PriorDefault::No,
            cb_person_cred_hist_length: 6,
        }
    }
}

/// Feature vector handed to the scoring capability. Carries no personal identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub person_age: u8,
    pub person_income: f64,
    pub person_home_ownership: HomeOwnership,
    pub person_emp_length: f64,
    pub loan_intent: LoanIntent,
    pub loan_amnt: f64,
    pub loan_grade: String,
    pub loan_int_rate: f64,
    pub loan_percent_income: f64,
    pub cb_person_default_on_file: PriorDefault,
    pub cb_person_cred_hist_length: u8,
}

/// Kind of value a record field carries, as seen by a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Numeric,
    Categorical,
}

/// Borrowed view of a single record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Numeric(f64),
    Categorical(&'a str),
}

impl ApplicantRecord {
    /// Field names in the order the classifier was trained on.
    pub const FEATURES: [(&'static str, FeatureKind); 11] = [
        ("person_age", FeatureKind::Numeric),
        ("person_income", FeatureKind::Numeric),
        ("person_home_ownership", FeatureKind::Categorical),
        ("person_emp_length", FeatureKind::Numeric),
        ("loan_intent", FeatureKind::Categorical),
        ("loan_amnt", FeatureKind::Numeric),
        ("loan_grade", FeatureKind::Categorical),
        ("loan_int_rate", FeatureKind::Numeric),
        ("loan_percent_income", FeatureKind::Numeric),
        ("cb_person_default_on_file", FeatureKind::Categorical),
        ("cb_person_cred_hist_length", FeatureKind::Numeric),
    ];

    pub fn feature_kind(name: &str) -> Option<FeatureKind> {
        Self::FEATURES
            .iter()
            .find(|(feature, _)| *feature == name)
            .map(|(_, kind)| *kind)
    }

    pub fn feature(&self, name: &str) -> Option<FeatureValue<'_>> {
        let value = match name {
            "person_age" => FeatureValue::Numeric(f64::from(self.person_age)),
            "person_income" => FeatureValue::Numeric(self.person_income),
            "person_home_ownership" => {
                FeatureValue::Categorical(self.person_home_ownership.label())
            }
            "person_emp_length" => FeatureValue::Numeric(self.person_emp_length),
            "loan_intent" => FeatureValue::Categorical(self.loan_intent.label()),
            "loan_amnt" => FeatureValue::Numeric(self.loan_amnt),
            "loan_grade" => FeatureValue::Categorical(&self.loan_grade),
            "loan_int_rate" => FeatureValue::Numeric(self.loan_int_rate),
            "loan_percent_income" => FeatureValue::Numeric(self.loan_percent_income),
            "cb_person_default_on_file" => {
                FeatureValue::Categorical(self.cb_person_default_on_file.label())
            }
            "cb_person_cred_hist_length" => {
                FeatureValue::Numeric(f64::from(self.cb_person_cred_hist_length))
            }
            _ => return None,
        };
        Some(value)
    }
}

/// Binary outcome of a credit evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Rejected => "rejected",
        }
    }
}

/// Result of one evaluation: the model probability, the cutoff it was compared with and the
/// resulting verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub applicant: String,
    pub loan_percent_income: f64,
    pub default_probability: f64,
    pub threshold: f64,
    pub verdict: Verdict,
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        self.verdict == Verdict::Approved
    }
}
