use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::super::domain::{ApplicantRecord, FeatureKind, FeatureValue};
use super::{ScoringCapability, ScoringError};

/// Standardised numeric input: contributes `weight * (x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericTerm {
    pub feature: String,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
    pub weight: f64,
}

fn unit_scale() -> f64 {
    1.0
}

/// One-hot encoded input: contributes the weight of the observed category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalTerm {
    pub feature: String,
    pub weights: BTreeMap<String, f64>,
    /// Unseen categories contribute nothing instead of failing the call.
    #[serde(default)]
    pub ignore_unknown: bool,
}

/// Logistic regression classifier serialised as a JSON artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub intercept: f64,
    #[serde(default)]
    pub numeric: Vec<NumericTerm>,
    #[serde(default)]
    pub categorical: Vec<CategoricalTerm>,
}

impl LogisticModel {
    /// Read and validate the artifact at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScoringError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| ScoringError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_slice(&raw).map_err(|source| ScoringError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate()?;

        info!(
            model = %model.name,
            version = model.version.as_deref().unwrap_or("unversioned"),
            features = model.numeric.len() + model.categorical.len(),
            "model artifact loaded"
        );
        Ok(model)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ScoringError> {
        let model: Self = serde_json::from_str(raw)
            .map_err(|err| ScoringError::InvalidArtifact(err.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.name.trim().is_empty() {
            return Err(invalid("model name must not be empty"));
        }
        if !self.intercept.is_finite() {
            return Err(invalid("intercept must be finite"));
        }
        if self.numeric.is_empty() && self.categorical.is_empty() {
            return Err(invalid("model declares no features"));
        }

        let mut seen = BTreeSet::new();
        for term in &self.numeric {
            expect_kind(&term.feature, FeatureKind::Numeric)?;
            if !seen.insert(term.feature.as_str()) {
                return Err(invalid(format!("feature '{}' declared twice", term.feature)));
            }
            if !term.mean.is_finite() || !term.weight.is_finite() {
                return Err(invalid(format!(
                    "feature '{}' has a non-finite mean or weight",
                    term.feature
                )));
            }
            if !term.scale.is_finite() || term.scale == 0.0 {
                return Err(invalid(format!(
                    "feature '{}' needs a finite, non-zero scale",
                    term.feature
                )));
            }
        }

        for term in &self.categorical {
            expect_kind(&term.feature, FeatureKind::Categorical)?;
            if !seen.insert(term.feature.as_str()) {
                return Err(invalid(format!("feature '{}' declared twice", term.feature)));
            }
            if term.weights.is_empty() {
                return Err(invalid(format!(
                    "feature '{}' declares no categories",
                    term.feature
                )));
            }
            if let Some((category, _)) = term.weights.iter().find(|(_, w)| !w.is_finite()) {
                return Err(invalid(format!(
                    "feature '{}' category '{category}' has a non-finite weight",
                    term.feature
                )));
            }
        }

        Ok(())
    }

    /// Log-odds of default for the record.
    pub fn decision_function(&self, record: &ApplicantRecord) -> Result<f64, ScoringError> {
        let mut z = self.intercept;

        for term in &self.numeric {
            let value = match record.feature(&term.feature) {
                Some(FeatureValue::Numeric(value)) => value,
                _ => return Err(mismatch(&term.feature, "expected a numeric value")),
            };
            if !value.is_finite() {
                return Err(mismatch(&term.feature, "value is not finite"));
            }
            z += term.weight * (value - term.mean) / term.scale;
        }

        for term in &self.categorical {
            let category = match record.feature(&term.feature) {
                Some(FeatureValue::Categorical(category)) => category,
                _ => return Err(mismatch(&term.feature, "expected a categorical value")),
            };
            match term.weights.get(category) {
                Some(weight) => z += weight,
                None if term.ignore_unknown => {}
                None => {
                    return Err(mismatch(
                        &term.feature,
                        &format!("unknown category '{category}'"),
                    ))
                }
            }
        }

        Ok(z)
    }
}

impl ScoringCapability for LogisticModel {
    fn score(&self, record: &ApplicantRecord) -> Result<f64, ScoringError> {
        let z = self.decision_function(record)?;
        Ok(logistic(z))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn logistic(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn expect_kind(feature: &str, expected: FeatureKind) -> Result<(), ScoringError> {
    match ApplicantRecord::feature_kind(feature) {
        Some(kind) if kind == expected => Ok(()),
        Some(kind) => Err(invalid(format!(
            "feature '{feature}' is {kind:?} in the applicant record, not {expected:?}"
        ))),
        None => Err(invalid(format!(
            "feature '{feature}' is not part of the applicant record"
        ))),
    }
}

fn invalid(message: impl Into<String>) -> ScoringError {
    ScoringError::InvalidArtifact(message.into())
}

fn mismatch(feature: &str, detail: &str) -> ScoringError {
    ScoringError::SchemaMismatch(format!("{feature}: {detail}"))
}
