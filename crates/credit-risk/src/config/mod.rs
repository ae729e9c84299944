use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::credit::EvaluationConfig;

pub const DEFAULT_MODEL_PATH: &str = "models/credit_risk_model.json";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the decision service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub credit: CreditConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let credit = CreditConfig::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            credit,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the model artifact and the decision policy constants.
#[derive(Debug, Clone)]
pub struct CreditConfig {
    pub model_path: PathBuf,
    pub threshold: f64,
    pub loan_grade: String,
}

impl CreditConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = EvaluationConfig::default();

        let model_path = env::var("CREDIT_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH));

        let threshold = match env::var("CREDIT_DECISION_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw)?,
            Err(_) => defaults.threshold,
        };

        let loan_grade = match env::var("CREDIT_LOAN_GRADE") {
            Ok(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyLoanGrade),
            Ok(raw) => raw.trim().to_string(),
            Err(_) => defaults.loan_grade,
        };

        Ok(Self {
            model_path,
            threshold,
            loan_grade,
        })
    }

    pub fn evaluation_config(&self) -> EvaluationConfig {
        EvaluationConfig {
            threshold: self.threshold,
            loan_grade: self.loan_grade.clone(),
        }
    }
}

fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidThreshold(raw.to_string()))?;
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidThreshold(raw.to_string()))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidThreshold(String),
    EmptyLoanGrade,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidThreshold(raw) => write!(
                f,
                "CREDIT_DECISION_THRESHOLD must be a probability between 0 and 1 (found '{raw}')"
            ),
            ConfigError::EmptyLoanGrade => write!(f, "CREDIT_LOAN_GRADE must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidThreshold(_)
            | ConfigError::EmptyLoanGrade => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("CREDIT_MODEL_PATH");
        env::remove_var("CREDIT_DECISION_THRESHOLD");
        env::remove_var("CREDIT_LOAN_GRADE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.credit.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
        assert_eq!(config.credit.threshold, 0.37);
        assert_eq!(config.credit.loan_grade, "C");
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn policy_constants_are_overridable() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CREDIT_DECISION_THRESHOLD", "0.5");
        env::set_var("CREDIT_LOAN_GRADE", "B");
        env::set_var("CREDIT_MODEL_PATH", "/srv/models/logit.json");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        let evaluation = config.credit.evaluation_config();
        assert_eq!(evaluation.threshold, 0.5);
        assert_eq!(evaluation.loan_grade, "B");
        assert_eq!(
            config.credit.model_path,
            PathBuf::from("/srv/models/logit.json")
        );
    }

    #[test]
    fn rejects_threshold_outside_probability_range() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CREDIT_DECISION_THRESHOLD", "1.5");
        let result = AppConfig::load();
        reset_env();

        assert!(matches!(result, Err(ConfigError::InvalidThreshold(raw)) if raw == "1.5"));
    }

    #[test]
    fn rejects_blank_loan_grade() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CREDIT_LOAN_GRADE", "  ");
        let result = AppConfig::load();
        reset_env();

        assert!(matches!(result, Err(ConfigError::EmptyLoanGrade)));
    }
}
