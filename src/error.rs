//! Error types.
//!
//! Library code returns typed errors (`LoadError`, `ConfigError`). At the process
//! boundary everything is folded into `AppError`, which carries the exit code:
//!
//! - `2`: usage, configuration, or export-path problems
//! - `3`: source data that fails validation
//! - `4`: unavailable source or terminal failures

use thiserror::Error;

/// Failure to produce the sales dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// Backing store unreachable, timed out, or missing the expected schema.
    #[error("sales source unavailable: {0}")]
    SourceUnavailable(String),

    /// A row's date could not be parsed; the whole load is rejected.
    #[error("malformed date '{value}' in row {row}")]
    MalformedDate { row: usize, value: String },

    /// A row violates a numeric invariant; the whole load is rejected.
    #[error("invalid record in row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
}

/// Missing or unreadable database configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(String),

    #[error("invalid secrets file: {0}")]
    Secrets(String),
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        let code = match err {
            LoadError::SourceUnavailable(_) => 4,
            LoadError::MalformedDate { .. } | LoadError::InvalidRecord { .. } => 3,
        };
        AppError::new(code, format!("Failed to load sales data: {err}"))
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(2, format!("Configuration error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_errors_map_to_exit_codes() {
        let unavailable: AppError = LoadError::SourceUnavailable("timeout".into()).into();
        assert_eq!(unavailable.exit_code(), 4);

        let malformed: AppError = LoadError::MalformedDate {
            row: 3,
            value: "soon".into(),
        }
        .into();
        assert_eq!(malformed.exit_code(), 3);
        assert!(malformed.to_string().contains("row 3"));
    }

    #[test]
    fn config_errors_are_usage_errors() {
        let err: AppError = ConfigError::MissingVar("SUPPLIER_DB_HOST".into()).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("SUPPLIER_DB_HOST"));
    }
}
