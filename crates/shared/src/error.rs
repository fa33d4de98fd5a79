use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidArgument,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountError {
    /// Raised by the engine itself; the only engine-level failure is a zero step.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Raw front-end input that could not be turned into a request.
    #[error("{0}")]
    Validation(String),
}

impl CountError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Validation(_) => ErrorCode::Validation,
        }
    }
}

/// Serializable error envelope for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&CountError> for ErrorReport {
    fn from(value: &CountError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_report_carries_code_and_message() {
        let err = CountError::invalid_argument("step cannot be zero");
        let report = ErrorReport::from(&err);
        assert_eq!(report.code, ErrorCode::InvalidArgument);
        assert_eq!(report.message, "invalid argument: step cannot be zero");

        let json = serde_json::to_value(&report).expect("json");
        assert_eq!(json["code"], "invalid_argument");
    }
}
