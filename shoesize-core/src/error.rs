//! Conversion errors
//!
//! Every failure is a caller or input error. Nothing here is retryable, so
//! errors carry a stable code and, where useful, a hint for fixing the call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_UNIT: &str = "INVALID_UNIT";
    pub const INVALID_CATEGORY: &str = "INVALID_CATEGORY";
    pub const NON_FINITE: &str = "NON_FINITE";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const INVALID_RANGE: &str = "INVALID_RANGE";
}

/// Error type for size conversions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizeError {
    #[error("unknown size unit: '{0}'")]
    InvalidUnit(String),

    #[error("unknown category: '{0}'")]
    InvalidCategory(String),

    #[error("value is not a finite number: {value}")]
    NonFinite { value: f64 },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),
}

impl SizeError {
    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            SizeError::InvalidUnit(_) => codes::INVALID_UNIT,
            SizeError::InvalidCategory(_) => codes::INVALID_CATEGORY,
            SizeError::NonFinite { .. } => codes::NON_FINITE,
            SizeError::Parse(_) => codes::PARSE_ERROR,
            SizeError::InvalidRange(_) => codes::INVALID_RANGE,
        }
    }

    /// Suggestion for fixing the call, if there is one
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            SizeError::InvalidUnit(_) => Some("Use one of: eu, us, uk, cm, in"),
            SizeError::InvalidCategory(_) => Some("Use one of: men, women, kids"),
            SizeError::NonFinite { .. } => Some("Pass a finite number"),
            SizeError::Parse(_) => Some("Write sizes as \"<number> <unit>\", e.g. \"42 eu\""),
            SizeError::InvalidRange(_) => None,
        }
    }

    /// Structured form for serialization at process boundaries
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code().to_string(),
            message: self.to_string(),
            suggestion: self.suggestion().map(str::to_string),
        }
    }
}

/// Serializable error payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<SizeError> for ErrorReport {
    fn from(err: SizeError) -> Self {
        err.report()
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(SizeError::InvalidUnit("mm".into()).code(), codes::INVALID_UNIT);
        assert_eq!(SizeError::InvalidCategory("dogs".into()).code(), codes::INVALID_CATEGORY);
        assert_eq!(SizeError::NonFinite { value: f64::NAN }.code(), codes::NON_FINITE);
        assert_eq!(SizeError::Parse("x".into()).code(), codes::PARSE_ERROR);
        assert_eq!(SizeError::InvalidRange("x".into()).code(), codes::INVALID_RANGE);
    }

    #[test]
    fn test_report_display() {
        let report = SizeError::InvalidUnit("mm".into()).report();
        assert_eq!(report.code, "INVALID_UNIT");
        assert_eq!(
            report.to_string(),
            "[INVALID_UNIT] unknown size unit: 'mm' (suggestion: Use one of: eu, us, uk, cm, in)"
        );
    }

    #[test]
    fn test_report_skips_missing_suggestion() {
        let report: ErrorReport = SizeError::InvalidRange("end before start".into()).into();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("suggestion").is_none());
        assert_eq!(json["message"], "invalid range: end before start");
    }
}
