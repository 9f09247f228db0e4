use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single violated input constraint, phrased for the end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

fn join_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Validation failed: {}", join_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    Overflow { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MortgageError {
    /// The collected validation errors, empty for every other kind.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            MortgageError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoanParameters;

    #[test]
    fn test_malformed_json_is_a_serialization_error() {
        let err: MortgageError = serde_json::from_str::<LoanParameters>(r#"{"principal": "#)
            .unwrap_err()
            .into();
        assert!(matches!(err, MortgageError::SerializationError(_)));
        assert!(err.to_string().starts_with("Serialization error: "));
        assert!(err.validation_errors().is_empty());
    }

    #[test]
    fn test_validation_message_joins_every_error() {
        let err = MortgageError::Validation(vec![
            ValidationError::new("principal", "Loan amount must be greater than zero"),
            ValidationError::new("term_years", "Loan term must be between 1 and 50 years"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: principal: Loan amount must be greater than zero; \
             term_years: Loan term must be between 1 and 50 years"
        );
        assert_eq!(err.validation_errors().len(), 2);
    }
}
