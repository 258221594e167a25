//! Error types for the nutrition calculator

use thiserror::Error;

/// Calculation error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// A person attribute, formula identifier or option failed validation
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// A dispatch or projection lookup had no entry
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CalcError {
    /// Build an `InvalidArgument` error for the given field
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        CalcError::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Name of the offending field, if this is a validation error
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidArgument { field, .. } => Some(field),
            CalcError::NotFound(_) => None,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CalcError::InvalidArgument { .. })
    }
}

/// Result alias used across the crate
pub type CalcResult<T> = Result<T, CalcError>;
