//! Core error types for the civic-intake workspace.

use thiserror::Error;

/// Errors produced by core type validation.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Validation("invalid request type".to_string());
        assert_eq!(err.to_string(), "validation error: invalid request type");
    }
}
