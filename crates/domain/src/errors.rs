//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A name that cannot be used as a single path component
    #[error("Invalid {kind} name '{value}': {reason}")]
    InvalidName {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl DomainError {
    /// Create an invalid name error
    pub fn invalid_name(kind: &'static str, value: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidName {
            kind,
            value: value.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_error_message_is_correct() {
        let err = DomainError::invalid_name("agent", "../x", "must not contain a path separator");
        assert_eq!(
            err.to_string(),
            "Invalid agent name '../x': must not contain a path separator"
        );
    }
}
