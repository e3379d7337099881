//! Validation shared by names that end up as single path segments

use crate::errors::DomainError;

/// Validate that `value` can be joined onto a directory as exactly one segment
pub(crate) fn validate(kind: &'static str, value: String) -> Result<String, DomainError> {
    if value.is_empty() {
        return Err(DomainError::invalid_name(kind, value, "must not be empty"));
    }
    if value == "." || value == ".." {
        return Err(DomainError::invalid_name(
            kind,
            value,
            "must not be a relative directory reference",
        ));
    }
    if value.contains(['/', '\\']) {
        return Err(DomainError::invalid_name(
            kind,
            value,
            "must not contain a path separator",
        ));
    }
    if value.contains('\0') {
        return Err(DomainError::invalid_name(
            kind,
            value,
            "must not contain a NUL byte",
        ));
    }
    Ok(value)
}
