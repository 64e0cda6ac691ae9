//! Common validation utilities.

use validator::{ValidateUrl, ValidationError};

/// Validates that a string is an absolute `http` or `https` URL.
///
/// Empty strings are rejected: a disabled URL is expressed as `null`.
pub fn validate_absolute_url(value: &str) -> Result<(), ValidationError> {
    let lower = value.to_ascii_lowercase();
    let has_web_scheme = lower.starts_with("http://") || lower.starts_with("https://");

    if has_web_scheme && value.validate_url() {
        Ok(())
    } else {
        let mut err = ValidationError::new("absolute_url");
        err.message = Some("Must be an absolute http(s) URL or null".into());
        Err(err)
    }
}

/// Validates that a string contains at least one non-whitespace character.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be empty".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates an application package identifier such as `com.tencent.ig`.
///
/// Accepts ASCII letters, digits, `.`, `_` and `-`, at most 255 characters.
pub fn validate_package_id(value: &str) -> Result<(), ValidationError> {
    let valid = !value.is_empty()
        && value.len() <= 255
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("package_id");
        err.message = Some("Package identifier may only contain letters, digits, '.', '_' and '-'".into());
        Err(err)
    }
}
