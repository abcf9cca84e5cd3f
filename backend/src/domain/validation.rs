//! Field validators shared by the domain constructors.
//!
//! Every validator returns the accepted value or a [`ValidationError`]
//! naming the offending field. Aggregate drafts collect failures into
//! [`ValidationErrors`] so clients see every problem in one response. The
//! database schema mirrors these rules as `CHECK` constraints.

use super::Error;

/// Minimum number of characters recipe instructions must contain once trimmed.
pub const INSTRUCTIONS_MIN_CHARS: usize = 50;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The field was missing, empty, or whitespace only.
    #[error("{field} is required")]
    RequiredField { field: &'static str },
    /// The field was shorter than the permitted minimum once trimmed.
    #[error("{field} must be at least {min} characters")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::RequiredField { field } | Self::TooShort { field, .. } => field,
        }
    }
}

fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredField { field });
    }
    Ok(())
}

/// Validate a username, returning it trimmed.
pub fn validate_username(value: &str) -> Result<String, ValidationError> {
    require_non_blank("username", value)?;
    Ok(value.trim().to_owned())
}

/// Validate a plaintext password supplied at signup.
///
/// Whitespace is significant in passwords, so only the empty string fails.
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::RequiredField { field: "password" });
    }
    Ok(())
}

/// Validate a stored password digest.
pub fn validate_password_digest(value: &str) -> Result<(), ValidationError> {
    require_non_blank("password_digest", value)
}

/// Validate a recipe title.
pub fn validate_title(value: String) -> Result<String, ValidationError> {
    require_non_blank("title", &value)?;
    Ok(value)
}

/// Validate recipe instructions against [`INSTRUCTIONS_MIN_CHARS`].
///
/// Length is counted in characters after trimming; the stored value keeps
/// the caller's original whitespace.
pub fn validate_instructions(value: String) -> Result<String, ValidationError> {
    let actual = value.trim().chars().count();
    if actual < INSTRUCTIONS_MIN_CHARS {
        return Err(ValidationError::TooShort {
            field: "instructions",
            min: INSTRUCTIONS_MIN_CHARS,
            actual,
        });
    }
    Ok(value)
}

/// Failures collected while validating an aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Start an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the failure from `result`, returning the accepted value if any.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.0.push(error);
                None
            }
        }
    }

    /// Whether no failures have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded failures in the order they were found.
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        let reasons = errors.0.iter().map(ToString::to_string).collect();
        Error::invalid_request("validation failed").with_reasons(reasons)
    }
}
