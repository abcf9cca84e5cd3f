//! Authentication inputs: login credentials and signup details.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use super::validation::ValidationErrors;
use super::{Password, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use recipe_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ChefHam ", "hashedpass").unwrap();
/// assert_eq!(creds.username().as_ref(), "ChefHam");
/// assert_eq!(creds.password().expose(), "hashedpass");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username).map_err(|_| LoginValidationError::EmptyUsername)?;
        let password = Password::new(password).map_err(|_| LoginValidationError::EmptyPassword)?;
        Ok(Self { username, password })
    }

    /// Trimmed username used for the credential lookup.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated input for creating an account.
///
/// Construction runs every field validator and reports all failures together.
#[derive(Debug, Clone)]
pub struct SignupDetails {
    username: Username,
    password: Password,
    image_url: Option<String>,
    bio: Option<String>,
}

impl SignupDetails {
    /// Validate raw signup inputs. Missing fields are treated as empty.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::SignupDetails;
    ///
    /// let errors = SignupDetails::try_from_parts(None, None, None, None).unwrap_err();
    /// assert_eq!(errors.as_slice().len(), 2);
    /// ```
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
        image_url: Option<String>,
        bio: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let username = errors.check(Username::new(username.unwrap_or_default()));
        let password = errors.check(Password::new(password.unwrap_or_default()));

        match (username, password) {
            (Some(username), Some(password)) => Ok(Self {
                username,
                password,
                image_url,
                bio,
            }),
            _ => Err(errors),
        }
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password to hash.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Optional profile image URL.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Optional biography.
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }
}
