//! Password material handled by the account use-cases.
//!
//! Plaintext passwords are zeroised on drop and never leave the domain
//! except to be hashed or verified. Digests have no serialisation and no
//! `Display`, and their `Debug` output is redacted; only the crate's own
//! persistence and hashing adapters can read the stored string.

use std::fmt;

use zeroize::Zeroizing;

use super::User;
use super::validation::{ValidationError, validate_password, validate_password_digest};

/// Plaintext password supplied by a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and wrap a plaintext password.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        validate_password(raw)?;
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Plaintext bytes for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// One-way, salted digest of a password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest produced by a hasher or read from storage.
    pub fn new(digest: impl Into<String>) -> Result<Self, ValidationError> {
        let digest = digest.into();
        validate_password_digest(&digest)?;
        Ok(Self(digest))
    }

    pub(crate) fn as_stored_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// A user's public profile paired with their stored digest.
///
/// Only returned by credential lookups used for login; handlers receive the
/// [`User`] half once verification succeeds.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    user: User,
    digest: PasswordDigest,
}

impl UserCredentials {
    /// Pair a profile with its digest.
    pub fn new(user: User, digest: PasswordDigest) -> Self {
        Self { user, digest }
    }

    /// Public profile.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Stored digest to verify a login attempt against.
    pub fn digest(&self) -> &PasswordDigest {
        &self.digest
    }

    /// Discard the digest and keep the profile.
    pub fn into_user(self) -> User {
        self.user
    }
}
