//! `PasswordHasher` adapter backed by bcrypt.
//!
//! bcrypt is intentionally slow, so both hashing and verification run on
//! tokio's blocking pool. The request's trace id is carried across so log
//! lines emitted from the worker stay correlated.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{CredentialError, PasswordHasher};
use crate::domain::{Password, PasswordDigest, TraceId};

/// bcrypt hasher with a configurable work factor.
///
/// # Examples
/// ```
/// use recipe_backend::outbound::crypto::BcryptPasswordHasher;
///
/// let hasher = BcryptPasswordHasher::new(4);
/// assert_eq!(hasher.cost(), 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher using `cost` rounds (4 to 31).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, tokio::task::JoinError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || match trace_id {
        Some(id) => TraceId::scope_sync(id, work),
        None => work(),
    })
    .await
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialError> {
        let cost = self.cost;
        let password = password.clone();
        let digest = run_blocking(move || bcrypt::hash(password.expose(), cost))
            .await
            .map_err(|err| CredentialError::worker(err.to_string()))?
            .map_err(|err| CredentialError::hashing(err.to_string()))?;

        PasswordDigest::new(digest).map_err(|err| CredentialError::hashing(err.to_string()))
    }

    async fn verify(&self, password: &Password, digest: &PasswordDigest) -> bool {
        let password = password.clone();
        let stored = digest.as_stored_str().to_owned();
        match run_blocking(move || bcrypt::verify(password.expose(), &stored)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(err)) => {
                warn!(error = %err, "stored password digest is malformed");
                false
            }
            Err(err) => {
                warn!(error = %err, "password verification worker failed");
                false
            }
        }
    }
}
