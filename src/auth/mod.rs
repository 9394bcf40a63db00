pub mod service;
pub mod user;
pub mod verifier;

use thiserror::Error;

use crate::storage::StorageError;

pub use service::{AuthService, SESSION_KEY};
pub use user::{Role, User};
pub use verifier::{CredentialVerifier, DemoVerifier};

#[cfg(test)]
pub use verifier::MockCredentialVerifier;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}
