use async_trait::async_trait;
use uuid::Uuid;

use super::{AuthError, Role, User};

/// Checks credentials and issues the user record for a session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn register(&self, email: &str, password: &str) -> Result<User, AuthError>;
}

/// Placeholder verifier for local demos. It performs no credential check:
/// any non-empty email/password pair is accepted and the role is admin when
/// the email contains "admin".
#[derive(Debug, Default, Clone)]
pub struct DemoVerifier;

impl DemoVerifier {
    pub fn new() -> Self {
        Self
    }

    fn issue_id() -> String {
        Uuid::new_v4().simple().to_string()[..7].to_string()
    }

    fn check_present(email: &str, password: &str) -> Result<(), AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialVerifier for DemoVerifier {
    async fn verify(&self, email: &str, password: &str) -> Result<User, AuthError> {
        Self::check_present(email, password)?;

        let role = if email.contains("admin") {
            Role::Admin
        } else {
            Role::User
        };

        Ok(User::new(Self::issue_id(), email.trim(), role))
    }

    async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        Self::check_present(email, password)?;
        Ok(User::new(Self::issue_id(), email.trim(), Role::User))
    }
}
