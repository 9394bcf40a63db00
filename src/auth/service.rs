use crate::storage::LocalStorage;

use super::{AuthError, CredentialVerifier, User};

/// Storage key of the persisted `{id, email, role}` session record.
pub const SESSION_KEY: &str = "appointmentUser";

pub struct AuthService<V: CredentialVerifier> {
    verifier: V,
    storage: LocalStorage,
    current: Option<User>,
}

impl<V: CredentialVerifier> AuthService<V> {
    pub fn new(verifier: V, storage: LocalStorage) -> Self {
        Self {
            verifier,
            storage,
            current: None,
        }
    }

    /// Reads the persisted session record. A missing or unreadable record
    /// leaves the service signed out.
    pub fn restore(&mut self) -> Option<&User> {
        self.current = match self.storage.load_json::<User>(SESSION_KEY) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Ignoring unreadable session record: {}", e);
                None
            }
        };

        if let Some(user) = &self.current {
            tracing::info!("Restored session for {}", user.email);
        }
        self.current.as_ref()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.verifier.verify(email, password).await.inspect_err(|e| {
            tracing::warn!("Login failed for {}: {}", email, e);
        })?;
        self.begin(user)
    }

    pub async fn signup(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.verifier.register(email, password).await.inspect_err(|e| {
            tracing::warn!("Signup failed for {}: {}", email, e);
        })?;
        self.begin(user)
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.storage.remove_item(SESSION_KEY)?;
        if let Some(user) = self.current.take() {
            tracing::info!("{} logged out", user.email);
        }
        Ok(())
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(User::is_admin)
    }

    fn begin(&mut self, user: User) -> Result<User, AuthError> {
        self.storage.save_json(SESSION_KEY, &user)?;
        tracing::info!("{} signed in as {:?}", user.email, user.role);
        self.current = Some(user.clone());
        Ok(user)
    }
}
