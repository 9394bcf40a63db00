use std::sync::Arc;

use crate::auth::User;
use crate::storage::StoreConfig;
use crate::store::BookingStore;

/// A signed-in user's working state. The store lives exactly as long as the
/// session: it is built by [`Session::start`] and emptied by [`Session::end`].
pub struct Session {
    user: User,
    store: Arc<BookingStore>,
}

impl Session {
    pub fn start(user: User, settings: StoreConfig) -> Self {
        tracing::info!("Session started for {}", user.email);
        let store = Arc::new(BookingStore::new(Some(user.clone()), settings));
        Self { user, store }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn store(&self) -> Arc<BookingStore> {
        Arc::clone(&self.store)
    }

    pub async fn end(self) {
        self.store.clear().await;
        tracing::info!("Session ended for {}", self.user.email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::booking::NewAppointment;
    use chrono::NaiveDate;

    fn new_appointment() -> NewAppointment {
        NewAppointment {
            title: "Intro call".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            start_time: "09:00".parse().unwrap(),
            end_time: "10:00".parse().unwrap(),
            category: None,
            priority: None,
        }
    }

    #[tokio::test]
    async fn store_acts_as_session_user() {
        let user = User::new("u1", "jane@example.com", Role::User);
        let session = Session::start(user.clone(), StoreConfig::immediate());

        let apt = session.store().create_appointment(new_appointment()).await.unwrap();

        assert_eq!(session.user(), &user);
        assert_eq!(apt.user_id, "u1");
    }

    #[tokio::test]
    async fn ending_session_clears_shared_store() {
        let session = Session::start(
            User::new("u1", "jane@example.com", Role::User),
            StoreConfig::immediate(),
        );
        let handle = session.store();
        handle.create_appointment(new_appointment()).await.unwrap();

        session.end().await;

        assert!(handle.appointments().await.is_empty());
    }
}
