//! Session state and the authorization gate consumed by protected operations.

use std::sync::Arc;

use admissions_core::{AppError, AppResult};
use admissions_domain::{User, UserRole};

use crate::storage::{CURRENT_USER_KEY, KeyValueStore};

/// Single source of truth for "who is logged in" and "what may they do".
///
/// Holds a value copy of the logged-in user in the session-scoped store;
/// later mutations of the underlying user record are not reflected into
/// an existing session value.
#[derive(Clone)]
pub struct SessionGate {
    session: Arc<dyn KeyValueStore>,
}

impl SessionGate {
    /// Creates a gate over a session-scoped store.
    #[must_use]
    pub fn new(session: Arc<dyn KeyValueStore>) -> Self {
        Self { session }
    }

    /// Returns the logged-in user, or `None` when the session pointer is
    /// absent or unparsable.
    pub async fn current_user(&self) -> AppResult<Option<User>> {
        let Some(value) = self.session.get(CURRENT_USER_KEY).await? else {
            return Ok(None);
        };

        Ok(serde_json::from_value(value).ok())
    }

    /// Writes or clears the session pointer.
    pub async fn set_current_user(&self, user: Option<&User>) -> AppResult<()> {
        match user {
            Some(user) => {
                let value = serde_json::to_value(user).map_err(|error| {
                    AppError::Internal(format!("failed to serialize session user: {error}"))
                })?;
                self.session.set(CURRENT_USER_KEY, value).await
            }
            None => self.session.remove(CURRENT_USER_KEY).await,
        }
    }

    /// Clears the session pointer.
    pub async fn logout(&self) -> AppResult<()> {
        self.session.remove(CURRENT_USER_KEY).await
    }

    /// Returns true iff a user is present with exactly the required role.
    #[must_use]
    pub fn is_authorized(user: Option<&User>, required: UserRole) -> bool {
        user.is_some_and(|user| user.role() == required)
    }

    /// Resolves the current user and returns it only when it holds the
    /// required role. Admin-only operations re-derive the acting user here
    /// instead of trusting a caller-supplied role.
    pub async fn authorized_user(&self, required: UserRole) -> AppResult<Option<User>> {
        let user = self.current_user().await?;

        if Self::is_authorized(user.as_ref(), required) {
            Ok(user)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use tokio::sync::Mutex;

    use admissions_core::{AppResult, NonEmptyString};
    use admissions_domain::{EmailAddress, User, UserId, UserRole};

    use crate::storage::{CURRENT_USER_KEY, KeyValueStore};

    use super::SessionGate;

    #[derive(Default)]
    struct FakeStore {
        entries: Mutex<HashMap<String, Value>>,
    }

    #[async_trait]
    impl KeyValueStore for FakeStore {
        async fn get(&self, key: &str) -> AppResult<Option<Value>> {
            Ok(self.entries.lock().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: Value) -> AppResult<()> {
            self.entries.lock().await.insert(key.to_owned(), value);
            Ok(())
        }

        async fn remove(&self, key: &str) -> AppResult<()> {
            self.entries.lock().await.remove(key);
            Ok(())
        }
    }

    fn applicant() -> User {
        User::new(
            UserId::from_string("user-1"),
            NonEmptyString::new("Jane Doe").unwrap_or_else(|_| unreachable!()),
            EmailAddress::new("jane@example.com").unwrap_or_else(|_| unreachable!()),
            NonEmptyString::new("secret").unwrap_or_else(|_| unreachable!()),
            NonEmptyString::new("5551234").unwrap_or_else(|_| unreachable!()),
            UserRole::Applicant,
        )
    }

    #[tokio::test]
    async fn empty_session_has_no_current_user() {
        let gate = SessionGate::new(Arc::new(FakeStore::default()));
        let current = gate.current_user().await;
        assert!(current.is_ok());
        assert!(current.unwrap_or_default().is_none());
    }

    #[tokio::test]
    async fn set_then_get_returns_the_same_user() {
        let gate = SessionGate::new(Arc::new(FakeStore::default()));
        let user = applicant();

        assert!(gate.set_current_user(Some(&user)).await.is_ok());

        let current = gate.current_user().await;
        assert!(current.is_ok());
        assert_eq!(current.unwrap_or_default(), Some(user));
    }

    #[tokio::test]
    async fn logout_clears_the_session_pointer() {
        let gate = SessionGate::new(Arc::new(FakeStore::default()));
        let user = applicant();

        assert!(gate.set_current_user(Some(&user)).await.is_ok());
        assert!(gate.logout().await.is_ok());

        let current = gate.current_user().await;
        assert!(current.is_ok());
        assert!(current.unwrap_or_default().is_none());
    }

    #[tokio::test]
    async fn unparsable_session_value_reads_as_none() {
        let store = Arc::new(FakeStore::default());
        let set = store
            .set(CURRENT_USER_KEY, json!({"unexpected": true}))
            .await;
        assert!(set.is_ok());

        let gate = SessionGate::new(store);
        let current = gate.current_user().await;
        assert!(current.is_ok());
        assert!(current.unwrap_or_default().is_none());
    }

    #[tokio::test]
    async fn authorization_requires_exact_role() {
        let user = applicant();
        assert!(SessionGate::is_authorized(Some(&user), UserRole::Applicant));
        assert!(!SessionGate::is_authorized(Some(&user), UserRole::Admin));
        assert!(!SessionGate::is_authorized(None, UserRole::Admin));
    }

    #[tokio::test]
    async fn authorized_user_filters_by_role() {
        let gate = SessionGate::new(Arc::new(FakeStore::default()));
        let user = applicant();
        assert!(gate.set_current_user(Some(&user)).await.is_ok());

        let as_applicant = gate.authorized_user(UserRole::Applicant).await;
        assert!(as_applicant.is_ok());
        assert!(as_applicant.unwrap_or_default().is_some());

        let as_admin = gate.authorized_user(UserRole::Admin).await;
        assert!(as_admin.is_ok());
        assert!(as_admin.unwrap_or_default().is_none());
    }
}
