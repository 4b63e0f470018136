//! Account directory service: registration, credential check, session binding.

use std::sync::Arc;

use admissions_core::{AppError, AppResult, NonEmptyString};
use admissions_domain::{EmailAddress, User, UserId, UserRole};

use crate::session_gate::SessionGate;
use crate::storage::{KeyValueStore, USERS_KEY, read_collection, write_collection};

const SEED_ADMIN_ID: &str = "admin-1";
const SEED_ADMIN_NAME: &str = "Admin User";
const SEED_ADMIN_EMAIL: &str = "admin@cgu.edu";
const SEED_ADMIN_PASSWORD: &str = "admin123";
const SEED_ADMIN_PHONE: &str = "1234567890";

/// Candidate account details supplied at registration.
///
/// The role is never part of the input; every registered account is an
/// applicant.
pub struct RegisterParams {
    /// Display name for the new account.
    pub name: String,
    /// Email address, unique across the directory.
    pub email: String,
    /// Opaque password string compared exactly at login.
    pub password: String,
    /// Contact phone number.
    pub phone: String,
}

/// Application service owning the user registry.
#[derive(Clone)]
pub struct AccountService {
    durable: Arc<dyn KeyValueStore>,
    sessions: SessionGate,
}

impl AccountService {
    /// Creates a new account service over a durable store and session gate.
    #[must_use]
    pub fn new(durable: Arc<dyn KeyValueStore>, sessions: SessionGate) -> Self {
        Self { durable, sessions }
    }

    /// Seeds the directory with the default admin when it is empty.
    ///
    /// Idempotent: never re-seeds once any user exists.
    pub async fn bootstrap(&self) -> AppResult<()> {
        let users: Vec<User> = read_collection(self.durable.as_ref(), USERS_KEY).await?;

        if !users.is_empty() {
            return Ok(());
        }

        let admin = User::new(
            UserId::from_string(SEED_ADMIN_ID),
            NonEmptyString::new(SEED_ADMIN_NAME)?,
            EmailAddress::new(SEED_ADMIN_EMAIL)?,
            NonEmptyString::new(SEED_ADMIN_PASSWORD)?,
            NonEmptyString::new(SEED_ADMIN_PHONE)?,
            UserRole::Admin,
        );

        write_collection(self.durable.as_ref(), USERS_KEY, &[admin]).await
    }

    /// Registers a new applicant account.
    ///
    /// Fails with [`AppError::Conflict`] when an existing user already has
    /// the same email; matching is case-sensitive and exact.
    pub async fn register(&self, params: RegisterParams) -> AppResult<User> {
        let name = NonEmptyString::new(params.name)?;
        let email = EmailAddress::new(params.email)?;
        let password = NonEmptyString::new(params.password)?;
        let phone = NonEmptyString::new(params.phone)?;

        let mut users: Vec<User> = read_collection(self.durable.as_ref(), USERS_KEY).await?;

        if users.iter().any(|user| user.email() == &email) {
            return Err(AppError::Conflict(
                "an account with this email already exists".to_owned(),
            ));
        }

        let user = User::new(
            UserId::generate(),
            name,
            email,
            password,
            phone,
            UserRole::Applicant,
        );

        users.push(user.clone());
        write_collection(self.durable.as_ref(), USERS_KEY, &users).await?;

        Ok(user)
    }

    /// Authenticates by exact email and password match.
    ///
    /// Returns `None` for any failure; there is no lockout or rate limiting.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let users: Vec<User> = read_collection(self.durable.as_ref(), USERS_KEY).await?;

        Ok(users
            .into_iter()
            .find(|user| user.email().as_str() == email && user.password() == password))
    }

    /// Returns the logged-in user from the session, if any.
    pub async fn current_user(&self) -> AppResult<Option<User>> {
        self.sessions.current_user().await
    }

    /// Writes or clears the session pointer.
    pub async fn set_current_user(&self, user: Option<&User>) -> AppResult<()> {
        self.sessions.set_current_user(user).await
    }

    /// Clears the session pointer.
    pub async fn logout(&self) -> AppResult<()> {
        self.sessions.logout().await
    }

    /// Returns every user in the directory.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        read_collection(self.durable.as_ref(), USERS_KEY).await
    }

    /// Returns the session gate for use by other services.
    #[must_use]
    pub fn sessions(&self) -> &SessionGate {
        &self.sessions
    }
}
