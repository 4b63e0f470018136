//! User account types and validation rules.

use admissions_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier for a user record.
///
/// Freshly issued identifiers carry a `user-` prefix; the seeded
/// administrator keeps the fixed identifier `admin-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Issues a fresh unique user identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("user-{}", Uuid::new_v4()))
    }

    /// Wraps an existing identifier value.
    #[must_use]
    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the underlying identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated email address.
///
/// Performs structural validation only: non-empty, exactly one `@`,
/// non-empty local part, domain with at least one `.`. Case is preserved;
/// directory lookups match emails case-sensitively and exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let parts: Vec<&str> = trimmed.splitn(2, '@').collect();
        if parts.len() != 2 {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        let local = parts[0];
        let domain = parts[1];

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Role assigned to a user account at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Reviews submitted applications and decides on them.
    Admin,
    /// Submits one intended application and tracks its status.
    Applicant,
}

impl UserRole {
    /// Returns the storage string for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Applicant => "APPLICANT",
        }
    }

    /// Parses a storage string into a role.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "ADMIN" => Ok(Self::Admin),
            "APPLICANT" => Ok(Self::Applicant),
            _ => Err(AppError::Validation(format!("unknown user role '{value}'"))),
        }
    }
}

/// A registered user account.
///
/// The identifier and role are immutable once assigned; no exposed
/// operation updates or deletes an account. The password is an opaque
/// string compared exactly at login (hashing is out of scope for this
/// service).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    password: String,
    phone: String,
    role: UserRole,
}

impl User {
    /// Creates a user record from validated parts.
    pub fn new(
        id: UserId,
        name: NonEmptyString,
        email: EmailAddress,
        password: NonEmptyString,
        phone: NonEmptyString,
        role: UserRole,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email,
            password: password.into(),
            phone: phone.into(),
            role,
        }
    }

    /// Returns the unique identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the account email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the stored password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Returns the contact phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Returns the role assigned at creation.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_is_accepted() {
        let email = EmailAddress::new("applicant@example.com");
        assert!(email.is_ok());
    }

    #[test]
    fn email_case_is_preserved() {
        let email = EmailAddress::new("Applicant@Example.COM");
        assert!(email.is_ok());
        assert_eq!(
            email.unwrap_or_else(|_| unreachable!()).as_str(),
            "Applicant@Example.COM"
        );
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(EmailAddress::new("noatsign").is_err());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(EmailAddress::new("user@nodot").is_err());
    }

    #[test]
    fn empty_email_is_rejected() {
        assert!(EmailAddress::new("").is_err());
    }

    #[test]
    fn role_round_trips_through_storage_string() {
        let parsed = UserRole::parse(UserRole::Admin.as_str());
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap_or(UserRole::Applicant), UserRole::Admin);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(UserRole::parse("SUPERUSER").is_err());
    }

    #[test]
    fn generated_user_ids_are_unique() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn user_serializes_with_original_field_names() {
        let user = sample_user();
        let value = serde_json::to_value(&user).unwrap_or_default();
        assert_eq!(value["id"], "user-1");
        assert_eq!(value["role"], "APPLICANT");
        assert_eq!(value["email"], "jane@example.com");
    }

    fn sample_user() -> User {
        User::new(
            UserId::from_string("user-1"),
            admissions_core::NonEmptyString::new("Jane Doe").unwrap_or_else(|_| unreachable!()),
            EmailAddress::new("jane@example.com").unwrap_or_else(|_| unreachable!()),
            admissions_core::NonEmptyString::new("secret").unwrap_or_else(|_| unreachable!()),
            admissions_core::NonEmptyString::new("5551234").unwrap_or_else(|_| unreachable!()),
            UserRole::Applicant,
        )
    }
}
