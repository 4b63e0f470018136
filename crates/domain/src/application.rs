//! Admission application types and invariants.

use admissions_core::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::UserId;

/// Opaque unique identifier for an application record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Issues a fresh unique application identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("app-{}", Uuid::new_v4()))
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

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Review status of a submitted application.
///
/// Every application starts under review. Transitions happen only through
/// the admin review operation, which permits any status to any status,
/// including repeating the current one; accepted and rejected are terminal
/// by reviewer convention, not by enforced invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Submitted and awaiting an admin decision.
    UnderReview,
    /// Accepted by an admin.
    Accepted,
    /// Rejected by an admin.
    Rejected,
}

impl ApplicationStatus {
    /// Returns the storage string for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderReview => "UNDER_REVIEW",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Parses a storage string into a status.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "UNDER_REVIEW" => Ok(Self::UnderReview),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(AppError::Validation(format!(
                "unknown application status '{value}'"
            ))),
        }
    }
}

/// One prior qualification in an application's education history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    /// Institution that granted the qualification.
    pub institution: String,
    /// Degree or certificate obtained.
    pub degree: String,
    /// Graduation year as entered by the applicant.
    pub grad_year: String,
    /// Grade or percentage as entered by the applicant.
    pub percentage: String,
}

/// Reference to an uploaded supporting document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Display name of the document.
    pub name: String,
    /// Opaque URL reference to the stored document.
    pub url: String,
}

/// Applicant-supplied content of an application, before submission.
///
/// Identifier, owner, status, and submission time are assigned by the
/// registry; the draft carries everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDraft {
    /// Full legal name of the applicant.
    pub full_name: String,
    /// Contact email entered on the form.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Date of birth as entered by the applicant.
    pub date_of_birth: String,
    /// Programme the applicant is applying to.
    pub program: String,
    /// Prior education history, oldest first. Must contain at least one entry.
    pub previous_education: Vec<EducationEntry>,
    /// Supporting document references. May be empty.
    pub document_urls: Vec<DocumentRef>,
    /// Personal statement free text.
    pub statement: String,
}

impl ApplicationDraft {
    /// Validates the required draft fields.
    pub fn validate(&self) -> AppResult<()> {
        if self.full_name.trim().is_empty() {
            return Err(AppError::Validation("full name is required".to_owned()));
        }

        if self.email.trim().is_empty() {
            return Err(AppError::Validation("email is required".to_owned()));
        }

        if self.program.trim().is_empty() {
            return Err(AppError::Validation("program is required".to_owned()));
        }

        if self.previous_education.is_empty() {
            return Err(AppError::Validation(
                "at least one previous education entry is required".to_owned(),
            ));
        }

        Ok(())
    }
}

/// A submitted admission application.
///
/// Created once by the owning applicant; only the status field ever
/// changes afterwards, and records are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    id: ApplicationId,
    user_id: UserId,
    full_name: String,
    email: String,
    phone: String,
    address: String,
    date_of_birth: String,
    program: String,
    previous_education: Vec<EducationEntry>,
    document_urls: Vec<DocumentRef>,
    statement: String,
    status: ApplicationStatus,
    created_at: DateTime<Utc>,
}

impl Application {
    /// Creates a submitted application from a validated draft.
    ///
    /// Assigns the given identifier and owner, sets the status to
    /// [`ApplicationStatus::UnderReview`], and stamps the creation time.
    pub fn submitted(
        id: ApplicationId,
        owner: UserId,
        draft: ApplicationDraft,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        draft.validate()?;

        Ok(Self {
            id,
            user_id: owner,
            full_name: draft.full_name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            date_of_birth: draft.date_of_birth,
            program: draft.program,
            previous_education: draft.previous_education,
            document_urls: draft.document_urls,
            statement: draft.statement,
            status: ApplicationStatus::UnderReview,
            created_at,
        })
    }

    /// Returns the unique identifier.
    #[must_use]
    pub fn id(&self) -> &ApplicationId {
        &self.id
    }

    /// Returns the owning user's identifier.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the applicant's full name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Returns the contact email entered on the form.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the contact phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Returns the postal address.
    #[must_use]
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Returns the date of birth as entered.
    #[must_use]
    pub fn date_of_birth(&self) -> &str {
        self.date_of_birth.as_str()
    }

    /// Returns the programme applied to.
    #[must_use]
    pub fn program(&self) -> &str {
        self.program.as_str()
    }

    /// Returns the education history in submission order.
    #[must_use]
    pub fn previous_education(&self) -> &[EducationEntry] {
        &self.previous_education
    }

    /// Returns the supporting document references in submission order.
    #[must_use]
    pub fn document_urls(&self) -> &[DocumentRef] {
        &self.document_urls
    }

    /// Returns the personal statement.
    #[must_use]
    pub fn statement(&self) -> &str {
        self.statement.as_str()
    }

    /// Returns the current review status.
    #[must_use]
    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Overwrites the review status. No transition graph is enforced.
    pub fn set_status(&mut self, status: ApplicationStatus) {
        self.status = status;
    }

    /// Returns the immutable submission timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
