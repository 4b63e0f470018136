//! Application registry service: submission, lookup, admin listing, review.

use std::sync::Arc;

use chrono::Utc;

use admissions_core::AppResult;
use admissions_domain::{
    Application, ApplicationDraft, ApplicationId, ApplicationStatus, UserId, UserRole,
};

use crate::session_gate::SessionGate;
use crate::storage::{APPLICATIONS_KEY, KeyValueStore, read_collection, write_collection};

/// Application service owning the admission application registry.
///
/// Admin-only operations re-derive the acting user from the session gate
/// and fail silently (empty list, `None`) when the gate does not hold an
/// admin; the UI also gates navigation, but this layer never trusts a
/// caller-claimed role.
#[derive(Clone)]
pub struct ApplicationService {
    durable: Arc<dyn KeyValueStore>,
    sessions: SessionGate,
}

impl ApplicationService {
    /// Creates a new application service over a durable store and session gate.
    #[must_use]
    pub fn new(durable: Arc<dyn KeyValueStore>, sessions: SessionGate) -> Self {
        Self { durable, sessions }
    }

    /// Submits a new application owned by the given user.
    ///
    /// Assigns a fresh identifier, sets the status to under review, and
    /// stamps the submission time. The write path appends unconditionally;
    /// one-application-per-user is a reader-side assumption, not a
    /// uniqueness constraint.
    pub async fn submit(&self, draft: ApplicationDraft, owner: &UserId) -> AppResult<Application> {
        let application =
            Application::submitted(ApplicationId::generate(), owner.clone(), draft, Utc::now())?;

        let mut applications: Vec<Application> =
            read_collection(self.durable.as_ref(), APPLICATIONS_KEY).await?;
        applications.push(application.clone());
        write_collection(self.durable.as_ref(), APPLICATIONS_KEY, &applications).await?;

        Ok(application)
    }

    /// Returns the first application owned by the given user, or `None`.
    pub async fn find_by_user(&self, user_id: &UserId) -> AppResult<Option<Application>> {
        let applications: Vec<Application> =
            read_collection(self.durable.as_ref(), APPLICATIONS_KEY).await?;

        Ok(applications
            .into_iter()
            .find(|application| application.user_id() == user_id))
    }

    /// Returns every application when the session user is an admin, and an
    /// empty sequence otherwise.
    pub async fn list_all(&self) -> AppResult<Vec<Application>> {
        if self
            .sessions
            .authorized_user(UserRole::Admin)
            .await?
            .is_none()
        {
            return Ok(Vec::new());
        }

        read_collection(self.durable.as_ref(), APPLICATIONS_KEY).await
    }

    /// Overwrites the status of an application and returns the updated record.
    ///
    /// Returns `None` without modifying state when the session user is not
    /// an admin or no application has the given identifier. Any status to
    /// any status is permitted, including a repeat of the current one.
    pub async fn update_status(
        &self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> AppResult<Option<Application>> {
        if self
            .sessions
            .authorized_user(UserRole::Admin)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let mut applications: Vec<Application> =
            read_collection(self.durable.as_ref(), APPLICATIONS_KEY).await?;

        let Some(application) = applications
            .iter_mut()
            .find(|application| application.id() == application_id)
        else {
            return Ok(None);
        };

        application.set_status(status);
        let updated = application.clone();

        write_collection(self.durable.as_ref(), APPLICATIONS_KEY, &applications).await?;

        Ok(Some(updated))
    }
}
