//! Domain entities and invariants for the admissions portal.

#![forbid(unsafe_code)]

mod application;
mod user;

pub use application::{
    Application, ApplicationDraft, ApplicationId, ApplicationStatus, DocumentRef, EducationEntry,
};
pub use user::{EmailAddress, User, UserId, UserRole};
