//! Application services and ports for the admissions portal.
//!
//! The services in this crate are the UI-facing contract of the system:
//! the account directory, the application registry, and the session gate
//! between them. Persistence is injected through the [`KeyValueStore`]
//! port; see the infrastructure crate for adapters.

#![forbid(unsafe_code)]

mod account_service;
mod application_service;
mod session_gate;
mod storage;

pub use account_service::{AccountService, RegisterParams};
pub use application_service::ApplicationService;
pub use session_gate::SessionGate;
pub use storage::{APPLICATIONS_KEY, CURRENT_USER_KEY, KeyValueStore, USERS_KEY};
