//! Storage adapters for the admissions portal.
//!
//! Implements the application crate's [`admissions_application::KeyValueStore`]
//! port: an in-memory store for the session scope and for tests, and a
//! JSON-file-backed store as the durable production analogue of browser
//! local storage.

#![forbid(unsafe_code)]

mod in_memory_store;
mod json_file_store;

pub use in_memory_store::InMemoryStore;
pub use json_file_store::JsonFileStore;
