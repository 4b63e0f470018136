//! Key-value persistence port and the stored key space.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use admissions_core::{AppError, AppResult};

/// Durable key holding the full user collection as a JSON array.
pub const USERS_KEY: &str = "cgu_users";

/// Durable key holding the full application collection as a JSON array.
pub const APPLICATIONS_KEY: &str = "cgu_applications";

/// Session-scoped key holding the current user as a JSON object.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Port for the key-value persistence collaborator.
///
/// Two instances are injected into the services: a durable store for the
/// user and application collections, and a session-scoped store for the
/// current-user pointer. Implementations only fail for adapter-level I/O
/// problems; an absent key is `None`, never an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value for a key, or `None` when absent.
    async fn get(&self, key: &str) -> AppResult<Option<Value>>;

    /// Stores a value under a key, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> AppResult<()>;

    /// Removes a key and its value. Removing an absent key is a no-op.
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// Reads a stored collection, treating an absent or malformed value as empty.
///
/// A malformed collection self-heals on the next successful write.
pub(crate) async fn read_collection<T>(store: &dyn KeyValueStore, key: &str) -> AppResult<Vec<T>>
where
    T: DeserializeOwned,
{
    let Some(value) = store.get(key).await? else {
        return Ok(Vec::new());
    };

    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Serializes and stores a full collection under a key.
pub(crate) async fn write_collection<T>(
    store: &dyn KeyValueStore,
    key: &str,
    records: &[T],
) -> AppResult<()>
where
    T: Serialize,
{
    let value = serde_json::to_value(records)
        .map_err(|error| AppError::Internal(format!("failed to serialize '{key}': {error}")))?;

    store.set(key, value).await
}
