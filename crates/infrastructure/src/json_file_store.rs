use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use admissions_application::KeyValueStore;
use admissions_core::{AppError, AppResult};

/// Durable key-value store persisting the whole key space as one JSON
/// object in a file.
///
/// This is the production analogue of browser local storage: a missing or
/// corrupt file reads as empty and is repaired by the next successful
/// write. Read-modify-write sequences are serialized through an async
/// mutex; the system assumes a single writer.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_guard: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store over the given file path. The file is created on
    /// the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_guard: Mutex::new(()),
        }
    }

    async fn load(&self) -> AppResult<Map<String, Value>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read store file '{}': {error}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "store file is not a JSON object, treating as empty"
                );
                Ok(Map::new())
            }
        }
    }

    async fn persist(&self, entries: &Map<String, Value>) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|error| AppError::Internal(format!("failed to serialize store: {error}")))?;

        tokio::fs::write(&self.path, bytes).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to write store file '{}': {error}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.load().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let _guard = self.write_guard.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_owned(), value);
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.write_guard.lock().await;
        let mut entries = self.load().await?;
        entries.remove(key);
        self.persist(&entries).await
    }
}
