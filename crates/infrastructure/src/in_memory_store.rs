use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use admissions_application::KeyValueStore;
use admissions_core::AppResult;

/// In-memory key-value store.
///
/// Backs the session scope in production and both scopes in tests; one
/// instance corresponds to one browser storage area.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> AppResult<()> {
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use admissions_application::KeyValueStore;
    use serde_json::json;

    use super::InMemoryStore;

    #[tokio::test]
    async fn absent_key_reads_as_none() {
        let store = InMemoryStore::new();
        let value = store.get("missing").await;
        assert!(value.is_ok());
        assert!(value.unwrap_or_default().is_none());
    }

    #[tokio::test]
    async fn set_then_get_returns_the_stored_value() {
        let store = InMemoryStore::new();
        assert!(store.set("key", json!({"n": 1})).await.is_ok());

        let value = store.get("key").await;
        assert!(value.is_ok());
        assert_eq!(value.unwrap_or_default(), Some(json!({"n": 1})));
    }

    #[tokio::test]
    async fn set_overwrites_a_previous_value() {
        let store = InMemoryStore::new();
        assert!(store.set("key", json!(1)).await.is_ok());
        assert!(store.set("key", json!(2)).await.is_ok());

        let value = store.get("key").await;
        assert!(value.is_ok());
        assert_eq!(value.unwrap_or_default(), Some(json!(2)));
    }

    #[tokio::test]
    async fn remove_clears_the_key_and_tolerates_absence() {
        let store = InMemoryStore::new();
        assert!(store.set("key", json!(true)).await.is_ok());
        assert!(store.remove("key").await.is_ok());
        assert!(store.remove("key").await.is_ok());

        let value = store.get("key").await;
        assert!(value.is_ok());
        assert!(value.unwrap_or_default().is_none());
    }
}
