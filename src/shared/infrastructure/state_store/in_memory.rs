// In memory implementation of the StateStore port, for tests and local runs.

use crate::shared::infrastructure::state_store::{StateStore, StateStoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryStateStore {
    documents: RwLock<HashMap<String, String>>,
    offline: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, owner_key: &str, document: impl Into<String>) {
        self.documents
            .write()
            .await
            .insert(owner_key.to_string(), document.into());
    }

    /// Makes every subsequent call fail with a backend error until toggled back.
    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> Result<(), StateStoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StateStoreError::Backend("State store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl StateStore for InMemoryStateStore {
    async fn read(&self, owner_key: &str) -> Result<Option<String>, StateStoreError> {
        self.ensure_online()?;
        Ok(self.documents.read().await.get(owner_key).cloned())
    }

    async fn write(&self, owner_key: &str, document: &str) -> Result<(), StateStoreError> {
        self.ensure_online()?;
        self.documents
            .write()
            .await
            .insert(owner_key.to_string(), document.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod in_memory_state_store_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_write_and_read_a_document() {
        let store = InMemoryStateStore::new();
        store.write("owner-1", r#"{"id":"owner-1"}"#).await.unwrap();
        let document = store.read("owner-1").await.unwrap();
        assert_eq!(document.as_deref(), Some(r#"{"id":"owner-1"}"#));
        assert_eq!(store.write_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_none_for_an_unknown_owner() {
        let store = InMemoryStateStore::new();
        assert!(store.read("nobody").await.unwrap().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_while_offline() {
        let store = InMemoryStateStore::new();
        store.toggle_offline();
        let result = store.write("owner-1", "{}").await;
        assert!(matches!(result, Err(StateStoreError::Backend(_))));
        store.toggle_offline();
        assert!(store.write("owner-1", "{}").await.is_ok());
    }
}
