// Port for persisting one owner document per owner key.
//
// Boundaries
// - Stores opaque text. Encoding and decoding belong to the use cases.
// - A missing document is `Ok(None)`, not an error.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("invalid owner key: {0:?}")]
    InvalidKey(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait StateStore: Send + Sync {
    async fn read(&self, owner_key: &str) -> Result<Option<String>, StateStoreError>;
    async fn write(&self, owner_key: &str, document: &str) -> Result<(), StateStoreError>;
}

pub mod file_system;
pub mod in_memory;
