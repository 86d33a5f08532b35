use crate::modules::ledger::core::backup::ImportError;
use crate::shared::infrastructure::state_store::StateStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Store(#[from] StateStoreError),

    #[error("stored document for {owner_key} is corrupt: {source}")]
    CorruptDocument {
        owner_key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("document stored under {owner_key} belongs to owner {found}")]
    OwnerMismatch { owner_key: String, found: String },

    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("no owner is loaded")]
    NotLoaded,
}
