// Load ledger handler: rehydrates the in-memory state from the store.
//
// Responsibilities
// - Read the owner document and apply it with `SetState`.
// - Fail closed: a missing, unreadable or corrupt document never replaces the caller's state.
// - Refuse a document whose owner id differs from the key it was read from.

use crate::modules::ledger::core::commands::LedgerCommand;
use crate::modules::ledger::core::state::LedgerState;
use crate::modules::ledger::core::transition::transition;
use crate::modules::ledger::use_cases::errors::ApplicationError;
use crate::modules::ledger::use_cases::owner_document::decode_owner;
use crate::shared::infrastructure::state_store::StateStore;
use std::sync::Arc;
use tracing::{info, warn};

pub struct LoadLedgerHandler<TStore>
where
    TStore: StateStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> LoadLedgerHandler<TStore>
where
    TStore: StateStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    /// Returns the stored state for `owner_key`, or a copy of `current` when nothing is stored.
    pub async fn hydrate(
        &self,
        current: &LedgerState,
        owner_key: &str,
    ) -> Result<LedgerState, ApplicationError> {
        let Some(document) = self.store.read(owner_key).await? else {
            info!(owner = owner_key, "no stored ledger, keeping current state");
            return Ok(current.clone());
        };
        let owner = decode_owner(owner_key, &document).inspect_err(|error| {
            warn!(owner = owner_key, %error, "refusing to load corrupt ledger document");
        })?;
        if owner.id != owner_key {
            warn!(
                owner = owner_key,
                found = %owner.id,
                "refusing to load another owner's document"
            );
            return Err(ApplicationError::OwnerMismatch {
                owner_key: owner_key.to_string(),
                found: owner.id,
            });
        }
        info!(
            owner = owner_key,
            properties = owner.properties.len(),
            "ledger loaded"
        );
        Ok(transition(
            current.clone(),
            LedgerCommand::SetState(Box::new(owner)),
        ))
    }
}
