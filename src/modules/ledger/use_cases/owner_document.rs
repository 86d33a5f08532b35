// Encoding of the persisted owner document and the write path shared by the use cases.

use crate::modules::ledger::core::model::Owner;
use crate::modules::ledger::use_cases::errors::ApplicationError;
use crate::shared::infrastructure::state_store::StateStore;

pub fn encode_owner(owner: &Owner) -> Result<String, ApplicationError> {
    serde_json::to_string(owner).map_err(ApplicationError::Encode)
}

pub fn decode_owner(owner_key: &str, document: &str) -> Result<Owner, ApplicationError> {
    serde_json::from_str(document).map_err(|source| ApplicationError::CorruptDocument {
        owner_key: owner_key.to_string(),
        source,
    })
}

pub async fn persist_owner<TStore>(store: &TStore, owner: &Owner) -> Result<(), ApplicationError>
where
    TStore: StateStore + ?Sized,
{
    let document = encode_owner(owner)?;
    store.write(&owner.id, &document).await?;
    Ok(())
}
