// Backup handler: export of operational data and import merged into the current owner.
//
// Responsibilities
// - Export: serialize the backup document for the loaded owner.
// - Import: recognise the document shape, merge it with the explicit merge policy, persist
//   the result. Malformed or unrecognized imports leave the state untouched.

use crate::modules::ledger::core::backup::{ImportSource, export_backup, merge_import, parse_import};
use crate::modules::ledger::core::commands::LedgerCommand;
use crate::modules::ledger::core::model::Owner;
use crate::modules::ledger::core::state::LedgerState;
use crate::modules::ledger::core::transition::transition;
use crate::modules::ledger::use_cases::errors::ApplicationError;
use crate::modules::ledger::use_cases::owner_document::persist_owner;
use crate::shared::core::primitives::issue_login_id;
use crate::shared::infrastructure::state_store::StateStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

pub struct BackupHandler<TStore>
where
    TStore: StateStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> BackupHandler<TStore>
where
    TStore: StateStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub fn export(
        &self,
        state: &LedgerState,
        exported_at: DateTime<Utc>,
    ) -> Result<String, ApplicationError> {
        let owner = state.owner().ok_or(ApplicationError::NotLoaded)?;
        let document = export_backup(owner, exported_at);
        serde_json::to_string_pretty(&document).map_err(ApplicationError::Encode)
    }

    /// Imports `text` into `current` and returns the merged state.
    ///
    /// Into an empty state only a full owner document is accepted, and it is adopted as is.
    pub async fn import(
        &self,
        current: &LedgerState,
        text: &str,
    ) -> Result<LedgerState, ApplicationError> {
        let destination_id = current.owner().map(|o| o.id.as_str());
        let source = parse_import(text, destination_id).inspect_err(|error| {
            warn!(%error, "import refused, state unchanged");
        })?;
        let kind = source.kind();

        let merged = match (current.owner(), source) {
            (Some(destination), source) => merge_import(destination, source, |_| issue_login_id()),
            (None, ImportSource::Owner(owner)) => {
                let blank = Owner {
                    properties: Vec::new(),
                    active_property_id: None,
                    ..owner.clone()
                };
                merge_import(&blank, ImportSource::Owner(owner), |_| issue_login_id())
            }
            (None, ImportSource::Backup(_)) => return Err(ApplicationError::NotLoaded),
        };

        if let Err(error) = persist_owner(&*self.store, &merged).await {
            warn!(owner = %merged.id, %error, "failed to persist imported ledger");
        }
        info!(
            owner = %merged.id,
            kind,
            properties = merged.properties.len(),
            "backup imported"
        );
        Ok(transition(
            current.clone(),
            LedgerCommand::SetState(Box::new(merged)),
        ))
    }
}

#[cfg(test)]
mod backup_handler_tests {
    use super::*;
    use crate::modules::ledger::core::backup::ImportError;
    use crate::modules::ledger::core::model::OwnerProfile;
    use crate::shared::infrastructure::state_store::in_memory::InMemoryStateStore;
    use crate::test_support::fixtures::{OwnerBuilder, PropertyBuilder, RoomBuilder, TenantBuilder};
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn source() -> LedgerState {
        LedgerState::Loaded(
            OwnerBuilder::new("owner-src")
                .property(
                    PropertyBuilder::new("p1")
                        .room(RoomBuilder::new("r1").capacity(2).build())
                        .tenant(TenantBuilder::new("t1", "r1").build())
                        .build(),
                )
                .active("p1")
                .build(),
        )
    }

    #[fixture]
    fn destination() -> LedgerState {
        LedgerState::Loaded(
            OwnerBuilder::new("owner-dst")
                .profile(OwnerProfile {
                    name: "Destination".into(),
                    ..OwnerProfile::default()
                })
                .build(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_import_an_export_into_another_owner(
        source: LedgerState,
        destination: LedgerState,
    ) {
        let store = Arc::new(InMemoryStateStore::new());
        let handler = BackupHandler::new(store.clone());
        let exported_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let text = handler.export(&source, exported_at).unwrap();

        let state = handler.import(&destination, &text).await.unwrap();

        let owner = state.owner().unwrap();
        assert_eq!(owner.id, "owner-dst");
        assert_eq!(owner.profile.name, "Destination");
        assert_eq!(
            owner.properties[0].tenants,
            source.owner().unwrap().properties[0].tenants
        );
        assert!(store.read("owner-dst").await.unwrap().is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_leave_the_state_alone_for_unrecognized_imports(destination: LedgerState) {
        let store = Arc::new(InMemoryStateStore::new());
        let handler = BackupHandler::new(store.clone());

        let result = handler.import(&destination, r#"{"hello": "world"}"#).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Import(ImportError::UnrecognizedFormat))
        ));
        assert_eq!(store.write_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_adopt_an_owner_document_into_an_empty_state(source: LedgerState) {
        let handler = BackupHandler::new(Arc::new(InMemoryStateStore::new()));
        let text = serde_json::to_string(source.owner().unwrap()).unwrap();

        let state = handler.import(&LedgerState::Empty, &text).await.unwrap();

        assert_eq!(state, source);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_a_backup_without_a_destination(source: LedgerState) {
        let handler = BackupHandler::new(Arc::new(InMemoryStateStore::new()));
        let text = handler.export(&source, Utc::now()).unwrap();
        let result = handler.import(&LedgerState::Empty, &text).await;
        assert!(matches!(result, Err(ApplicationError::NotLoaded)));
    }

    #[rstest]
    fn it_should_refuse_to_export_an_empty_state() {
        let handler = BackupHandler::new(Arc::new(InMemoryStateStore::new()));
        assert!(matches!(
            handler.export(&LedgerState::Empty, Utc::now()),
            Err(ApplicationError::NotLoaded)
        ));
    }
}
