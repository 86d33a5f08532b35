// Dispatch command handler: the single entry point outer layers use to mutate the ledger.
//
// Responsibilities
// - Stamp a login identifier on tenants added without one.
// - Run the pure decision and keep the previous state when a command is refused.
// - Persist accepted states. Persistence is fire-and-forget: a failed write is logged and the
//   new state is still returned.

use crate::modules::ledger::core::commands::LedgerCommand;
use crate::modules::ledger::core::model::Tenant;
use crate::modules::ledger::core::state::LedgerState;
use crate::modules::ledger::core::transition::{DecideError, decide};
use crate::modules::ledger::use_cases::owner_document::persist_owner;
use crate::shared::core::primitives::issue_login_id;
use crate::shared::infrastructure::state_store::StateStore;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub state: LedgerState,
    pub rejection: Option<DecideError>,
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        self.rejection.is_none()
    }
}

pub struct DispatchCommandHandler<TStore>
where
    TStore: StateStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> DispatchCommandHandler<TStore>
where
    TStore: StateStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn dispatch(&self, state: LedgerState, command: LedgerCommand) -> DispatchOutcome {
        let command = with_login_id(command);
        let name = command.name();
        match decide(&state, command) {
            Ok(next) => {
                if let Some(owner) = next.owner() {
                    if let Err(error) = persist_owner(&*self.store, owner).await {
                        warn!(
                            command = name,
                            owner = %owner.id,
                            %error,
                            "failed to persist ledger"
                        );
                    }
                }
                debug!(command = name, "command applied");
                DispatchOutcome {
                    state: next,
                    rejection: None,
                }
            }
            Err(reason) => {
                warn!(command = name, %reason, "command rejected, state unchanged");
                DispatchOutcome {
                    state,
                    rejection: Some(reason),
                }
            }
        }
    }
}

fn with_login_id(command: LedgerCommand) -> LedgerCommand {
    match command {
        LedgerCommand::AddTenantAndAdjustRent { tenant } if !tenant.has_login_id() => {
            LedgerCommand::AddTenantAndAdjustRent {
                tenant: Tenant {
                    login_id: Some(issue_login_id()),
                    ..tenant
                },
            }
        }
        other => other,
    }
}
