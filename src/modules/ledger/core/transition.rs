// The ledger transition function.
//
// Purpose
// - `decide` applies one command to a state snapshot and either returns the next snapshot or
//   the reason the command was refused.
// - `transition` is the total form used by callers: a refused command leaves the state as is.
//
// Boundaries
// - No input or output. The snapshot passed in is never modified; every accepted command
//   produces a new owner tree.
//
// Rent sharing
// - Shared rooms are rebalanced on every membership change (add, remove, move) and whenever the
//   room itself is updated. `UpdatePropertyData` writes lists verbatim and does not rebalance.

use crate::modules::ledger::core::approval_workflow::{
    ApprovalDecision, ApprovalError, ApprovalOutcome, decide_approval, submit,
};
use crate::modules::ledger::core::calculators::rent_sharing::rebalance_room;
use crate::modules::ledger::core::calculators::utility_apportionment::{
    ApportionError, charge_occupants,
};
use crate::modules::ledger::core::commands::{LedgerCommand, PropertyData};
use crate::modules::ledger::core::model::{
    Approval, Expense, MaintenanceRequest, MaintenanceStatus, Notification, Owner, Payment,
    Property, Room, Tenant, UtilityReading,
};
use crate::modules::ledger::core::state::LedgerState;
use crate::shared::core::primitives::{
    Amount, approval_payment_id, derive_unique_login_id, round_currency,
};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("ledger state is not loaded")]
    NotLoaded,

    #[error("no active property")]
    NoActiveProperty,

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} {id} already exists")]
    DuplicateId { entity: &'static str, id: String },

    #[error("property {0} still has tenants")]
    PropertyHasTenants(String),

    #[error("room {0} still has tenants")]
    RoomOccupied(String),

    #[error("room {room_id} is at capacity ({capacity})")]
    RoomAtCapacity { room_id: String, capacity: u32 },

    #[error("room capacity must be at least 1")]
    InvalidCapacity,

    #[error("no tenants in room {room_id}")]
    NoTenantsInRoom { room_id: String },

    #[error("utility reading {0} was already applied")]
    ReadingAlreadyApplied(String),

    #[error(transparent)]
    InvalidApprovalTransition(#[from] ApprovalError),
}

impl From<ApportionError> for DecideError {
    fn from(value: ApportionError) -> Self {
        match value {
            ApportionError::NoTenantsInRoom { room_id } => DecideError::NoTenantsInRoom { room_id },
        }
    }
}

fn not_found(entity: &'static str, id: &str) -> DecideError {
    DecideError::NotFound {
        entity,
        id: id.to_string(),
    }
}

fn duplicate(entity: &'static str, id: &str) -> DecideError {
    DecideError::DuplicateId {
        entity,
        id: id.to_string(),
    }
}

/// Applies `command` and returns the next state, logging and ignoring refused commands.
pub fn transition(state: LedgerState, command: LedgerCommand) -> LedgerState {
    let name = command.name();
    match decide(&state, command) {
        Ok(next) => {
            debug!(command = name, "command applied");
            next
        }
        Err(reason) => {
            warn!(command = name, %reason, "command rejected, state unchanged");
            state
        }
    }
}

pub fn decide(state: &LedgerState, command: LedgerCommand) -> Result<LedgerState, DecideError> {
    let Some(owner) = state.owner() else {
        return match command {
            LedgerCommand::SetState(owner) => Ok(LedgerState::Loaded(*owner)),
            _ => Err(DecideError::NotLoaded),
        };
    };

    match command {
        LedgerCommand::SetState(replacement) => Ok(LedgerState::Loaded(*replacement)),
        LedgerCommand::SetActiveProperty { property_id } => {
            if owner.property(&property_id).is_none() {
                return Err(not_found("property", &property_id));
            }
            let mut next = owner.clone();
            next.active_property_id = Some(property_id);
            Ok(LedgerState::Loaded(next))
        }
        LedgerCommand::AddProperty { property } => add_property(owner, property),
        LedgerCommand::UpdatePropertyDetails {
            property_id,
            name,
            address,
        } => {
            let mut next = owner.clone();
            let property = next
                .properties
                .iter_mut()
                .find(|p| p.id == property_id)
                .ok_or_else(|| not_found("property", &property_id))?;
            property.name = name;
            property.address = address;
            Ok(LedgerState::Loaded(next))
        }
        LedgerCommand::DeleteProperty { property_id } => delete_property(owner, &property_id),
        LedgerCommand::UpdateOwnerDefaults(patch) => {
            let mut next = owner.clone();
            next.defaults = owner.defaults.merged(&patch);
            Ok(LedgerState::Loaded(next))
        }
        LedgerCommand::AddRoom { room } => update_active_property(owner, |p| add_room(p, room)),
        LedgerCommand::UpdateRoom { room } => {
            update_active_property(owner, |p| update_room(p, room))
        }
        LedgerCommand::DeleteRoom { room_id } => {
            update_active_property(owner, |p| delete_room(p, &room_id))
        }
        LedgerCommand::AddTenantAndAdjustRent { tenant } => {
            update_active_property(owner, |p| add_tenant(p, tenant))
        }
        LedgerCommand::UpdateTenant { tenant } => {
            update_active_property(owner, |p| update_tenant(p, tenant))
        }
        LedgerCommand::RemoveTenant { tenant_id } => {
            update_active_property(owner, |p| remove_tenant(p, &tenant_id))
        }
        LedgerCommand::RecordPayment { payment } => {
            update_active_property(owner, |p| record_payment(p, payment))
        }
        LedgerCommand::AddUtilityReading {
            reading_id,
            room_id,
            units_consumed,
            rate_per_unit,
            date,
        } => update_active_property(owner, |p| {
            add_utility_reading(p, reading_id, room_id, units_consumed, rate_per_unit, date)
        }),
        LedgerCommand::ApplyElectricityBill { reading_id } => {
            update_active_property(owner, |p| apply_electricity_bill(p, &reading_id))
        }
        LedgerCommand::SubmitApproval { approval } => {
            update_active_property(owner, |p| submit_approval(p, approval))
        }
        LedgerCommand::ApproveSubmission { approval_id } => update_active_property(owner, |p| {
            decide_submission(p, &approval_id, ApprovalDecision::Approve)
        }),
        LedgerCommand::RejectSubmission { approval_id } => update_active_property(owner, |p| {
            decide_submission(p, &approval_id, ApprovalDecision::Reject)
        }),
        LedgerCommand::AddExpense { expense } => {
            update_active_property(owner, |p| add_expense(p, expense))
        }
        LedgerCommand::RemoveExpense { expense_id } => update_active_property(owner, |p| {
            let before = p.expenses.len();
            p.expenses.retain(|e| e.id != expense_id);
            if p.expenses.len() == before {
                return Err(not_found("expense", &expense_id));
            }
            Ok(())
        }),
        LedgerCommand::PostNotification { notification } => {
            update_active_property(owner, |p| post_notification(p, notification))
        }
        LedgerCommand::MarkNotificationRead { notification_id } => {
            update_active_property(owner, |p| {
                let notification = p
                    .notifications
                    .iter_mut()
                    .find(|n| n.id == notification_id)
                    .ok_or_else(|| not_found("notification", &notification_id))?;
                notification.read = true;
                Ok(())
            })
        }
        LedgerCommand::RaiseMaintenanceRequest { request } => {
            update_active_property(owner, |p| raise_maintenance_request(p, request))
        }
        LedgerCommand::UpdateMaintenanceStatus { request_id, status } => {
            update_active_property(owner, |p| update_maintenance_status(p, &request_id, status))
        }
        LedgerCommand::UpdatePropertyData(data) => update_active_property(owner, |p| {
            replace_list(p, data);
            Ok(())
        }),
    }
}

fn update_active_property(
    owner: &Owner,
    apply: impl FnOnce(&mut Property) -> Result<(), DecideError>,
) -> Result<LedgerState, DecideError> {
    let active_id = owner
        .active_property_id
        .as_deref()
        .ok_or(DecideError::NoActiveProperty)?;
    let mut next = owner.clone();
    let property = next
        .properties
        .iter_mut()
        .find(|p| p.id == active_id)
        .ok_or(DecideError::NoActiveProperty)?;
    apply(property)?;
    Ok(LedgerState::Loaded(next))
}

fn add_property(owner: &Owner, property: Property) -> Result<LedgerState, DecideError> {
    if owner.property(&property.id).is_some() {
        return Err(duplicate("property", &property.id));
    }
    let mut next = owner.clone();
    if next.active_property().is_none() {
        next.active_property_id = Some(property.id.clone());
    }
    next.properties.push(property);
    Ok(LedgerState::Loaded(next))
}

fn delete_property(owner: &Owner, property_id: &str) -> Result<LedgerState, DecideError> {
    let property = owner
        .property(property_id)
        .ok_or_else(|| not_found("property", property_id))?;
    if !property.tenants.is_empty() {
        return Err(DecideError::PropertyHasTenants(property_id.to_string()));
    }
    let mut next = owner.clone();
    next.properties.retain(|p| p.id != property_id);
    if next.active_property_id.as_deref() == Some(property_id) {
        next.active_property_id = next.properties.first().map(|p| p.id.clone());
    }
    Ok(LedgerState::Loaded(next))
}

fn validate_room(room: &Room) -> Result<(), DecideError> {
    if room.capacity < 1 {
        return Err(DecideError::InvalidCapacity);
    }
    Ok(())
}

fn add_room(property: &mut Property, room: Room) -> Result<(), DecideError> {
    validate_room(&room)?;
    if property.room(&room.id).is_some() {
        return Err(duplicate("room", &room.id));
    }
    property.rooms.push(Room {
        rent: round_currency(room.rent),
        ..room
    });
    Ok(())
}

fn update_room(property: &mut Property, room: Room) -> Result<(), DecideError> {
    validate_room(&room)?;
    let existing = property
        .rooms
        .iter_mut()
        .find(|r| r.id == room.id)
        .ok_or_else(|| not_found("room", &room.id))?;
    *existing = Room {
        rent: round_currency(room.rent),
        ..room
    };
    let updated = existing.clone();
    rebalance_room(&updated, &mut property.tenants);
    Ok(())
}

fn delete_room(property: &mut Property, room_id: &str) -> Result<(), DecideError> {
    if property.room(room_id).is_none() {
        return Err(not_found("room", room_id));
    }
    if property.occupant_count(room_id) > 0 {
        return Err(DecideError::RoomOccupied(room_id.to_string()));
    }
    property.rooms.retain(|r| r.id != room_id);
    Ok(())
}

fn ensure_vacancy(property: &Property, room_id: &str) -> Result<Room, DecideError> {
    let room = property
        .room(room_id)
        .ok_or_else(|| not_found("room", room_id))?;
    if property.occupant_count(room_id) >= room.capacity as usize {
        return Err(DecideError::RoomAtCapacity {
            room_id: room.id.clone(),
            capacity: room.capacity,
        });
    }
    Ok(room.clone())
}

fn rebalance_room_by_id(property: &mut Property, room_id: &str) {
    if let Some(room) = property.room(room_id).cloned() {
        rebalance_room(&room, &mut property.tenants);
    }
}

fn add_tenant(property: &mut Property, tenant: Tenant) -> Result<(), DecideError> {
    if property.tenant(&tenant.id).is_some() {
        return Err(duplicate("tenant", &tenant.id));
    }
    let room = ensure_vacancy(property, &tenant.room_id)?;
    let is_taken = |candidate: &str| {
        property
            .tenants
            .iter()
            .any(|t| t.login_id.as_deref() == Some(candidate))
    };
    let login_id = match tenant.login_id.as_deref() {
        Some(login_id) if tenant.has_login_id() => {
            if is_taken(login_id) {
                return Err(duplicate("login id", login_id));
            }
            login_id.to_string()
        }
        _ => derive_unique_login_id(&tenant.id, is_taken),
    };
    property.tenants.push(Tenant {
        login_id: Some(login_id),
        rent: round_currency(tenant.rent),
        ..tenant
    });
    rebalance_room(&room, &mut property.tenants);
    Ok(())
}

fn update_tenant(property: &mut Property, tenant: Tenant) -> Result<(), DecideError> {
    let existing = property
        .tenant(&tenant.id)
        .ok_or_else(|| not_found("tenant", &tenant.id))?
        .clone();
    let moved = existing.room_id != tenant.room_id;
    if moved {
        ensure_vacancy(property, &tenant.room_id)?;
    }
    let login_id = if tenant.has_login_id() {
        tenant.login_id.clone()
    } else {
        existing.login_id.clone()
    };
    let new_room_id = tenant.room_id.clone();
    if let Some(slot) = property.tenants.iter_mut().find(|t| t.id == tenant.id) {
        *slot = Tenant {
            login_id,
            rent: round_currency(tenant.rent),
            ..tenant
        };
    }
    if moved {
        rebalance_room_by_id(property, &existing.room_id);
    }
    rebalance_room_by_id(property, &new_room_id);
    Ok(())
}

fn remove_tenant(property: &mut Property, tenant_id: &str) -> Result<(), DecideError> {
    let removed = property
        .tenant(tenant_id)
        .ok_or_else(|| not_found("tenant", tenant_id))?
        .clone();
    property.tenants.retain(|t| t.id != tenant_id);
    rebalance_room_by_id(property, &removed.room_id);
    Ok(())
}

fn record_payment(property: &mut Property, payment: Payment) -> Result<(), DecideError> {
    if property.tenant(&payment.tenant_id).is_none() {
        return Err(not_found("tenant", &payment.tenant_id));
    }
    if property.payments.iter().any(|p| p.id == payment.id) {
        return Err(duplicate("payment", &payment.id));
    }
    property.payments.push(Payment {
        amount: round_currency(payment.amount),
        ..payment
    });
    Ok(())
}

fn add_utility_reading(
    property: &mut Property,
    reading_id: String,
    room_id: String,
    units_consumed: f64,
    rate_per_unit: Amount,
    date: NaiveDate,
) -> Result<(), DecideError> {
    if property.room(&room_id).is_none() {
        return Err(not_found("room", &room_id));
    }
    if property.reading(&reading_id).is_some() {
        return Err(duplicate("utility reading", &reading_id));
    }
    property.electricity.push(UtilityReading::record(
        reading_id,
        room_id,
        units_consumed,
        rate_per_unit,
        date,
    ));
    Ok(())
}

fn apply_electricity_bill(property: &mut Property, reading_id: &str) -> Result<(), DecideError> {
    let reading = property
        .reading(reading_id)
        .ok_or_else(|| not_found("utility reading", reading_id))?
        .clone();
    if reading.applied {
        return Err(DecideError::ReadingAlreadyApplied(reading.id));
    }
    charge_occupants(&reading, &mut property.tenants)?;
    if let Some(stored) = property.electricity.iter_mut().find(|r| r.id == reading_id) {
        stored.applied = true;
    }
    Ok(())
}

fn submit_approval(property: &mut Property, approval: Approval) -> Result<(), DecideError> {
    if property.tenant(&approval.tenant_id).is_none() {
        return Err(not_found("tenant", &approval.tenant_id));
    }
    if property.approval(&approval.id).is_some() {
        return Err(duplicate("approval", &approval.id));
    }
    let payment_id = approval_payment_id(&approval.id);
    if property.payments.iter().any(|p| p.id == payment_id) {
        return Err(duplicate("payment", &payment_id));
    }
    property.pending_approvals.push(submit(approval));
    Ok(())
}

fn decide_submission(
    property: &mut Property,
    approval_id: &str,
    decision: ApprovalDecision,
) -> Result<(), DecideError> {
    let approval = property
        .approval(approval_id)
        .ok_or_else(|| not_found("approval", approval_id))?;
    match decide_approval(approval, decision)? {
        ApprovalOutcome::Approved(payment) => {
            if property.payments.iter().any(|p| p.id == payment.id) {
                return Err(duplicate("payment", &payment.id));
            }
            property.payments.push(payment);
        }
        ApprovalOutcome::Rejected => {}
    }
    property.pending_approvals.retain(|a| a.id != approval_id);
    Ok(())
}

fn add_expense(property: &mut Property, expense: Expense) -> Result<(), DecideError> {
    if property.expenses.iter().any(|e| e.id == expense.id) {
        return Err(duplicate("expense", &expense.id));
    }
    property.expenses.push(Expense {
        amount: round_currency(expense.amount),
        ..expense
    });
    Ok(())
}

fn post_notification(
    property: &mut Property,
    notification: Notification,
) -> Result<(), DecideError> {
    if property.notifications.iter().any(|n| n.id == notification.id) {
        return Err(duplicate("notification", &notification.id));
    }
    if let Some(tenant_id) = notification.tenant_id.as_deref() {
        if property.tenant(tenant_id).is_none() {
            return Err(not_found("tenant", tenant_id));
        }
    }
    property.notifications.push(notification);
    Ok(())
}

fn raise_maintenance_request(
    property: &mut Property,
    request: MaintenanceRequest,
) -> Result<(), DecideError> {
    if property.tenant(&request.tenant_id).is_none() {
        return Err(not_found("tenant", &request.tenant_id));
    }
    if property.maintenance_requests.iter().any(|r| r.id == request.id) {
        return Err(duplicate("maintenance request", &request.id));
    }
    property.maintenance_requests.push(MaintenanceRequest {
        status: MaintenanceStatus::Open,
        ..request
    });
    Ok(())
}

fn update_maintenance_status(
    property: &mut Property,
    request_id: &str,
    status: MaintenanceStatus,
) -> Result<(), DecideError> {
    let request = property
        .maintenance_requests
        .iter_mut()
        .find(|r| r.id == request_id)
        .ok_or_else(|| not_found("maintenance request", request_id))?;
    request.status = status;
    Ok(())
}

fn replace_list(property: &mut Property, data: PropertyData) {
    debug!(property = %property.id, list = data.key(), "replacing list");
    match data {
        PropertyData::Tenants(tenants) => property.tenants = tenants,
        PropertyData::Rooms(rooms) => property.rooms = rooms,
        PropertyData::Payments(payments) => property.payments = payments,
        PropertyData::Electricity(readings) => property.electricity = readings,
        PropertyData::Expenses(expenses) => property.expenses = expenses,
    }
}
