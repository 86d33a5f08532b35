// Commands accepted by the ledger transition function.
//
// Purpose
// - Express every mutation the outer layers may request as one closed enum.
//
// Wire shape
// - `{ "type": "<Variant>", "payload": { ... } }` with camelCase payload fields.
// - Unknown types and payloads that do not match their variant fail to deserialize.

use crate::modules::ledger::core::model::{
    Approval, Expense, MaintenanceRequest, MaintenanceStatus, Notification, Owner,
    OwnerDefaultsPatch, Payment, Property, Room, Tenant, UtilityReading,
};
use crate::shared::core::primitives::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One named list of the active property, replaced wholesale by `UpdatePropertyData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum PropertyData {
    Tenants(Vec<Tenant>),
    Rooms(Vec<Room>),
    Payments(Vec<Payment>),
    Electricity(Vec<UtilityReading>),
    Expenses(Vec<Expense>),
}

impl PropertyData {
    pub fn key(&self) -> &'static str {
        match self {
            PropertyData::Tenants(_) => "tenants",
            PropertyData::Rooms(_) => "rooms",
            PropertyData::Payments(_) => "payments",
            PropertyData::Electricity(_) => "electricity",
            PropertyData::Expenses(_) => "expenses",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all_fields = "camelCase")]
pub enum LedgerCommand {
    SetState(Box<Owner>),
    SetActiveProperty {
        property_id: String,
    },
    AddProperty {
        property: Property,
    },
    UpdatePropertyDetails {
        property_id: String,
        name: String,
        address: String,
    },
    DeleteProperty {
        property_id: String,
    },
    AddRoom {
        room: Room,
    },
    UpdateRoom {
        room: Room,
    },
    DeleteRoom {
        room_id: String,
    },
    AddTenantAndAdjustRent {
        tenant: Tenant,
    },
    UpdateTenant {
        tenant: Tenant,
    },
    RemoveTenant {
        tenant_id: String,
    },
    RecordPayment {
        payment: Payment,
    },
    AddUtilityReading {
        reading_id: String,
        room_id: String,
        units_consumed: f64,
        rate_per_unit: Amount,
        date: NaiveDate,
    },
    ApplyElectricityBill {
        reading_id: String,
    },
    SubmitApproval {
        approval: Approval,
    },
    ApproveSubmission {
        approval_id: String,
    },
    RejectSubmission {
        approval_id: String,
    },
    AddExpense {
        expense: Expense,
    },
    RemoveExpense {
        expense_id: String,
    },
    PostNotification {
        notification: Notification,
    },
    MarkNotificationRead {
        notification_id: String,
    },
    RaiseMaintenanceRequest {
        request: MaintenanceRequest,
    },
    UpdateMaintenanceStatus {
        request_id: String,
        status: MaintenanceStatus,
    },
    UpdatePropertyData(PropertyData),
    UpdateOwnerDefaults(OwnerDefaultsPatch),
}

impl LedgerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerCommand::SetState(_) => "SetState",
            LedgerCommand::SetActiveProperty { .. } => "SetActiveProperty",
            LedgerCommand::AddProperty { .. } => "AddProperty",
            LedgerCommand::UpdatePropertyDetails { .. } => "UpdatePropertyDetails",
            LedgerCommand::DeleteProperty { .. } => "DeleteProperty",
            LedgerCommand::AddRoom { .. } => "AddRoom",
            LedgerCommand::UpdateRoom { .. } => "UpdateRoom",
            LedgerCommand::DeleteRoom { .. } => "DeleteRoom",
            LedgerCommand::AddTenantAndAdjustRent { .. } => "AddTenantAndAdjustRent",
            LedgerCommand::UpdateTenant { .. } => "UpdateTenant",
            LedgerCommand::RemoveTenant { .. } => "RemoveTenant",
            LedgerCommand::RecordPayment { .. } => "RecordPayment",
            LedgerCommand::AddUtilityReading { .. } => "AddUtilityReading",
            LedgerCommand::ApplyElectricityBill { .. } => "ApplyElectricityBill",
            LedgerCommand::SubmitApproval { .. } => "SubmitApproval",
            LedgerCommand::ApproveSubmission { .. } => "ApproveSubmission",
            LedgerCommand::RejectSubmission { .. } => "RejectSubmission",
            LedgerCommand::AddExpense { .. } => "AddExpense",
            LedgerCommand::RemoveExpense { .. } => "RemoveExpense",
            LedgerCommand::PostNotification { .. } => "PostNotification",
            LedgerCommand::MarkNotificationRead { .. } => "MarkNotificationRead",
            LedgerCommand::RaiseMaintenanceRequest { .. } => "RaiseMaintenanceRequest",
            LedgerCommand::UpdateMaintenanceStatus { .. } => "UpdateMaintenanceStatus",
            LedgerCommand::UpdatePropertyData(_) => "UpdatePropertyData",
            LedgerCommand::UpdateOwnerDefaults(_) => "UpdateOwnerDefaults",
        }
    }
}
