use crate::modules::ledger::core::calculators::dues::{TenantDues, property_dues};
use crate::modules::ledger::core::calculators::occupancy::{RoomOccupancy, room_occupancy};
use crate::modules::ledger::core::state::LedgerState;
use crate::shared::core::primitives::{Amount, sum_amounts};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReport {
    pub property_id: String,
    pub property_name: String,
    pub as_of: NaiveDate,
    pub total_dues: Amount,
    pub pending_approvals: usize,
    pub dues: Vec<TenantDues>,
    pub occupancy: Vec<RoomOccupancy>,
}

/// Report for the active property, or `None` when nothing is active.
pub fn build_report(state: &LedgerState, today: NaiveDate) -> Option<LedgerReport> {
    let property = state.active_property()?;
    let dues = property_dues(property, today);
    let total_dues = sum_amounts(dues.iter().map(|d| &d.dues));
    Some(LedgerReport {
        property_id: property.id.clone(),
        property_name: property.name.clone(),
        as_of: today,
        total_dues,
        pending_approvals: property.pending_approvals.len(),
        dues,
        occupancy: room_occupancy(property),
    })
}
