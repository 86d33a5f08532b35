use crate::modules::ledger::core::model::payment::PaymentMethod;
use crate::shared::core::primitives::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    Processing,
    Approved,
    Rejected,
}

/// A tenant-submitted payment proof waiting for the owner's decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    pub id: String,
    pub tenant_id: String,
    pub amount: Amount,
    pub date: NaiveDate,
    /// Reference to the uploaded proof (file name, URL or transaction reference).
    #[serde(default)]
    pub proof: String,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(default)]
    pub note: Option<String>,
}
