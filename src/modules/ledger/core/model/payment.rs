use crate::shared::core::primitives::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Upi,
    BankTransfer,
    Card,
    Cheque,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    #[default]
    Rent,
    Deposit,
    Utility,
    Maintenance,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Completed,
    Approved,
    Rejected,
    Pending,
}

impl PaymentStatus {
    /// Whether the payment reduces what the tenant owes.
    pub fn is_settled(self) -> bool {
        matches!(self, PaymentStatus::Completed | PaymentStatus::Approved)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub tenant_id: String,
    pub amount: Amount,
    #[serde(default)]
    pub method: PaymentMethod,
    pub date: NaiveDate,
    #[serde(default)]
    pub category: PaymentCategory,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub note: Option<String>,
}
