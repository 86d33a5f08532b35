use crate::modules::ledger::core::model::payment::Payment;
use crate::shared::core::primitives::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An ad-hoc debit on a tenant, e.g. a share of a utility bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    pub id: String,
    pub amount: Amount,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub room_id: String,
    pub rent: Amount,
    #[serde(default)]
    pub move_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub login_id: Option<String>,
    #[serde(default)]
    pub other_charges: Vec<Charge>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Tenant {
    /// Inserts the charge, replacing any existing charge with the same id.
    pub fn upsert_charge(&mut self, charge: Charge) {
        match self.other_charges.iter_mut().find(|c| c.id == charge.id) {
            Some(existing) => *existing = charge,
            None => self.other_charges.push(charge),
        }
    }

    pub fn has_login_id(&self) -> bool {
        self.login_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }
}
