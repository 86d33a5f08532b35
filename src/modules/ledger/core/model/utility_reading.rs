use crate::shared::core::primitives::{Amount, round_currency};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A metered utility bill for one room.
///
/// `total_amount` is fixed when the reading is recorded and never re-derived.
/// Once `applied` is set, every tenant of the room carries a charge for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilityReading {
    pub id: String,
    pub room_id: String,
    pub units_consumed: f64,
    pub rate_per_unit: Amount,
    pub total_amount: Amount,
    pub date: NaiveDate,
    #[serde(default)]
    pub applied: bool,
}

impl UtilityReading {
    pub fn record(
        id: impl Into<String>,
        room_id: impl Into<String>,
        units_consumed: f64,
        rate_per_unit: Amount,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            room_id: room_id.into(),
            units_consumed,
            rate_per_unit,
            total_amount: round_currency(units_consumed * rate_per_unit),
            date,
            applied: false,
        }
    }
}
