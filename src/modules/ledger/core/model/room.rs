use crate::shared::core::primitives::Amount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub rent: Amount,
    #[serde(default)]
    pub rent_sharing: bool,
}
