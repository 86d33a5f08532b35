use crate::modules::ledger::core::model::approval::Approval;
use crate::modules::ledger::core::model::payment::Payment;
use crate::modules::ledger::core::model::records::{Expense, MaintenanceRequest, Notification};
use crate::modules::ledger::core::model::room::Room;
use crate::modules::ledger::core::model::tenant::Tenant;
use crate::modules::ledger::core::model::utility_reading::UtilityReading;
use serde::{Deserialize, Serialize};

/// A managed building. Every child collection is a flat list looked up by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub electricity: Vec<UtilityReading>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub pending_approvals: Vec<Approval>,
    #[serde(default)]
    pub maintenance_requests: Vec<MaintenanceRequest>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl Property {
    pub fn new(id: impl Into<String>, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    pub fn tenant(&self, tenant_id: &str) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.id == tenant_id)
    }

    pub fn reading(&self, reading_id: &str) -> Option<&UtilityReading> {
        self.electricity.iter().find(|r| r.id == reading_id)
    }

    pub fn approval(&self, approval_id: &str) -> Option<&Approval> {
        self.pending_approvals.iter().find(|a| a.id == approval_id)
    }

    pub fn occupants<'a>(&'a self, room_id: &'a str) -> impl Iterator<Item = &'a Tenant> + 'a {
        self.tenants.iter().filter(move |t| t.room_id == room_id)
    }

    pub fn occupant_count(&self, room_id: &str) -> usize {
        self.occupants(room_id).count()
    }

    /// Ledger payments recorded against a tenant, in insertion order.
    pub fn payments_for<'a>(
        &'a self,
        tenant_id: &'a str,
    ) -> impl Iterator<Item = &'a Payment> + 'a {
        self.payments.iter().filter(move |p| p.tenant_id == tenant_id)
    }
}

#[cfg(test)]
mod property_model_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_default_missing_lists_when_reading_a_legacy_document() {
        let property: Property =
            serde_json::from_str(r#"{"id":"p1","name":"Green Villa"}"#).unwrap();
        assert_eq!(property.id, "p1");
        assert!(property.rooms.is_empty());
        assert!(property.pending_approvals.is_empty());
        assert!(property.maintenance_requests.is_empty());
    }

    #[rstest]
    fn it_should_serialize_lists_with_the_persisted_names() {
        let value = serde_json::to_value(Property::new("p1", "Green Villa", "MG Road")).unwrap();
        for key in [
            "rooms",
            "tenants",
            "payments",
            "electricity",
            "expenses",
            "pendingApprovals",
            "maintenanceRequests",
            "notifications",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
