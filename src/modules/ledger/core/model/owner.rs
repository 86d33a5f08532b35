use crate::modules::ledger::core::model::payment::PaymentMethod;
use crate::modules::ledger::core::model::property::Property;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Pro,
    Business,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderConfig {
    pub enabled: bool,
    pub days_before_due: u32,
    #[serde(default)]
    pub message_template: Option<String>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            days_before_due: 3,
            message_template: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerDefaults {
    pub subscription_tier: SubscriptionTier,
    pub upi_id: Option<String>,
    pub payee_name: Option<String>,
    pub default_payment_method: Option<PaymentMethod>,
    pub reminders: ReminderConfig,
}

/// Partial update for [`OwnerDefaults`]. Present fields overwrite, absent ones are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerDefaultsPatch {
    pub subscription_tier: Option<SubscriptionTier>,
    pub upi_id: Option<String>,
    pub payee_name: Option<String>,
    pub default_payment_method: Option<PaymentMethod>,
    pub reminders: Option<ReminderConfig>,
}

impl OwnerDefaults {
    /// Shallow merge: nested values such as `reminders` are replaced whole.
    pub fn merged(&self, patch: &OwnerDefaultsPatch) -> Self {
        Self {
            subscription_tier: patch.subscription_tier.unwrap_or(self.subscription_tier),
            upi_id: patch.upi_id.clone().or_else(|| self.upi_id.clone()),
            payee_name: patch.payee_name.clone().or_else(|| self.payee_name.clone()),
            default_payment_method: patch.default_payment_method.or(self.default_payment_method),
            reminders: patch
                .reminders
                .clone()
                .unwrap_or_else(|| self.reminders.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerProfile {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub business_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: String,
    #[serde(default)]
    pub profile: OwnerProfile,
    #[serde(default)]
    pub defaults: OwnerDefaults,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub active_property_id: Option<String>,
}

impl Owner {
    pub fn new(id: impl Into<String>, profile: OwnerProfile) -> Self {
        Self {
            id: id.into(),
            profile,
            defaults: OwnerDefaults::default(),
            properties: Vec::new(),
            active_property_id: None,
        }
    }

    pub fn property(&self, property_id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == property_id)
    }

    pub fn active_property(&self) -> Option<&Property> {
        self.active_property_id
            .as_deref()
            .and_then(|id| self.property(id))
    }
}

#[cfg(test)]
mod owner_model_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_merge_only_the_fields_present_in_the_patch() {
        let defaults = OwnerDefaults {
            subscription_tier: SubscriptionTier::Pro,
            upi_id: Some("owner@upi".into()),
            payee_name: Some("Owner".into()),
            default_payment_method: Some(PaymentMethod::Cash),
            reminders: ReminderConfig::default(),
        };
        let patch = OwnerDefaultsPatch {
            upi_id: Some("new@upi".into()),
            reminders: Some(ReminderConfig {
                enabled: false,
                days_before_due: 1,
                message_template: None,
            }),
            ..OwnerDefaultsPatch::default()
        };

        let merged = defaults.merged(&patch);

        assert_eq!(merged.subscription_tier, SubscriptionTier::Pro);
        assert_eq!(merged.upi_id.as_deref(), Some("new@upi"));
        assert_eq!(merged.payee_name.as_deref(), Some("Owner"));
        assert_eq!(merged.default_payment_method, Some(PaymentMethod::Cash));
        assert!(!merged.reminders.enabled);
        assert_eq!(merged.reminders.days_before_due, 1);
    }

    #[rstest]
    fn it_should_read_a_minimal_owner_document() {
        let owner: Owner = serde_json::from_str(r#"{"id":"owner-1"}"#).unwrap();
        assert_eq!(owner.id, "owner-1");
        assert!(owner.properties.is_empty());
        assert_eq!(owner.active_property(), None);
        assert_eq!(owner.defaults.subscription_tier, SubscriptionTier::Free);
    }
}
