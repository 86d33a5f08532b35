// Backup export and import merge policy.
//
// Purpose
// - Define the backup document: operational data only, no owner profile or defaults.
// - Recognise the accepted import shapes: a backup document, an owner document, or a map of
//   owner id to owner document.
// - Decide in one place which fields come from the import and which from the destination.
//
// Boundaries
// - Pure. Parsing works on text already read by the caller; nothing here touches a store.

use crate::modules::ledger::core::model::{Owner, Property, Tenant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const BACKUP_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("unrecognized backup format")]
    UnrecognizedFormat,

    #[error("backup document is invalid: {0}")]
    Invalid(#[source] serde_json::Error),

    #[error("backup schema version {found} is newer than the supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub schema_version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub active_property_id: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportSource {
    Backup(BackupDocument),
    Owner(Owner),
}

impl ImportSource {
    pub fn kind(&self) -> &'static str {
        match self {
            ImportSource::Backup(_) => "backup",
            ImportSource::Owner(_) => "owner",
        }
    }
}

pub fn export_backup(owner: &Owner, exported_at: DateTime<Utc>) -> BackupDocument {
    BackupDocument {
        schema_version: BACKUP_SCHEMA_VERSION,
        exported_at,
        active_property_id: owner.active_property_id.clone(),
        properties: owner.properties.clone(),
    }
}

fn looks_like_owner(object: &Map<String, Value>) -> bool {
    object.get("properties").is_some_and(Value::is_array)
}

fn owner_from_object(
    mut object: Map<String, Value>,
    fallback_id: &str,
) -> Result<Owner, ImportError> {
    object
        .entry("id")
        .or_insert_with(|| Value::String(fallback_id.to_string()));
    serde_json::from_value(Value::Object(object)).map_err(ImportError::Invalid)
}

/// Recognises the shape of an import.
///
/// For a map keyed by owner id, the entry for `destination_owner_id` wins; otherwise the
/// entry with the lowest key in sort order is used.
pub fn parse_import(
    text: &str,
    destination_owner_id: Option<&str>,
) -> Result<ImportSource, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Malformed)?;
    let Value::Object(object) = value else {
        return Err(ImportError::UnrecognizedFormat);
    };

    if object.contains_key("schemaVersion") {
        let document: BackupDocument =
            serde_json::from_value(Value::Object(object)).map_err(ImportError::Invalid)?;
        if document.schema_version > BACKUP_SCHEMA_VERSION {
            return Err(ImportError::UnsupportedVersion {
                found: document.schema_version,
                supported: BACKUP_SCHEMA_VERSION,
            });
        }
        return Ok(ImportSource::Backup(document));
    }

    if looks_like_owner(&object) {
        let fallback = destination_owner_id.unwrap_or_default();
        return owner_from_object(object, fallback).map(ImportSource::Owner);
    }

    let keyed_owners = !object.is_empty()
        && object
            .values()
            .all(|v| v.as_object().is_some_and(looks_like_owner));
    if !keyed_owners {
        return Err(ImportError::UnrecognizedFormat);
    }
    let chosen_key = destination_owner_id
        .filter(|id| object.contains_key(*id))
        .map(str::to_string)
        .or_else(|| object.keys().next().cloned())
        .ok_or(ImportError::UnrecognizedFormat)?;
    let mut object = object;
    match object.remove(&chosen_key) {
        Some(Value::Object(entry)) => {
            owner_from_object(entry, &chosen_key).map(ImportSource::Owner)
        }
        _ => Err(ImportError::UnrecognizedFormat),
    }
}

fn backfill_login_ids(
    mut property: Property,
    issue_login_id: &mut impl FnMut(&Tenant) -> String,
) -> Property {
    for tenant in property.tenants.iter_mut().filter(|t| !t.has_login_id()) {
        let login_id = issue_login_id(&*tenant);
        tenant.login_id = Some(login_id);
    }
    property
}

/// Merges imported operational data into `destination`.
///
/// Policy
/// - Owner id, profile and defaults always come from the destination.
/// - Imported properties replace destination properties with the same id; destination
///   properties missing from the import are kept; new ones are appended.
/// - Tenants without a login identifier get one from `issue_login_id`.
/// - The destination's active property stays active when it still exists, then the imported
///   active property, then the first property.
pub fn merge_import(
    destination: &Owner,
    source: ImportSource,
    mut issue_login_id: impl FnMut(&Tenant) -> String,
) -> Owner {
    let (imported, imported_active) = match source {
        ImportSource::Backup(document) => (document.properties, document.active_property_id),
        ImportSource::Owner(owner) => (owner.properties, owner.active_property_id),
    };

    let mut properties = destination.properties.clone();
    for property in imported {
        let property = backfill_login_ids(property, &mut issue_login_id);
        match properties.iter_mut().find(|p| p.id == property.id) {
            Some(existing) => *existing = property,
            None => properties.push(property),
        }
    }

    let exists = |id: &Option<String>| {
        id.as_deref()
            .is_some_and(|id| properties.iter().any(|p| p.id == id))
    };
    let active_property_id = if exists(&destination.active_property_id) {
        destination.active_property_id.clone()
    } else if exists(&imported_active) {
        imported_active
    } else {
        properties.first().map(|p| p.id.clone())
    };

    Owner {
        id: destination.id.clone(),
        profile: destination.profile.clone(),
        defaults: destination.defaults.clone(),
        properties,
        active_property_id,
    }
}

#[cfg(test)]
mod backup_tests {
    use super::*;
    use crate::modules::ledger::core::model::{OwnerProfile, SubscriptionTier};
    use crate::test_support::fixtures::{
        OwnerBuilder, PaymentBuilder, PropertyBuilder, RoomBuilder, TenantBuilder,
    };
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
    }

    fn counter() -> impl FnMut(&Tenant) -> String {
        let mut next = 0;
        move |_| {
            next += 1;
            format!("T-{next:04}")
        }
    }

    #[fixture]
    fn source_owner() -> Owner {
        OwnerBuilder::new("owner-src")
            .profile(OwnerProfile {
                name: "Source Owner".into(),
                ..OwnerProfile::default()
            })
            .tier(SubscriptionTier::Business)
            .property(
                PropertyBuilder::new("p1")
                    .room(RoomBuilder::new("r1").capacity(2).rent(2000.0).shared().build())
                    .tenant(TenantBuilder::new("t1", "r1").rent(1000.0).build())
                    .tenant(TenantBuilder::new("t2", "r1").rent(1000.0).build())
                    .payment(PaymentBuilder::new("pay-1", "t1").amount(1000.0).build())
                    .build(),
            )
            .active("p1")
            .build()
    }

    #[fixture]
    fn destination() -> Owner {
        OwnerBuilder::new("owner-dst")
            .profile(OwnerProfile {
                name: "Destination Owner".into(),
                phone: Some("+91 90000 00000".into()),
                ..OwnerProfile::default()
            })
            .tier(SubscriptionTier::Pro)
            .build()
    }

    #[rstest]
    fn it_should_export_operational_data_without_profile(source_owner: Owner) {
        let document = export_backup(&source_owner, exported_at());
        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(value["schemaVersion"], 1);
        assert!(value.get("profile").is_none());
        assert!(value.get("defaults").is_none());
        assert!(value.get("ownerId").is_none());
        assert_eq!(value["properties"][0]["tenants"].as_array().unwrap().len(), 2);
    }

    #[rstest]
    fn it_should_round_trip_a_backup_into_a_fresh_owner(source_owner: Owner, destination: Owner) {
        let text = serde_json::to_string(&export_backup(&source_owner, exported_at())).unwrap();
        let source = parse_import(&text, Some("owner-dst")).unwrap();
        assert_eq!(source.kind(), "backup");

        let merged = merge_import(&destination, source, counter());

        assert_eq!(merged.id, "owner-dst");
        assert_eq!(merged.profile, destination.profile);
        assert_eq!(merged.defaults.subscription_tier, SubscriptionTier::Pro);
        let imported = &merged.properties[0];
        let original = &source_owner.properties[0];
        assert_eq!(imported.tenants, original.tenants);
        assert_eq!(imported.rooms, original.rooms);
        assert_eq!(imported.payments, original.payments);
        assert_eq!(imported.electricity, original.electricity);
        assert_eq!(merged.active_property_id.as_deref(), Some("p1"));
    }

    #[rstest]
    fn it_should_accept_an_owner_document(source_owner: Owner, destination: Owner) {
        let text = serde_json::to_string(&source_owner).unwrap();
        let source = parse_import(&text, None).unwrap();
        assert_eq!(source.kind(), "owner");
        let merged = merge_import(&destination, source, counter());
        assert_eq!(merged.profile.name, "Destination Owner");
        assert_eq!(merged.properties.len(), 1);
    }

    #[rstest]
    fn it_should_prefer_the_destination_entry_in_a_keyed_map(source_owner: Owner) {
        let mut other = source_owner.clone();
        other.properties[0].name = "Other".into();
        let text = serde_json::json!({
            "someone-else": other,
            "owner-dst": { "properties": source_owner.properties },
        })
        .to_string();

        match parse_import(&text, Some("owner-dst")).unwrap() {
            ImportSource::Owner(owner) => {
                assert_eq!(owner.id, "owner-dst");
                assert_eq!(owner.properties[0].name, source_owner.properties[0].name);
            }
            ImportSource::Backup(_) => panic!("expected an owner import"),
        }
    }

    #[rstest]
    fn it_should_fall_back_to_the_lowest_keyed_entry(source_owner: Owner) {
        let mut zeta = source_owner.clone();
        zeta.id = "zeta".into();
        zeta.properties[0].name = "Zeta House".into();
        let text = format!(
            r#"{{"zeta": {zeta}, "owner-src": {src}}}"#,
            zeta = serde_json::to_string(&zeta).unwrap(),
            src = serde_json::to_string(&source_owner).unwrap(),
        );
        let source = parse_import(&text, Some("nobody")).unwrap();
        assert!(matches!(
            source,
            ImportSource::Owner(owner)
                if owner.id == "owner-src" && owner.properties[0].name != "Zeta House"
        ));
    }

    #[rstest]
    #[case("not json at all")]
    #[case("{\"properties\": ")]
    fn it_should_report_malformed_text(#[case] text: &str) {
        assert!(matches!(parse_import(text, None), Err(ImportError::Malformed(_))));
    }

    #[rstest]
    #[case("[1, 2, 3]")]
    #[case("{}")]
    #[case("{\"owner-1\": {\"name\": \"no properties\"}}")]
    #[case("\"a string\"")]
    fn it_should_reject_unrecognized_shapes(#[case] text: &str) {
        assert!(matches!(
            parse_import(text, None),
            Err(ImportError::UnrecognizedFormat)
        ));
    }

    #[rstest]
    fn it_should_reject_newer_schema_versions() {
        let text =
            r#"{"schemaVersion": 99, "exportedAt": "2024-06-01T08:30:00Z", "properties": []}"#;
        assert!(matches!(
            parse_import(text, None),
            Err(ImportError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[rstest]
    fn it_should_backfill_missing_login_ids(source_owner: Owner, destination: Owner) {
        let mut source = source_owner;
        source.properties[0].tenants[0].login_id = None;
        source.properties[0].tenants[1].login_id = Some("T-KEEP".into());

        let merged = merge_import(&destination, ImportSource::Owner(source), counter());

        let tenants = &merged.properties[0].tenants;
        assert_eq!(tenants[0].login_id.as_deref(), Some("T-0001"));
        assert_eq!(tenants[1].login_id.as_deref(), Some("T-KEEP"));
    }

    #[rstest]
    fn it_should_keep_destination_properties_missing_from_the_import(source_owner: Owner) {
        let destination = OwnerBuilder::new("owner-dst")
            .property(PropertyBuilder::new("p0").build())
            .property(PropertyBuilder::new("p1").name("Stale").build())
            .active("p0")
            .build();

        let merged = merge_import(&destination, ImportSource::Owner(source_owner), counter());

        let ids: Vec<&str> = merged.properties.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p0", "p1"]);
        assert_ne!(merged.properties[1].name, "Stale");
        assert_eq!(merged.active_property_id.as_deref(), Some("p0"));
    }
}
