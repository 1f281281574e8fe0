//! Snapshot persistence round-trips through the JSON backend.

mod common;

use common::{date, monthly_enrollment, roster_with_member};
use serde_json::Value;
use tempfile::TempDir;

use studio_core::core::{FreezeService, FreezeTargets, PaymentService};
use studio_core::roster::PaymentKind;
use studio_core::storage::{JsonStorage, StorageBackend};

#[test]
fn populated_roster_survives_a_round_trip() {
    let (mut roster, member_id) = roster_with_member("Dana");
    let enrollment_id = monthly_enrollment(&mut roster, member_id, date(2024, 1, 1));
    PaymentService::record(
        &mut roster,
        enrollment_id,
        45.0,
        date(2024, 1, 2),
        date(2024, 1, 1),
        PaymentKind::Monthly,
    )
    .unwrap();
    FreezeService::freeze(
        &mut roster,
        member_id,
        FreezeTargets::AllActive,
        date(2024, 2, 1),
        Some(date(2024, 2, 29)),
        Some("injury"),
        date(2024, 2, 1),
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let store = JsonStorage::new(Some(dir.path().to_path_buf())).unwrap();
    store.save(&roster, "studio").unwrap();
    let loaded = store.load("studio").unwrap();

    let original: Value = serde_json::to_value(&roster).unwrap();
    let reloaded: Value = serde_json::to_value(&loaded).unwrap();
    assert_eq!(original, reloaded);
}

#[test]
fn save_to_path_writes_loadable_json() {
    let (roster, _) = roster_with_member("Dana");
    let dir = TempDir::new().unwrap();
    let store = JsonStorage::new(Some(dir.path().to_path_buf())).unwrap();

    let path = dir.path().join("explicit.json");
    store.save_to_path(&roster, &path).unwrap();
    let loaded = store.load_from_path(&path).unwrap();
    assert_eq!(loaded.id, roster.id);
    assert_eq!(loaded.schema_version, roster.schema_version);
}
