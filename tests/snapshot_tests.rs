//! Snapshot loading and validation tests.

use std::path::{Path, PathBuf};
use vaultview::{
    DataSource, EntityKind, MemoryHost, Snapshot, TabKind, TabView, VaultError, WidgetHost,
    config::AppConfig,
    model::{Scope, tags},
};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

#[test]
fn test_load_fixture() {
    let snapshot = Snapshot::load(&fixture_path("snapshot.json")).expect("fixture loads");

    assert_eq!(snapshot.characters.len(), 2);
    assert_eq!(snapshot.entity_count(), 9);
    assert!(snapshot.captured_at.is_some());

    let alice = snapshot.character("Alice-Silvermoon").expect("alice");
    assert!(alice.online);
    assert_eq!(alice.class.as_deref(), Some("Mage"));

    let storage = snapshot.entities(Scope::Storage);
    assert_eq!(storage.len(), 1);
    assert_eq!(storage[0].owner, None);
    assert_eq!(storage[0].tag(tags::LOCATION), Some("Warband Bank"));
}

#[test]
fn test_reputation_progress_parsed() {
    let snapshot = Snapshot::load(&fixture_path("snapshot.json")).expect("fixture loads");
    let reps = snapshot.entities(Scope::Reputations);

    let dornogal = reps.iter().find(|e| e.id == 2590).expect("dornogal");
    let progress = dornogal.reputation.expect("progress");
    assert!(progress.is_base_maxed());

    let farondis = reps.iter().find(|e| e.id == 1900).expect("farondis");
    let paragon = farondis.reputation.and_then(|r| r.paragon).expect("paragon");
    assert!(paragon.reward_pending);
}

#[test]
fn test_every_tab_renders_fixture() {
    let snapshot = Snapshot::load(&fixture_path("snapshot.json")).expect("fixture loads");
    let config = AppConfig::builder().ephemeral_state().build();
    let mut view = TabView::new(snapshot, &config);
    let mut host = MemoryHost::new();
    let container = host.create_container();

    for tab in TabKind::ALL {
        view.switch_tab(tab);
        let height = view.render_tab(&mut host, container);
        let pass = view.last_pass().expect("rendered");
        assert!(pass.empty.is_none(), "{tab} should have data");
        assert!(height > 0, "{tab} should have height");
    }
}

#[test]
fn test_current_season_is_wrapped() {
    let snapshot = Snapshot::load(&fixture_path("snapshot.json")).expect("fixture loads");
    let config = AppConfig::builder().ephemeral_state().build();
    let mut view = TabView::new(snapshot, &config);
    let mut host = MemoryHost::new();
    let container = host.create_container();
    view.render_tab(&mut host, container);

    let pass = view.last_pass().expect("rendered");
    let keys = pass.keys();
    let wrapper = "Alice-Silvermoon-header-The War Within-season";
    let inner = "Alice-Silvermoon-header-The War Within-season-category-Season 2";
    let wrapper_at = keys.iter().position(|k| *k == wrapper).expect("wrapper");
    let inner_at = keys.iter().position(|k| *k == inner).expect("inner");
    assert_eq!(inner_at, wrapper_at + 1);

    // The wrapper follows every regular category of its expansion.
    let misc = keys
        .iter()
        .position(|k| *k == "Alice-Silvermoon-header-The War Within-category-Miscellaneous")
        .expect("misc");
    assert!(misc < wrapper_at);
}

#[test]
fn test_malformed_json_is_typed_error() {
    let err = Snapshot::from_json("{ \"characters\": [ }").unwrap_err();
    assert!(matches!(err, VaultError::Snapshot { .. }));
}

#[test]
fn test_duplicate_entity_rejected() {
    let json = r#"{
        "characters": [{ "key": "A-R", "name": "A", "realm": "R" }],
        "items": [
            { "id": 1, "name": "x", "kind": "item", "owner": "A-R" },
            { "id": 1, "name": "x", "kind": "item", "owner": "A-R" }
        ]
    }"#;
    let err = Snapshot::from_json(json).unwrap_err();
    assert!(err.to_string().contains("items"));
}

#[test]
fn test_same_id_for_different_owners_is_fine() {
    let json = r#"{
        "characters": [
            { "key": "A-R", "name": "A", "realm": "R" },
            { "key": "B-R", "name": "B", "realm": "R" }
        ],
        "items": [
            { "id": 1, "name": "x", "kind": "item", "owner": "A-R" },
            { "id": 1, "name": "x", "kind": "item", "owner": "B-R" }
        ]
    }"#;
    let snapshot = Snapshot::from_json(json).expect("valid");
    assert_eq!(snapshot.items.len(), 2);
    assert!(snapshot.items.iter().all(|e| e.kind == EntityKind::Item));
}

#[test]
fn test_unknown_owner_is_kept() {
    let json = r#"{
        "currencies": [{ "id": 1, "name": "x", "kind": "currency", "owner": "Ghost-R" }]
    }"#;
    let snapshot = Snapshot::from_json(json).expect("kept");
    assert_eq!(snapshot.currencies.len(), 1);
}

#[test]
fn test_future_version_rejected() {
    let err = Snapshot::from_json(r#"{ "version": 99 }"#).unwrap_err();
    assert!(err.to_string().contains("version"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Snapshot::load(Path::new("/nonexistent/snapshot.json")).unwrap_err();
    assert!(matches!(err, VaultError::Io { .. }));
}
