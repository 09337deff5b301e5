//! Property-based tests for the rendering engine.
//!
//! Random inventories are grouped and rendered; the invariants checked here
//! must hold for every input.

use proptest::prelude::*;
use std::collections::HashSet;
use vaultview::{
    Entity, EntityKind, ExpansionStore, GroupBuilder, GroupLevel, LayoutMetrics, MemoryHost,
    SearchFilter, SearchQuery, TreeRenderer, WidgetHost,
    engine::{EmittedKind, RowPopulator, SiblingOrder},
    host::{RowContent, RowKind},
    model::tags,
};

struct NameRows;

impl RowPopulator for NameRows {
    fn row_kind(&self) -> RowKind {
        RowKind::Item
    }

    fn populate(&self, entity: &Entity) -> RowContent {
        RowContent {
            title: entity.name.clone(),
            icon: Some("icon".to_string()),
            ..RowContent::default()
        }
    }
}

/// (owner index, type index, name) triples; ids are assigned by position.
fn inventory() -> impl Strategy<Value = Vec<Entity>> {
    prop::collection::vec((0usize..3, 0usize..4, "[a-z]{1,8}"), 0..40).prop_map(|specs| {
        let owners = ["Alice-Realm", "Bob-Realm", "Cara-Realm"];
        let types = ["Armor", "Weapon", "Other", ""];
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (owner, kind, name))| {
                Entity::new(i as u64, name, EntityKind::Item)
                    .with_owner(owners[owner])
                    .with_tag(tags::TYPE, types[kind])
            })
            .collect()
    })
}

fn builder<'f>() -> GroupBuilder<'f> {
    GroupBuilder::new(vec![
        GroupLevel::unkeyed(|e: &Entity| e.owner.clone()).expanded_when(|k| k == "Alice-Realm"),
        GroupLevel::by_tag("type", tags::TYPE).ordered(SiblingOrder::Priority(vec![
            "Weapon".to_string(),
            "Armor".to_string(),
        ])),
    ])
}

fn renderer() -> TreeRenderer {
    TreeRenderer::new(
        ExpansionStore::in_memory(),
        LayoutMetrics::default(),
        SearchFilter::default(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn grouping_partitions_entities(entities in inventory()) {
        let root = builder().build(&entities);
        let leaves = root.leaves();
        prop_assert_eq!(leaves.len(), entities.len());
        prop_assert_eq!(root.leaf_count(), entities.len());

        let ids: HashSet<u64> = leaves.iter().map(|e| e.id).collect();
        prop_assert_eq!(ids.len(), entities.len());

        let keys = root.keys();
        let unique: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len(), "group keys must be unique");
    }

    #[test]
    fn search_shows_only_matches_under_open_ancestors(
        entities in inventory(),
        needle in "[a-z]{1,2}",
    ) {
        let root = builder().build(&entities);
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut renderer = renderer();
        let query = SearchQuery::new(needle.clone());
        let pass = renderer.render(&mut host, container, &root, &query, &NameRows);

        let expected = entities.iter().filter(|e| e.name.contains(&needle)).count();
        prop_assert_eq!(pass.row_count(), expected);
        for row in pass.rows() {
            prop_assert!(row.label.contains(&needle));
        }
        for header in pass.headers() {
            prop_assert!(header.expanded);
            prop_assert!(header.count > 0);
        }
        if expected == 0 {
            prop_assert_eq!(pass.nodes.len(), 1);
            prop_assert_eq!(pass.nodes[0].kind, EmittedKind::Message);
        }
    }

    #[test]
    fn render_is_deterministic(entities in inventory(), toggles in prop::collection::vec(0usize..3, 0..4)) {
        let root = builder().build(&entities);
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut renderer = renderer();
        let owners = ["Alice-Realm", "Bob-Realm", "Cara-Realm"];
        renderer.render(&mut host, container, &root, &SearchQuery::empty(), &NameRows);
        for t in toggles {
            renderer.handle_toggle(owners[t]);
        }

        let first = renderer.render(&mut host, container, &root, &SearchQuery::empty(), &NameRows);
        let second = renderer.render(&mut host, container, &root, &SearchQuery::empty(), &NameRows);
        prop_assert_eq!(first.keys(), second.keys());
        prop_assert_eq!(first.content_height, second.content_height);
    }

    #[test]
    fn pool_construction_is_bounded(
        entities in inventory(),
        needles in prop::collection::vec("[a-z]{0,1}", 1..6),
    ) {
        let root = builder().build(&entities);
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut renderer = renderer();

        let mut peak = 0;
        for needle in needles {
            let query = SearchQuery::new(needle);
            let pass = renderer.render(&mut host, container, &root, &query, &NameRows);
            peak = peak.max(pass.row_count());
            prop_assert!(host.rows_created() <= peak);
        }
    }
}
