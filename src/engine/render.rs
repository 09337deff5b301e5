//! Tree rendering: walk a group tree and emit widgets through the host.
//!
//! One pass releases everything the previous pass emitted, then walks the
//! tree depth-first in sibling order. Invisible groups are skipped without
//! creating a widget; collapsed groups emit their header only. Rows come
//! from the [`WidgetPool`], headers and messages are one-off frames.

use super::expansion::ExpansionStore;
use super::group::{GroupChildren, GroupNode};
use super::layout::{LayoutCursor, LayoutMetrics, NodeKind};
use super::pool::WidgetPool;
use super::search::{MatchSet, SearchFilter, SearchQuery};
use crate::host::{
    Binding, FrameRole, HeaderContent, RowContent, RowKind, WidgetHost, WidgetId,
};
use crate::model::Entity;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Icon shown for entities without one.
pub const PLACEHOLDER_ICON: &str = "inv_misc_questionmark";

/// Title shown for entities without a name.
pub const PLACEHOLDER_NAME: &str = "Unknown";

/// Turns entities into row content for one tab.
pub trait RowPopulator {
    /// Row variant used for every leaf of this tab.
    fn row_kind(&self) -> RowKind;

    /// Visible fields for `entity`. Leave `icon` as `None` or `title` empty
    /// when the entity lacks them; the renderer substitutes placeholders.
    fn populate(&self, entity: &Entity) -> RowContent;
}

/// The two user-visible empty states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EmptyState {
    /// The data source had nothing for this tab
    NoData,
    /// A search matched nothing
    NoResults { query: String },
}

impl EmptyState {
    pub fn message(&self) -> String {
        match self {
            Self::NoData => "Nothing to show yet".to_string(),
            Self::NoResults { query } => format!("No results for '{query}'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmittedKind {
    Header,
    Row,
    Message,
}

/// One node emitted during a pass, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedNode {
    /// Group key for headers, `<group key>#<entity id>` for rows
    pub key: String,
    pub kind: EmittedKind,
    pub label: String,
    pub depth: usize,
    pub offset: u32,
    /// Leaves below a header (matching leaves while searching)
    pub count: usize,
    pub expanded: bool,
    #[serde(skip)]
    pub widget: WidgetId,
}

/// Outcome of a render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderPass {
    /// Final cursor offset, used to size the scroll container
    pub content_height: u32,
    pub nodes: Vec<EmittedNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<EmptyState>,
}

impl RenderPass {
    pub fn keys(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.key.as_str()).collect()
    }

    pub fn headers(&self) -> impl Iterator<Item = &EmittedNode> {
        self.nodes.iter().filter(|n| n.kind == EmittedKind::Header)
    }

    pub fn rows(&self) -> impl Iterator<Item = &EmittedNode> {
        self.nodes.iter().filter(|n| n.kind == EmittedKind::Row)
    }

    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    pub fn find(&self, key: &str) -> Option<&EmittedNode> {
        self.nodes.iter().find(|n| n.key == key)
    }
}

/// Per-pass walk state.
struct PassState<'q> {
    container: WidgetId,
    cursor: LayoutCursor,
    query: &'q SearchQuery,
    matches: MatchSet,
    nodes: Vec<EmittedNode>,
    /// Fields already reported missing this pass
    missing: HashSet<&'static str>,
}

/// Renders group trees into a host container.
///
/// Owns the row pool and the expansion store for the lifetime of the view.
#[derive(Debug)]
pub struct TreeRenderer {
    pool: WidgetPool,
    expansion: ExpansionStore,
    metrics: LayoutMetrics,
    filter: SearchFilter,
    /// Default expansion of every header emitted by the last pass
    defaults: HashMap<String, bool>,
}

impl TreeRenderer {
    pub fn new(expansion: ExpansionStore, metrics: LayoutMetrics, filter: SearchFilter) -> Self {
        Self {
            pool: WidgetPool::new(),
            expansion,
            metrics,
            filter,
            defaults: HashMap::new(),
        }
    }

    /// Render `root` into `container`, replacing whatever was there.
    ///
    /// Never fails: entities with missing fields get placeholders and empty
    /// groups are left out.
    pub fn render<H, P>(
        &mut self,
        host: &mut H,
        container: WidgetId,
        root: &GroupNode<'_>,
        query: &SearchQuery,
        populator: &P,
    ) -> RenderPass
    where
        H: WidgetHost + ?Sized,
        P: RowPopulator + ?Sized,
    {
        let released = self.pool.release_all(host, container);
        self.defaults.clear();

        let mut state = PassState {
            container,
            cursor: LayoutCursor::new(self.metrics),
            query,
            matches: self.filter.annotate_tree(root, query),
            nodes: Vec::new(),
            missing: HashSet::new(),
        };

        let empty = if root.leaf_count() == 0 {
            Some(EmptyState::NoData)
        } else if state.matches.is_no_results() {
            Some(EmptyState::NoResults {
                query: query.display().to_string(),
            })
        } else {
            None
        };

        match &empty {
            Some(empty) => Self::emit_message(host, &mut state, empty),
            None => self.emit_children(host, &mut state, root, 0, populator),
        }

        let pass = RenderPass {
            content_height: state.cursor.content_height(),
            nodes: state.nodes,
            empty,
        };
        tracing::debug!(
            container = %container,
            released,
            headers = pass.headers().count(),
            rows = pass.row_count(),
            height = pass.content_height,
            searching = state.matches.is_active(),
            "render pass complete"
        );
        pass
    }

    /// Flip the expansion flag for a header emitted by the last pass.
    ///
    /// Returns the new value, or `None` for keys the last pass did not
    /// emit, which are ignored.
    pub fn handle_toggle(&mut self, key: &str) -> Option<bool> {
        let Some(default) = self.defaults.get(key).copied() else {
            tracing::debug!(key, "ignoring toggle for unknown header");
            return None;
        };
        Some(self.expansion.toggle(key, default))
    }

    pub const fn pool(&self) -> &WidgetPool {
        &self.pool
    }

    pub const fn expansion(&self) -> &ExpansionStore {
        &self.expansion
    }

    pub const fn expansion_mut(&mut self) -> &mut ExpansionStore {
        &mut self.expansion
    }

    fn emit_children<H, P>(
        &mut self,
        host: &mut H,
        state: &mut PassState<'_>,
        node: &GroupNode<'_>,
        depth: usize,
        populator: &P,
    ) where
        H: WidgetHost + ?Sized,
        P: RowPopulator + ?Sized,
    {
        match &node.children {
            GroupChildren::Groups(groups) => {
                for group in groups {
                    self.emit_group(host, state, group, depth, populator);
                }
            }
            GroupChildren::Leaves(leaves) => {
                for entity in leaves {
                    if state.matches.is_active() && !self.filter.matches(entity, state.query) {
                        continue;
                    }
                    self.emit_row(host, state, &node.key, entity, depth, populator);
                }
            }
        }
    }

    fn emit_group<H, P>(
        &mut self,
        host: &mut H,
        state: &mut PassState<'_>,
        group: &GroupNode<'_>,
        depth: usize,
        populator: &P,
    ) where
        H: WidgetHost + ?Sized,
        P: RowPopulator + ?Sized,
    {
        if !state.matches.contains(&group.key) {
            return;
        }
        let count = if state.matches.is_active() {
            state
                .matches
                .visible_count(&group.key)
                .unwrap_or_else(|| group.leaf_count())
        } else {
            group.leaf_count()
        };
        if count == 0 {
            return;
        }

        let expanded = self.expansion.force_expand_if_searching(
            &group.key,
            group.default_expanded,
            &state.matches,
        );
        self.defaults
            .insert(group.key.clone(), group.default_expanded);

        if group.synthetic {
            state.cursor.gap();
        }
        let offset = state.cursor.place(NodeKind::Header);
        let id = host.create_frame(FrameRole::Header);
        host.attach(id, state.container);
        host.place(id, offset, self.metrics.indent(depth));
        host.set_header_content(
            id,
            &HeaderContent {
                label: group.label.clone(),
                count,
                expanded,
                synthetic: group.synthetic,
            },
        );
        host.bind(
            id,
            Binding::Toggle {
                key: group.key.clone(),
            },
        );
        host.set_visible(id, true);

        state.nodes.push(EmittedNode {
            key: group.key.clone(),
            kind: EmittedKind::Header,
            label: group.label.clone(),
            depth,
            offset,
            count,
            expanded,
            widget: id,
        });

        if expanded {
            self.emit_children(host, state, group, depth + 1, populator);
        }
    }

    fn emit_row<H, P>(
        &mut self,
        host: &mut H,
        state: &mut PassState<'_>,
        parent_key: &str,
        entity: &Entity,
        depth: usize,
        populator: &P,
    ) where
        H: WidgetHost + ?Sized,
        P: RowPopulator + ?Sized,
    {
        let kind = populator.row_kind();
        let mut content = populator.populate(entity);
        if content.icon.as_deref().is_none_or(str::is_empty) {
            note_missing(state, "icon", entity);
            content.icon = Some(PLACEHOLDER_ICON.to_string());
            content.dimmed = true;
        }
        if content.title.trim().is_empty() {
            note_missing(state, "name", entity);
            content.title = PLACEHOLDER_NAME.to_string();
            content.dimmed = true;
        }

        let offset = state.cursor.place(NodeKind::Row);
        let id = self
            .pool
            .acquire(kind, state.container, || host.create_row(kind));
        host.attach(id, state.container);
        host.place(id, offset, self.metrics.indent(depth));
        host.set_row_content(id, &content);
        if !content.tooltip.is_empty() {
            host.bind(
                id,
                Binding::Tooltip {
                    lines: content.tooltip.clone(),
                },
            );
        }
        host.bind(
            id,
            Binding::Activate {
                entity_id: entity.id,
                kind: entity.kind,
            },
        );
        host.set_visible(id, true);

        state.nodes.push(EmittedNode {
            key: format!("{parent_key}#{}", entity.id),
            kind: EmittedKind::Row,
            label: content.title,
            depth,
            offset,
            count: 0,
            expanded: false,
            widget: id,
        });
    }

    fn emit_message<H>(host: &mut H, state: &mut PassState<'_>, empty: &EmptyState)
    where
        H: WidgetHost + ?Sized,
    {
        let message = empty.message();
        let offset = state.cursor.place(NodeKind::Row);
        let id = host.create_frame(FrameRole::Message);
        host.attach(id, state.container);
        host.place(id, offset, 0);
        host.set_row_content(
            id,
            &RowContent {
                title: message.clone(),
                dimmed: true,
                ..RowContent::default()
            },
        );
        host.set_visible(id, true);

        state.nodes.push(EmittedNode {
            key: String::new(),
            kind: EmittedKind::Message,
            label: message,
            depth: 0,
            offset,
            count: 0,
            expanded: false,
            widget: id,
        });
    }
}

fn note_missing(state: &mut PassState<'_>, field: &'static str, entity: &Entity) {
    if state.missing.insert(field) {
        tracing::debug!(
            field,
            entity = entity.id,
            name = %entity.name,
            "entity missing field, using placeholder"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::group::{GroupBuilder, GroupLevel, WrapRule};
    use crate::host::MemoryHost;
    use crate::model::{EntityKind, tags};

    struct Plain;

    impl RowPopulator for Plain {
        fn row_kind(&self) -> RowKind {
            RowKind::Currency
        }

        fn populate(&self, entity: &Entity) -> RowContent {
            RowContent {
                title: entity.name.clone(),
                detail: entity.quantity.to_string(),
                icon: entity.icon.clone(),
                ..RowContent::default()
            }
        }
    }

    fn metrics() -> LayoutMetrics {
        LayoutMetrics {
            top_padding: 10,
            row_height: 20,
            row_spacing: 2,
            header_height: 24,
            header_spacing: 4,
            section_gap: 8,
            indent_width: 12,
        }
    }

    fn entities() -> Vec<Entity> {
        let alice = |id, name: &str| {
            Entity::new(id, name, EntityKind::Currency)
                .with_owner("Alice-Realm")
                .with_tag(tags::EXPANSION, "War Within")
                .with_icon("coin")
        };
        vec![
            alice(1, "Valorstones"),
            alice(2, "Kej"),
            alice(3, "Resonance Crystals"),
            Entity::new(4, "Legionfall War Supplies", EntityKind::Currency)
                .with_owner("Bob-Realm")
                .with_tag(tags::EXPANSION, "Legion")
                .with_icon("shard"),
        ]
    }

    fn builder<'f>() -> GroupBuilder<'f> {
        GroupBuilder::new(vec![
            GroupLevel::unkeyed(|e: &Entity| e.owner.clone())
                .labelled(|key| key.split('-').next().unwrap_or(key).to_string())
                .expanded_when(|key| key == "Alice-Realm"),
            GroupLevel::by_tag("header", tags::EXPANSION),
        ])
    }

    fn renderer() -> TreeRenderer {
        TreeRenderer::new(ExpansionStore::in_memory(), metrics(), SearchFilter::default())
    }

    #[test]
    fn test_collapsed_character_emits_header_only() {
        let entities = entities();
        let root = builder().build(&entities);
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut renderer = renderer();

        let pass = renderer.render(&mut host, container, &root, &SearchQuery::empty(), &Plain);

        assert_eq!(
            pass.keys(),
            vec![
                "Alice-Realm",
                "Alice-Realm-header-War Within",
                "Alice-Realm-header-War Within#2",
                "Alice-Realm-header-War Within#3",
                "Alice-Realm-header-War Within#1",
                "Bob-Realm",
            ]
        );
        let m = metrics();
        assert_eq!(
            pass.content_height,
            m.top_padding + 2 * m.increment(NodeKind::Header) + 3 * m.increment(NodeKind::Row)
        );
        let bob = pass.find("Bob-Realm").expect("bob header");
        assert!(!bob.expanded);
        assert_eq!(bob.count, 1);
        assert!(pass.empty.is_none());
    }

    #[test]
    fn test_search_forces_ancestors_open() {
        let entities = entities();
        let root = builder().build(&entities);
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut renderer = renderer();

        let pass = renderer.render(&mut host, container, &root, &"legion".into(), &Plain);
        assert_eq!(
            pass.keys(),
            vec!["Bob-Realm", "Bob-Realm-header-Legion", "Bob-Realm-header-Legion#4"]
        );
        assert!(pass.headers().all(|h| h.expanded));
        assert!(!renderer.expansion().is_expanded("Bob-Realm", false));
    }

    #[test]
    fn test_empty_states() {
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut renderer = renderer();

        let nothing: Vec<Entity> = Vec::new();
        let root = builder().build(&nothing);
        let pass = renderer.render(&mut host, container, &root, &SearchQuery::empty(), &Plain);
        assert_eq!(pass.empty, Some(EmptyState::NoData));
        assert_eq!(pass.nodes.len(), 1);

        let entities = entities();
        let root = builder().build(&entities);
        let pass = renderer.render(&mut host, container, &root, &" zzz ".into(), &Plain);
        assert_eq!(
            pass.empty,
            Some(EmptyState::NoResults {
                query: "zzz".into()
            })
        );
        assert_eq!(pass.nodes.len(), 1);
        assert_eq!(pass.nodes[0].kind, EmittedKind::Message);
        assert_eq!(host.lines(container), vec!["No results for 'zzz'"]);
    }

    #[test]
    fn test_toggle_round_trip() {
        let entities = entities();
        let root = builder().build(&entities);
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut renderer = renderer();
        renderer.render(&mut host, container, &root, &SearchQuery::empty(), &Plain);

        assert_eq!(renderer.handle_toggle("Bob-Realm"), Some(true));
        assert!(renderer.expansion_mut().take_render_request());
        assert_eq!(renderer.handle_toggle("Nobody-Realm"), None);

        let pass = renderer.render(&mut host, container, &root, &SearchQuery::empty(), &Plain);
        assert!(pass.find("Bob-Realm-header-Legion#4").is_some());
    }

    #[test]
    fn test_repeated_passes_reuse_rows() {
        let entities = entities();
        let root = builder().build(&entities);
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut renderer = renderer();

        let first = renderer.render(&mut host, container, &root, &SearchQuery::empty(), &Plain);
        for _ in 0..5 {
            let again = renderer.render(&mut host, container, &root, &SearchQuery::empty(), &Plain);
            assert_eq!(again.keys(), first.keys());
            assert_eq!(again.content_height, first.content_height);
        }
        assert_eq!(host.rows_created(), 3);
        assert_eq!(renderer.pool().stats(RowKind::Currency).active, 3);
    }

    #[test]
    fn test_missing_icon_is_dimmed_placeholder() {
        let entities = vec![Entity::new(7, "", EntityKind::Currency).with_owner("Alice-Realm")];
        let root = GroupBuilder::new(Vec::new()).build(&entities);
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut renderer = renderer();

        let pass = renderer.render(&mut host, container, &root, &SearchQuery::empty(), &Plain);
        let row = pass.rows().next().expect("one row");
        let widget = host.widget(row.widget).expect("row widget");
        match &widget.content {
            crate::host::WidgetContent::Row(content) => {
                assert_eq!(content.icon.as_deref(), Some(PLACEHOLDER_ICON));
                assert_eq!(content.title, PLACEHOLDER_NAME);
                assert!(content.dimmed);
            }
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn test_gap_before_wrapper() {
        let entities = vec![
            Entity::new(1, "Kej", EntityKind::Currency)
                .with_tag(tags::CATEGORY, "Dungeon")
                .with_icon("x"),
            Entity::new(2, "Flightstones", EntityKind::Currency)
                .with_tag(tags::CATEGORY, "Season 2")
                .with_icon("x"),
        ];
        let root = GroupBuilder::new(vec![
            GroupLevel::by_tag("category", tags::CATEGORY)
                .expanded_when(|_| false)
                .wrap(WrapRule::new("Season 2", "season", "Current Season")),
        ])
        .build(&entities);
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut renderer = renderer();

        let pass = renderer.render(&mut host, container, &root, &SearchQuery::empty(), &Plain);
        let m = metrics();
        assert_eq!(pass.keys(), vec!["category-Dungeon", "season"]);
        assert_eq!(
            pass.content_height,
            m.top_padding + m.increment(NodeKind::Header) + m.section_gap
        );
    }
}
