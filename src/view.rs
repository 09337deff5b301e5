//! A tabbed inventory view: the public render trigger.

use crate::config::{AppConfig, OrderingConfig};
use crate::engine::{ExpansionStore, JsonFileBackend, RenderPass, SearchQuery, TreeRenderer};
use crate::error::Result;
use crate::host::{HostAction, MemoryHost, WidgetHost, WidgetId};
use crate::model::{DataSource, Entity, EntityKind};
use crate::tabs::{TabContext, TabKind};

/// What the caller should do after an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Expansion changed; render the tab again
    Rerender,
    /// A row was clicked
    Activated { entity_id: u64, kind: EntityKind },
    /// Nothing happened
    Ignored,
}

/// One inventory window: a data source, the renderer and the current tab
/// and query.
#[derive(Debug)]
pub struct TabView<D> {
    source: D,
    renderer: TreeRenderer,
    ordering: OrderingConfig,
    tab: TabKind,
    query: SearchQuery,
    last_pass: Option<RenderPass>,
}

impl<D: DataSource> TabView<D> {
    /// Build a view from config, opening the expansion state file if
    /// persistence is on.
    pub fn new(source: D, config: &AppConfig) -> Self {
        let store = match config.state.resolved_path() {
            Ok(Some(path)) => {
                ExpansionStore::new(Box::new(JsonFileBackend::open_or_default(&path)))
            }
            Ok(None) => ExpansionStore::in_memory(),
            Err(e) => {
                tracing::warn!("{e}; expansion state will not persist");
                ExpansionStore::in_memory()
            }
        };
        Self::with_store(source, config, store)
    }

    pub fn with_store(source: D, config: &AppConfig, store: ExpansionStore) -> Self {
        Self {
            source,
            renderer: TreeRenderer::new(store, config.layout, config.search_filter()),
            ordering: config.ordering.clone(),
            tab: TabKind::default(),
            query: SearchQuery::empty(),
            last_pass: None,
        }
    }

    /// Render the current tab into `container` and return the content
    /// height.
    ///
    /// Called whenever the tab becomes visible, data changes, a query is
    /// committed or a header is toggled.
    pub fn render_tab<H>(&mut self, host: &mut H, container: WidgetId) -> u32
    where
        H: WidgetHost + ?Sized,
    {
        let entities = self.source.entities(self.tab.scope());
        let ctx = TabContext {
            characters: self.source.characters(),
            ordering: &self.ordering,
        };
        let root = self.tab.builder(&ctx).build(&entities);
        let pass = self.renderer.render(
            host,
            container,
            &root,
            &self.query,
            self.tab.populator(),
        );
        let height = pass.content_height;
        self.last_pass = Some(pass);
        height
    }

    /// Apply an already-debounced query. Returns whether it changed.
    pub fn set_query(&mut self, raw: &str) -> bool {
        let query = SearchQuery::new(raw);
        if query.needle() == self.query.needle() {
            self.query = query;
            return false;
        }
        tracing::debug!(query = query.display(), "search committed");
        self.query = query;
        true
    }

    /// Switch tabs. Returns whether the tab changed.
    pub fn switch_tab(&mut self, tab: TabKind) -> bool {
        if tab == self.tab {
            return false;
        }
        self.tab = tab;
        true
    }

    /// Resolve a click on a memory host widget.
    pub fn click(&mut self, host: &MemoryHost, widget: WidgetId) -> ViewEvent {
        host.dispatch_click(widget)
            .map_or(ViewEvent::Ignored, |action| self.handle_action(&action))
    }

    /// Act on a host action.
    pub fn handle_action(&mut self, action: &HostAction) -> ViewEvent {
        match action {
            HostAction::Toggle(key) => {
                self.renderer.handle_toggle(key);
                if self.renderer.expansion_mut().take_render_request() {
                    ViewEvent::Rerender
                } else {
                    ViewEvent::Ignored
                }
            }
            HostAction::Activate { entity_id, kind } => ViewEvent::Activated {
                entity_id: *entity_id,
                kind: *kind,
            },
        }
    }

    /// Look up an entity of the current tab.
    pub fn entity(&self, id: u64, kind: EntityKind) -> Option<Entity> {
        self.source
            .entities(self.tab.scope())
            .into_iter()
            .find(|e| e.id == id && e.kind == kind)
    }

    /// Persist expansion state.
    pub fn flush(&mut self) -> Result<()> {
        self.renderer.expansion_mut().flush()
    }

    pub const fn tab(&self) -> TabKind {
        self.tab
    }

    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub const fn source(&self) -> &D {
        &self.source
    }

    pub const fn renderer(&self) -> &TreeRenderer {
        &self.renderer
    }

    /// Outcome of the most recent render.
    pub const fn last_pass(&self) -> Option<&RenderPass> {
        self.last_pass.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EmittedKind;
    use crate::model::{Character, Snapshot, tags};

    fn snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.characters = vec![Character::new("Alice", "Realm").online(true)];
        snapshot.currencies = vec![
            Entity::new(1, "Valorstones", EntityKind::Currency)
                .with_owner("Alice-Realm")
                .with_tag(tags::EXPANSION, "The War Within")
                .with_icon("valor"),
        ];
        snapshot.items = vec![
            Entity::new(2589, "Linen Cloth", EntityKind::Item)
                .with_owner("Alice-Realm")
                .with_tag(tags::TYPE, "Tradeskill")
                .with_quantity(20)
                .with_icon("cloth"),
        ];
        snapshot
    }

    fn view() -> TabView<Snapshot> {
        let config = AppConfig::builder().ephemeral_state().build();
        TabView::new(snapshot(), &config)
    }

    #[test]
    fn test_render_and_toggle_via_click() {
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut view = view();

        let expanded_height = view.render_tab(&mut host, container);
        let alice = view
            .last_pass()
            .and_then(|p| p.find("Alice-Realm"))
            .map(|n| n.widget)
            .expect("character header");

        assert_eq!(view.click(&host, alice), ViewEvent::Rerender);
        let collapsed_height = view.render_tab(&mut host, container);
        assert!(collapsed_height < expanded_height);
        assert_eq!(host.lines(container), vec!["[+] Alice (1)"]);
    }

    #[test]
    fn test_switch_tab_and_query() {
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut view = view();

        assert!(view.switch_tab(TabKind::Items));
        assert!(!view.switch_tab(TabKind::Items));
        assert!(view.set_query("linen"));
        assert!(!view.set_query(" LINEN "));
        view.render_tab(&mut host, container);

        let pass = view.last_pass().expect("rendered");
        assert_eq!(pass.row_count(), 1);
        assert!(pass.nodes.iter().all(|n| n.kind != EmittedKind::Message));
    }

    #[test]
    fn test_row_click_activates() {
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut view = view();
        view.render_tab(&mut host, container);

        let row = view
            .last_pass()
            .and_then(|p| p.rows().next())
            .map(|n| n.widget)
            .expect("one row");
        let event = view.click(&host, row);
        assert_eq!(
            event,
            ViewEvent::Activated {
                entity_id: 1,
                kind: EntityKind::Currency
            }
        );
        assert_eq!(
            view.entity(1, EntityKind::Currency).map(|e| e.name),
            Some("Valorstones".to_string())
        );
    }

    #[test]
    fn test_empty_tab() {
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut view = view();
        view.switch_tab(TabKind::Reputation);
        view.render_tab(&mut host, container);
        assert_eq!(host.lines(container), vec!["Nothing to show yet"]);
    }
}
