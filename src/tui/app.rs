//! Viewer application state.

use super::search::SearchInput;
use crate::config::{AppConfig, TuiPreferences};
use crate::host::{MemoryHost, WidgetHost, WidgetId};
use crate::model::{DataSource, Snapshot};
use crate::tabs::TabKind;
use crate::view::{TabView, ViewEvent};
use std::time::{Duration, Instant};

/// State of the interactive viewer.
#[derive(Debug)]
pub struct ViewerApp {
    pub(crate) view: TabView<Snapshot>,
    pub(crate) host: MemoryHost,
    pub(crate) container: WidgetId,
    pub(crate) search: SearchInput,
    /// Index into the visible lines
    pub(crate) selected: usize,
    /// First visible line
    pub(crate) scroll: usize,
    pub(crate) status: Option<String>,
    pub(crate) should_quit: bool,
    pub(crate) show_help: bool,
    pub(crate) mouse_enabled: bool,
    pub(crate) tick_rate: Duration,
    /// Screen row of the first list line, set while drawing
    pub(crate) list_top: u16,
    needs_render: bool,
}

impl ViewerApp {
    pub fn new(snapshot: Snapshot, config: &AppConfig) -> Self {
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let mut view = TabView::new(snapshot, config);
        if let Some(tab) = TuiPreferences::load()
            .last_tab
            .as_deref()
            .and_then(TabKind::from_name)
        {
            view.switch_tab(tab);
        }

        Self {
            view,
            host,
            container,
            search: SearchInput::new(Duration::from_millis(config.search.debounce_ms)),
            selected: 0,
            scroll: 0,
            status: None,
            should_quit: false,
            show_help: false,
            mouse_enabled: config.tui.mouse_enabled,
            tick_rate: Duration::from_millis(config.tui.tick_rate_ms),
            list_top: 0,
            needs_render: true,
        }
    }

    /// Re-render the current tab if anything changed since the last pass.
    pub fn refresh(&mut self) {
        if !self.needs_render {
            return;
        }
        self.view.render_tab(&mut self.host, self.container);
        self.needs_render = false;
        let len = self.line_count();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Number of visible lines in the container.
    pub fn line_count(&self) -> usize {
        self.host.visible_children(self.container).len()
    }

    /// Widget behind the selected line.
    pub fn selected_widget(&self) -> Option<WidgetId> {
        self.host
            .visible_children(self.container)
            .get(self.selected)
            .map(|w| w.id)
    }

    pub const fn tab(&self) -> TabKind {
        self.view.tab()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.line_count() {
            self.selected += 1;
        }
    }

    pub const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_last(&mut self) {
        self.selected = self.line_count().saturating_sub(1);
    }

    pub const fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn page_down(&mut self, page: usize) {
        self.selected = (self.selected + page).min(self.line_count().saturating_sub(1));
    }

    pub const fn page_up(&mut self, page: usize) {
        self.selected = self.selected.saturating_sub(page);
    }

    /// Keep the selection inside a window of `height` lines.
    pub const fn adjust_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }
    }

    /// Click the selected line: toggle a header or describe a row.
    pub fn activate_selected(&mut self) {
        if let Some(widget) = self.selected_widget() {
            self.activate(widget);
        }
    }

    /// Click a specific widget.
    pub fn activate(&mut self, widget: WidgetId) {
        match self.view.click(&self.host, widget) {
            ViewEvent::Rerender => self.needs_render = true,
            ViewEvent::Activated { entity_id, kind } => {
                self.status = self.view.entity(entity_id, kind).map(|e| {
                    let owner = e
                        .owner
                        .as_deref()
                        .and_then(|key| self.view.source().character(key))
                        .map_or_else(String::new, |c| format!(" on {}", c.name));
                    format!("{} x{}{}", e.name, e.quantity, owner)
                });
            }
            ViewEvent::Ignored => {}
        }
    }

    pub fn next_tab(&mut self) {
        self.switch_tab(self.tab().next());
    }

    pub fn prev_tab(&mut self) {
        self.switch_tab(self.tab().previous());
    }

    pub fn switch_tab(&mut self, tab: TabKind) {
        if self.view.switch_tab(tab) {
            self.selected = 0;
            self.scroll = 0;
            self.needs_render = true;
        }
    }

    /// Apply a committed search query.
    pub fn apply_query(&mut self, query: Option<String>) {
        if let Some(query) = query
            && self.view.set_query(&query)
        {
            self.selected = 0;
            self.scroll = 0;
            self.needs_render = true;
        }
    }

    /// Periodic work: commit a debounced search.
    pub fn tick(&mut self, now: Instant) {
        let committed = self.search.poll_commit(now);
        self.apply_query(committed);
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Save state and preferences, then stop the loop.
    pub fn quit(&mut self) {
        if let Err(e) = self.view.flush() {
            tracing::warn!("Failed to save expansion state: {}", e);
        }
        let prefs = TuiPreferences {
            theme: super::theme::current_theme_name().to_string(),
            last_tab: Some(self.tab().name().to_string()),
        };
        if let Err(e) = prefs.save() {
            tracing::warn!("Failed to save preferences: {}", e);
        }
        self.should_quit = true;
    }

    pub const fn content_height(&self) -> u32 {
        match self.view.last_pass() {
            Some(pass) => pass.content_height,
            None => 0,
        }
    }
}
