//! Retained in-memory widget tree.

use super::{
    Binding, FrameRole, HeaderContent, RowContent, RowKind, WidgetHost, WidgetId,
};
use crate::model::EntityKind;
use std::collections::BTreeMap;

/// What kind of widget a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetRole {
    Container,
    Row(RowKind),
    Frame(FrameRole),
}

/// Current content of a widget.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WidgetContent {
    #[default]
    Empty,
    Row(RowContent),
    Header(HeaderContent),
}

/// A widget in the memory host.
#[derive(Debug, Clone)]
pub struct Widget {
    pub id: WidgetId,
    pub role: WidgetRole,
    pub parent: Option<WidgetId>,
    pub offset: u32,
    pub indent: u32,
    pub visible: bool,
    pub content: WidgetContent,
    pub bindings: Vec<Binding>,
}

impl Widget {
    fn new(id: WidgetId, role: WidgetRole) -> Self {
        Self {
            id,
            role,
            parent: None,
            offset: 0,
            indent: 0,
            visible: false,
            content: WidgetContent::Empty,
            bindings: Vec::new(),
        }
    }

    /// The toggle key bound to this widget, if it is a header.
    pub fn toggle_key(&self) -> Option<&str> {
        self.bindings.iter().find_map(|b| match b {
            Binding::Toggle { key } => Some(key.as_str()),
            _ => None,
        })
    }

    /// Tooltip lines shown on hover.
    pub fn tooltip(&self) -> &[String] {
        self.bindings
            .iter()
            .find_map(|b| match b {
                Binding::Tooltip { lines } => Some(lines.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// One-line text rendition, used for dumps and tests.
    pub fn text(&self) -> String {
        let pad = " ".repeat(self.indent as usize);
        match &self.content {
            WidgetContent::Empty => format!("{pad}<empty>"),
            WidgetContent::Header(h) => {
                let marker = if h.expanded { "[-]" } else { "[+]" };
                format!("{pad}{marker} {} ({})", h.label, h.count)
            }
            WidgetContent::Row(r) if r.detail.is_empty() => format!("{pad}{}", r.title),
            WidgetContent::Row(r) => format!("{pad}{}  {}", r.title, r.detail),
        }
    }
}

/// Result of clicking a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    Toggle(String),
    Activate { entity_id: u64, kind: EntityKind },
}

/// In-memory [`WidgetHost`].
///
/// Discarded frames are freed; rows stay alive as long as the pool holds
/// them, like a real toolkit where rows are expensive to construct.
#[derive(Debug, Default)]
pub struct MemoryHost {
    widgets: BTreeMap<WidgetId, Widget>,
    children: BTreeMap<WidgetId, Vec<WidgetId>>,
    next_id: u64,
    rows_created: usize,
    frames_created: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, role: WidgetRole) -> WidgetId {
        self.next_id += 1;
        let id = WidgetId(self.next_id);
        self.widgets.insert(id, Widget::new(id, role));
        id
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    /// Total rows ever constructed.
    pub const fn rows_created(&self) -> usize {
        self.rows_created
    }

    /// Total frames ever constructed.
    pub const fn frames_created(&self) -> usize {
        self.frames_created
    }

    /// Visible children of `container`, top to bottom.
    pub fn visible_children(&self, container: WidgetId) -> Vec<&Widget> {
        let mut visible: Vec<&Widget> = self
            .children
            .get(&container)
            .into_iter()
            .flatten()
            .filter_map(|id| self.widgets.get(id))
            .filter(|w| w.visible)
            .collect();
        visible.sort_by_key(|w| (w.offset, w.id));
        visible
    }

    /// Text lines of the visible children, top to bottom.
    pub fn lines(&self, container: WidgetId) -> Vec<String> {
        self.visible_children(container)
            .into_iter()
            .map(Widget::text)
            .collect()
    }

    /// Resolve a click on `widget` into the action its binding carries.
    pub fn dispatch_click(&self, widget: WidgetId) -> Option<HostAction> {
        let widget = self.widgets.get(&widget)?;
        if !widget.visible {
            return None;
        }
        widget.bindings.iter().find_map(|b| match b {
            Binding::Toggle { key } => Some(HostAction::Toggle(key.clone())),
            Binding::Activate { entity_id, kind } => Some(HostAction::Activate {
                entity_id: *entity_id,
                kind: *kind,
            }),
            Binding::Tooltip { .. } => None,
        })
    }
}

impl WidgetHost for MemoryHost {
    fn create_container(&mut self) -> WidgetId {
        let id = self.alloc(WidgetRole::Container);
        if let Some(w) = self.widgets.get_mut(&id) {
            w.visible = true;
        }
        id
    }

    fn create_row(&mut self, kind: RowKind) -> WidgetId {
        self.rows_created += 1;
        self.alloc(WidgetRole::Row(kind))
    }

    fn create_frame(&mut self, role: FrameRole) -> WidgetId {
        self.frames_created += 1;
        self.alloc(WidgetRole::Frame(role))
    }

    fn attach(&mut self, widget: WidgetId, container: WidgetId) {
        self.detach(widget);
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.parent = Some(container);
            self.children.entry(container).or_default().push(widget);
        }
    }

    fn detach(&mut self, widget: WidgetId) {
        let Some(w) = self.widgets.get_mut(&widget) else {
            return;
        };
        if let Some(parent) = w.parent.take()
            && let Some(siblings) = self.children.get_mut(&parent)
        {
            siblings.retain(|id| *id != widget);
        }
    }

    fn children(&self, container: WidgetId) -> Vec<WidgetId> {
        self.children.get(&container).cloned().unwrap_or_default()
    }

    fn place(&mut self, widget: WidgetId, offset: u32, indent: u32) {
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.offset = offset;
            w.indent = indent;
        }
    }

    fn set_visible(&mut self, widget: WidgetId, visible: bool) {
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.visible = visible;
        }
    }

    fn set_row_content(&mut self, widget: WidgetId, content: &RowContent) {
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.content = WidgetContent::Row(content.clone());
        }
    }

    fn set_header_content(&mut self, widget: WidgetId, content: &HeaderContent) {
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.content = WidgetContent::Header(content.clone());
        }
    }

    fn bind(&mut self, widget: WidgetId, binding: Binding) {
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.bindings.push(binding);
        }
    }

    fn clear_bindings(&mut self, widget: WidgetId) {
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.bindings.clear();
        }
    }

    fn reset_content(&mut self, widget: WidgetId) {
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.content = WidgetContent::Empty;
            w.offset = 0;
            w.indent = 0;
        }
    }

    fn discard(&mut self, widget: WidgetId) {
        self.detach(widget);
        self.children.remove(&widget);
        self.widgets.remove(&widget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_detach() {
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let row = host.create_row(RowKind::Item);

        host.attach(row, container);
        assert_eq!(host.children(container), vec![row]);

        // Re-attaching moves rather than duplicates
        host.attach(row, container);
        assert_eq!(host.children(container), vec![row]);

        host.detach(row);
        assert!(host.children(container).is_empty());
        assert_eq!(host.widget(row).and_then(|w| w.parent), None);
    }

    #[test]
    fn test_visible_children_sorted_by_offset() {
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let a = host.create_row(RowKind::Generic);
        let b = host.create_row(RowKind::Generic);
        for (id, offset) in [(a, 40), (b, 10)] {
            host.attach(id, container);
            host.place(id, offset, 0);
            host.set_visible(id, true);
        }

        let order: Vec<WidgetId> = host
            .visible_children(container)
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn test_dispatch_click_on_header() {
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let header = host.create_frame(FrameRole::Header);
        host.attach(header, container);
        host.bind(header, Binding::Toggle { key: "Alice-Realm".into() });

        // Hidden widgets do not receive clicks
        assert_eq!(host.dispatch_click(header), None);

        host.set_visible(header, true);
        assert_eq!(
            host.dispatch_click(header),
            Some(HostAction::Toggle("Alice-Realm".into()))
        );
    }

    #[test]
    fn test_discard_frees_widget() {
        let mut host = MemoryHost::new();
        let container = host.create_container();
        let frame = host.create_frame(FrameRole::Message);
        host.attach(frame, container);
        host.discard(frame);

        assert!(host.widget(frame).is_none());
        assert!(host.children(container).is_empty());
        assert_eq!(host.frames_created(), 1);
    }

    #[test]
    fn test_text_rendition() {
        let mut host = MemoryHost::new();
        let header = host.create_frame(FrameRole::Header);
        host.place(header, 0, 2);
        host.set_header_content(
            header,
            &HeaderContent {
                label: "Legion".into(),
                count: 4,
                expanded: false,
                synthetic: false,
            },
        );
        assert_eq!(host.widget(header).map(Widget::text).as_deref(), Some("  [+] Legion (4)"));
    }
}
