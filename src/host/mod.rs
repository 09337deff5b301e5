//! The widget host seam.
//!
//! The engine never talks to a concrete UI toolkit. Everything it needs is
//! expressed by [`WidgetHost`]: create a row or frame, put it under a
//! container at an offset, show or hide it, fill in its content and attach
//! interaction bindings. [`MemoryHost`] is a retained in-memory
//! implementation used by the terminal UI, the `render` command and tests.

mod memory;

pub use memory::{HostAction, MemoryHost, Widget, WidgetContent, WidgetRole};

use crate::model::{EntityKind, ItemQuality};

/// Opaque handle to a host widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Row rendering variant. Rows are only ever reused within the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKind {
    Item,
    Currency,
    Reputation,
    Generic,
}

impl RowKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Currency => "currency",
            Self::Reputation => "reputation",
            Self::Generic => "generic",
        }
    }
}

/// Non-pooled frame variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameRole {
    /// Collapsible group header
    Header,
    /// Empty-state message
    Message,
}

/// Extra emphasis for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowAccent {
    #[default]
    None,
    /// Currency at its cap
    Capped,
    /// Reputation with a completed base bar
    Complete,
    /// Paragon reward waiting
    Reward,
}

/// Everything a row shows for one entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowContent {
    pub title: String,
    /// Right-hand text: amount, stack size, standing
    pub detail: String,
    /// `None` means the entity had no icon; the renderer substitutes one
    pub icon: Option<String>,
    /// Row is drawn muted (placeholder data, empty stack)
    pub dimmed: bool,
    pub quality: Option<ItemQuality>,
    /// Progress bar fill in `0.0..=1.0`
    pub progress: Option<f64>,
    pub accent: RowAccent,
    /// Hover tooltip lines
    pub tooltip: Vec<String>,
}

/// Everything a header shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderContent {
    pub label: String,
    /// Live count of (visible) leaves below this header
    pub count: usize,
    pub expanded: bool,
    /// Header for an extra wrapper layer rather than a classification value
    pub synthetic: bool,
}

/// Interaction handlers attached to a widget.
///
/// Handlers are data, not closures: the host's click dispatch hands the
/// binding back to the engine, which acts on the key or id it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Clicking flips the expansion flag for `key`
    Toggle { key: String },
    /// Hover shows these tooltip lines, leaving hides them
    Tooltip { lines: Vec<String> },
    /// Clicking acts on the entity
    Activate { entity_id: u64, kind: EntityKind },
}

/// Primitives the engine needs from a widget system.
pub trait WidgetHost {
    /// Create a new root container.
    fn create_container(&mut self) -> WidgetId;

    /// Construct a new (detached, hidden) row of the given kind.
    fn create_row(&mut self, kind: RowKind) -> WidgetId;

    /// Construct a new (detached, hidden) non-pooled frame.
    fn create_frame(&mut self, role: FrameRole) -> WidgetId;

    /// Make `widget` a child of `container`.
    fn attach(&mut self, widget: WidgetId, container: WidgetId);

    /// Remove `widget` from its parent, if any.
    fn detach(&mut self, widget: WidgetId);

    /// Current children of `container`, in attach order.
    fn children(&self, container: WidgetId) -> Vec<WidgetId>;

    /// Position `widget` at an absolute vertical offset and indent.
    fn place(&mut self, widget: WidgetId, offset: u32, indent: u32);

    fn set_visible(&mut self, widget: WidgetId, visible: bool);

    fn set_row_content(&mut self, widget: WidgetId, content: &RowContent);

    fn set_header_content(&mut self, widget: WidgetId, content: &HeaderContent);

    fn bind(&mut self, widget: WidgetId, binding: Binding);

    fn clear_bindings(&mut self, widget: WidgetId);

    /// Reset all visible content (text, icon, bars) to a neutral state.
    fn reset_content(&mut self, widget: WidgetId);

    /// Get rid of a non-pooled widget.
    ///
    /// Hosts that cannot free widgets hide and detach them instead.
    fn discard(&mut self, widget: WidgetId) {
        self.clear_bindings(widget);
        self.set_visible(widget, false);
        self.detach(widget);
    }
}
