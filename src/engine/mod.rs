//! The collapsible-list rendering engine shared by every tab.
//!
//! Data flows one way: entities go through the [`GroupBuilder`] into a
//! [`GroupNode`] tree, the [`TreeRenderer`] walks that tree while consulting
//! the [`SearchFilter`] and [`ExpansionStore`], acquires rows from the
//! [`WidgetPool`] and advances a [`LayoutCursor`]. The final offset sizes
//! the host's scroll container.

pub mod expansion;
pub mod group;
pub mod layout;
pub mod pool;
pub mod render;
pub mod search;

pub use expansion::{ExpansionBackend, ExpansionStore, JsonFileBackend, MemoryBackend};
pub use group::{
    GroupBuilder, GroupChildren, GroupLevel, GroupNode, LeafOrder, OTHER_LABEL, OTHER_VALUE,
    SiblingOrder, WrapRule,
};
pub use layout::{LayoutCursor, LayoutMetrics, NodeKind};
pub use pool::{PoolStats, WidgetPool};
pub use render::{
    EmittedKind, EmittedNode, EmptyState, PLACEHOLDER_ICON, PLACEHOLDER_NAME, RenderPass,
    RowPopulator, TreeRenderer,
};
pub use search::{MatchSet, SearchFilter, SearchQuery};
