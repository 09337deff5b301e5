//! **Collapsible, searchable inventory lists for multi-character snapshots.**
//!
//! `vaultview` turns flat lists of items, currencies and reputations into a
//! hierarchy of collapsible groups (character, expansion, category and so
//! on) and renders it into a widget host with pooled rows, per-key
//! expansion memory and live search filtering.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Entity`], [`Character`] and the [`Snapshot`] export,
//!   read through the [`DataSource`] trait.
//! - **[`engine`]**: the rendering core. [`GroupBuilder`] classifies
//!   entities into a [`GroupNode`] tree, [`SearchFilter`] decides which
//!   nodes are visible, and [`TreeRenderer`] walks the tree, laying nodes
//!   out with a [`LayoutCursor`] and reusing rows from a [`WidgetPool`].
//!   Expansion flags live in an [`ExpansionStore`] keyed by stable group
//!   keys.
//! - **[`host`]**: the [`WidgetHost`] seam and the retained [`MemoryHost`].
//! - **[`tabs`]**: the built-in Currency, Items, Storage and Reputation
//!   tabs.
//! - **[`view`]**: [`TabView`], the public render trigger.
//! - **[`config`]**: layout metrics, canonical orders, search and state
//!   settings loaded from `.vaultview.yaml`.
//! - **[`tui`]**: the interactive terminal viewer.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use vaultview::{AppConfig, MemoryHost, Snapshot, TabKind, TabView, WidgetHost};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let snapshot = Snapshot::load(Path::new("snapshot.json"))?;
//!     let mut view = TabView::new(snapshot, &AppConfig::default());
//!
//!     let mut host = MemoryHost::new();
//!     let container = host.create_container();
//!     view.switch_tab(TabKind::Items);
//!     view.set_query("linen");
//!     let height = view.render_tab(&mut host, container);
//!
//!     for line in host.lines(container) {
//!         println!("{line}");
//!     }
//!     println!("content height: {height}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod model;
pub mod tabs;
pub mod tui;
pub mod view;

pub use config::AppConfig;
pub use engine::{
    EmptyState, ExpansionStore, GroupBuilder, GroupLevel, GroupNode, LayoutCursor,
    LayoutMetrics, MatchSet, RenderPass, SearchFilter, SearchQuery, TreeRenderer, WidgetPool,
};
pub use error::{Result, VaultError};
pub use host::{MemoryHost, WidgetHost, WidgetId};
pub use model::{Character, DataSource, Entity, EntityKind, Snapshot};
pub use tabs::TabKind;
pub use view::{TabView, ViewEvent};
