//! Interactive terminal viewer using ratatui.
//!
//! The viewer drives a [`TabView`](crate::view::TabView) against a
//! [`MemoryHost`](crate::host::MemoryHost) laid out in terminal lines and
//! draws the host's visible widgets each frame. Headers toggle on Enter or
//! click; searches are debounced before they reach the view.

mod app;
mod events;
mod search;
pub mod theme;
mod ui;

pub use app::ViewerApp;
pub use events::{Event, EventHandler, handle_key_event, handle_mouse_event};
pub use search::SearchInput;
pub use theme::{ColorScheme, Styles, Theme, colors, set_theme, toggle_theme};
pub use ui::run_viewer;
