//! Event polling and key/mouse dispatch for the viewer.

use super::app::ViewerApp;
use super::theme::toggle_theme;
use crate::tabs::TabKind;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use std::time::{Duration, Instant};

/// Lines moved by PageUp/PageDown.
const PAGE: usize = 10;

/// Application event
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Nothing happened within the tick rate
    Tick,
    Resize(u16, u16),
}

/// Polls crossterm with a timeout so the app gets regular ticks.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub const fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Mouse(mouse) => Ok(Event::Mouse(mouse)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut ViewerApp, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    app.clear_status();

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.search.active {
        let now = Instant::now();
        match key.code {
            KeyCode::Esc => {
                let committed = app.search.clear();
                app.search.stop();
                app.apply_query(committed);
            }
            KeyCode::Enter => {
                let committed = app.search.commit_now();
                app.search.stop();
                app.apply_query(committed);
            }
            KeyCode::Backspace => app.search.pop_char(now),
            KeyCode::Char(c) => app.search.push_char(c, now),
            _ => {}
        }
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?' | 'q')) {
            app.toggle_help();
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('/') => app.search.start(),
        KeyCode::Esc => {
            let committed = app.search.clear();
            app.apply_query(committed);
        }
        KeyCode::Char('T') => {
            let name = toggle_theme();
            app.set_status(format!("Theme: {name}"));
        }
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_tab(),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(tab) = TabKind::ALL.get(idx) {
                app.switch_tab(*tab);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::PageDown => app.page_down(PAGE),
        KeyCode::PageUp => app.page_up(PAGE),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected(),
        _ => {}
    }
}

/// Handle mouse events: wheel scrolls the selection, left click selects
/// and activates the line under the cursor.
pub fn handle_mouse_event(app: &mut ViewerApp, mouse: MouseEvent) {
    if !app.mouse_enabled {
        return;
    }
    app.clear_status();

    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),
        MouseEventKind::Down(MouseButton::Left) => {
            if app.show_help {
                app.toggle_help();
                return;
            }
            if mouse.row < app.list_top {
                return;
            }
            let index = app.scroll + usize::from(mouse.row - app.list_top);
            if index < app.line_count() {
                app.selected = index;
                app.activate_selected();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::engine::LayoutMetrics;
    use crate::model::{Character, Entity, EntityKind, Snapshot, tags};

    fn app() -> ViewerApp {
        let mut snapshot = Snapshot::new();
        snapshot.characters = vec![Character::new("Alice", "Realm").online(true)];
        snapshot.items = vec![
            Entity::new(2589, "Linen Cloth", EntityKind::Item)
                .with_owner("Alice-Realm")
                .with_tag(tags::TYPE, "Tradeskill")
                .with_quantity(20),
        ];
        let config = AppConfig::builder()
            .ephemeral_state()
            .layout(LayoutMetrics::terminal())
            .build();
        let mut app = ViewerApp::new(snapshot, &config);
        app.switch_tab(TabKind::Items);
        app.refresh();
        app
    }

    fn press(app: &mut ViewerApp, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_number_keys_switch_tabs() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.tab(), TabKind::Reputation);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.tab(), TabKind::Currency);
    }

    #[test]
    fn test_search_mode_captures_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert!(app.search.active);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.search.query(), "q");

        press(&mut app, KeyCode::Enter);
        assert!(!app.search.active);
        assert_eq!(app.view.query().as_str(), "q");
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.tab(), TabKind::Items);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
