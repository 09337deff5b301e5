//! Terminal drawing and the main loop.

use super::app::ViewerApp;
use super::events::{Event, EventHandler, handle_key_event, handle_mouse_event};
use super::theme::{Styles, Theme, colors, set_theme};
use crate::config::TuiPreferences;
use crate::host::{Widget, WidgetContent};
use crate::tabs::TabKind;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
};
use std::io::{self, stdout};
use std::time::Instant;
use unicode_width::UnicodeWidthStr;

/// Width of the inline progress bar.
const BAR_WIDTH: usize = 10;

/// Run the viewer until the user quits.
pub fn run_viewer(app: &mut ViewerApp) -> io::Result<()> {
    let prefs = TuiPreferences::load();
    set_theme(Theme::from_name(&prefs.theme));

    enable_raw_mode()?;
    let mut stdout = stdout();
    if app.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(app.tick_rate);

    let result = (|| -> io::Result<()> {
        loop {
            app.refresh();
            terminal.draw(|frame| render(frame, app))?;

            match events.next()? {
                Event::Key(key) => handle_key_event(app, key),
                Event::Mouse(mouse) => handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {}
                Event::Tick => app.tick(Instant::now()),
            }

            if app.should_quit {
                return Ok(());
            }
        }
    })();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn render(frame: &mut Frame, app: &mut ViewerApp) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(1), // Search
            Constraint::Min(3),    // Tree
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_tabs(frame, chunks[0], app.tab());
    render_search(frame, chunks[1], app);
    render_tree(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, active: TabKind) {
    let titles: Vec<Line> = TabKind::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if *tab == active {
                Style::default().fg(colors().accent).bold()
            } else {
                Style::default().fg(colors().text_muted)
            };
            Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), Styles::muted()),
                Span::styled(tab.title(), style),
            ])
        })
        .collect();

    let selected = TabKind::ALL.iter().position(|t| *t == active).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border(false))
                .title(Span::styled(" vaultview ", Styles::title())),
        )
        .select(selected)
        .highlight_style(Style::default().fg(colors().accent));
    frame.render_widget(tabs, area);
}

fn render_search(frame: &mut Frame, area: Rect, app: &ViewerApp) {
    let query = app.search.query();
    let line = if app.search.active {
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(colors().accent).bold()),
            Span::styled(query, Style::default().fg(colors().text)),
            Span::styled("_", Style::default().fg(colors().accent)),
        ])
    } else if query.is_empty() {
        Line::from(Span::styled(" / to search", Styles::muted()))
    } else {
        Line::from(vec![
            Span::styled(" filter: ", Styles::muted()),
            Span::styled(query, Style::default().fg(colors().primary)),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tree(frame: &mut Frame, area: Rect, app: &mut ViewerApp) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border(true));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = usize::from(inner.height);
    app.adjust_scroll(height);
    app.list_top = inner.y;

    let width = usize::from(inner.width);
    let lines: Vec<Line> = app
        .host
        .visible_children(app.container)
        .into_iter()
        .enumerate()
        .skip(app.scroll)
        .take(height)
        .map(|(i, widget)| {
            let line = widget_line(widget, width);
            if i == app.selected {
                line.patch_style(Styles::selected())
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw one widget as a terminal line.
fn widget_line(widget: &Widget, width: usize) -> Line<'static> {
    let scheme = colors();
    let pad = " ".repeat(widget.indent as usize);
    match &widget.content {
        WidgetContent::Empty => Line::from(""),
        WidgetContent::Header(h) => {
            let marker = if h.expanded { "▾ " } else { "▸ " };
            let style = if h.synthetic {
                Styles::header().italic()
            } else {
                Styles::header()
            };
            Line::from(vec![
                Span::raw(pad),
                Span::styled(marker, Style::default().fg(scheme.muted)),
                Span::styled(h.label.clone(), style),
                Span::styled(format!(" ({})", h.count), Styles::muted()),
            ])
        }
        WidgetContent::Row(r) => {
            let title_color = r.quality.map_or(scheme.text, |q| scheme.quality(q));
            let title_style = if r.dimmed {
                Styles::muted()
            } else {
                Style::default().fg(title_color)
            };

            let bar = r.progress.map(progress_bar).unwrap_or_default();
            let right = if bar.is_empty() {
                r.detail.clone()
            } else {
                format!("{bar} {}", r.detail)
            };
            let used = pad.width() + r.title.width() + right.width();
            let gap = width.saturating_sub(used).max(2);

            Line::from(vec![
                Span::raw(pad),
                Span::styled(r.title.clone(), title_style),
                Span::raw(" ".repeat(gap)),
                Span::styled(right, Style::default().fg(scheme.accent_color(r.accent))),
            ])
        }
    }
}

fn progress_bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn render_footer(frame: &mut Frame, area: Rect, app: &ViewerApp) {
    if let Some(ref msg) = app.status {
        let status = Paragraph::new(Line::from(Span::styled(msg.as_str(), Styles::status())))
            .alignment(Alignment::Center);
        frame.render_widget(status, area);
        return;
    }

    let hints = [
        ("Tab", "tab"),
        ("j/k", "move"),
        ("Enter", "toggle"),
        ("/", "search"),
        ("T", "theme"),
        ("?", "help"),
        ("q", "quit"),
    ];
    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(
            format!(" [{key}]"),
            Style::default().fg(colors().accent),
        ));
        spans.push(Span::styled(format!(" {label}"), Styles::muted()));
    }
    spans.push(Span::styled(
        format!("   {} lines", app.content_height()),
        Styles::muted(),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let entries = [
        ("Tab/Shift+Tab", "Next/previous tab"),
        ("1-4", "Jump to tab"),
        ("j/k or ↑/↓", "Move selection"),
        ("PgUp/PgDown", "Page"),
        ("Home/End", "First/last line"),
        ("Enter/Space", "Expand or collapse a group"),
        ("/", "Search by name"),
        ("Esc", "Clear search"),
        ("T", "Toggle theme"),
        ("q", "Quit and save"),
    ];
    let mut lines = vec![
        Line::styled("Keyboard Shortcuts", Styles::title()),
        Line::from(""),
    ];
    lines.extend(entries.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("  {key:<16}"), Style::default().fg(colors().accent)),
            Span::styled(*desc, Style::default().fg(colors().text)),
        ])
    }));

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border(true))
            .title(" Help "),
    );
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0), "░".repeat(BAR_WIDTH));
        assert_eq!(progress_bar(1.5), "█".repeat(BAR_WIDTH));
        assert_eq!(progress_bar(0.5).chars().filter(|c| *c == '█').count(), 5);
    }
}
