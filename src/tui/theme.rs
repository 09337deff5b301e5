//! Centralized theme and color scheme for the TUI.

use crate::host::RowAccent;
use crate::model::ItemQuality;
use ratatui::prelude::*;
use std::sync::{PoisonError, RwLock};

/// Semantic colors for the viewer.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    pub header: Color,
    pub selection_bg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    const fn dark_const() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            text: Color::White,
            text_muted: Color::Gray,
            header: Color::LightBlue,
            selection_bg: Color::Rgb(60, 60, 80),
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    pub const fn dark() -> Self {
        Self::dark_const()
    }

    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 120, 0),
            muted: Color::Gray,
            border: Color::Gray,
            border_focused: Color::Blue,
            text: Color::Black,
            text_muted: Color::DarkGray,
            header: Color::Rgb(0, 70, 140),
            selection_bg: Color::Rgb(210, 210, 230),
            success: Color::Rgb(0, 130, 0),
            warning: Color::Rgb(180, 120, 0),
            error: Color::Rgb(180, 0, 0),
        }
    }

    /// Item name colour by quality tier.
    pub const fn quality(&self, quality: ItemQuality) -> Color {
        match quality {
            ItemQuality::Poor => Color::Gray,
            ItemQuality::Common => self.text,
            ItemQuality::Uncommon => Color::Rgb(30, 255, 0),
            ItemQuality::Rare => Color::Rgb(0, 112, 221),
            ItemQuality::Epic => Color::Rgb(163, 53, 238),
            ItemQuality::Legendary => Color::Rgb(255, 128, 0),
            ItemQuality::Artifact => Color::Rgb(230, 204, 128),
            ItemQuality::Heirloom => Color::Rgb(0, 204, 255),
        }
    }

    /// Detail text colour for a row accent.
    pub const fn accent_color(&self, accent: RowAccent) -> Color {
        match accent {
            RowAccent::None => self.text_muted,
            RowAccent::Capped => self.warning,
            RowAccent::Complete => self.success,
            RowAccent::Reward => self.accent,
        }
    }
}

static THEME: RwLock<Theme> = RwLock::new(Theme::dark_const());

#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    const fn dark_const() -> Self {
        Self {
            colors: ColorScheme::dark_const(),
            name: "dark",
        }
    }

    pub const fn dark() -> Self {
        Self::dark_const()
    }

    pub const fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    /// Theme by name, falling back to dark.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    #[must_use]
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            _ => Self::dark(),
        }
    }
}

pub fn current_theme_name() -> &'static str {
    THEME.read().unwrap_or_else(PoisonError::into_inner).name
}

pub fn set_theme(theme: Theme) {
    *THEME.write().unwrap_or_else(PoisonError::into_inner) = theme;
}

/// Switch between dark and light, returning the new theme name.
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = theme.next();
    theme.name
}

pub fn colors() -> ColorScheme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).colors
}

// ============================================================================
// Style Helpers
// ============================================================================

/// Common style presets.
pub struct Styles;

impl Styles {
    pub fn title() -> Style {
        Style::default().fg(colors().primary).bold()
    }

    pub fn border(focused: bool) -> Style {
        let scheme = colors();
        Style::default().fg(if focused {
            scheme.border_focused
        } else {
            scheme.border
        })
    }

    pub fn header() -> Style {
        Style::default().fg(colors().header).bold()
    }

    pub fn muted() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn selected() -> Style {
        Style::default().bg(colors().selection_bg)
    }

    pub fn status() -> Style {
        Style::default().fg(colors().accent)
    }
}
