//! Default configurations and presets for vaultview.

use super::types::AppConfig;
use crate::engine::LayoutMetrics;

/// Search debounce when none is configured.
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// Upper bound for the search debounce.
pub const MAX_DEBOUNCE_MS: u64 = 5000;

/// Expansions, newest first.
pub const EXPANSION_ORDER: &[&str] = &[
    "The War Within",
    "Dragonflight",
    "Shadowlands",
    "Battle for Azeroth",
    "Legion",
    "Warlords of Draenor",
    "Mists of Pandaria",
    "Cataclysm",
    "Wrath of the Lich King",
    "The Burning Crusade",
    "Classic",
];

pub const CURRENCY_CATEGORY_ORDER: &[&str] = &[
    "Dungeon and Raid",
    "Player vs. Player",
    "Professions",
    "Miscellaneous",
    "Legacy",
];

/// Category wrapped under the current season header by default.
pub const DEFAULT_CURRENT_SEASON: &str = "Season 2";

pub const CURRENT_SEASON_LABEL: &str = "Current Season";

pub const ITEM_TYPE_ORDER: &[&str] = &[
    "Weapon",
    "Armor",
    "Container",
    "Consumable",
    "Gem",
    "Reagent",
    "Tradeskill",
    "Recipe",
    "Quest",
    "Miscellaneous",
];

pub const STORAGE_LOCATION_ORDER: &[&str] = &["Bank", "Reagent Bank", "Warband Bank"];

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Roomy rows with section gaps
    Comfortable,
    /// Tight rows, no gaps, category matching on
    Compact,
    /// One line per node, for terminals
    Terminal,
}

impl ConfigPreset {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Comfortable => "comfortable",
            Self::Compact => "compact",
            Self::Terminal => "terminal",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "comfortable" | "default" => Some(Self::Comfortable),
            "compact" | "dense" => Some(Self::Compact),
            "terminal" | "tui" => Some(Self::Terminal),
            _ => None,
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Comfortable => "Default spacing with a gap before the current season",
            Self::Compact => "Dense rows and category-aware search",
            Self::Terminal => "One layout unit per line, two-column indent",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Comfortable, Self::Compact, Self::Terminal]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Comfortable => Self::default(),
            ConfigPreset::Compact => Self::compact_preset(),
            ConfigPreset::Terminal => Self::terminal_preset(),
        }
    }

    #[must_use]
    pub fn compact_preset() -> Self {
        let mut config = Self::builder()
            .layout(LayoutMetrics {
                top_padding: 4,
                row_height: 16,
                row_spacing: 0,
                header_height: 18,
                header_spacing: 2,
                section_gap: 0,
                indent_width: 8,
            })
            .match_category(true)
            .build();
        config.search.debounce_ms = 150;
        config
    }

    #[must_use]
    pub fn terminal_preset() -> Self {
        Self::builder().layout(LayoutMetrics::terminal()).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Validatable;

    #[test]
    fn test_preset_names_round_trip() {
        for preset in ConfigPreset::all() {
            assert_eq!(ConfigPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(ConfigPreset::from_name("TUI"), Some(ConfigPreset::Terminal));
        assert_eq!(ConfigPreset::from_name("huge"), None);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in ConfigPreset::all() {
            let config = AppConfig::from_preset(*preset);
            assert!(config.is_valid(), "{preset} preset: {:?}", config.validate());
        }
    }

    #[test]
    fn test_compact_is_denser() {
        let compact = AppConfig::compact_preset();
        let default = AppConfig::default();
        assert!(compact.layout.row_height < default.layout.row_height);
        assert!(compact.search.match_category);
    }
}
