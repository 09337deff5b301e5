//! Configuration types for vaultview.

use super::defaults;
use crate::engine::{LayoutMetrics, SearchFilter};
use crate::error::{Result, StateErrorKind, VaultError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a YAML file and/or CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Vertical layout increments
    pub layout: LayoutMetrics,
    /// Search behaviour
    pub search: SearchConfig,
    /// Canonical sibling orders for the built-in tabs
    pub ordering: OrderingConfig,
    /// Expansion state persistence
    pub state: StateConfig,
    /// Terminal UI settings
    pub tui: TuiConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Search filter described by this config.
    #[must_use]
    pub fn search_filter(&self) -> SearchFilter {
        SearchFilter::new(self.search.match_category, self.search.category_tag.clone())
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub const fn layout(mut self, layout: LayoutMetrics) -> Self {
        self.config.layout = layout;
        self
    }

    /// Also match search queries against the category tag.
    pub const fn match_category(mut self, enabled: bool) -> Self {
        self.config.search.match_category = enabled;
        self
    }

    pub const fn debounce_ms(mut self, ms: u64) -> Self {
        self.config.search.debounce_ms = ms;
        self
    }

    /// Canonical expansion order, newest first.
    pub fn expansions<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.ordering.expansions = order.into_iter().map(Into::into).collect();
        self
    }

    pub fn currency_categories<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.ordering.currency_categories = order.into_iter().map(Into::into).collect();
        self
    }

    /// Category shown under its own "current season" wrapper.
    pub fn current_season(mut self, category: Option<String>) -> Self {
        self.config.ordering.current_season = category;
        self
    }

    /// Keep expansion state in memory only.
    pub const fn ephemeral_state(mut self) -> Self {
        self.config.state.persist = false;
        self
    }

    pub fn state_file(mut self, path: Option<PathBuf>) -> Self {
        self.config.state.file = path;
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.tui.theme = theme.into();
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Search
// ============================================================================

/// Search behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SearchConfig {
    /// Also match against the category tag, not just the name
    pub match_category: bool,
    /// Tag used for category matching
    pub category_tag: String,
    /// Delay after the last keystroke before a search is committed
    #[schemars(range(max = 5000))]
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_category: false,
            category_tag: crate::model::tags::CATEGORY.to_string(),
            debounce_ms: defaults::DEFAULT_DEBOUNCE_MS,
        }
    }
}

// ============================================================================
// Ordering
// ============================================================================

/// Canonical sibling orders. Values not listed are merged into "Other".
///
/// An empty list means alphabetical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OrderingConfig {
    /// Expansions, newest first
    pub expansions: Vec<String>,
    /// Currency categories within an expansion
    pub currency_categories: Vec<String>,
    /// Currency category rendered last under its own wrapper
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_season: Option<String>,
    /// Label of the current season wrapper
    pub current_season_label: String,
    /// Item types
    pub item_types: Vec<String>,
    /// Account storage locations
    pub storage_locations: Vec<String>,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| (*s).to_string()).collect();
        Self {
            expansions: owned(defaults::EXPANSION_ORDER),
            currency_categories: owned(defaults::CURRENCY_CATEGORY_ORDER),
            current_season: Some(defaults::DEFAULT_CURRENT_SEASON.to_string()),
            current_season_label: defaults::CURRENT_SEASON_LABEL.to_string(),
            item_types: owned(defaults::ITEM_TYPE_ORDER),
            storage_locations: owned(defaults::STORAGE_LOCATION_ORDER),
        }
    }
}

// ============================================================================
// Expansion state persistence
// ============================================================================

/// Where expanded/collapsed flags are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StateConfig {
    /// Persist flags across sessions
    pub persist: bool,
    /// State file; defaults to the user config directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            persist: true,
            file: None,
        }
    }
}

impl StateConfig {
    /// Resolved state file path: `None` when persistence is off, an error
    /// when it is on but neither a file nor a config directory exists.
    pub fn resolved_path(&self) -> Result<Option<PathBuf>> {
        self.resolve_with(crate::engine::JsonFileBackend::default_path())
    }

    fn resolve_with(&self, fallback: Option<PathBuf>) -> Result<Option<PathBuf>> {
        if !self.persist {
            return Ok(None);
        }
        match self.file.clone().or(fallback) {
            Some(path) => Ok(Some(path)),
            None => Err(VaultError::state(
                "resolving state file",
                StateErrorKind::NoLocation,
            )),
        }
    }
}

// ============================================================================
// TUI Preferences (persisted)
// ============================================================================

/// TUI preferences that persist across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TuiPreferences {
    /// Theme name: "dark" or "light"
    pub theme: String,
    /// Tab shown on startup
    #[serde(default)]
    pub last_tab: Option<String>,
}

impl Default for TuiPreferences {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            last_tab: None,
        }
    }
}

impl TuiPreferences {
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vaultview").join("preferences.json"))
    }

    /// Load preferences from disk, or return defaults if not found.
    #[must_use]
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }
}

// ============================================================================
// TUI Configuration
// ============================================================================

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark" or "light"
    pub theme: String,
    /// Enable mouse support
    pub mouse_enabled: bool,
    /// Event poll interval
    #[schemars(range(min = 10, max = 1000))]
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mouse_enabled: true,
            tick_rate_ms: 100,
        }
    }
}
