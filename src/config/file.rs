//! Configuration file loading and discovery.

use super::types::{AppConfig, OrderingConfig, SearchConfig, StateConfig, TuiConfig};
use crate::engine::LayoutMetrics;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".vaultview.yaml",
    ".vaultview.yml",
    "vaultview.yaml",
    "vaultview.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/vaultview/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(git_root) = find_git_root()
        && let Some(path) = find_config_in_dir(&git_root)
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join("vaultview"))
    {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from the discovered file, or return the default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence
    /// wherever it differs from the defaults.
    ///
    /// Used to layer CLI flags over file config.
    pub fn merge(&mut self, other: &Self) {
        if other.layout != LayoutMetrics::default() {
            self.layout = other.layout;
        }

        let search = SearchConfig::default();
        if other.search.match_category {
            self.search.match_category = true;
        }
        if other.search.category_tag != search.category_tag {
            self.search.category_tag.clone_from(&other.search.category_tag);
        }
        if other.search.debounce_ms != search.debounce_ms {
            self.search.debounce_ms = other.search.debounce_ms;
        }

        let ordering = OrderingConfig::default();
        if other.ordering.expansions != ordering.expansions {
            self.ordering.expansions.clone_from(&other.ordering.expansions);
        }
        if other.ordering.currency_categories != ordering.currency_categories {
            self.ordering
                .currency_categories
                .clone_from(&other.ordering.currency_categories);
        }
        if other.ordering.current_season != ordering.current_season {
            self.ordering
                .current_season
                .clone_from(&other.ordering.current_season);
        }
        if other.ordering.current_season_label != ordering.current_season_label {
            self.ordering
                .current_season_label
                .clone_from(&other.ordering.current_season_label);
        }
        if other.ordering.item_types != ordering.item_types {
            self.ordering.item_types.clone_from(&other.ordering.item_types);
        }
        if other.ordering.storage_locations != ordering.storage_locations {
            self.ordering
                .storage_locations
                .clone_from(&other.ordering.storage_locations);
        }

        let state = StateConfig::default();
        if other.state.persist != state.persist {
            self.state.persist = other.state.persist;
        }
        if other.state.file.is_some() {
            self.state.file.clone_from(&other.state.file);
        }

        let tui = TuiConfig::default();
        if other.tui.theme != tui.theme {
            self.tui.theme.clone_from(&other.tui.theme);
        }
        if other.tui.mouse_enabled != tui.mouse_enabled {
            self.tui.mouse_enabled = other.tui.mouse_enabled;
        }
        if other.tui.tick_rate_ms != tui.tick_rate_ms {
            self.tui.tick_rate_ms = other.tui.tick_rate_ms;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r#"# vaultview configuration file
# =============================
#
# Place it at:
#   - .vaultview.yaml in the working directory
#   - ~/.config/vaultview/vaultview.yaml for global config
#
# CLI arguments always override file settings.

# Vertical layout in layout units
layout:
  top_padding: 10
  row_height: 20
  row_spacing: 2
  header_height: 24
  header_spacing: 4
  # Extra space before the current season wrapper
  section_gap: 8
  indent_width: 12

search:
  # Also match the category tag, not only the name
  match_category: false
  category_tag: category
  # Delay before a typed query is applied
  debounce_ms: 250

# Canonical sibling orders; unlisted values go under "Other".
# An empty list sorts alphabetically.
ordering:
  expansions: ["The War Within", "Dragonflight", "Shadowlands", "Legion"]
  currency_categories: ["Dungeon and Raid", "Player vs. Player", "Miscellaneous"]
  # Category shown last under its own collapsible wrapper
  current_season: "Season 2"
  current_season_label: "Current Season"
  item_types: ["Weapon", "Armor", "Consumable", "Reagent"]
  storage_locations: ["Bank", "Reagent Bank", "Warband Bank"]

# Expanded/collapsed flags
state:
  persist: true
  # file: ~/.config/vaultview/expansion.json

tui:
  # Theme: dark, light
  theme: dark
  mouse_enabled: true
  tick_rate_ms: 100
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".vaultview.yaml");
        std::fs::write(&config_path, "search:\n  match_category: true\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r#"
layout:
  row_height: 18
ordering:
  expansions: ["Legion"]
  current_season: null
tui:
  theme: light
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.layout.row_height, 18);
        assert_eq!(config.layout.header_height, 24);
        assert_eq!(config.ordering.expansions, vec!["Legion"]);
        assert_eq!(config.ordering.current_season, None);
        assert_eq!(config.tui.theme, "light");
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "layout: [not, a, map]\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = AppConfig::builder().expansions(["Legion"]).build();
        let overrides = AppConfig::builder()
            .match_category(true)
            .theme("light")
            .ephemeral_state()
            .build();

        base.merge(&overrides);

        assert!(base.search.match_category);
        assert_eq!(base.tui.theme, "light");
        assert!(!base.state.persist);
        // Untouched override fields keep the file's values
        assert_eq!(base.ordering.expansions, vec!["Legion"]);
    }

    #[test]
    fn test_generated_examples_parse() {
        let full: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full.layout, LayoutMetrics::default());
        assert_eq!(full.ordering.current_season.as_deref(), Some("Season 2"));
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "tui:\n  theme: light\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
