//! Configuration for vaultview.
//!
//! - Typed configuration structures with serde defaults
//! - Validation via [`Validatable`]
//! - Named presets
//! - YAML config file discovery and loading
//! - CLI override merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use vaultview::config::{AppConfig, ConfigPreset};
//!
//! let config = AppConfig::from_preset(ConfigPreset::Compact);
//!
//! let config = AppConfig::builder()
//!     .match_category(true)
//!     .expansions(["The War Within", "Dragonflight"])
//!     .build();
//!
//! use vaultview::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.vaultview.yaml` file in the working directory or
//! `~/.config/vaultview/`:
//!
//! ```yaml
//! search:
//!   match_category: true
//! ordering:
//!   current_season: "Season 2"
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    CURRENCY_CATEGORY_ORDER, ConfigPreset, DEFAULT_DEBOUNCE_MS, EXPANSION_ORDER,
    ITEM_TYPE_ORDER, MAX_DEBOUNCE_MS, STORAGE_LOCATION_ORDER,
};
pub use types::{
    AppConfig, AppConfigBuilder, OrderingConfig, SearchConfig, StateConfig, TuiConfig,
    TuiPreferences,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_full_example_config, load_config_file,
    load_or_default,
};

/// Generate a JSON Schema for the `.vaultview.yaml` format.
///
/// Editors can use it for validation and autocompletion.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
        .map_err(|e| crate::error::VaultError::config(format!("schema serialization: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        for section in ["layout", "search", "ordering", "state", "tui"] {
            assert!(schema.contains(section), "missing {section}");
        }
    }
}
