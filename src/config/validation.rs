//! Configuration validation for vaultview.

use super::defaults::MAX_DEBOUNCE_MS;
use super::types::{AppConfig, OrderingConfig, SearchConfig, TuiConfig};
use crate::engine::LayoutMetrics;
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.layout.validate());
        errors.extend(self.search.validate());
        errors.extend(self.ordering.validate());
        errors.extend(self.tui.validate());
        errors
    }
}

impl Validatable for LayoutMetrics {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.row_height == 0 {
            errors.push(ConfigError::new("layout.row_height", "Row height must be non-zero"));
        }
        if self.header_height == 0 {
            errors.push(ConfigError::new(
                "layout.header_height",
                "Header height must be non-zero",
            ));
        }
        errors
    }
}

impl Validatable for SearchConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            errors.push(ConfigError::new(
                "search.debounce_ms",
                format!(
                    "Debounce must be at most {MAX_DEBOUNCE_MS}ms, got {}",
                    self.debounce_ms
                ),
            ));
        }
        if self.match_category && self.category_tag.trim().is_empty() {
            errors.push(ConfigError::new(
                "search.category_tag",
                "Category matching needs a tag name",
            ));
        }
        errors
    }
}

impl Validatable for OrderingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let lists = [
            ("ordering.expansions", &self.expansions),
            ("ordering.currency_categories", &self.currency_categories),
            ("ordering.item_types", &self.item_types),
            ("ordering.storage_locations", &self.storage_locations),
        ];
        for (field, list) in lists {
            let mut seen = HashSet::new();
            for value in list {
                if value.trim().is_empty() {
                    errors.push(ConfigError::new(field, "Entries must not be blank"));
                } else if value.eq_ignore_ascii_case(crate::engine::OTHER_LABEL) {
                    errors.push(ConfigError::new(
                        field,
                        "'Other' is reserved for unlisted values",
                    ));
                } else if !seen.insert(value.as_str()) {
                    errors.push(ConfigError::new(field, format!("Duplicate entry '{value}'")));
                }
            }
        }
        if let Some(season) = &self.current_season
            && season.trim().is_empty()
        {
            errors.push(ConfigError::new(
                "ordering.current_season",
                "Current season must not be blank; omit it to disable the wrapper",
            ));
        }
        errors
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let valid_themes = ["dark", "light"];
        if !valid_themes.contains(&self.theme.as_str()) {
            errors.push(ConfigError::new(
                "tui.theme",
                format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    valid_themes.join(", ")
                ),
            ));
        }
        if !(10..=1000).contains(&self.tick_rate_ms) {
            errors.push(ConfigError::new(
                "tui.tick_rate_ms",
                format!("Tick rate must be between 10 and 1000, got {}", self.tick_rate_ms),
            ));
        }
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
