//! Config command handler.

use crate::config::{generate_full_example_config, generate_json_schema};
use anyhow::Result;
use std::io::Write;

/// What the `config` subcommand prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// JSON schema for the config file
    Schema,
    /// Commented example config file
    Example,
    /// The effective configuration as YAML
    Show,
}

/// Run the config command
pub fn run_config(
    action: ConfigAction,
    config: &crate::config::AppConfig,
    out: &mut dyn Write,
) -> Result<i32> {
    match action {
        ConfigAction::Schema => writeln!(out, "{}", generate_json_schema()?)?,
        ConfigAction::Example => write!(out, "{}", generate_full_example_config())?,
        ConfigAction::Show => write!(out, "{}", serde_yaml::to_string(config)?)?,
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_show_round_trips() {
        let config = AppConfig::builder().match_category(true).build();
        let mut out = Vec::new();
        run_config(ConfigAction::Show, &config, &mut out).unwrap();
        let parsed: AppConfig = serde_yaml::from_slice(&out).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_schema_is_json() {
        let mut out = Vec::new();
        run_config(ConfigAction::Schema, &AppConfig::default(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value.get("properties").is_some());
    }
}
