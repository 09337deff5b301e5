//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs. Each returns the process
//! exit code.

mod config;
mod render;
mod view;

pub use config::{ConfigAction, run_config};
pub use render::{RenderArgs, RenderFormat, run_render, text_trace};
pub use view::run_view;

use crate::config::{AppConfig, Validatable};
use anyhow::{Result, bail};

/// Refuse to run with an invalid configuration.
pub(crate) fn ensure_valid(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    for error in &errors {
        tracing::error!("Invalid configuration: {}", error);
    }
    bail!("configuration has {} error(s)", errors.len())
}
