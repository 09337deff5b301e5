//! View command handler.
//!
//! Implements the `view` subcommand: the interactive terminal viewer.

use crate::config::AppConfig;
use crate::engine::LayoutMetrics;
use crate::model::Snapshot;
use crate::tui::{ViewerApp, run_viewer};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the view command
pub fn run_view(snapshot_path: &Path, config: &AppConfig) -> Result<i32> {
    super::ensure_valid(config)?;
    let snapshot = Snapshot::load(snapshot_path)
        .with_context(|| format!("failed to load {}", snapshot_path.display()))?;
    tracing::info!(
        "Loaded {} entities for {} characters",
        snapshot.entity_count(),
        snapshot.characters.len()
    );

    // The terminal paints one layout unit per line.
    let mut config = config.clone();
    config.layout = LayoutMetrics::terminal();

    let mut app = ViewerApp::new(snapshot, &config);
    run_viewer(&mut app)?;
    Ok(0)
}
