//! Render command handler.
//!
//! Implements the `render` subcommand: one render pass of a tab against an
//! in-memory host, printed as an indented text trace or as JSON.

use crate::config::AppConfig;
use crate::engine::{EmittedKind, RenderPass};
use crate::host::{MemoryHost, WidgetContent, WidgetHost};
use crate::model::Snapshot;
use crate::tabs::TabKind;
use crate::view::TabView;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;

/// Output format for `render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RenderFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the render command.
#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub snapshot: PathBuf,
    pub tab: TabKind,
    pub query: Option<String>,
    pub format: RenderFormat,
    /// Output file path (stdout if not specified)
    pub output_file: Option<PathBuf>,
}

#[derive(Serialize)]
struct RenderReport<'a> {
    tab: &'static str,
    query: &'a str,
    #[serde(flatten)]
    pass: &'a RenderPass,
}

/// Run the render command.
///
/// Returns 1 when a search matched nothing, 0 otherwise.
pub fn run_render(args: &RenderArgs, config: &AppConfig) -> Result<i32> {
    super::ensure_valid(config)?;
    let snapshot = Snapshot::load(&args.snapshot)
        .with_context(|| format!("failed to load {}", args.snapshot.display()))?;

    let mut host = MemoryHost::new();
    let container = host.create_container();
    let mut view = TabView::new(snapshot, config);
    view.switch_tab(args.tab);
    if let Some(query) = &args.query {
        view.set_query(query);
    }
    view.render_tab(&mut host, container);
    let pass = view
        .last_pass()
        .context("render produced no pass")?;

    let output = match args.format {
        RenderFormat::Text => text_trace(pass, &host),
        RenderFormat::Json => {
            let report = RenderReport {
                tab: args.tab.name(),
                query: view.query().display(),
                pass,
            };
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            json
        }
    };

    match &args.output_file {
        Some(path) => std::fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout().write_all(output.as_bytes())?,
    }

    let no_results = pass
        .empty
        .as_ref()
        .is_some_and(|e| matches!(e, crate::engine::EmptyState::NoResults { .. }));
    Ok(i32::from(no_results))
}

/// Text rendition of a pass: one line per emitted node, indented by depth.
///
/// Row detail comes from the host widget, so the trace shows exactly what
/// the row was populated with.
pub fn text_trace(pass: &RenderPass, host: &MemoryHost) -> String {
    let mut out = String::new();
    for node in &pass.nodes {
        let pad = "  ".repeat(node.depth);
        let _ = match node.kind {
            EmittedKind::Header => {
                let marker = if node.expanded { "[-]" } else { "[+]" };
                writeln!(out, "{pad}{marker} {} ({})", node.label, node.count)
            }
            EmittedKind::Row => {
                let detail = host.widget(node.widget).and_then(|w| match &w.content {
                    WidgetContent::Row(r) if !r.detail.is_empty() => Some(r.detail.as_str()),
                    _ => None,
                });
                match detail {
                    Some(detail) => writeln!(out, "{pad}{}  {detail}", node.label),
                    None => writeln!(out, "{pad}{}", node.label),
                }
            }
            EmittedKind::Message => writeln!(out, "{pad}{}", node.label),
        };
    }
    let _ = writeln!(out, "-- height {}", pass.content_height);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Character, Entity, EntityKind, tags};

    fn write_snapshot(dir: &std::path::Path) -> PathBuf {
        let mut snapshot = Snapshot::new();
        snapshot.characters = vec![Character::new("Alice", "Realm").online(true)];
        snapshot.items = vec![
            Entity::new(2589, "Linen Cloth", EntityKind::Item)
                .with_owner("Alice-Realm")
                .with_tag(tags::TYPE, "Tradeskill")
                .with_quantity(20),
        ];
        let path = dir.join("snapshot.json");
        std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_render_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("pass.json");
        let args = RenderArgs {
            snapshot: write_snapshot(dir.path()),
            tab: TabKind::Items,
            query: None,
            format: RenderFormat::Json,
            output_file: Some(out.clone()),
        };
        let config = AppConfig::builder().ephemeral_state().build();
        assert_eq!(run_render(&args, &config).unwrap(), 0);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(value["tab"], "items");
        assert!(value["content_height"].as_u64().unwrap() > 0);
        assert_eq!(value["nodes"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_no_results_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let args = RenderArgs {
            snapshot: write_snapshot(dir.path()),
            tab: TabKind::Items,
            query: Some("zzz".to_string()),
            format: RenderFormat::Text,
            output_file: Some(dir.path().join("pass.txt")),
        };
        let config = AppConfig::builder().ephemeral_state().build();
        assert_eq!(run_render(&args, &config).unwrap(), 1);
    }

    #[test]
    fn test_missing_snapshot_is_error() {
        let args = RenderArgs {
            snapshot: PathBuf::from("/nonexistent/snapshot.json"),
            tab: TabKind::Currency,
            query: None,
            format: RenderFormat::Text,
            output_file: None,
        };
        let config = AppConfig::builder().ephemeral_state().build();
        assert!(run_render(&args, &config).is_err());
    }
}
