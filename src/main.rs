//! vaultview: collapsible inventory browser for multi-character snapshots.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vaultview::{
    cli::{self, ConfigAction, RenderArgs, RenderFormat},
    config::{AppConfig, ConfigPreset},
    tabs::TabKind,
};

#[derive(Parser)]
#[command(name = "vaultview")]
#[command(version)]
#[command(about = "Collapsible bank, currency and reputation browser", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Search matched nothing (render)
    3  Error occurred

EXAMPLES:
    # Browse a snapshot interactively
    vaultview view snapshot.json

    # Print the currency tab as a text trace
    vaultview render snapshot.json --tab currency

    # Search items and export the pass as JSON
    vaultview render snapshot.json --tab items --query linen --format json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start from a named preset (comfortable, compact, terminal)
    #[arg(long, global = true, value_parser = parse_preset)]
    preset: Option<ConfigPreset>,

    /// Also match search queries against the category tag
    #[arg(long, global = true)]
    match_category: bool,

    /// Do not read or write expansion state
    #[arg(long, global = true)]
    no_state: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a snapshot in the terminal
    View {
        /// Path to the snapshot JSON
        snapshot: PathBuf,
    },

    /// Run one render pass and print it
    Render {
        /// Path to the snapshot JSON
        snapshot: PathBuf,

        /// Tab to render (currency, items, storage, reputation)
        #[arg(short, long, default_value = "currency", value_parser = parse_tab)]
        tab: TabKind,

        /// Search query
        #[arg(short, long)]
        query: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = RenderFormat::Text)]
        format: RenderFormat,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Print configuration helpers
    Config {
        /// Print the JSON schema of the config file
        #[arg(long, conflicts_with = "example")]
        schema: bool,

        /// Print a commented example config file
        #[arg(long)]
        example: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_tab(s: &str) -> Result<TabKind, String> {
    TabKind::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = TabKind::ALL.iter().map(|t| t.name()).collect();
        format!("unknown tab '{s}' (expected one of: {})", names.join(", "))
    })
}

fn parse_preset(s: &str) -> Result<ConfigPreset, String> {
    ConfigPreset::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = ConfigPreset::all().iter().map(|p| p.name()).collect();
        format!("unknown preset '{s}' (expected one of: {})", names.join(", "))
    })
}

/// Resolve the effective config: preset or file, then CLI flags on top.
fn resolve_config(cli: &Cli) -> AppConfig {
    let mut overrides = AppConfig::builder().match_category(cli.match_category);
    if cli.no_state {
        overrides = overrides.ephemeral_state();
    }
    let overrides = overrides.build();

    if let Some(preset) = cli.preset {
        let mut config = AppConfig::from_preset(preset);
        config.merge(&overrides);
        return config;
    }

    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Using config {}", path.display());
    }
    config
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            3
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let config = resolve_config(&cli);

    match cli.command {
        Commands::View { snapshot } => cli::run_view(&snapshot, &config),
        Commands::Render {
            snapshot,
            tab,
            query,
            format,
            output_file,
        } => {
            let args = RenderArgs {
                snapshot,
                tab,
                query,
                format,
                output_file,
            };
            cli::run_render(&args, &config)
        }
        Commands::Config { schema, example } => {
            let action = if schema {
                ConfigAction::Schema
            } else if example {
                ConfigAction::Example
            } else {
                ConfigAction::Show
            };
            cli::run_config(action, &config, &mut io::stdout())
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "vaultview", &mut io::stdout());
            Ok(0)
        }
    }
}
