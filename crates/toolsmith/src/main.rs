//! toolsmith - a pluggable CLI to reduce developer friction.
//!
//! Main entry point for the toolsmith CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{config, jwt, plugin, update};

/// Set when the daily upgrade nudge should be skipped entirely.
const NO_UPDATE_CHECK_ENV: &str = "TOOLSMITH_NO_UPDATE_CHECK";

/// Build hash injected at release time; local builds report `dev`.
fn build_hash() -> &'static str {
    option_env!("TOOLSMITH_BUILD_HASH").unwrap_or("dev")
}

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// toolsmith - a pluggable CLI to reduce developer friction
#[derive(Parser)]
#[command(name = "toolsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// OAuth client profiles and token generation
    Jwt(jwt::JwtArgs),

    /// Configuration management
    Config(config::ConfigArgs),

    /// Plugin discovery
    Plugin(plugin::PluginArgs),

    /// Update toolsmith to the latest release
    Update(update::UpdateArgs),

    /// Anything else is forwarded to a toolsmith-<name> plugin on PATH
    #[command(external_subcommand)]
    External(Vec<String>),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Daily best-effort upgrade nudge. Skipped while running the update
    // itself, and silent on every failure.
    if !matches!(cli.command, Commands::Update(_)) && std::env::var_os(NO_UPDATE_CHECK_ENV).is_none()
    {
        if let Ok(dir) = toolsmith_config::config_dir() {
            let cfg = toolsmith_update::UpdateConfig::default();
            toolsmith_update::nudge_if_outdated(&cfg, build_hash(), &dir).await;
        }
    }

    match cli.command {
        Commands::Jwt(args) => jwt::run(args).await,
        Commands::Config(args) => config::run(args).await,
        Commands::Plugin(args) => plugin::run(args).await,
        Commands::Update(args) => update::run(args, build_hash()).await,
        Commands::External(argv) => dispatch_plugin(argv),
    }
}

/// Forward an unknown subcommand to its plugin, propagating the exit status.
fn dispatch_plugin(argv: Vec<String>) -> Result<()> {
    let (name, args) = argv
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("missing subcommand"))?;
    let plugin = toolsmith_plugin::find(name).ok_or_else(|| {
        anyhow::anyhow!("unknown command '{name}': no 'toolsmith-{name}' plugin found on PATH")
    })?;

    let status = toolsmith_plugin::run(&plugin, args)?;
    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}

/// Console logging on stderr; stdout is reserved for command output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "toolsmith=debug,toolsmith_secrets=debug,toolsmith_oauth=debug,toolsmith_config=debug,toolsmith_update=debug,toolsmith_plugin=debug,info"
    } else {
        "toolsmith=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}
