//! Plugin command - discovery of toolsmith-* executables.

use anyhow::Result;
use clap::{Args, Subcommand};

/// Arguments for the plugin command.
#[derive(Args, Debug)]
pub struct PluginArgs {
    #[command(subcommand)]
    pub command: PluginCommand,
}

#[derive(Subcommand, Debug)]
pub enum PluginCommand {
    /// List all plugins found on PATH
    List,
}

/// Run the plugin command.
pub async fn run(args: PluginArgs) -> Result<()> {
    match args.command {
        PluginCommand::List => cmd_list(),
    }
}

fn cmd_list() -> Result<()> {
    let plugins = toolsmith_plugin::scan();
    if plugins.is_empty() {
        println!("No plugins found.");
        return Ok(());
    }
    for plugin in plugins {
        println!("{}\t{}", plugin.name, plugin.path.display());
    }
    Ok(())
}
