//! Config command - configuration management.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use toolsmith_config::{config_path, Config};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show a config value
    Get {
        /// Section (command namespace)
        section: String,
        /// Key within the section
        key: String,
    },

    /// Set a config value
    Set {
        /// Section (command namespace)
        section: String,
        /// Key within the section
        key: String,
        /// Value to store
        value: String,
    },

    /// Delete a config value
    Delete {
        /// Section (command namespace)
        section: String,
        /// Key within the section
        key: String,
    },

    /// Show the whole config file
    Show,

    /// Show the config file path
    Path,
}

/// Run the config command.
pub async fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Get { section, key } => cmd_get(&section, &key),
        ConfigCommand::Set {
            section,
            key,
            value,
        } => cmd_set(&section, &key, &value),
        ConfigCommand::Delete { section, key } => cmd_delete(&section, &key),
        ConfigCommand::Show => cmd_show(),
        ConfigCommand::Path => cmd_path(),
    }
}

fn cmd_get(section: &str, key: &str) -> Result<()> {
    let config = Config::load()?;
    match config.get(section, key) {
        Some(serde_yaml::Value::String(s)) => println!("{}", s),
        Some(value) => print!("{}", serde_yaml::to_string(value)?),
        None => anyhow::bail!("config key '{}.{}' not found", section, key),
    }
    Ok(())
}

fn cmd_set(section: &str, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(section, key, serde_yaml::Value::String(value.to_string()));
    config.save().context("failed to write config")?;
    Ok(())
}

fn cmd_delete(section: &str, key: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.delete(section, key)?;
    config.save().context("failed to write config")?;
    Ok(())
}

fn cmd_show() -> Result<()> {
    let config = Config::load()?;
    if config.sections().is_empty() {
        println!("No configuration set.");
        return Ok(());
    }
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

fn cmd_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}
