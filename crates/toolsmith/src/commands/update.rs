//! Update command - swap the running binary for the latest release.

use anyhow::Result;
use clap::Args;

use toolsmith_update::{UpdateConfig, UpdateOutcome};

/// Arguments for the update command.
#[derive(Args, Debug)]
pub struct UpdateArgs {}

/// Run the update command.
pub async fn run(_args: UpdateArgs, current_hash: &str) -> Result<()> {
    let cfg = UpdateConfig::default();
    println!("Current hash: {}", current_hash);

    match toolsmith_update::run_update(&cfg, current_hash).await? {
        UpdateOutcome::UpToDate => println!("Already up to date."),
        UpdateOutcome::Updated { hash } => println!("toolsmith updated to {}.", hash),
    }
    Ok(())
}
