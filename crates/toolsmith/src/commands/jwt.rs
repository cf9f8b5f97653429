//! JWT command - OAuth client profiles and token generation.

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use toolsmith_config::{Config, SecretRef};
use toolsmith_oauth::{exchange, OAuthClient, ProfileStore};
use toolsmith_secrets::{default_store, SecretStore};

/// Arguments for the jwt command.
#[derive(Args, Debug)]
pub struct JwtArgs {
    #[command(subcommand)]
    pub command: JwtCommand,
}

#[derive(Subcommand, Debug)]
pub enum JwtCommand {
    /// Configure an OAuth client profile for token generation
    Configure(ConfigureArgs),

    /// Generate an access token using a configured OAuth client
    Generate(GenerateArgs),

    /// List all available OAuth client profiles
    List,

    /// Delete an OAuth client profile
    Delete {
        /// Profile name to delete
        profile: String,
    },
}

/// Arguments for `toolsmith jwt configure`. Missing values are prompted
/// interactively.
#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// Profile name
    #[arg(long, short)]
    pub profile: Option<String>,

    /// OAuth client ID
    #[arg(long)]
    pub client_id: Option<String>,

    /// OAuth client secret or private key
    #[arg(long)]
    pub client_secret: Option<String>,

    /// OAuth token URL
    #[arg(long)]
    pub token_url: Option<String>,

    /// OAuth scopes (space-separated)
    #[arg(long)]
    pub scopes: Option<String>,

    /// OAuth audience
    #[arg(long)]
    pub audience: Option<String>,
}

/// Arguments for `toolsmith jwt generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// OAuth client profile name
    #[arg(long, short)]
    pub profile: String,
}

/// Run the jwt command.
pub async fn run(args: JwtArgs) -> Result<()> {
    let profiles = ProfileStore::new(default_store()?);
    match args.command {
        JwtCommand::Configure(args) => cmd_configure(&profiles, args).await,
        JwtCommand::Generate(args) => cmd_generate(&profiles, args).await,
        JwtCommand::List => cmd_list(&profiles).await,
        JwtCommand::Delete { profile } => cmd_delete(&profiles, &profile).await,
    }
}

async fn cmd_configure(
    profiles: &ProfileStore<Box<dyn SecretStore>>,
    args: ConfigureArgs,
) -> Result<()> {
    let profile = or_prompt(args.profile, "Profile name")?;
    if profile.is_empty() {
        bail!("profile name is required");
    }

    let client = OAuthClient {
        client_id: or_prompt(args.client_id, "Client ID")?,
        client_secret: or_prompt(args.client_secret, "Client Secret (or private key)")?,
        token_url: or_prompt(args.token_url, "Token URL")?,
        scopes: or_prompt(args.scopes, "Scopes (space-separated)")?,
        audience: or_prompt(args.audience, "Audience")?,
    };

    profiles
        .store(&profile, &client)
        .await
        .context("failed to store OAuth client profile")?;
    println!("Profile '{}' configured successfully.", profile);
    Ok(())
}

async fn cmd_generate(
    profiles: &ProfileStore<Box<dyn SecretStore>>,
    args: GenerateArgs,
) -> Result<()> {
    let client = profiles
        .fetch(&args.profile)
        .await
        .context("failed to load OAuth client profile")?;
    let token = exchange(&client)
        .await
        .context("failed to get token from OAuth server")?;

    // The token is the sole line of stdout so it can be piped directly.
    println!("{}", token);
    Ok(())
}

async fn cmd_list(profiles: &ProfileStore<Box<dyn SecretStore>>) -> Result<()> {
    let mut names = profiles.list().await.context("failed to list profiles")?;
    if names.is_empty() {
        println!("No profiles found.");
        return Ok(());
    }
    names.sort();
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

async fn cmd_delete(profiles: &ProfileStore<Box<dyn SecretStore>>, profile: &str) -> Result<()> {
    profiles
        .delete(profile)
        .await
        .with_context(|| format!("failed to delete profile '{}'", profile))?;

    // Best-effort cleanup of a config-held secret reference for this
    // profile; the reference or its secret may already be gone.
    if let Ok(mut config) = Config::load() {
        if let Some(value) = config.get("jwt", profile) {
            if let Some(secret_ref) = SecretRef::from_value(value) {
                if let Ok(store) = default_store() {
                    let _ = store.delete(&secret_ref.namespace, &secret_ref.name).await;
                }
            }
            let _ = config.delete("jwt", profile);
            let _ = config.save();
        }
    }

    println!("Profile '{}' deleted successfully.", profile);
    Ok(())
}

/// Use the flag value when given, otherwise ask on stdin. Answers are
/// trimmed; empty answers are allowed for optional fields.
fn or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v.trim().to_string()),
        None => prompt(label),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
