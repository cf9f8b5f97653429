//! Self-update for the toolsmith binary.
//!
//! Release binaries are published as repository contents named
//! `toolsmith-<os>-<arch>-<hash>`. Updating is a version-string comparison
//! followed by a file download and a rename over the running executable,
//! with a single sudo retry when the rename is denied. A once-a-day stamp
//! file drives a best-effort "new version available" nudge on startup.

use std::io::Write;
use std::path::Path;

use serde::Deserialize;

pub mod error;

pub use error::{Result, UpdateError};

/// Stamp file name within the config directory for the daily nudge.
pub const CHECK_STAMP_FILE: &str = "upgrade-check";

/// Where releases live and what the binary is called.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Binary name, e.g. `toolsmith`.
    pub app_name: String,
    /// GitHub `owner/repo` hosting release binaries.
    pub repo: String,
    /// Override for the release index URL (tests).
    pub index_url: Option<String>,
    /// Override for the download base URL (tests).
    pub download_base: Option<String>,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            app_name: "toolsmith".to_string(),
            repo: "toolsmith-dev/toolsmith".to_string(),
            index_url: None,
            download_base: None,
        }
    }
}

impl UpdateConfig {
    fn index_url(&self) -> String {
        self.index_url.clone().unwrap_or_else(|| {
            format!(
                "https://api.github.com/repos/{}/contents/bin/release",
                self.repo
            )
        })
    }

    fn download_url(&self, filename: &str) -> String {
        let base = self.download_base.clone().unwrap_or_else(|| {
            format!(
                "https://raw.githubusercontent.com/{}/main/bin/release",
                self.repo
            )
        });
        format!("{}/{}", base, filename)
    }
}

/// Result of an update run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Current binary already carries the latest hash.
    UpToDate,
    /// Binary replaced with the release carrying this hash.
    Updated { hash: String },
}

#[derive(Debug, Deserialize)]
struct ReleaseEntry {
    name: String,
}

/// Map the compile-time platform onto release naming (`darwin`/`linux`,
/// `amd64`/`arm64`).
pub fn platform() -> Result<(&'static str, &'static str)> {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        "linux" => "linux",
        other => {
            return Err(UpdateError::UnsupportedPlatform {
                os: other.to_string(),
                arch: std::env::consts::ARCH.to_string(),
            })
        }
    };
    let arch = match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        other => {
            return Err(UpdateError::UnsupportedPlatform {
                os: os.to_string(),
                arch: other.to_string(),
            })
        }
    };
    Ok((os, arch))
}

fn asset_prefix(app_name: &str, os: &str, arch: &str) -> String {
    format!("{}-{}-{}-", app_name, os, arch)
}

/// Pick the latest hash for a platform out of the release names: the
/// lexicographically greatest suffix behind the platform prefix.
fn latest_hash<'a>(names: impl IntoIterator<Item = &'a str>, prefix: &str) -> Option<String> {
    names
        .into_iter()
        .filter_map(|name| name.strip_prefix(prefix))
        .filter(|hash| !hash.is_empty() && hash.chars().all(|c| c.is_ascii_alphanumeric()))
        .max()
        .map(|hash| hash.to_string())
}

fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("toolsmith-update")
        .build()
        .map_err(|e| UpdateError::Network(format!("failed to build HTTP client: {}", e)))
}

/// Fetch the release index and return the latest hash for this platform.
pub async fn fetch_latest_hash(cfg: &UpdateConfig) -> Result<String> {
    let (os, arch) = platform()?;
    let url = cfg.index_url();

    let response = http_client()?
        .get(&url)
        .send()
        .await
        .map_err(|e| UpdateError::Network(format!("release index request failed: {}", e)))?;
    if !response.status().is_success() {
        return Err(UpdateError::IndexStatus(response.status().as_u16()));
    }
    let entries: Vec<ReleaseEntry> = response
        .json()
        .await
        .map_err(|e| UpdateError::IndexDecode(e.to_string()))?;

    let prefix = asset_prefix(&cfg.app_name, os, arch);
    latest_hash(entries.iter().map(|e| e.name.as_str()), &prefix)
        .ok_or_else(|| UpdateError::NoRelease(format!("{}/{}", os, arch)))
}

/// Check for a newer release and swap the running binary when one exists.
pub async fn run_update(cfg: &UpdateConfig, current_hash: &str) -> Result<UpdateOutcome> {
    let (os, arch) = platform()?;
    let latest = fetch_latest_hash(cfg).await?;
    tracing::info!(current = %current_hash, latest = %latest, "checked release index");

    if latest == current_hash {
        return Ok(UpdateOutcome::UpToDate);
    }

    let filename = format!("{}{}", asset_prefix(&cfg.app_name, os, arch), latest);
    let url = cfg.download_url(&filename);
    tracing::info!(url = %url, "downloading release binary");

    let response = http_client()?
        .get(&url)
        .send()
        .await
        .map_err(|e| UpdateError::Download(format!("request failed: {}", e)))?;
    if !response.status().is_success() {
        return Err(UpdateError::Download(format!(
            "HTTP {}",
            response.status().as_u16()
        )));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| UpdateError::Download(format!("read failed: {}", e)))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(&format!("{}-update-", cfg.app_name))
        .tempfile()
        .map_err(|e| UpdateError::Replace(format!("failed to create temp file: {}", e)))?;
    tmp.write_all(&bytes)
        .map_err(|e| UpdateError::Replace(format!("failed to write binary: {}", e)))?;
    let tmp_path = tmp.into_temp_path();
    mark_executable(&tmp_path)?;

    let dest = std::env::current_exe()
        .map_err(|e| UpdateError::Replace(format!("could not locate current executable: {}", e)))?;
    replace_binary(&tmp_path, &dest)?;

    Ok(UpdateOutcome::Updated { hash: latest })
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .map_err(|e| UpdateError::Replace(format!("failed to set permissions: {}", e)))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Rename the downloaded binary over the destination. On a permission-denied
/// rename, retry once through `sudo mv` with inherited stdio so the user can
/// enter a password.
fn replace_binary(tmp: &Path, dest: &Path) -> Result<()> {
    match std::fs::rename(tmp, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("Permission denied. Retrying with sudo...");
            let status = std::process::Command::new("sudo")
                .arg("mv")
                .arg(tmp)
                .arg(dest)
                .status()
                .map_err(|e| UpdateError::Replace(format!("failed to run sudo: {}", e)))?;
            if !status.success() {
                return Err(UpdateError::Replace(
                    "sudo mv exited with a failure status".to_string(),
                ));
            }
            Ok(())
        }
        Err(e) => Err(UpdateError::Replace(e.to_string())),
    }
}

/// Once a day, check the release index and print a stderr notice when a
/// newer binary exists. Every failure here is silent; startup must never
/// break because an upgrade check could not run.
pub async fn nudge_if_outdated(cfg: &UpdateConfig, current_hash: &str, stamp_dir: &Path) {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let stamp = stamp_dir.join(CHECK_STAMP_FILE);
    if let Ok(contents) = std::fs::read_to_string(&stamp) {
        if !stamp_is_stale(&contents, &today) {
            return;
        }
    }

    if let Ok(latest) = fetch_latest_hash(cfg).await {
        if latest != current_hash {
            eprintln!(
                "A new version of {} is available ({}). Run '{} update'.",
                cfg.app_name, latest, cfg.app_name
            );
        }
    }

    let _ = std::fs::create_dir_all(stamp_dir);
    let _ = std::fs::write(&stamp, format!("{} {}", today, current_hash));
}

/// A stamp is stale when its recorded date is not today.
fn stamp_is_stale(contents: &str, today: &str) -> bool {
    contents.split_whitespace().next() != Some(today)
}
