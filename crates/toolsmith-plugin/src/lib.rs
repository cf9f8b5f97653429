//! Plugin discovery and dispatch.
//!
//! A plugin is any executable named `toolsmith-<name>` on `PATH`. Unknown
//! CLI subcommands are forwarded to the matching plugin with inherited
//! stdio; the plugin's exit status becomes the CLI's exit status. A
//! directory scan plus a process exec, nothing more.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

pub mod error;

pub use error::{PluginError, Result};

/// Executable name prefix marking a plugin.
pub const PLUGIN_PREFIX: &str = "toolsmith-";

/// One discovered plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    /// Name without the `toolsmith-` prefix.
    pub name: String,
    /// Full path of the executable.
    pub path: PathBuf,
}

/// Scan `PATH` for plugins. Earlier directories win on name collisions,
/// matching shell command resolution.
pub fn scan() -> Vec<Plugin> {
    let path_env = std::env::var_os("PATH").unwrap_or_default();
    scan_dirs(std::env::split_paths(&path_env))
}

/// Scan an explicit list of directories for plugins.
pub fn scan_dirs(dirs: impl IntoIterator<Item = PathBuf>) -> Vec<Plugin> {
    let mut plugins: BTreeMap<String, Plugin> = BTreeMap::new();
    for dir in dirs {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(name) = file_name.strip_prefix(PLUGIN_PREFIX) else {
                continue;
            };
            if name.is_empty() || !is_executable_file(&path) {
                continue;
            }
            let name = name.to_string();
            plugins
                .entry(name.clone())
                .or_insert_with(|| Plugin { name, path });
        }
    }
    plugins.into_values().collect()
}

/// Find one plugin by name on `PATH`.
pub fn find(name: &str) -> Option<Plugin> {
    scan().into_iter().find(|p| p.name == name)
}

/// Run a plugin with inherited stdio and return its exit status.
pub fn run(plugin: &Plugin, args: &[String]) -> Result<ExitStatus> {
    tracing::debug!(name = %plugin.name, path = %plugin.path.display(), "running plugin");
    Command::new(&plugin.path)
        .args(args)
        .status()
        .map_err(|e| PluginError::Launch {
            name: plugin.name.clone(),
            source: e,
        })
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}
