//! The config file store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Directory under the user config dir holding toolsmith files.
pub const CONFIG_DIR: &str = "toolsmith";

/// Config file name within [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.yaml";

/// The toolsmith config directory (`~/.config/toolsmith` on Linux).
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(CONFIG_DIR))
        .ok_or(ConfigError::NoConfigDir)
}

/// Full path of the config file.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// One config section: string keys to arbitrary YAML values.
pub type Section = BTreeMap<String, serde_yaml::Value>;

/// The whole config file: sections keyed by command namespace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    sections: BTreeMap<String, Section>,
}

impl Config {
    /// Load from the default location. A missing file is an empty config.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load from an explicit path. A missing file is an empty config.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::ReadFile {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Save to the default location, creating the directory when needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Save to an explicit path, creating parent directories when needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
                path: path.display().to_string(),
                source: e,
            })?;
        }
        let raw = serde_yaml::to_string(self)?;
        std::fs::write(path, raw).map_err(|e| ConfigError::WriteFile {
            path: path.display().to_string(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "wrote config file");
        Ok(())
    }

    /// Get a single value.
    pub fn get(&self, section: &str, key: &str) -> Option<&serde_yaml::Value> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    /// Set a single value, creating the section when needed.
    pub fn set(&mut self, section: &str, key: &str, value: serde_yaml::Value) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Remove a single value. Missing keys are [`ConfigError::KeyNotFound`].
    pub fn delete(&mut self, section: &str, key: &str) -> Result<()> {
        let removed = self
            .sections
            .get_mut(section)
            .and_then(|s| s.remove(key))
            .is_some();
        if !removed {
            return Err(ConfigError::KeyNotFound {
                section: section.to_string(),
                key: key.to_string(),
            });
        }
        // Drop now-empty sections so the file stays tidy.
        if self.sections.get(section).is_some_and(|s| s.is_empty()) {
            self.sections.remove(section);
        }
        Ok(())
    }

    /// The full map for one section.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// All section names.
    pub fn sections(&self) -> Vec<&str> {
        self.sections.keys().map(|s| s.as_str()).collect()
    }

    /// Remove an entire section.
    pub fn clear_section(&mut self, name: &str) {
        self.sections.remove(name);
    }

    /// Check every key in a section against a schema of dot-path patterns,
    /// where `*` matches any single segment
    /// (`"teams.*.project"` matches `"teams.plat.project"`).
    ///
    /// Returns the keys present in the section but matching no pattern.
    pub fn validate_section(&self, name: &str, schema: &[&str]) -> Vec<String> {
        let Some(section) = self.sections.get(name) else {
            return Vec::new();
        };
        let mut unrecognized: Vec<String> = flatten_keys("", section)
            .into_iter()
            .filter(|key| !schema.iter().any(|pattern| matches_pattern(key, pattern)))
            .collect();
        unrecognized.sort();
        unrecognized
    }
}

/// Recursively produce dot-separated leaf key paths from a section.
fn flatten_keys(prefix: &str, section: &Section) -> Vec<String> {
    let mut keys = Vec::new();
    for (key, value) in section {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value.as_mapping() {
            Some(mapping) if !mapping.is_empty() => {
                let nested: Section = mapping
                    .iter()
                    .filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), v.clone())))
                    .collect();
                keys.extend(flatten_keys(&full, &nested));
            }
            _ => keys.push(full),
        }
    }
    keys
}

/// Dot-separated key against a dot-separated pattern, `*` matching any
/// single segment.
fn matches_pattern(key: &str, pattern: &str) -> bool {
    let key_parts: Vec<&str> = key.split('.').collect();
    let pattern_parts: Vec<&str> = pattern.split('.').collect();
    if key_parts.len() != pattern_parts.len() {
        return false;
    }
    key_parts
        .iter()
        .zip(&pattern_parts)
        .all(|(k, p)| *p == "*" || k == p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> serde_yaml::Value {
        serde_yaml::Value::String(s.to_string())
    }

    #[test]
    fn test_load_missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yaml")).unwrap();
        assert!(config.sections().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.set("jwt", "default_profile", yaml("acme"));
        config.set("jira", "project", yaml("PLAT"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.get("jwt", "default_profile"), Some(&yaml("acme")));
        assert_eq!(loaded.get("jira", "project"), Some(&yaml("PLAT")));
    }

    #[test]
    fn test_get_missing_is_none() {
        let config = Config::default();
        assert!(config.get("jwt", "nope").is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let mut config = Config::default();
        config.set("jwt", "k", yaml("one"));
        config.set("jwt", "k", yaml("two"));
        assert_eq!(config.get("jwt", "k"), Some(&yaml("two")));
    }

    #[test]
    fn test_delete_missing_key_errors() {
        let mut config = Config::default();
        let err = config.delete("jwt", "nope").unwrap_err();
        assert!(matches!(err, ConfigError::KeyNotFound { .. }));
    }

    #[test]
    fn test_delete_drops_empty_section() {
        let mut config = Config::default();
        config.set("jwt", "k", yaml("v"));
        config.delete("jwt", "k").unwrap();
        assert!(config.section("jwt").is_none());
    }

    #[test]
    fn test_validate_section_reports_unrecognized_keys() {
        let raw = r#"
jira:
  project: PLAT
  teams:
    plat:
      project: PLAT
    infra:
      board: "42"
"#;
        let config: Config = serde_yaml::from_str(raw).unwrap();
        let unrecognized = config.validate_section("jira", &["project", "teams.*.project"]);
        assert_eq!(unrecognized, vec!["teams.infra.board"]);
    }

    #[test]
    fn test_validate_unknown_section_is_clean() {
        let config = Config::default();
        assert!(config.validate_section("jira", &["project"]).is_empty());
    }

    #[test]
    fn test_clear_section() {
        let mut config = Config::default();
        config.set("jira", "project", yaml("PLAT"));
        config.clear_section("jira");
        assert!(config.section("jira").is_none());
    }

    #[test]
    fn test_load_empty_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert!(config.sections().is_empty());
    }
}
