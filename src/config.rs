//! Configuration for sprig.
//!
//! Settings live in `.sprig.yaml` at the repository root. Every field has a
//! default, so the file is optional and may be partial. Unknown fields are
//! ignored for forward compatibility.

use crate::error::{Result, SprigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name, looked up at the repository root.
pub const CONFIG_FILE: &str = ".sprig.yaml";

/// Configuration for branch resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Integration branch new work branches are forked from (default: "main").
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    /// Name of the remote to search and fetch from (default: "origin").
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Fixed branch prefix applied to every issue (default: "feature/").
    /// Ignored when `branch_prefix_map` is set.
    #[serde(default = "default_branch_prefix")]
    pub branch_prefix: String,

    /// Per-issue-type prefixes as a comma-separated `Type:prefix` list,
    /// with an optional entry without a colon acting as the fallback for
    /// unmapped types. Example: "Bug:bugfix/,Task:feature/,misc/".
    #[serde(default)]
    pub branch_prefix_map: Option<String>,

    /// Maximum number of summary characters carried into the branch slug.
    #[serde(default = "default_slug_max_length")]
    pub slug_max_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_branch: default_base_branch(),
            remote: default_remote(),
            branch_prefix: default_branch_prefix(),
            branch_prefix_map: None,
            slug_max_length: default_slug_max_length(),
        }
    }
}

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SprigError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Load `.sprig.yaml` from the given repository root, or defaults when
    /// the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(repo_root: P) -> Result<Self> {
        let path = repo_root.as_ref().join(CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SprigError::UserError(format!("failed to parse config YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// The prefix map itself is validated where it is parsed, when the
    /// naming strategy is built.
    pub fn validate(&self) -> Result<()> {
        if self.slug_max_length == 0 {
            return Err(SprigError::UserError(
                "config validation failed: slug_max_length must be greater than 0".to_string(),
            ));
        }
        if self.base_branch.is_empty() {
            return Err(SprigError::UserError(
                "config validation failed: base_branch must not be empty".to_string(),
            ));
        }
        if self.remote.is_empty() {
            return Err(SprigError::UserError(
                "config validation failed: remote must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_base_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch_prefix() -> String {
    "feature/".to_string()
}

fn default_slug_max_length() -> usize {
    45
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.base_branch, "main");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.branch_prefix, "feature/");
        assert!(config.branch_prefix_map.is_none());
        assert_eq!(config.slug_max_length, 45);
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.base_branch, "main");
        assert_eq!(config.remote, "origin");
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let config = Config::from_yaml("base_branch: develop\nremote: upstream\n").unwrap();
        assert_eq!(config.base_branch, "develop");
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.branch_prefix, "feature/");
    }

    #[test]
    fn prefix_map_round_trips() {
        let config =
            Config::from_yaml("branch_prefix_map: \"Bug:bugfix/,Task:feature/,misc/\"\n").unwrap();
        assert_eq!(
            config.branch_prefix_map.as_deref(),
            Some("Bug:bugfix/,Task:feature/,misc/")
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let config = Config::from_yaml("base_branch: main\nfuture_setting: whatever\n").unwrap();
        assert_eq!(config.base_branch, "main");
    }

    #[test]
    fn zero_slug_length_is_rejected() {
        let err = Config::from_yaml("slug_max_length: 0\n").unwrap_err();
        assert!(err.to_string().contains("slug_max_length"));
    }

    #[test]
    fn empty_base_branch_is_rejected() {
        let err = Config::from_yaml("base_branch: \"\"\n").unwrap_err();
        assert!(err.to_string().contains("base_branch"));
    }

    #[test]
    fn invalid_yaml_is_a_user_error() {
        let err = Config::from_yaml(": not yaml").unwrap_err();
        assert!(matches!(err, SprigError::UserError(_)));
    }

    #[test]
    fn load_or_default_without_file_uses_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(temp_dir.path()).unwrap();
        assert_eq!(config.base_branch, "main");
    }

    #[test]
    fn load_or_default_reads_existing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE), "base_branch: trunk\n").unwrap();
        let config = Config::load_or_default(temp_dir.path()).unwrap();
        assert_eq!(config.base_branch, "trunk");
    }
}
