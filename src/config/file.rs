//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/fork-sizes/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! [weigh]
//! order = "listing"
//! preview_subdirs = false
//! verbose = true
//! ```

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Tree weigher options
    #[serde(default)]
    pub weigh: FileWeighConfig,
}

/// Tree weigher options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileWeighConfig {
    /// Recursion order (`"sorted"` or `"listing"`)
    pub order: Option<String>,

    /// Whether subdirectories get a preview line in their parent's listing
    pub preview_subdirs: Option<bool>,

    /// Whether to report progress on stderr
    pub verbose: Option<bool>,
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/fork-sizes/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `~/Library/Application Support` on macOS).
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fork-sizes").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file exists but cannot be read
    /// - The config file exists but contains invalid TOML or unexpected fields
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.weigh.order.is_none());
        assert!(config.weigh.preview_subdirs.is_none());
        assert!(config.weigh.verbose.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[weigh]
order = "listing"
preview_subdirs = false
verbose = true
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.weigh.order, Some("listing".to_string()));
        assert_eq!(config.weigh.preview_subdirs, Some(false));
        assert_eq!(config.weigh.verbose, Some(true));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.weigh.order.is_none());
    }

    #[test]
    fn test_malformed_config_errors() {
        let toml_content = r#"
[weigh]
verbose = "yes please"
"#;
        assert!(toml::from_str::<FileConfig>(toml_content).is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let toml_content = r"
[weigh]
threads = 4
";
        assert!(toml::from_str::<FileConfig>(toml_content).is_err());
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(p) = FileConfig::config_path() {
            assert!(p.ends_with("fork-sizes/config.toml"));
        }
    }
}
