//! Configuration system for butils.
//!
//! Settings are read from `~/.config/butils/config.toml`. Every field has a
//! default, so a missing file or a partial one is fine, and command-line
//! flags override whatever is configured.
//!
//! # Example
//!
//! ```
//! use butils::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert!(config.force_array);
//! assert!(!config.trim_values);
//!
//! // Create custom configuration
//! let custom = Config {
//!     trim_values: true,
//!     ..Config::default()
//! };
//! assert!(custom.map_options().trim);
//! ```

use crate::file::loader::LoadOptions;
use crate::pathmap::MapOptions;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration for butils.
///
/// # Fields
///
/// * `force_array` - Wrap single mapped values in a list (default: true)
/// * `trim_values` - Trim whitespace from mapped string values (default: false)
/// * `clean_xml` - Clean up XML input before decoding (default: true)
/// * `pretty_output` - Pretty-print JSON output (default: true)
/// * `log_level` - Log filter used when `RUST_LOG` is unset (default: "warn")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Wrap single mapped values in a list
    #[serde(default = "default_force_array")]
    pub force_array: bool,

    /// Trim whitespace from mapped string values
    #[serde(default)]
    pub trim_values: bool,

    /// Strip invalid characters and fix Windows character references in XML
    #[serde(default = "default_clean_xml")]
    pub clean_xml: bool,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty_output")]
    pub pretty_output: bool,

    /// Log filter directive, e.g. "warn" or "butils=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_force_array() -> bool {
    true
}

fn default_clean_xml() -> bool {
    true
}

fn default_pretty_output() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            force_array: default_force_array(),
            trim_values: false,
            clean_xml: default_clean_xml(),
            pretty_output: default_pretty_output(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/butils/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("butils");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        Self::load_from(&config_path).unwrap_or_else(|err| {
            warn!(path = %config_path.display(), error = %err, "ignoring unreadable config");
            Self::default()
        })
    }

    /// Loads configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing or invalid file is an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to an explicit path, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Value-mapping options derived from this configuration.
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            force_array: self.force_array,
            trim: self.trim_values,
        }
    }

    /// Loader options derived from this configuration.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            clean_xml: self.clean_xml,
        }
    }
}
