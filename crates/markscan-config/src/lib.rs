//! Markscan Config
//!
//! This crate handles configuration loading and management
//! for markscan, supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/markscan/config.toml`
//! - macOS: `~/Library/Application Support/markscan/config.toml`
//! - Windows: `%APPDATA%\markscan\config.toml`
//!
//! # Example
//!
//! ```no_run
//! use markscan_config::Config;
//!
//! // Load config with defaults
//! let config = Config::load().unwrap();
//!
//! // Or load with an override file
//! let config = Config::load_with_override(Some("./custom.toml")).unwrap();
//! ```

mod scan;

pub use scan::{ScanConfig, ScanOverride};

use markscan_core::{MarkscanError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "markscan";

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r#"[scan]
CodeSpans         = true
AllowNesting      = true
EscapedQuotes     = false
ResolveReferences = true
"#;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Scanner settings
    #[serde(default)]
    pub scan: ScanConfig,
}

/// A partial configuration parsed from an override file or inline TOML.
///
/// Keys it leaves out are `None` and do not touch the config it is merged
/// into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOverride {
    #[serde(default)]
    pub scan: ScanOverride,
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use markscan_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[scan]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// If no config file exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| MarkscanError::Config(format!("Parse error in {}: {}", path.display(), e)))
    }

    /// Load configuration with an optional override file or string.
    ///
    /// The base config comes from the default location. When
    /// `override_config` names an existing file, that file is merged on
    /// top; otherwise it is parsed as inline TOML. Only the keys the
    /// override sets replace values from the base config.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use markscan_config::Config;
    ///
    /// let config = Config::load_with_override(Some("[scan]\nCodeSpans = false")).unwrap();
    /// assert!(!config.scan.code_spans);
    /// ```
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        Self::load()?.with_override(override_config)
    }

    /// Apply an optional override file or inline TOML string to this config.
    ///
    /// # Example
    ///
    /// ```
    /// use markscan_config::Config;
    ///
    /// let mut base = Config::default();
    /// base.scan.escaped_quotes = true;
    ///
    /// let config = base.with_override(Some("[scan]\nCodeSpans = false")).unwrap();
    /// assert!(!config.scan.code_spans);
    /// assert!(config.scan.escaped_quotes);
    /// ```
    pub fn with_override(mut self, override_config: Option<&str>) -> Result<Self> {
        if let Some(override_str) = override_config {
            let override_path = Path::new(override_str);
            let override_toml = if override_path.is_file() {
                std::fs::read_to_string(override_path)?
            } else {
                override_str.to_string()
            };

            let override_config: ConfigOverride = toml::from_str(&override_toml)
                .map_err(|e| MarkscanError::Config(format!("Override parse error: {}", e)))?;
            self.merge(&override_config);
        }

        Ok(self)
    }

    /// Merge an override into this config.
    ///
    /// Keys set in `other` take precedence; unset keys leave `self` as is.
    ///
    /// # Example
    ///
    /// ```
    /// use markscan_config::{Config, ConfigOverride};
    ///
    /// let mut base = Config::default();
    /// let override_config: ConfigOverride = toml::from_str(r#"
    ///     [scan]
    ///     EscapedQuotes = true
    /// "#).unwrap();
    ///
    /// base.merge(&override_config);
    /// assert!(base.scan.escaped_quotes);
    /// assert!(base.scan.code_spans);
    /// ```
    pub fn merge(&mut self, other: &ConfigOverride) {
        self.scan.merge(&other.scan);
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
