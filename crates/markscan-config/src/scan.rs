//! Scanner behaviour switches.
//!
//! This module contains the `ScanConfig` struct, the defaults the `mscan`
//! subcommands use when no flag overrides them, and `ScanOverride`, the
//! partial form an override file or inline TOML parses into.

use serde::{Deserialize, Serialize};

/// Scanner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanConfig {
    /// Treat backtick runs as code spans when matching delimiters.
    /// Default: true
    #[serde(default = "default_true")]
    pub code_spans: bool,

    /// Let nested openers raise the depth instead of failing the match.
    /// Default: true
    #[serde(default = "default_true")]
    pub allow_nesting: bool,

    /// Honour `\"` inside quoted attribute values.
    /// Default: false
    #[serde(default)]
    pub escaped_quotes: bool,

    /// Resolve escapes and character references before URL escaping.
    /// Default: true
    #[serde(default = "default_true")]
    pub resolve_references: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            code_spans: true,
            allow_nesting: true,
            escaped_quotes: false,
            resolve_references: true,
        }
    }
}

impl ScanConfig {
    /// Merge an override into this config.
    ///
    /// Only keys the override sets are copied; the rest keep their
    /// current value.
    pub fn merge(&mut self, other: &ScanOverride) {
        if let Some(v) = other.code_spans {
            self.code_spans = v;
        }
        if let Some(v) = other.allow_nesting {
            self.allow_nesting = v;
        }
        if let Some(v) = other.escaped_quotes {
            self.escaped_quotes = v;
        }
        if let Some(v) = other.resolve_references {
            self.resolve_references = v;
        }
    }
}

/// Scanner settings as written in an override, with unset keys left `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_spans: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_nesting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escaped_quotes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve_references: Option<bool>,
}

fn default_true() -> bool {
    true
}
