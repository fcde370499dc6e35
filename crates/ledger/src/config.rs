//! Ledger configuration
//!
//! Loaded from a JSON file, then optionally overridden from the environment:
//! - `USERLEDGER_KEY_LAYOUT`: `flat` | `prefixed`
//! - `USERLEDGER_SCAN_POLICY`: `skip_non_users` | `strict`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_KEY_LAYOUT: &str = "USERLEDGER_KEY_LAYOUT";
pub const ENV_SCAN_POLICY: &str = "USERLEDGER_SCAN_POLICY";

/// Errors while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// How records are placed in the keyspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyLayout {
    /// Identity keys and hashes are store keys verbatim, sharing one
    /// namespace. Compatible with existing ledger state.
    #[default]
    Flat,

    /// Users under `user/<id>`, index entries under `txhash/<hash>`
    Prefixed,
}

impl KeyLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyLayout::Flat => "flat",
            KeyLayout::Prefixed => "prefixed",
        }
    }
}

impl fmt::Display for KeyLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyLayout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(KeyLayout::Flat),
            "prefixed" => Ok(KeyLayout::Prefixed),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_KEY_LAYOUT,
                value: s.to_string(),
            }),
        }
    }
}

/// What listing users does with records that are not users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    /// Skip index entries and anything else that is not a user
    #[default]
    SkipNonUsers,

    /// Skip index entries; any other undecodable record fails the listing
    Strict,
}

impl ScanPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanPolicy::SkipNonUsers => "skip_non_users",
            ScanPolicy::Strict => "strict",
        }
    }
}

impl fmt::Display for ScanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip_non_users" | "skip" => Ok(ScanPolicy::SkipNonUsers),
            "strict" => Ok(ScanPolicy::Strict),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_SCAN_POLICY,
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for the ledger access layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LedgerConfig {
    #[serde(default)]
    pub key_layout: KeyLayout,

    #[serde(default)]
    pub scan_policy: ScanPolicy,
}

impl LedgerConfig {
    /// Load configuration from JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_KEY_LAYOUT) {
            self.key_layout = value.parse()?;
        }
        if let Some(value) = lookup(ENV_SCAN_POLICY) {
            self.scan_policy = value.parse()?;
        }
        Ok(self)
    }
}
