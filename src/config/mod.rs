//! Configuration management for gotocommit

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What confirming does when the candidate does not resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Close the dialog as confirmed, without a revision
    #[default]
    Close,
    /// Keep the dialog open and show the error inline
    Reprompt,
}

/// Application configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Event poll interval in milliseconds; loaders are polled at this rate
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    /// Pre-fill the expression field from the clipboard when it names a commit
    #[serde(default = "default_true")]
    pub prefill_from_clipboard: bool,

    /// Behavior when the confirmed candidate does not resolve
    #[serde(default)]
    pub on_unresolved: UnresolvedPolicy,

    /// Maximum number of entries shown under a focused tag or branch selector
    #[serde(default = "default_max_visible_entries")]
    pub max_visible_entries: usize,

    /// Include remote-tracking branches in the branch selector
    #[serde(default = "default_true")]
    pub show_remote_branches: bool,
}

const fn default_tick_rate() -> u64 {
    100
}

const fn default_true() -> bool {
    true
}

const fn default_max_visible_entries() -> usize {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            prefill_from_clipboard: true,
            on_unresolved: UnresolvedPolicy::default(),
            max_visible_entries: default_max_visible_entries(),
            show_remote_branches: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing the config file fails
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        crate::paths::config_path()
    }
}
