//! Configuration system: TOML file + env var overrides + defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, ShojiError};
use crate::event::SelectionPolicy;

/// Full shoji configuration model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
}

/// Rendering defaults, overridable per run via CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Preferred backend name. Empty means "first available".
    pub backend: String,
    /// Whether a list/tree selection terminates the run (`terminal`) or is
    /// reported as a live, non-terminal callback (`live`).
    pub selection: SelectionPolicy,
}

impl Config {
    /// Default config file location: `$XDG_CONFIG_HOME/shoji/config.toml`,
    /// falling back to `~/.config/shoji/config.toml`.
    pub fn default_path() -> PathBuf {
        let base = env::var_os("XDG_CONFIG_HOME").map_or_else(
            || {
                let home = env::var_os("HOME").map_or_else(|| PathBuf::from("/tmp"), PathBuf::from);
                home.join(".config")
            },
            PathBuf::from,
        );
        base.join("shoji").join("config.toml")
    }

    /// Load configuration, merging (lowest to highest precedence): built-in
    /// defaults, the TOML file, environment variables. An explicit path
    /// (argument or `SHOJI_CONFIG`) must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = non_empty_env("SHOJI_CONFIG").map(PathBuf::from);
        let explicit = path.map(Path::to_path_buf).or(env_path);
        let is_explicit_path = explicit.is_some();
        let path_buf = explicit.unwrap_or_else(Self::default_path);

        let mut cfg = if path_buf.exists() {
            let raw =
                fs::read_to_string(&path_buf).map_err(|source| ShojiError::io("config", source))?;
            toml::from_str::<Self>(&raw)?
        } else if is_explicit_path {
            return Err(ShojiError::InvalidConfig {
                details: format!("missing configuration file: {}", path_buf.display()),
            });
        } else {
            Self::default()
        };

        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(raw) = non_empty_env("SHOJI_BACKEND") {
            self.ui.backend = raw;
        }
        if let Some(raw) = non_empty_env("SHOJI_SELECTION") {
            self.ui.selection = raw.parse().map_err(|()| ShojiError::InvalidConfig {
                details: format!("SHOJI_SELECTION: unknown policy '{raw}'"),
            })?;
        }
        Ok(())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}
