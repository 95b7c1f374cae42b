use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::options::{DEFAULT_LENGTH, LookupOptions};
use crate::store::DEFAULT_EXECUTABLE;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Secret-manager executable, looked up on `PATH` unless absolute.
    #[serde(default = "default_executable")]
    pub executable: String,
    #[serde(default)]
    pub defaults: Defaults,
}

/// Defaults for options a lookup does not set.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    #[serde(default = "default_length")]
    pub length: u32,
    #[serde(default)]
    pub symbols: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            defaults: Defaults::default(),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            length: default_length(),
            symbols: false,
        }
    }
}

fn default_executable() -> String {
    DEFAULT_EXECUTABLE.to_string()
}

fn default_length() -> u32 {
    DEFAULT_LENGTH
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config for a run.
    ///
    /// An explicit path must exist. The default path is optional: when it is
    /// missing the built-in defaults apply.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Return the default config file path, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gopass-lookup").join("config.toml"))
    }

    /// Options used for keys a lookup leaves unset.
    pub fn lookup_defaults(&self) -> LookupOptions {
        LookupOptions {
            length: self.defaults.length,
            symbols: self.defaults.symbols,
            ..LookupOptions::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.executable.trim().is_empty() {
            bail!("Config `executable` must not be empty");
        }
        if self.defaults.length == 0 {
            bail!("Config `defaults.length` must be greater than zero");
        }
        Ok(())
    }
}
