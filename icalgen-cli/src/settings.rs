use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

static DEFAULT_LOG_FILTER: &str = "info";

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Settings from ~/.config/icalgen/config.toml, overridable with
/// `ICALGEN_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Alternate schema definition; the embedded one is used when unset
    pub schema: Option<PathBuf>,

    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            schema: None,
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("icalgen");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load settings from `path` (which need not exist) and the environment.
    pub fn load_from(path: &Path) -> Result<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("ICALGEN"))
            .build()
            .and_then(|config| config.try_deserialize::<Settings>())
            .with_context(|| format!("Could not load settings from {}", path.display()))
    }

    /// The configured schema path with `~` expanded.
    pub fn schema_path(&self) -> Option<PathBuf> {
        self.schema
            .as_ref()
            .map(|p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).into_owned()))
    }
}
