// Optional settings read from tasklist.toml in the working directory
use derivative::Derivative;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::app::error::{Result, TaskError};

pub const CONFIG_FILE: &str = "tasklist.toml";

#[derive(Derivative, Debug, Clone, PartialEq, Deserialize)]
#[derivative(Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    // Where the tasks are persisted
    #[derivative(Default(value = "PathBuf::from(\"tasklist.json\")"))]
    pub file: PathBuf,
    // Width of the description column, longer lines get wrapped
    #[derivative(Default(value = "44"))]
    pub max_chars: usize,
}

impl Config {
    // Read the config at the given path, falling back to defaults when there is no file
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        if config.max_chars == 0 {
            return Err(TaskError::Config("max_chars must be at least 1".to_string()));
        }

        tracing::info!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
