use std::path::Path;

use thiserror::Error;

mod loader;
mod paths;

use crate::core::env::{EnvError, EnvVarManager};
use loader::ConfigLoader;
pub use paths::ConfigPaths;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    ConfigFileNotFound(String),
    #[error("line {0}: expected export NAME=value")]
    InvalidLine(usize),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("{0}")]
    Env(#[from] EnvError),
}

/// Startup configuration read before the first prompt.
pub struct Config {
    paths: ConfigPaths,
}

impl Config {
    pub fn new(explicit: Option<&Path>) -> Self {
        Config {
            paths: ConfigPaths::new(explicit),
        }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn load(&self, env: &mut EnvVarManager) -> Result<usize, ConfigError> {
        ConfigLoader::new(&self.paths).load_configs(env)
    }
}
