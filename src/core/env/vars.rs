use super::{EnvError, SearchPath};
use std::env;
use std::path::PathBuf;

/// Owns the process environment as seen by the session, and keeps the
/// command search path in step with `PATH`.
#[derive(Clone, Debug)]
pub struct EnvVarManager {
    search_path: SearchPath,
}

impl Default for EnvVarManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvVarManager {
    pub fn new() -> Self {
        Self {
            search_path: SearchPath::from_env(),
        }
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() || name.contains(['=', '\0']) {
            return Err(EnvError::InvalidName(name.to_string()));
        }
        if value.contains('\0') {
            return Err(EnvError::InvalidValue("NUL byte in value"));
        }

        env::set_var(name, value);
        tracing::debug!(name, value, "environment variable set");

        if name == "PATH" {
            self.search_path.setup_paths();
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    /// All variables, lossily decoded, in environment order.
    pub fn vars(&self) -> Vec<(String, String)> {
        env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    pub fn resolve(&self, command: &str) -> Option<PathBuf> {
        self.search_path.resolve(command)
    }
}
