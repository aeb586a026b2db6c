use std::{fs, path::Path};

use super::{ConfigError, ConfigPaths};
use crate::core::env::EnvVarManager;

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    /// Applies the startup file to `env`. Returns how many variables it set.
    pub fn load_configs(&self, env: &mut EnvVarManager) -> Result<usize, ConfigError> {
        let Some(path) = self.paths.rc_path() else {
            return Ok(0);
        };

        if !path.exists() {
            if self.paths.is_required() {
                return Err(ConfigError::ConfigFileNotFound(path.display().to_string()));
            }
            return Ok(0);
        }

        self.source(path, env)
    }

    fn source(&self, path: &Path, env: &mut EnvVarManager) -> Result<usize, ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut applied = 0;

        for (number, line) in content.lines().enumerate() {
            if self.process_line(line, env, number + 1)? {
                applied += 1;
            }
        }

        tracing::debug!(path = %path.display(), applied, "loaded startup file");
        Ok(applied)
    }

    fn process_line(
        &self,
        line: &str,
        env: &mut EnvVarManager,
        number: usize,
    ) -> Result<bool, ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(false);
        }

        match line.strip_prefix("export ") {
            Some(var_def) => self.process_env_var(var_def.trim(), env, number),
            None => {
                tracing::warn!(line = number, "ignoring unsupported startup line: {}", line);
                Ok(false)
            }
        }
    }

    fn process_env_var(
        &self,
        var_def: &str,
        env: &mut EnvVarManager,
        number: usize,
    ) -> Result<bool, ConfigError> {
        let (name, value) = var_def
            .split_once('=')
            .ok_or(ConfigError::InvalidLine(number))?;
        let name = name.trim();
        let mut value = value.trim();

        // Remove quotes if present
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }

        env.set(name, value)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn load(content: &str) -> Result<usize, ConfigError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huskrc");
        fs::write(&path, content).unwrap();

        let paths = ConfigPaths::Explicit(path);
        let mut vars = EnvVarManager::new();
        ConfigLoader::new(&paths).load_configs(&mut vars)
    }

    #[test]
    fn test_exports_and_comments() {
        let applied = load(
            r#"
            # a comment
            export HUSK_RC_PLAIN=plain
            export HUSK_RC_QUOTED="hello world"
            export HUSK_RC_SINGLE='single'
            alias ll='ls -la'
            "#,
        )
        .unwrap();

        assert_eq!(applied, 3);
        assert_eq!(env::var("HUSK_RC_PLAIN").unwrap(), "plain");
        assert_eq!(env::var("HUSK_RC_QUOTED").unwrap(), "hello world");
        assert_eq!(env::var("HUSK_RC_SINGLE").unwrap(), "single");
    }

    #[test]
    fn test_malformed_export() {
        let err = load("export NOEQUALS\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLine(1)));

        let err = load("\nexport =value\n").unwrap_err();
        assert!(matches!(err, ConfigError::Env(_)));
    }

    #[test]
    fn test_missing_files() {
        let mut vars = EnvVarManager::new();

        let required = ConfigPaths::Explicit("/no/such/huskrc".into());
        assert!(matches!(
            ConfigLoader::new(&required).load_configs(&mut vars),
            Err(ConfigError::ConfigFileNotFound(_))
        ));

        let optional = ConfigPaths::Default("/no/such/huskrc".into());
        assert_eq!(
            ConfigLoader::new(&optional).load_configs(&mut vars).unwrap(),
            0
        );

        assert_eq!(
            ConfigLoader::new(&ConfigPaths::None)
                .load_configs(&mut vars)
                .unwrap(),
            0
        );
    }
}
