use std::path::{Path, PathBuf};

const RC_FILE: &str = ".huskrc";

/// Where the startup file comes from. An explicit path must exist; the
/// default one in the home directory is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPaths {
    Explicit(PathBuf),
    Default(PathBuf),
    None,
}

impl ConfigPaths {
    pub fn new(explicit: Option<&Path>) -> Self {
        Self::resolve(explicit, dirs::home_dir())
    }

    fn resolve(explicit: Option<&Path>, home: Option<PathBuf>) -> Self {
        match (explicit, home) {
            (Some(path), _) => ConfigPaths::Explicit(path.to_path_buf()),
            (None, Some(home)) => ConfigPaths::Default(home.join(RC_FILE)),
            (None, None) => ConfigPaths::None,
        }
    }

    pub fn rc_path(&self) -> Option<&Path> {
        match self {
            ConfigPaths::Explicit(path) | ConfigPaths::Default(path) => Some(path),
            ConfigPaths::None => None,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, ConfigPaths::Explicit(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_under_home() {
        let paths = ConfigPaths::resolve(None, Some(PathBuf::from("/home/testuser")));
        assert_eq!(paths.rc_path(), Some(Path::new("/home/testuser/.huskrc")));
        assert!(!paths.is_required());
    }

    #[test]
    fn test_explicit_path_wins() {
        let paths = ConfigPaths::resolve(
            Some(Path::new("/etc/husk.rc")),
            Some(PathBuf::from("/home/testuser")),
        );
        assert_eq!(paths.rc_path(), Some(Path::new("/etc/husk.rc")));
        assert!(paths.is_required());
    }

    #[test]
    fn test_missing_home() {
        let paths = ConfigPaths::resolve(None, None);
        assert_eq!(paths, ConfigPaths::None);
        assert_eq!(paths.rc_path(), None);
    }
}
