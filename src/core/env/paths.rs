use std::env;
use std::path::{Path, PathBuf};

use nix::unistd::{access, AccessFlags};

const DEFAULT_PATHS: [&str; 3] = ["/usr/local/bin", "/usr/bin", "/bin"];

/// Ordered list of directories searched for external commands.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn from_env() -> Self {
        let mut paths = Self::default();
        paths.setup_paths();
        paths
    }

    /// Rebuilds the list from `PATH`, falling back to the fixed defaults
    /// when the variable is unset.
    pub fn setup_paths(&mut self) {
        let value = env::var("PATH").ok();
        self.load(value.as_deref());
    }

    fn load(&mut self, value: Option<&str>) {
        self.dirs = match value {
            Some(value) => value
                .split(':')
                .filter(|segment| !segment.is_empty())
                .map(PathBuf::from)
                .collect(),
            None => DEFAULT_PATHS.iter().map(PathBuf::from).collect(),
        };
        tracing::debug!(dirs = ?self.dirs, "search path rebuilt");
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Maps a command name to an executable. Names containing `/` are
    /// taken literally; bare names are looked up in each directory in order.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        if name.contains('/') {
            let path = Path::new(name);
            return is_executable(path).then(|| path.to_path_buf());
        }

        self.dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
    }
}

fn is_executable(path: &Path) -> bool {
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}
