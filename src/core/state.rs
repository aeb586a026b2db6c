use std::env;

use nix::unistd::Pid;

use crate::core::env::EnvVarManager;
use crate::input::History;

/// A background command launched during this session. It is never reaped,
/// so only launch information is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundJob {
    pub pid: Pid,
    pub command: String,
}

/// Everything that survives from one input line to the next.
#[derive(Debug)]
pub struct SessionState {
    pub current_dir: String,
    pub last_status: i32,
    pub env: EnvVarManager,
    pub history: History,
    pub jobs: Vec<BackgroundJob>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        SessionState {
            current_dir: os_current_dir(),
            last_status: 0,
            env: EnvVarManager::new(),
            history: History::default(),
            jobs: Vec::new(),
        }
    }

    /// Re-reads the working directory from the OS.
    pub fn refresh_current_dir(&mut self) {
        self.current_dir = os_current_dir();
    }

    pub fn prompt(&self) -> String {
        format!("{}$ ", self.current_dir)
    }
}

fn os_current_dir() -> String {
    env::current_dir()
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "/".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session() {
        let state = SessionState::new();
        assert_eq!(state.last_status, 0);
        assert!(state.history.is_empty());
        assert!(state.jobs.is_empty());
        assert!(state.prompt().ends_with("$ "));
    }
}
