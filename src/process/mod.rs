use thiserror::Error;

pub mod launcher;
pub mod signal;

pub use launcher::{Launch, ProcessLauncher};
pub use signal::SignalNotifier;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("{0}: command not found")]
    CommandNotFound(String),
    #[error("fork: {0}")]
    Fork(nix::Error),
    #[error("waitpid: {0}")]
    Wait(nix::Error),
    #[error("invalid argument for {0}: contains a NUL byte")]
    NulByte(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessError {
    /// Status recorded as `$?` when a launch fails before a child runs.
    pub fn exit_status(&self) -> i32 {
        match self {
            ProcessError::CommandNotFound(_) => 127,
            _ => 1,
        }
    }
}
