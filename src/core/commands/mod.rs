use std::collections::BTreeMap;
use std::io::{self, Write};

use nix::errno::Errno;
use thiserror::Error;

mod cd;
mod exit;
mod export;
mod file;
mod history;
mod info;
mod system;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use export::ExportCommand;
pub use file::{FileCommand, FileOp};
pub use history::HistoryCommand;
pub use info::{InfoCommand, InfoOp};
pub use system::{SystemCommand, SystemOp};

use crate::core::env::EnvError;
use crate::core::state::SessionState;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{}", .0.desc())]
    Sys(#[from] Errno),
    #[error("{}", describe_io(.0))]
    Io(#[from] io::Error),
    #[error("{0}")]
    Env(#[from] EnvError),
}

/// Renders an I/O error the way perror would, without the `(os error N)`
/// suffix.
fn describe_io(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => Errno::from_raw(code).desc().to_string(),
        None => err.to_string(),
    }
}

/// What the session loop does after a built-in returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// Everything a built-in may read or change while it runs.
pub struct Context<'a> {
    pub state: &'a mut SessionState,
    pub builtins: &'a BuiltinTable,
    pub out: &'a mut dyn Write,
}

pub trait Command {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError>;
}

#[derive(Clone, Debug)]
enum BuiltinCommand {
    Cd(CdCommand),
    Exit(ExitCommand),
    Export(ExportCommand),
    History(HistoryCommand),
    Info(InfoCommand),
    System(SystemCommand),
    File(FileCommand),
}

impl Command for BuiltinCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        match self {
            BuiltinCommand::Cd(cmd) => cmd.execute(args, ctx),
            BuiltinCommand::Exit(cmd) => cmd.execute(args, ctx),
            BuiltinCommand::Export(cmd) => cmd.execute(args, ctx),
            BuiltinCommand::History(cmd) => cmd.execute(args, ctx),
            BuiltinCommand::Info(cmd) => cmd.execute(args, ctx),
            BuiltinCommand::System(cmd) => cmd.execute(args, ctx),
            BuiltinCommand::File(cmd) => cmd.execute(args, ctx),
        }
    }
}

/// Name to built-in mapping. Filled once at startup and never changed, so a
/// name is either always a built-in or always looked up on the search path.
#[derive(Clone, Debug)]
pub struct BuiltinTable {
    commands: BTreeMap<&'static str, BuiltinCommand>,
}

impl Default for BuiltinTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinTable {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();

        commands.insert("cd", BuiltinCommand::Cd(CdCommand::new()));
        commands.insert("exit", BuiltinCommand::Exit(ExitCommand::new()));
        commands.insert("export", BuiltinCommand::Export(ExportCommand::new()));
        commands.insert("history", BuiltinCommand::History(HistoryCommand::new()));

        for op in InfoOp::ALL {
            commands.insert(op.name(), BuiltinCommand::Info(InfoCommand::new(op)));
        }
        for op in SystemOp::ALL {
            commands.insert(op.name(), BuiltinCommand::System(SystemCommand::new(op)));
        }
        for op in FileOp::ALL {
            commands.insert(op.name(), BuiltinCommand::File(FileCommand::new(op)));
        }

        Self { commands }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn execute(
        &self,
        name: &str,
        args: &[String],
        state: &mut SessionState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let cmd = self
            .commands
            .get(name)
            .ok_or_else(|| CommandError::NotFound(name.to_string()))?;

        let mut ctx = Context {
            state,
            builtins: self,
            out,
        };
        let flow = cmd.execute(args, &mut ctx)?;
        ctx.out.flush()?;
        Ok(flow)
    }

    /// Runs `argv` if it names a built-in. `None` means the caller should
    /// try an external program instead. Failures are reported on stderr and
    /// never end the session.
    pub fn dispatch(
        &self,
        argv: &[String],
        state: &mut SessionState,
        out: &mut dyn Write,
    ) -> Option<Flow> {
        let name = argv.first()?;
        if !self.is_builtin(name) {
            return None;
        }

        tracing::debug!(builtin = %name, "dispatching built-in");
        match self.execute(name, &argv[1..], state, out) {
            Ok(flow) => Some(flow),
            Err(e) => {
                eprintln!("{}: {}", name, e);
                Some(Flow::Continue)
            }
        }
    }
}

/// Parses a required argument, turning a bad value into a usage error.
pub(crate) fn parse_arg<T: std::str::FromStr>(
    args: &[String],
    index: usize,
    usage: &str,
) -> Result<T, CommandError> {
    let raw = args
        .get(index)
        .ok_or_else(|| CommandError::InvalidArguments(usage.to_string()))?;
    raw.parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid number '{}'", raw)))
}

/// Parses an octal mode or mask such as `755` or `0022`.
pub(crate) fn parse_octal(raw: &str) -> Result<u32, CommandError> {
    u32::from_str_radix(raw, 8)
        .map_err(|_| CommandError::InvalidArguments(format!("invalid octal mode '{}'", raw)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Runs a built-in against `state`, returning its result and whatever
    /// it printed.
    pub fn run(
        state: &mut SessionState,
        line: &[&str],
    ) -> (Result<Flow, CommandError>, String) {
        let table = BuiltinTable::new();
        let args: Vec<String> = line[1..].iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        let result = table.execute(line[0], &args, state, &mut out);
        (result, String::from_utf8_lossy(&out).into_owned())
    }
}
