use super::{Command, CommandError, Context, Flow};
use nix::unistd::{getpid, getppid, getuid};
use std::io::Write;

const HELP: &str = "\
husk - simple interactive shell

Built-in commands:
  cd [dir|~|-]        Change directory
  echo [text]         Display text
  pwd                 Print working directory
  exit                Exit the shell
  help                Show this help
  history             Show command history
  export [var=value]  Set or list environment variables
  type <command>      Show how a command would be run
  jobs                Show background jobs
  getpid              Show current process ID
  getppid             Show parent process ID
  getuid              Show user ID
  sleep <sec>         Sleep for seconds
  kill <pid>          Send SIGTERM to a process
  alarm <sec>         Set an alarm
  mkdir <dir>         Create directory
  rmdir <dir>         Remove directory
  chmod <mode> <file> Change file permissions
  chown <uid> <file>  Change file owner
  umask [mask]        Set file creation mask
  stat <file>         Show file status
  pipe                Create a pipe
  touch <file>        Create empty file
  rename <old> <new>  Rename file

Features:
  - Redirection: < file, > file, >> file (after all arguments)
  - Background processes (trailing &)
  - Variables: $NAME, $? and $$
  - PATH resolution
  - Command history";

/// Built-ins that only report on the session or the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoOp {
    Echo,
    Pwd,
    Help,
    Type,
    Jobs,
    GetPid,
    GetPpid,
    GetUid,
}

impl InfoOp {
    pub const ALL: [InfoOp; 8] = [
        InfoOp::Echo,
        InfoOp::Pwd,
        InfoOp::Help,
        InfoOp::Type,
        InfoOp::Jobs,
        InfoOp::GetPid,
        InfoOp::GetPpid,
        InfoOp::GetUid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InfoOp::Echo => "echo",
            InfoOp::Pwd => "pwd",
            InfoOp::Help => "help",
            InfoOp::Type => "type",
            InfoOp::Jobs => "jobs",
            InfoOp::GetPid => "getpid",
            InfoOp::GetPpid => "getppid",
            InfoOp::GetUid => "getuid",
        }
    }
}

#[derive(Clone, Debug)]
pub struct InfoCommand {
    op: InfoOp,
}

impl InfoCommand {
    pub fn new(op: InfoOp) -> Self {
        Self { op }
    }

    fn type_of(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        let name = args
            .first()
            .ok_or_else(|| CommandError::InvalidArguments("missing argument".into()))?;

        if ctx.builtins.is_builtin(name) {
            writeln!(ctx.out, "{} is a shell builtin", name)?;
        } else if let Some(path) = ctx.state.env.resolve(name) {
            writeln!(ctx.out, "{} is {}", name, path.display())?;
        } else {
            writeln!(ctx.out, "{}: not found", name)?;
        }
        Ok(Flow::Continue)
    }

    fn jobs(&self, ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        for job in &ctx.state.jobs {
            writeln!(ctx.out, "[{}] {}", job.pid, job.command)?;
        }
        writeln!(ctx.out, "Background jobs feature not fully implemented")?;
        writeln!(
            ctx.out,
            "(Basic background process support is available using '&')"
        )?;
        Ok(Flow::Continue)
    }
}

impl Command for InfoCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        match self.op {
            InfoOp::Echo => writeln!(ctx.out, "{}", args.join(" "))?,
            InfoOp::Pwd => writeln!(ctx.out, "{}", ctx.state.current_dir)?,
            InfoOp::Help => writeln!(ctx.out, "{}", HELP)?,
            InfoOp::Type => return self.type_of(args, ctx),
            InfoOp::Jobs => return self.jobs(ctx),
            InfoOp::GetPid => writeln!(ctx.out, "Process ID: {}", getpid())?,
            InfoOp::GetPpid => writeln!(ctx.out, "Parent Process ID: {}", getppid())?,
            InfoOp::GetUid => writeln!(ctx.out, "User ID: {}", getuid())?,
        }
        Ok(Flow::Continue)
    }
}
