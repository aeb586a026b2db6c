use std::ffi::{CString, NulError};
use std::io::{self, Write};
use std::os::fd::RawFd;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use nix::errno::Errno;
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{close, dup2, execv, fork, write, ForkResult, Pid};

use super::{signal, ProcessError};
use crate::shell::parser::ParsedCommand;

/// How a successfully started child was handled by the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// The child ran to completion; carries its exit status.
    Foreground { status: i32 },
    /// The child was left running and will not be waited for.
    Background { pid: Pid },
}

#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }

    /// Forks, applies the redirections in the child and replaces its image
    /// with `program`. `argv[0]` stays the name the user typed.
    pub fn launch(
        &self,
        program: &Path,
        command: &ParsedCommand,
    ) -> Result<Launch, ProcessError> {
        let name = command.name().unwrap_or_default().to_string();
        let to_nul_error = |_: NulError| ProcessError::NulByte(name.clone());

        let path = CString::new(program.as_os_str().as_bytes()).map_err(to_nul_error)?;
        let argv = command
            .argv
            .iter()
            .map(|arg| CString::new(arg.as_bytes()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_nul_error)?;

        // Anything still buffered would otherwise be written twice.
        io::stdout().flush()?;

        match unsafe { fork() } {
            Ok(ForkResult::Child) => run_child(&path, &argv, command),
            Ok(ForkResult::Parent { child }) => {
                tracing::debug!(pid = child.as_raw(), program = %program.display(), background = command.background, "forked");
                if command.background {
                    Ok(Launch::Background { pid: child })
                } else {
                    wait_for(child).map(|status| Launch::Foreground { status })
                }
            }
            Err(e) => Err(ProcessError::Fork(e)),
        }
    }
}

/// Blocks until `child` terminates and maps its wait status to a shell
/// exit status.
fn wait_for(child: Pid) -> Result<i32, ProcessError> {
    loop {
        match waitpid(child, None) {
            Ok(WaitStatus::Exited(_, code)) => {
                tracing::debug!(pid = child.as_raw(), code, "child exited");
                return Ok(code);
            }
            Ok(WaitStatus::Signaled(_, sig, _)) => {
                tracing::debug!(pid = child.as_raw(), signal = %sig, "child killed");
                return Ok(128 + sig as i32);
            }
            Ok(_) | Err(Errno::EINTR) => continue,
            Err(e) => return Err(ProcessError::Wait(e)),
        }
    }
}

fn run_child(path: &CString, argv: &[CString], command: &ParsedCommand) -> ! {
    signal::restore_child_defaults();

    if let Some(input) = &command.input {
        if let Err(e) = redirect(input, OFlag::O_RDONLY, libc::STDIN_FILENO) {
            child_fail(input, e);
        }
    }

    if let Some(output) = &command.output {
        let mut flags = OFlag::O_WRONLY | OFlag::O_CREAT;
        flags |= if output.append {
            OFlag::O_APPEND
        } else {
            OFlag::O_TRUNC
        };
        if let Err(e) = redirect(&output.path, flags, libc::STDOUT_FILENO) {
            child_fail(&output.path, e);
        }
    }

    match execv(path, argv) {
        Ok(never) => match never {},
        Err(e) => child_fail(&path.to_string_lossy(), e),
    }
}

fn redirect(path: &str, flags: OFlag, target: RawFd) -> nix::Result<()> {
    let fd = open(path, flags, Mode::from_bits_truncate(0o644))?;
    if fd != target {
        dup2(fd, target)?;
        close(fd)?;
    }
    Ok(())
}

/// Reports a failure from inside the forked child and ends it with status 1
/// without running any of the parent's cleanup.
fn child_fail(context: &str, err: Errno) -> ! {
    let message = format!("husk: {}: {}\n", context, err.desc());
    let _ = write(io::stderr(), message.as_bytes());
    unsafe { libc::_exit(1) }
}
