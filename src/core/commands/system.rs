use super::{parse_arg, Command, CommandError, Context, Flow};
use nix::sys::signal::{kill, Signal};
use nix::unistd::{alarm, sleep, Pid};
use std::io::Write;

/// Built-ins that act on processes or timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemOp {
    Sleep,
    Kill,
    Alarm,
}

impl SystemOp {
    pub const ALL: [SystemOp; 3] = [SystemOp::Sleep, SystemOp::Kill, SystemOp::Alarm];

    pub fn name(self) -> &'static str {
        match self {
            SystemOp::Sleep => "sleep",
            SystemOp::Kill => "kill",
            SystemOp::Alarm => "alarm",
        }
    }
}

#[derive(Clone, Debug)]
pub struct SystemCommand {
    op: SystemOp,
}

impl SystemCommand {
    pub fn new(op: SystemOp) -> Self {
        Self { op }
    }
}

impl Command for SystemCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        match self.op {
            SystemOp::Sleep => {
                let seconds: u32 = parse_arg(args, 0, "missing operand")?;
                // returns early when a caught signal (SIGINT, SIGALRM) arrives
                let left = sleep(seconds);
                if left > 0 {
                    tracing::debug!(seconds, left, "sleep interrupted");
                }
            }
            SystemOp::Kill => {
                let pid: i32 = parse_arg(args, 0, "usage: kill <pid>")?;
                kill(Pid::from_raw(pid), Signal::SIGTERM)?;
            }
            SystemOp::Alarm => {
                let seconds: u32 = parse_arg(args, 0, "usage: alarm <seconds>")?;
                if seconds == 0 {
                    alarm::cancel();
                } else {
                    alarm::set(seconds);
                }
                writeln!(ctx.out, "Alarm set for {} seconds", seconds)?;
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;
    use super::*;
    use crate::core::state::SessionState;
    use nix::sys::wait::{waitpid, WaitStatus};
    use std::process::Command as Process;

    #[test]
    fn test_sleep_zero_and_bad_input() {
        let mut state = SessionState::new();
        assert!(run(&mut state, &["sleep", "0"]).0.is_ok());

        let (result, _) = run(&mut state, &["sleep"]);
        assert!(matches!(result, Err(CommandError::InvalidArguments(msg)) if msg == "missing operand"));

        let (result, _) = run(&mut state, &["sleep", "soon"]);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
    }

    #[test]
    fn test_kill_terminates_child() {
        let child = Process::new("/bin/sleep").arg("30").spawn().unwrap();
        let pid = child.id().to_string();

        let mut state = SessionState::new();
        assert!(run(&mut state, &["kill", &pid]).0.is_ok());

        let status = waitpid(Pid::from_raw(child.id() as i32), None).unwrap();
        assert!(matches!(status, WaitStatus::Signaled(_, Signal::SIGTERM, _)));
    }

    #[test]
    fn test_kill_missing_process() {
        let mut state = SessionState::new();
        // pid_max is well below this on Linux
        let (result, _) = run(&mut state, &["kill", "999999999"]);
        assert!(matches!(result, Err(CommandError::Sys(_))));
    }

    #[test]
    fn test_alarm_cancel() {
        let mut state = SessionState::new();
        let (result, printed) = run(&mut state, &["alarm", "0"]);
        assert!(result.is_ok());
        assert_eq!(printed, "Alarm set for 0 seconds\n");
    }
}
