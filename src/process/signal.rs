use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use libc::{sighandler_t, signal, SIGQUIT, SIGTSTP, SIG_DFL, SIG_IGN};
use signal_hook::consts::{SIGALRM, SIGINT};

use crate::process::ProcessError;

/// Flags raised by signals that arrive while the shell is busy. The handlers
/// only store a flag; the session loop reads them between commands and
/// reacts by redrawing the prompt.
#[derive(Debug, Clone, Default)]
pub struct SignalNotifier {
    interrupted: Arc<AtomicBool>,
    alarm: Arc<AtomicBool>,
}

impl SignalNotifier {
    pub fn install() -> Result<Self, ProcessError> {
        let notifier = Self::default();
        signal_hook::flag::register(SIGINT, Arc::clone(&notifier.interrupted))?;
        signal_hook::flag::register(SIGALRM, Arc::clone(&notifier.alarm))?;

        unsafe {
            signal(SIGTSTP, SIG_IGN as sighandler_t);
            signal(SIGQUIT, SIG_IGN as sighandler_t);
        }
        Ok(notifier)
    }

    /// True once per SIGINT received since the last call.
    pub fn take_interrupt(&self) -> bool {
        self.interrupted.swap(false, Ordering::AcqRel)
    }

    /// True once per SIGALRM received since the last call.
    pub fn take_alarm(&self) -> bool {
        self.alarm.swap(false, Ordering::AcqRel)
    }
}

/// Undoes the shell's ignored dispositions in a freshly forked child so the
/// program it becomes sees default job-control behaviour.
pub fn restore_child_defaults() {
    unsafe {
        signal(SIGTSTP, SIG_DFL as sighandler_t);
        signal(SIGQUIT, SIG_DFL as sighandler_t);
    }
}
