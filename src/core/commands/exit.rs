use super::{Command, CommandError, Context, Flow};
use std::io::Write;

#[derive(Clone, Debug, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    /// Always succeeds; the session loop terminates the process as soon as
    /// it sees `Flow::Exit`.
    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        writeln!(ctx.out, "Goodbye!")?;
        Ok(Flow::Exit(0))
    }
}
