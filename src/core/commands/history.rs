use super::{Command, CommandError, Context, Flow};
use std::io::Write;

#[derive(Clone, Debug, Default)]
pub struct HistoryCommand;

impl HistoryCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HistoryCommand {
    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        for (i, line) in ctx.state.history.iter().enumerate() {
            writeln!(ctx.out, "{:>3}  {}", i + 1, line)?;
        }
        Ok(Flow::Continue)
    }
}
