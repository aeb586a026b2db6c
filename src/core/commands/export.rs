use super::{Command, CommandError, Context, Flow};
use std::io::Write;

const USAGE: &str = "usage: export VAR=value";

#[derive(Clone, Debug, Default)]
pub struct ExportCommand;

impl ExportCommand {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn parse_export(arg: &str) -> Result<(&str, &str), CommandError> {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| CommandError::InvalidArguments(USAGE.into()))?;

        if name.is_empty() {
            return Err(CommandError::InvalidArguments(USAGE.into()));
        }
        Ok((name, value))
    }

    fn list(&self, ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        for (name, value) in ctx.state.env.vars() {
            writeln!(ctx.out, "{}={}", name, value)?;
        }
        Ok(Flow::Continue)
    }
}

impl Command for ExportCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        let Some(arg) = args.first() else {
            return self.list(ctx);
        };

        let (name, value) = Self::parse_export(arg)?;
        ctx.state.env.set(name, value)?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;
    use super::*;
    use crate::core::state::SessionState;
    use std::env;

    #[test]
    fn test_export_simple() {
        let mut state = SessionState::new();
        let (result, printed) = run(&mut state, &["export", "HUSK_EXPORT_VAR=value"]);
        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(printed.is_empty());
        assert_eq!(env::var("HUSK_EXPORT_VAR").unwrap(), "value");
    }

    #[test]
    fn test_export_keeps_everything_after_first_equals() {
        let mut state = SessionState::new();
        run(&mut state, &["export", "HUSK_EXPORT_EQ=a=b"]).0.unwrap();
        assert_eq!(env::var("HUSK_EXPORT_EQ").unwrap(), "a=b");

        run(&mut state, &["export", "HUSK_EXPORT_EMPTY="]).0.unwrap();
        assert_eq!(env::var("HUSK_EXPORT_EMPTY").unwrap(), "");
    }

    #[test]
    fn test_export_lists_environment() {
        let mut state = SessionState::new();
        run(&mut state, &["export", "HUSK_EXPORT_LISTED=yes"]).0.unwrap();
        let (result, printed) = run(&mut state, &["export"]);
        assert!(result.is_ok());
        assert!(printed.lines().any(|line| line == "HUSK_EXPORT_LISTED=yes"));
    }

    #[test]
    fn test_export_invalid_format() {
        let mut state = SessionState::new();
        let (result, _) = run(&mut state, &["export", "INVALID"]);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));

        let (result, _) = run(&mut state, &["export", "=value"]);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
    }

    #[test]
    fn test_parse_export() {
        assert_eq!(
            ExportCommand::parse_export("PATH=/bin:/usr/bin").unwrap(),
            ("PATH", "/bin:/usr/bin")
        );
    }
}
