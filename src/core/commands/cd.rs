use super::{Command, CommandError, Context, Flow};
use std::env;
use std::io::Write;
use std::path::PathBuf;

#[derive(Clone, Debug, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    fn home_dir() -> PathBuf {
        env::var_os("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"))
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        let target = match args.first().map(String::as_str) {
            None | Some("~") => Self::home_dir(),
            Some("-") => {
                let old = env::var_os("OLDPWD")
                    .ok_or_else(|| CommandError::InvalidArguments("OLDPWD not set".into()))?;
                let old = PathBuf::from(old);
                writeln!(ctx.out, "{}", old.display())?;
                old
            }
            Some(dir) => PathBuf::from(dir),
        };

        let previous = env::current_dir()?;
        env::set_current_dir(&target)?;
        ctx.state.refresh_current_dir();

        // PWD/OLDPWD always hold absolute, valid names
        ctx.state.env.set("OLDPWD", &previous.to_string_lossy())?;
        let current = ctx.state.current_dir.clone();
        ctx.state.env.set("PWD", &current)?;

        tracing::debug!(from = %previous.display(), to = %current, "changed directory");
        Ok(Flow::Continue)
    }
}
