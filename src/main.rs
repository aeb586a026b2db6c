use clap::Parser;
use husk::error::ShellError;
use husk::flags::Flags;
use husk::shell::Shell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), ShellError> {
    let flags = Flags::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new(flags.log_filter()))
        .init();

    let command = flags.command.clone();
    let mut shell = Shell::new(flags)?;

    if let Some(line) = command {
        std::process::exit(shell.run_command(&line));
    }

    shell.run()
}
