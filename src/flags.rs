use clap::Parser;
use std::path::PathBuf;

/// husk - a small interactive shell
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "husk", version, about)]
pub struct Flags {
    /// Suppress the startup banner
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug output on stderr
    #[arg(short, long)]
    pub debug: bool,

    /// Startup file to read instead of ~/.huskrc
    #[arg(long, env = "HUSK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run a single command line and exit
    #[arg(short = 'c')]
    pub command: Option<String>,
}

impl Flags {
    /// Filter directive handed to the tracing subscriber.
    pub fn log_filter(&self) -> String {
        if self.debug {
            return "husk=debug".to_string();
        }
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string())
    }
}
