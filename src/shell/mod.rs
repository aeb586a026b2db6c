use rustyline::{error::ReadlineError, history::FileHistory, Config as EditorConfig, Editor};

mod environment;
mod executor;
pub mod parser;

pub use environment::expand_variables;
pub use parser::{parse_line, OutputRedirect, ParsedCommand};

use crate::{
    core::{commands::BuiltinTable, commands::Flow, config::Config, state::SessionState},
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{history::MAX_HISTORY, ShellHelper},
    process::{ProcessLauncher, SignalNotifier},
};

use executor::CommandHandler;

pub struct Shell {
    pub(crate) editor: Editor<ShellHelper, FileHistory>,
    pub(crate) state: SessionState,
    pub(crate) builtins: BuiltinTable,
    pub(crate) launcher: ProcessLauncher,
    pub(crate) signals: SignalNotifier,
    pub(crate) highlighter: SyntaxHighlighter,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let signals = SignalNotifier::install()?;
        let mut state = SessionState::new();
        let builtins = BuiltinTable::new();

        let config = Config::new(flags.config.as_deref());
        if let Err(e) = config.load(&mut state.env) {
            if config.paths().is_required() {
                return Err(e.into());
            }
            eprintln!("husk: {}", e);
        }

        let editor_config = EditorConfig::builder()
            .max_history_size(MAX_HISTORY)?
            .auto_add_history(false)
            .build();
        let mut editor = Editor::<ShellHelper, FileHistory>::with_config(editor_config)?;

        let mut helper = ShellHelper::new();
        helper.refresh_commands(builtins.names(), state.env.search_path().dirs());
        editor.set_helper(Some(helper));

        Ok(Shell {
            editor,
            state,
            builtins,
            launcher: ProcessLauncher::new(),
            signals,
            highlighter: SyntaxHighlighter::new(),
            flags,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Runs one line through the same path the prompt uses and returns the
    /// resulting exit status.
    pub fn run_command(&mut self, line: &str) -> i32 {
        match self.execute_line(line) {
            Flow::Continue => self.state.last_status,
            Flow::Exit(code) => code,
        }
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.quiet {
            println!("husk - simple interactive shell");
            println!("Type 'help' for available commands");
        }

        loop {
            self.drain_notifications();

            let prompt = self.state.prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if let Flow::Exit(code) = self.execute_line(&line) {
                        std::process::exit(code);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!();
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Exit");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Signals that arrived while a command ran only move the next prompt
    /// onto a fresh line.
    fn drain_notifications(&self) {
        if self.signals.take_interrupt() {
            println!();
        }
        if self.signals.take_alarm() {
            println!("Alarm clock");
        }
    }
}
