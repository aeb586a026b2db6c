use std::io::{self, IsTerminal};

use super::environment::EnvironmentHandler;
use super::parser::{parse_line, ParsedCommand};
use crate::core::commands::Flow;
use crate::core::state::BackgroundJob;
use crate::process::{Launch, ProcessError};

pub(crate) trait CommandHandler {
    fn execute_line(&mut self, line: &str) -> Flow;
    fn run_external(&mut self, command: &ParsedCommand);
}

impl CommandHandler for super::Shell {
    fn execute_line(&mut self, line: &str) -> Flow {
        let line = line.trim();
        let expanded = self.expand_env_vars(line);
        let command = parse_line(&expanded);

        if command.is_empty() {
            return Flow::Continue;
        }

        self.state.history.add(line);
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::warn!(error = %e, "could not add line to editor history");
        }

        // a built-in cannot run detached; `&` picks the program of that name
        let detach = command.background
            && command
                .name()
                .is_some_and(|name| self.state.env.resolve(name).is_some());

        let mut stdout = io::stdout();
        let dispatched = if detach {
            None
        } else {
            self.builtins
                .dispatch(&command.argv, &mut self.state, &mut stdout)
        };
        if let Some(flow) = dispatched {
            if command.name() == Some("export") {
                let dirs = self.state.env.search_path().dirs();
                if let Some(helper) = self.editor.helper_mut() {
                    helper.refresh_commands(self.builtins.names(), dirs);
                }
            }
            return flow;
        }

        self.run_external(&command);
        Flow::Continue
    }

    fn run_external(&mut self, command: &ParsedCommand) {
        let name = command.name().unwrap_or_default();

        let result = match self.state.env.resolve(name) {
            Some(program) => {
                tracing::debug!(name, program = %program.display(), "resolved");
                self.launcher.launch(&program, command)
            }
            None => Err(ProcessError::CommandNotFound(name.to_string())),
        };

        match result {
            Ok(Launch::Foreground { status }) => self.state.last_status = status,
            Ok(Launch::Background { pid }) => {
                println!("[{}] {}", pid, name);
                self.state.jobs.push(BackgroundJob {
                    pid,
                    command: name.to_string(),
                });
            }
            Err(e) => {
                let message = e.to_string();
                if io::stderr().is_terminal() {
                    eprintln!("{}", self.highlighter.highlight_error(&message));
                } else {
                    eprintln!("{}", message);
                }
                self.state.last_status = e.exit_status();
            }
        }
    }
}
