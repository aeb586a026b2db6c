use std::{collections::BTreeSet, fs, path::PathBuf};

use rustyline::completion::Pair;

#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh_commands<'a>(
        &mut self,
        builtins: impl IntoIterator<Item = &'a str>,
        dirs: &[PathBuf],
    ) {
        self.commands.clear();
        self.commands.extend(builtins.into_iter().map(String::from));
        self.add_path_commands(dirs);
    }

    fn add_path_commands(&mut self, dirs: &[PathBuf]) {
        for dir in dirs {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                if let Ok(file_type) = entry.file_type() {
                    if file_type.is_file() || file_type.is_symlink() {
                        if let Some(name) = entry.file_name().to_str() {
                            self.commands.insert(name.to_string());
                        }
                    }
                }
            }
        }
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect()
    }
}
