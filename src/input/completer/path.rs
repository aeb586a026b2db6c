use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

#[derive(Clone, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    /// Completes the last path component of `incomplete`. Directories get a
    /// trailing `/`, files a trailing space.
    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir_to_search, prefix, file_prefix) = split_input(incomplete);

        let Ok(entries) = fs::read_dir(&dir_to_search) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) {
                    return None;
                }
                // dotfiles only when asked for
                if name.starts_with('.') && !file_prefix.starts_with('.') {
                    return None;
                }
                let shown = format!("{}{}", prefix, name);
                Some(if entry.path().is_dir() {
                    Pair {
                        display: format!("{}/", shown),
                        replacement: format!("{}/", shown),
                    }
                } else {
                    Pair {
                        display: shown.clone(),
                        replacement: format!("{} ", shown),
                    }
                })
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

/// Splits `incomplete` into the directory to list, the text kept in front
/// of each candidate, and the file-name prefix to match.
fn split_input(incomplete: &str) -> (PathBuf, &str, &str) {
    match incomplete.rfind('/') {
        Some(slash) => {
            let (prefix, file_prefix) = incomplete.split_at(slash + 1);
            let dir = if prefix == "/" {
                PathBuf::from("/")
            } else {
                Path::new(prefix).to_path_buf()
            };
            (dir, prefix, file_prefix)
        }
        None => (PathBuf::from("."), "", incomplete),
    }
}
