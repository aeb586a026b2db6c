use std::collections::VecDeque;

pub const MAX_HISTORY: usize = 100;

/// Bounded log of raw input lines, oldest first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        History {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Records `entry` unless it is blank, evicting the oldest line once
    /// the log is full.
    pub fn add(&mut self, entry: &str) {
        if entry.trim().is_empty() || self.max_entries == 0 {
            return;
        }

        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.to_owned());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
