// Command history
//
// Bounded list of submitted commands, newest first, with a recall cursor for
// Up/Down navigation. Recall only moves the cursor; entries are never edited.

use std::collections::VecDeque;

use crate::config::constants::DEFAULT_HISTORY_LIMIT;

#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
    /// None = not browsing, Some(0) = newest entry
    cursor: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit: limit.max(1),
            cursor: None,
        }
    }

    /// Remember a submission. Blank text is ignored.
    pub fn record(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.entries.push_front(text.to_string());
        self.entries.truncate(self.limit);
        self.cursor = None;
    }

    /// Step towards older entries. Stays on the oldest once reached.
    pub fn recall_previous(&mut self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let next = match self.cursor {
            None => 0,
            Some(i) => (i + 1).min(self.entries.len() - 1),
        };
        self.cursor = Some(next);
        self.entries[next].clone()
    }

    /// Step towards newer entries. Moving past the newest ends browsing and
    /// returns an empty string.
    pub fn recall_next(&mut self) -> String {
        match self.cursor {
            None | Some(0) => {
                self.cursor = None;
                String::new()
            }
            Some(i) => {
                self.cursor = Some(i - 1);
                self.entries[i - 1].clone()
            }
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
