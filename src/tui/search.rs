//! Search input with debounced commit.
//!
//! Keystrokes edit the pending query; the query is handed to the view only
//! after it has been left alone for the debounce interval.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SearchInput {
    /// Whether the search line has focus
    pub active: bool,
    query: String,
    committed: String,
    last_edit: Option<Instant>,
    debounce: Duration,
}

impl SearchInput {
    pub const fn new(debounce: Duration) -> Self {
        Self {
            active: false,
            query: String::new(),
            committed: String::new(),
            last_edit: None,
            debounce,
        }
    }

    pub const fn start(&mut self) {
        self.active = true;
    }

    pub const fn stop(&mut self) {
        self.active = false;
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.query.push(c);
        self.last_edit = Some(now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        if self.query.pop().is_some() {
            self.last_edit = Some(now);
        }
    }

    /// Clear the query and commit the empty query immediately.
    pub fn clear(&mut self) -> Option<String> {
        self.query.clear();
        self.last_edit = None;
        self.commit()
    }

    /// Commit right away, skipping the debounce (Enter).
    pub fn commit_now(&mut self) -> Option<String> {
        self.last_edit = None;
        self.commit()
    }

    /// The query to apply, once the debounce interval has passed since the
    /// last edit and it differs from what was last committed.
    pub fn poll_commit(&mut self, now: Instant) -> Option<String> {
        let last_edit = self.last_edit?;
        if now.saturating_duration_since(last_edit) < self.debounce {
            return None;
        }
        self.last_edit = None;
        self.commit()
    }

    fn commit(&mut self) -> Option<String> {
        if self.query == self.committed {
            return None;
        }
        self.committed.clone_from(&self.query);
        Some(self.committed.clone())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether an edit is waiting for the debounce.
    pub const fn is_pending(&self) -> bool {
        self.last_edit.is_some()
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_DEBOUNCE_MS))
    }
}
