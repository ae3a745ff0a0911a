//! Session history abstraction.
//!
//! The router talks to history only through [`History`], so the same state
//! machine runs against the browser or against [`MemoryHistory`].

/// The subset of `window.history` / `window.location` the router needs.
pub trait History {
    /// Href of the current entry (`/path#anchor`).
    fn current(&self) -> &str;

    /// Add an entry after the current one, dropping any forward entries.
    fn push(&mut self, href: &str);

    /// Overwrite the current entry.
    fn replace(&mut self, href: &str);

    /// Move the cursor by `delta`. Returns `false` (and stays put) when the
    /// target is out of range.
    fn go(&mut self, delta: isize) -> bool;

    /// Number of entries in the session.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory session history with browser push/replace/go semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    /// Start a session on `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            entries: vec![href.into()],
            cursor: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    fn push(&mut self, href: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(href.to_string());
        self.cursor += 1;
    }

    fn replace(&mut self, href: &str) {
        self.entries[self.cursor] = href.to_string();
    }

    fn go(&mut self, delta: isize) -> bool {
        match self.cursor.checked_add_signed(delta) {
            Some(target) if target < self.entries.len() => {
                self.cursor = target;
                true
            }
            _ => false,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
