use super::entry::Entry;

/// A named, ordered todo list
#[derive(Debug, Clone)]
pub struct TodoList {
    /// Display name, unique within a collection
    pub name: String,
    /// Content handle from the last publish; empty if never published
    pub skylink: String,
    /// True iff the list matches what was last published (or loaded)
    pub saved: bool,
    /// Entries in display and storage order
    pub entries: Vec<Entry>,
}

impl TodoList {
    /// Create a fresh, never-published list. It starts dirty.
    pub fn new(name: impl Into<String>) -> Self {
        TodoList {
            name: name.into(),
            skylink: String::new(),
            saved: false,
            entries: Vec::new(),
        }
    }

    /// Build a list as it exists in the store (clean).
    pub fn published(name: impl Into<String>, skylink: impl Into<String>, entries: Vec<Entry>) -> Self {
        TodoList {
            name: name.into(),
            skylink: skylink.into(),
            saved: true,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the list has ever been published
    pub fn has_skylink(&self) -> bool {
        !self.skylink.is_empty()
    }

    /// Record a local mutation
    pub fn mark_dirty(&mut self) {
        self.saved = false;
    }

    /// Entry texts in order
    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }
}

/// Lists compare by content only; sync state is not part of identity.
impl PartialEq for TodoList {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.entries == other.entries
    }
}

impl Eq for TodoList {}
