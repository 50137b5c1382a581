use std::collections::HashSet;

use super::todo_list::TodoList;

/// Every list known locally, plus which one is current.
///
/// `current` is a position into `lists`, not an owning reference. It is
/// always `< lists.len()` while `lists` is non-empty and is ignored when
/// `lists` is empty.
#[derive(Debug, Clone)]
pub struct ListCollection {
    /// True iff every list is saved and the save file's list records are
    /// up to date. Which list is current does not count: switching lists
    /// leaves this unchanged.
    pub saved: bool,
    current: usize,
    lists: Vec<TodoList>,
}

impl Default for ListCollection {
    fn default() -> Self {
        ListCollection {
            saved: true,
            current: 0,
            lists: Vec::new(),
        }
    }
}

impl ListCollection {
    /// The empty collection (nothing to save)
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a collection from loaded lists. Returns `None` if `current`
    /// does not point into a non-empty `lists`.
    pub fn from_parts(current: usize, lists: Vec<TodoList>) -> Option<Self> {
        if current >= lists.len() {
            return None;
        }
        let saved = lists.iter().all(|l| l.saved);
        Some(ListCollection {
            saved,
            current,
            lists,
        })
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Index of the current list, if any list exists
    pub fn current_index(&self) -> Option<usize> {
        if self.lists.is_empty() {
            None
        } else {
            Some(self.current)
        }
    }

    pub fn current(&self) -> Option<&TodoList> {
        self.lists.get(self.current)
    }

    pub fn current_mut(&mut self) -> Option<&mut TodoList> {
        self.lists.get_mut(self.current)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TodoList> {
        self.lists.get_mut(index)
    }

    /// Make the list at `index` current. Returns false if out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.lists.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Position of the list with this exact name
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.lists.iter().position(|l| l.name == name)
    }

    /// Position of the list last published under this skylink
    pub fn position_by_skylink(&self, skylink: &str) -> Option<usize> {
        if skylink.is_empty() {
            return None;
        }
        self.lists.iter().position(|l| l.skylink == skylink)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.position_by_name(name).is_some()
    }

    /// Append a list and return its index. Name uniqueness is the
    /// caller's concern.
    pub fn push(&mut self, list: TodoList) -> usize {
        self.lists.push(list);
        self.lists.len() - 1
    }

    /// Record a change that is not yet persisted
    pub fn mark_dirty(&mut self) {
        self.saved = false;
    }

    /// First name shared by two lists, if any
    pub fn duplicate_name(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.lists
            .iter()
            .map(|l| l.name.as_str())
            .find(|name| !seen.insert(*name))
    }

    /// Indices of lists that need publishing, in collection order
    pub fn dirty_indices(&self) -> Vec<usize> {
        self.lists
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.saved)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ListCollection {
        let mut a = TodoList::new("Groceries");
        a.saved = true;
        a.skylink = "aa".into();
        let b = TodoList::new("Chores");
        ListCollection::from_parts(0, vec![a, b]).unwrap()
    }

    #[test]
    fn empty_collection_has_no_current() {
        let coll = ListCollection::new();
        assert!(coll.saved);
        assert!(coll.current().is_none());
        assert_eq!(coll.current_index(), None);
    }

    #[test]
    fn from_parts_rejects_out_of_range_current() {
        assert!(ListCollection::from_parts(0, Vec::new()).is_none());
        assert!(ListCollection::from_parts(2, vec![TodoList::new("a"), TodoList::new("b")]).is_none());
    }

    #[test]
    fn from_parts_saved_follows_lists() {
        let coll = sample();
        assert!(!coll.saved);
        assert_eq!(coll.dirty_indices(), vec![1]);
    }

    #[test]
    fn set_current_validates_index() {
        let mut coll = sample();
        assert!(coll.set_current(1));
        assert_eq!(coll.current().unwrap().name, "Chores");
        assert!(!coll.set_current(2));
        assert_eq!(coll.current_index(), Some(1));
    }

    #[test]
    fn lookup_by_name_and_skylink() {
        let coll = sample();
        assert_eq!(coll.position_by_name("Chores"), Some(1));
        assert_eq!(coll.position_by_skylink("aa"), Some(0));
        // Unpublished lists never match an empty skylink
        assert_eq!(coll.position_by_skylink(""), None);
    }

    #[test]
    fn duplicate_name_finds_first_repeat() {
        let mut coll = sample();
        assert_eq!(coll.duplicate_name(), None);
        coll.get_mut(1).unwrap().name = "Groceries".into();
        assert_eq!(coll.duplicate_name(), Some("Groceries"));
    }
}
