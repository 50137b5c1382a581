use std::ops::Range;

use crate::model::collection::ListCollection;
use crate::model::entry::Entry;
use crate::model::todo_list::TodoList;
use crate::ops::entry_ops::{self, EditError};
use crate::parse::{FormatError, check_list_name};

/// Error type for collection-level operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("a list named '{0}' already exists")]
    DuplicateName(String),
    #[error("no list named '{0}'")]
    NotFound(String),
    #[error("no list is open")]
    NoCurrentList,
    #[error("list name cannot be empty")]
    EmptyName,
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

fn check_new_name(name: &str) -> Result<(), CollectionError> {
    if name.is_empty() {
        return Err(CollectionError::EmptyName);
    }
    check_list_name(name)?;
    Ok(())
}

/// Run an edit against the current list; on success both the list and
/// the collection become dirty.
fn edit_current<T>(
    coll: &mut ListCollection,
    edit: impl FnOnce(&mut TodoList) -> Result<T, EditError>,
) -> Result<T, CollectionError> {
    let list = coll.current_mut().ok_or(CollectionError::NoCurrentList)?;
    let out = edit(list)?;
    coll.mark_dirty();
    Ok(out)
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// Create an empty list and make it current. Returns its index.
pub fn create_list(coll: &mut ListCollection, name: &str) -> Result<usize, CollectionError> {
    check_new_name(name)?;
    if coll.contains_name(name) {
        return Err(CollectionError::DuplicateName(name.to_string()));
    }
    let index = coll.push(TodoList::new(name));
    coll.set_current(index);
    coll.mark_dirty();
    Ok(index)
}

/// Make the list with this name current. Returns its index.
pub fn open_list(coll: &mut ListCollection, name: &str) -> Result<usize, CollectionError> {
    let index = coll
        .position_by_name(name)
        .ok_or_else(|| CollectionError::NotFound(name.to_string()))?;
    coll.set_current(index);
    Ok(index)
}

/// Rename the current list. Other lists are not checked for the name;
/// a collision is refused when the collection is saved.
pub fn rename_current(coll: &mut ListCollection, name: &str) -> Result<(), CollectionError> {
    check_new_name(name)?;
    let list = coll.current_mut().ok_or(CollectionError::NoCurrentList)?;
    list.name = name.to_string();
    list.mark_dirty();
    coll.mark_dirty();
    Ok(())
}

/// A list's name and sync state, for overviews
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSummary {
    pub name: String,
    pub skylink: String,
    pub saved: bool,
    pub entries: usize,
    pub current: bool,
}

/// Summaries of every list, in collection order
pub fn list_names(coll: &ListCollection) -> Vec<ListSummary> {
    let current = coll.current_index();
    coll.lists()
        .iter()
        .enumerate()
        .map(|(i, l)| ListSummary {
            name: l.name.clone(),
            skylink: l.skylink.clone(),
            saved: l.saved,
            entries: l.len(),
            current: current == Some(i),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Entries of the current list
// ---------------------------------------------------------------------------

pub fn add_entry(coll: &mut ListCollection, text: &str) -> Result<usize, CollectionError> {
    edit_current(coll, |list| entry_ops::add_entry(list, text.to_string()))
}

pub fn insert_entry(
    coll: &mut ListCollection,
    index: usize,
    text: &str,
) -> Result<(), CollectionError> {
    edit_current(coll, |list| {
        entry_ops::insert_entry(list, Entry::new(text), index)
    })
}

pub fn delete_entry(coll: &mut ListCollection, index: usize) -> Result<Entry, CollectionError> {
    edit_current(coll, |list| entry_ops::delete_entry(list, index))
}

pub fn move_entry(
    coll: &mut ListCollection,
    src: usize,
    dest: usize,
) -> Result<(), CollectionError> {
    edit_current(coll, |list| entry_ops::move_entry(list, src, dest))
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A slice of the current list prepared for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<'a> {
    pub name: &'a str,
    pub saved: bool,
    /// `(index, text)` for each visible entry
    pub rows: Vec<(usize, &'a str)>,
    /// Entries exist before the first visible row
    pub more_before: bool,
    /// Entries exist after the last visible row
    pub more_after: bool,
    pub total: usize,
}

/// View the entries of the current list in `range`, clamped to the list.
pub fn view_current(
    coll: &ListCollection,
    range: Range<usize>,
) -> Result<ListView<'_>, CollectionError> {
    let list = coll.current().ok_or(CollectionError::NoCurrentList)?;
    Ok(view_list(list, range))
}

pub fn view_list(list: &TodoList, range: Range<usize>) -> ListView<'_> {
    let total = list.len();
    let end = range.end.min(total);
    let start = range.start.min(end);
    let rows = list.entries[start..end]
        .iter()
        .enumerate()
        .map(|(offset, e)| (start + offset, e.text.as_str()))
        .collect();
    ListView {
        name: &list.name,
        saved: list.saved,
        rows,
        more_before: start > 0,
        more_after: end < total,
        total,
    }
}

/// A display window of `amount` entries centred on `index`, slid back
/// inside `0..len` when it would overhang either end.
pub fn window_around(len: usize, index: usize, amount: usize) -> Range<usize> {
    let half = (amount / 2) as isize;
    let len = len as isize;
    let index = index as isize;
    let mut start = index - half;
    let mut end = index + half + 1;

    if end > len {
        let shift = end - len;
        start -= shift;
        end -= shift;
    }
    if start < 0 {
        let shift = -start;
        start += shift;
        end += shift;
    }
    let end = end.min(len).max(0) as usize;
    let start = (start.max(0) as usize).min(end);
    start..end
}

/// How the current list relates to its published copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareStatus {
    /// Published and unchanged since
    Published(String),
    /// Published, but edited locally since
    Stale(String),
    /// Never published
    Unpublished,
}

pub fn share_current(coll: &ListCollection) -> Result<ShareStatus, CollectionError> {
    let list = coll.current().ok_or(CollectionError::NoCurrentList)?;
    Ok(share_status(list))
}

pub fn share_status(list: &TodoList) -> ShareStatus {
    if !list.has_skylink() {
        ShareStatus::Unpublished
    } else if list.saved {
        ShareStatus::Published(list.skylink.clone())
    } else {
        ShareStatus::Stale(list.skylink.clone())
    }
}
