use crate::model::entry::Entry;
use crate::model::todo_list::TodoList;
use crate::parse::{FormatError, check_entry_text};

/// Error type for position-indexed edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("cannot {action} position {index} (list has {len} entries)")]
    IndexOutOfRange {
        action: &'static str,
        index: usize,
        len: usize,
    },
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Reject a position that does not name an existing entry.
pub fn check_index(list: &TodoList, action: &'static str, index: usize) -> Result<(), EditError> {
    if index >= list.entries.len() {
        return Err(EditError::IndexOutOfRange {
            action,
            index,
            len: list.entries.len(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

/// Append an entry to the end of the list.
pub fn add_entry(list: &mut TodoList, text: String) -> Result<usize, EditError> {
    check_entry_text(&text)?;
    list.entries.push(Entry::new(text));
    list.mark_dirty();
    Ok(list.entries.len() - 1)
}

/// Insert an entry before `index`; the entry there and everything after
/// shifts one place later. `index` must name an existing entry, so this
/// never appends (use [`add_entry`]).
pub fn insert_entry(list: &mut TodoList, entry: Entry, index: usize) -> Result<(), EditError> {
    check_index(list, "insert at", index)?;
    check_entry_text(&entry.text)?;
    list.entries.insert(index, entry);
    list.mark_dirty();
    Ok(())
}

/// Remove and return the entry at `index`.
pub fn delete_entry(list: &mut TodoList, index: usize) -> Result<Entry, EditError> {
    check_index(list, "delete from", index)?;
    let entry = list.entries.remove(index);
    list.mark_dirty();
    Ok(entry)
}

/// Move the entry at `src` so it ends up at `dest`.
///
/// Both positions are checked against the length before the move. The
/// entry is removed first and then inserted at `dest` in the shortened
/// list, so with `[A, B, C, D]`, moving 0 to 2 gives `[B, C, A, D]`.
pub fn move_entry(list: &mut TodoList, src: usize, dest: usize) -> Result<(), EditError> {
    check_index(list, "move from", src)?;
    check_index(list, "move to", dest)?;
    let entry = list.entries.remove(src);
    // dest <= len after removal, so this may append
    list.entries.insert(dest, entry);
    list.mark_dirty();
    Ok(())
}
