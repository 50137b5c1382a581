use crate::model::entry::Entry;
use crate::model::todo_list::TodoList;
use crate::parse::{FormatError, LINE_SEPARATOR, decode};

/// Parse a list from the bytes stored under `skylink`.
///
/// Format: the first line is the name, every following line is one entry.
/// Lines are split on every `\n`; a trailing newline therefore yields a
/// final empty entry, which is exactly what the serializer wrote.
/// The result is clean (`saved = true`).
pub fn parse_list(raw: &[u8], skylink: &str) -> Result<TodoList, FormatError> {
    let source = decode(raw)?;
    let mut lines = source.split(LINE_SEPARATOR);

    // split() always yields at least one segment
    let name = lines.next().ok_or(FormatError::Empty)?;
    if name.is_empty() {
        return Err(FormatError::MissingName);
    }

    let entries = lines.map(Entry::new).collect();
    Ok(TodoList::published(name, skylink, entries))
}
