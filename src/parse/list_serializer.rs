use crate::model::todo_list::TodoList;
use crate::parse::{FormatError, LINE_SEPARATOR, check_entry_text, check_list_name};

/// Serialize a list to the bytes that get published.
///
/// The name comes first, then `"\n" + text` for each entry. No trailing
/// separator is written. Text holding a separator would not survive a
/// round trip, so it is rejected here instead of corrupting the output.
pub fn serialize_list(list: &TodoList) -> Result<String, FormatError> {
    check_list_name(&list.name)?;
    if list.name.is_empty() {
        return Err(FormatError::MissingName);
    }

    let mut output = list.name.clone();
    for entry in &list.entries {
        check_entry_text(&entry.text)?;
        output.push(LINE_SEPARATOR);
        output.push_str(&entry.text);
    }
    Ok(output)
}
