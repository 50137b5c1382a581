use std::collections::HashSet;

use crate::parse::{FIELD_SEPARATOR, FormatError, IndexFile, IndexRecord, LINE_SEPARATOR, decode};

/// Parse the save file.
///
/// Format: line 0 is the decimal index of the current list; each further
/// line is `name<FF>skylink`. At least one list line is required, the
/// current index must point at one of them, and names must be unique.
pub fn parse_index(raw: &[u8]) -> Result<IndexFile, FormatError> {
    let source = decode(raw)?;
    let lines: Vec<&str> = source.split(LINE_SEPARATOR).collect();

    if lines.len() < 2 {
        return Err(FormatError::MissingLists);
    }

    let current: usize = lines[0]
        .parse()
        .map_err(|_| FormatError::BadCurrent(lines[0].to_string()))?;

    let mut records = Vec::with_capacity(lines.len() - 1);
    let mut seen = HashSet::new();
    for (offset, line) in lines[1..].iter().enumerate() {
        let line_no = offset + 1;
        let (name, skylink) = line
            .split_once(FIELD_SEPARATOR)
            .ok_or(FormatError::BadRecord { line: line_no })?;
        // A second separator would mean a third field
        if skylink.contains(FIELD_SEPARATOR) {
            return Err(FormatError::BadRecord { line: line_no });
        }
        if name.is_empty() {
            return Err(FormatError::MissingName);
        }
        if !seen.insert(name) {
            return Err(FormatError::DuplicateName(name.to_string()));
        }
        records.push(IndexRecord::new(name, skylink));
    }

    if current >= records.len() {
        return Err(FormatError::CurrentOutOfRange {
            current,
            count: records.len(),
        });
    }

    Ok(IndexFile { current, records })
}
