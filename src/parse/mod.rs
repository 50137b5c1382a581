pub mod index_parser;
pub mod index_serializer;
pub mod list_parser;
pub mod list_serializer;

pub use index_parser::parse_index;
pub use index_serializer::{index_of, serialize_index};
pub use list_parser::parse_list;
pub use list_serializer::serialize_list;

/// Separates a list's name and entries, and the save file's lines
pub const LINE_SEPARATOR: char = '\n';

/// Separates a list name from its skylink in the save file (form feed)
pub const FIELD_SEPARATOR: char = '\x0c';

/// Error type for the list and save-file text formats
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("empty content")]
    Empty,
    #[error("list has no name")]
    MissingName,
    #[error("content is not valid UTF-8")]
    NotUtf8,
    #[error("malformed save file: expected a current index and at least one list")]
    MissingLists,
    #[error("malformed save file: bad current index {0:?}")]
    BadCurrent(String),
    #[error("malformed save file: line {line} is not a name/skylink pair")]
    BadRecord { line: usize },
    #[error("malformed save file: current index {current} but only {count} lists")]
    CurrentOutOfRange { current: usize, count: usize },
    #[error("duplicate list name '{0}'")]
    DuplicateName(String),
    #[error("{what} contains a reserved character ({byte:?})")]
    ReservedByte { what: &'static str, byte: char },
}

/// One `name<FS>skylink` line of the save file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord {
    pub name: String,
    /// Empty when the list was never published
    pub skylink: String,
}

impl IndexRecord {
    pub fn new(name: impl Into<String>, skylink: impl Into<String>) -> Self {
        IndexRecord {
            name: name.into(),
            skylink: skylink.into(),
        }
    }
}

/// The decoded save file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFile {
    pub current: usize,
    pub records: Vec<IndexRecord>,
}

/// Entry text may not contain the line separator.
pub fn check_entry_text(text: &str) -> Result<(), FormatError> {
    check_reserved("entry text", text, &[LINE_SEPARATOR])
}

/// List names may contain neither separator.
pub fn check_list_name(name: &str) -> Result<(), FormatError> {
    check_reserved("list name", name, &[LINE_SEPARATOR, FIELD_SEPARATOR])
}

/// Skylinks come from the store but still end up in the save file.
pub fn check_skylink(skylink: &str) -> Result<(), FormatError> {
    check_reserved("skylink", skylink, &[LINE_SEPARATOR, FIELD_SEPARATOR])
}

fn check_reserved(what: &'static str, text: &str, reserved: &[char]) -> Result<(), FormatError> {
    match text.chars().find(|c| reserved.contains(c)) {
        Some(byte) => Err(FormatError::ReservedByte { what, byte }),
        None => Ok(()),
    }
}

/// Decode raw bytes into text, rejecting empty and non-UTF-8 input
pub(crate) fn decode(raw: &[u8]) -> Result<&str, FormatError> {
    if raw.is_empty() {
        return Err(FormatError::Empty);
    }
    std::str::from_utf8(raw).map_err(|_| FormatError::NotUtf8)
}
