use serde::{Deserialize, Serialize};

/// A single todo item: one line of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// The item text (never contains a newline once it passed input checks)
    pub text: String,
    /// Reserved for check-off support; nothing sets it yet
    #[serde(default)]
    pub complete: bool,
}

impl Entry {
    pub fn new(text: impl Into<String>) -> Self {
        Entry {
            text: text.into(),
            complete: false,
        }
    }
}
