use alloc::format;
use alloc::string::String;

/// Section reserved for plural form definitions.
pub const PLURALS_SECTION: &str = "plurals";

/// One `(section, key, value)` triple of a parsed catalog source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEntry {
    pub section: String,
    pub key: String,
    pub value: String,
}

impl SourceEntry {
    pub fn new(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn message_key(&self) -> String {
        message_key(&self.section, &self.key)
    }
}

pub fn message_key(section: &str, key: &str) -> String {
    format!("{section}::{key}")
}
