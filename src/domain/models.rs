use serde::Deserialize;
use std::fmt;

pub const PLACEHOLDER_TITLE: &str = "Title";
pub const PLACEHOLDER_DESCRIPTION: &str = "Description";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What an entry is. Patterns carry a rendered markup body, blocks do not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Block,
    Pattern { content: String },
}

impl EntryKind {
    /// Derives the kind from an optional raw body. A blank body is a block.
    pub fn from_content(content: Option<&str>) -> Self {
        match content {
            Some(body) if !body.trim().is_empty() => Self::Pattern {
                content: body.to_string(),
            },
            _ => Self::Block,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Block => "Block",
            EntryKind::Pattern { .. } => "Pattern",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub kind: EntryKind,
}

impl Entry {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(PLACEHOLDER_TITLE)
    }

    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or(PLACEHOLDER_DESCRIPTION)
    }

    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Pattern { content } => Some(content),
            EntryKind::Block => None,
        }
    }
}

/// A catalog record as it appears in the source data. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct RawEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
    pub content: Option<String>,
}
