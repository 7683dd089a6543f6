//! Source text and the record spans located inside it.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// A bare identifier naming one record (species, move or item), lowercased.
pub type EntityKey = String;

/// An immutable blob of object-literal text fetched once per cycle.
///
/// Cloning is cheap and clones share the same buffer, so many workers can
/// decode different records from one fetch without copying or locking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceText {
    text: Arc<str>,
}

impl SourceText {
    /// Wraps already-retrieved text.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the full text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl AsRef<str> for SourceText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The balanced-brace substring holding one named record.
///
/// `text` always opens with `{` and closes with the matching `}`; the brace
/// depth returns to zero exactly at `end` and never goes negative before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan<'a> {
    /// The lowercased key the record was located by.
    pub key: EntityKey,
    /// Byte offset of the opening brace.
    pub start: usize,
    /// Byte offset of the closing brace (inclusive).
    pub end: usize,
    /// The record text, braces included.
    pub text: &'a str,
}

impl EntitySpan<'_> {
    /// Returns the span length in bytes, braces included.
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// A span always holds at least `{}`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the record body between the outer braces.
    pub fn body(&self) -> &str {
        &self.text[1..self.text.len() - 1]
    }
}

/// A record key paired with the number decoded from its `num` field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NumberedKey {
    pub number: i64,
    pub key: EntityKey,
}
