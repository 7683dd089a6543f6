//! Declarative field specifications.
//!
//! A [`FieldSpec`] names one field, the key it is written under in the
//! source, and the [`FieldKind`] strategy used to decode it. The source
//! pattern is compiled once when the spec is built; specs hold no other
//! state and can be shared across threads and calls.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Decoding strategy for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Signed integer literal (`num: 25`).
    Integer,
    /// Decimal literal (`heightm: 0.4`).
    Float,
    /// Single- or double-quoted string (`name: "Pikachu"`).
    QuotedString,
    /// `true` or `false`.
    Boolean,
    /// Integer or boolean (`accuracy: true`, `accuracy: 90`).
    IntegerOrBoolean,
    /// Flat list of quoted strings (`types: ["Grass", "Poison"]`).
    StringArray,
    /// One-level map of bare or quoted keys to strings or numbers
    /// (`abilities: {0: "Overgrow", H: "Chlorophyll"}`).
    StringMap,
    /// One-level map of keys to flat string lists
    /// (`learnset: {tackle: ["9L1", "8L1"]}`).
    ArrayMap,
}

impl FieldKind {
    /// Returns the value sub-pattern that follows `key:` for this kind.
    ///
    /// Every pattern captures the raw value text in group `v`.
    fn value_pattern(self) -> &'static str {
        match self {
            FieldKind::Integer => r"(?P<v>-?\d+)(?:[^.\d]|$)",
            FieldKind::Float => r"(?P<v>-?(?:\d+(?:\.\d*)?|\.\d+))",
            FieldKind::QuotedString => r#"(?P<v>"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')"#,
            FieldKind::Boolean => r"(?P<v>true|false)\b",
            FieldKind::IntegerOrBoolean => r"(?P<v>true|false|-?\d+)",
            FieldKind::StringArray => r"\[(?P<v>[^\[\]]*)\]",
            FieldKind::StringMap | FieldKind::ArrayMap => r"\{(?P<v>[^{}]*)\}",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::QuotedString => "string",
            FieldKind::Boolean => "boolean",
            FieldKind::IntegerOrBoolean => "integer-or-boolean",
            FieldKind::StringArray => "string-array",
            FieldKind::StringMap => "string-map",
            FieldKind::ArrayMap => "array-map",
        };
        f.write_str(name)
    }
}

/// How to decode one field from a record span.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    source_key: String,
    kind: FieldKind,
    pattern: Regex,
}

impl FieldSpec {
    /// Creates a spec whose output name is also its source key.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        let source_key = name.clone();
        Self::with_source_key(name, source_key, kind)
    }

    /// Creates a spec that reads `source_key` and reports it as `name`.
    pub fn with_source_key(
        name: impl Into<String>,
        source_key: impl Into<String>,
        kind: FieldKind,
    ) -> Self {
        let source_key = source_key.into();
        let pattern = format!(
            r#"(?:^|[^\w$])["']?{}["']?\s*:\s*{}"#,
            regex::escape(&source_key),
            kind.value_pattern()
        );
        // the key is escaped and every value pattern is a fixed valid regex
        let pattern = Regex::new(&pattern).unwrap();
        Self {
            name: name.into(),
            source_key,
            kind,
            pattern,
        }
    }

    /// Returns the output field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the key the field is written under in the source.
    pub fn source_key(&self) -> &str {
        &self.source_key
    }

    /// Returns the decoding strategy.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the compiled source pattern. The raw value is capture group `v`.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl PartialEq for FieldSpec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.source_key == other.source_key && self.kind == other.kind
    }
}

impl Eq for FieldSpec {}
