//! Field decoding from located record spans.
//!
//! One strategy per [`FieldKind`], driven by a declarative [`FieldSpec`]
//! list. Each field is decoded on its own; a field whose pattern does not
//! match is left out of the record, which is not an error.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::model::{DecodedRecord, EntitySpan, FieldKind, FieldSpec, FieldValue};

lazy_static! {
    // A single- or double-quoted string token with backslash escapes
    static ref QUOTED: Regex =
        Regex::new(r#""(?P<dq>(?:[^"\\]|\\.)*)"|'(?P<sq>(?:[^'\\]|\\.)*)'"#).unwrap();

    // `key: value` inside a one-level map; key is quoted, a bare word or digits,
    // value is quoted or a bare number
    static ref MAP_PAIR: Regex = Regex::new(
        r#"(?:"(?P<kdq>(?:[^"\\]|\\.)*)"|'(?P<ksq>(?:[^'\\]|\\.)*)'|(?P<kb>[A-Za-z_$][\w$]*|\d+))\s*:\s*(?:"(?P<vdq>(?:[^"\\]|\\.)*)"|'(?P<vsq>(?:[^'\\]|\\.)*)'|(?P<vn>-?\d+(?:\.\d+)?))"#
    )
    .unwrap();

    // `key: [ ... ]` inside a one-level map of lists
    static ref LIST_PAIR: Regex = Regex::new(
        r#"(?:"(?P<kdq>(?:[^"\\]|\\.)*)"|'(?P<ksq>(?:[^'\\]|\\.)*)'|(?P<kb>[A-Za-z_$][\w$]*|\d+))\s*:\s*\[(?P<items>[^\[\]]*)\]"#
    )
    .unwrap();
}

/// Decodes every field in `specs` from a located record.
///
/// Decoding is deterministic: the same span and specs always produce an
/// identical record. Fields appear in the order of `specs`.
pub fn decode(span: &EntitySpan<'_>, specs: &[FieldSpec]) -> DecodedRecord {
    decode_str(span.text, specs)
}

/// Decodes fields from arbitrary record text.
pub fn decode_str(text: &str, specs: &[FieldSpec]) -> DecodedRecord {
    let mut record = DecodedRecord::new();
    for spec in specs {
        if let Some(value) = decode_field(text, spec) {
            record.insert(spec.name(), value);
        }
    }
    record
}

/// Decodes one field, or `None` if it is absent or unparsable.
pub fn decode_field(text: &str, spec: &FieldSpec) -> Option<FieldValue> {
    let caps = spec.pattern().captures(text)?;
    let raw = caps.name("v")?.as_str();
    match spec.kind() {
        FieldKind::Integer => raw.parse().ok().map(FieldValue::Integer),
        FieldKind::Float => raw.parse().ok().map(FieldValue::Float),
        FieldKind::Boolean => parse_bool(raw).map(FieldValue::Bool),
        FieldKind::IntegerOrBoolean => match parse_bool(raw) {
            Some(b) => Some(FieldValue::Bool(b)),
            None => raw.parse().ok().map(FieldValue::Integer),
        },
        FieldKind::QuotedString => decode_quoted(raw).map(FieldValue::Text),
        FieldKind::StringArray => Some(FieldValue::List(decode_string_list(raw))),
        FieldKind::StringMap => Some(FieldValue::Map(decode_string_map(raw))),
        FieldKind::ArrayMap => Some(FieldValue::ListMap(decode_list_map(raw))),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Decodes a full quoted token (quotes included).
fn decode_quoted(raw: &str) -> Option<String> {
    let caps = QUOTED.captures(raw)?;
    quoted_text(&caps, "dq", "sq")
}

/// Returns every quoted token in a flat list body, in source order.
fn decode_string_list(body: &str) -> Vec<String> {
    QUOTED
        .captures_iter(body)
        .filter_map(|caps| quoted_text(&caps, "dq", "sq"))
        .collect()
}

/// Splits a one-level map body into ordered pairs; a repeated key keeps its
/// first position and takes the last value.
fn decode_string_map(body: &str) -> IndexMap<String, String> {
    let mut map = IndexMap::new();
    for caps in MAP_PAIR.captures_iter(body) {
        let Some(key) = pair_key(&caps) else {
            continue;
        };
        let value = match caps.name("vn") {
            Some(n) => n.as_str().to_string(),
            None => match quoted_text(&caps, "vdq", "vsq") {
                Some(v) => v,
                None => continue,
            },
        };
        map.insert(key, value);
    }
    map
}

/// Splits a one-level map of lists into ordered pairs.
fn decode_list_map(body: &str) -> IndexMap<String, Vec<String>> {
    let mut map = IndexMap::new();
    for caps in LIST_PAIR.captures_iter(body) {
        let Some(key) = pair_key(&caps) else {
            continue;
        };
        let items = caps.name("items").map(|m| m.as_str()).unwrap_or("");
        map.insert(key, decode_string_list(items));
    }
    map
}

fn pair_key(caps: &Captures<'_>) -> Option<String> {
    match caps.name("kb") {
        Some(bare) => Some(bare.as_str().to_string()),
        None => quoted_text(caps, "kdq", "ksq"),
    }
}

fn quoted_text(caps: &Captures<'_>, double: &str, single: &str) -> Option<String> {
    caps.name(double)
        .or_else(|| caps.name(single))
        .map(|m| unescape(m.as_str()))
}

/// Resolves backslash escapes. Unknown escapes keep the escaped character.
fn unescape(s: &str) -> String {
    if !s.contains('\\') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
