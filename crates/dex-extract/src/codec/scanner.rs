//! Record location by balanced-brace scanning.
//!
//! The scanner finds `key: {` and walks forward counting braces until the
//! record closes. It does not understand string literals: a `{` or `}`
//! inside a quoted value of the scanned record would shift the span. The
//! corpus never embeds braces in string fields, and callers must only pass
//! text that holds to that.

use indexmap::IndexSet;
use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::codec::cursor::{Cursor, is_ident_byte};
use crate::codec::decoder::decode;
use crate::error::ExtractError;
use crate::limits::{DEFAULT_DENYLIST, DEFAULT_EXCLUDED_PREFIXES, MAX_KEY_LEN};
use crate::model::{EntityKey, EntitySpan, NumberedKey};
use crate::schema;
use crate::util::is_lowercase_ident;

lazy_static! {
    // Any `identifier: {` opening; the depth filter picks the record level
    static ref OBJECT_OPEN: Regex = Regex::new(r"(\w+)\s*:\s*\{").unwrap();
}

/// Locates the record named `key` in `source`.
///
/// The key is lowercased. The first occurrence of the key that is not the
/// tail of a longer identifier and is followed by `:` and `{` (whitespace
/// allowed around the colon) opens the record.
///
/// Returns [`ExtractError::NotFound`] if no such occurrence exists, and
/// [`ExtractError::UnbalancedDelimiters`] if the text ends before the
/// opening brace is matched.
pub fn locate<'a>(source: &'a str, key: &str) -> Result<EntitySpan<'a>, ExtractError> {
    let key = key.trim().to_lowercase();
    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(ExtractError::NotFound { key });
    }

    let Some(start) = find_record_open(source, &key) else {
        debug!(key = %key, "record not found");
        return Err(ExtractError::NotFound { key });
    };

    let mut cursor = Cursor::at(source, start);
    match cursor.match_braces() {
        Ok(end) => {
            debug!(key = %key, start, end, "located record");
            Ok(EntitySpan {
                key,
                start,
                end,
                text: &source[start..=end],
            })
        }
        Err(depth) => {
            warn!(key = %key, open_at = start, depth, "record never closes");
            Err(ExtractError::UnbalancedDelimiters {
                key,
                open_at: start,
                depth,
            })
        }
    }
}

/// Returns the offset of the `{` opening the record for `key`.
fn find_record_open(source: &str, key: &str) -> Option<usize> {
    let bytes = source.as_bytes();
    for (at, _) in source.match_indices(key) {
        if at > 0 && is_ident_byte(bytes[at - 1]) {
            continue;
        }
        let mut cursor = Cursor::at(source, at + key.len());
        if cursor.peek().is_some_and(is_ident_byte) {
            continue;
        }
        // quoted keys: "bulbasaur": {
        cursor.eat_any(b"\"'");
        cursor.skip_whitespace();
        if !cursor.eat(b':') {
            continue;
        }
        cursor.skip_whitespace();
        if cursor.peek() == Some(b'{') {
            return Some(cursor.position());
        }
    }
    None
}

/// Decides which `identifier: {` openings name entities.
#[derive(Debug, Clone)]
pub struct KeyFilter {
    denylist: FxHashSet<String>,
    excluded_prefixes: Vec<String>,
    require_lowercase: bool,
}

impl Default for KeyFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_DENYLIST.iter().copied(),
            DEFAULT_EXCLUDED_PREFIXES.iter().copied(),
            true,
        )
    }
}

impl KeyFilter {
    /// Creates a filter from a denylist of internal property names and a
    /// list of excluded key prefixes.
    pub fn new<D, P>(denylist: D, excluded_prefixes: P, require_lowercase: bool) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Self {
            denylist: denylist.into_iter().map(|s| s.as_ref().to_string()).collect(),
            excluded_prefixes: excluded_prefixes
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            require_lowercase,
        }
    }

    /// A filter that accepts every identifier.
    pub fn permissive() -> Self {
        Self::new(std::iter::empty::<&str>(), std::iter::empty::<&str>(), false)
    }

    /// Returns true if `ident` names an entity.
    pub fn accepts(&self, ident: &str) -> bool {
        if self.require_lowercase && !is_lowercase_ident(ident) {
            return false;
        }
        if self.excluded_prefixes.iter().any(|p| ident.starts_with(p.as_str())) {
            return false;
        }
        !self.denylist.contains(ident)
    }
}

/// Enumerates entity keys in source order, first occurrence kept.
///
/// Only openings at the record level count: the shallowest brace depth at
/// which `filter` accepts an identifier. In an `exports.X = { ... }` dump
/// that is depth 1, so nested objects such as a move's `flags` or
/// `secondary` never surface. `filter` still removes internal names and
/// wrapper keys at any depth.
pub fn list_entity_keys(source: &str, filter: &KeyFilter) -> IndexSet<EntityKey> {
    let mut depth = 0usize;
    let mut scanned = 0usize;
    let mut openings: Vec<(usize, &str)> = Vec::new();
    for caps in OBJECT_OPEN.captures_iter(source) {
        let Some(ident) = caps.get(1) else { continue };
        depth = brace_depth_after(&source[scanned..ident.start()], depth);
        scanned = ident.start();
        if filter.accepts(ident.as_str()) {
            openings.push((depth, ident.as_str()));
        }
    }

    let Some(level) = openings.iter().map(|(depth, _)| *depth).min() else {
        return IndexSet::new();
    };
    openings
        .into_iter()
        .filter(|(depth, _)| *depth == level)
        .map(|(_, ident)| ident.to_string())
        .collect()
}

/// Applies the braces in `text` to a running depth, never going below zero.
fn brace_depth_after(text: &str, depth: usize) -> usize {
    text.bytes().fold(depth, |depth, b| match b {
        b'{' => depth + 1,
        b'}' => depth.saturating_sub(1),
        _ => depth,
    })
}

/// Pairs each key with its decoded `num` and sorts by `(num, key)`.
///
/// Keys with no record, no `num` field, or a number below 1 are dropped:
/// they are not part of the national numbering the resolver orders by.
pub fn entities_by_number<I>(source: &str, keys: I) -> Vec<NumberedKey>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let specs = schema::number_fields();
    let mut numbered: Vec<NumberedKey> = keys
        .into_iter()
        .filter_map(|key| {
            let span = locate(source, key.as_ref()).ok()?;
            let number = decode(&span, specs).integer(schema::fields::NUM)?;
            (number >= 1).then_some(NumberedKey {
                number,
                key: span.key,
            })
        })
        .collect();
    numbered.sort();
    numbered
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEX: &str = r#"exports.BattlePokedex = {
bulbasaur: {num: 1, name: "Bulbasaur", baseStats: {hp: 45, atk: 49}, evos: ["Ivysaur"]},
ivysaur: {num: 2, name: "Ivysaur", prevo: "Bulbasaur"},
pikachu:{num:25,name:"Pikachu"},
raichu : { num: 26 },
};"#;

    #[test]
    fn test_locate_returns_balanced_span() {
        let span = locate(DEX, "bulbasaur").unwrap();
        assert!(span.text.starts_with('{'));
        assert!(span.text.ends_with('}'));
        assert!(span.text.contains("Ivysaur"));
        assert_eq!(&DEX[span.start..=span.end], span.text);
        assert_eq!(span.key, "bulbasaur");
    }

    #[test]
    fn test_locate_is_case_insensitive_on_key() {
        let span = locate(DEX, "Pikachu").unwrap();
        assert_eq!(span.text, r#"{num:25,name:"Pikachu"}"#);
    }

    #[test]
    fn test_locate_allows_whitespace_around_colon() {
        let span = locate(DEX, "raichu").unwrap();
        assert_eq!(span.text, "{ num: 26 }");
    }

    #[test]
    fn test_locate_not_found() {
        let result = locate(DEX, "mew");
        assert!(matches!(result, Err(ExtractError::NotFound { ref key }) if key == "mew"));
    }

    #[test]
    fn test_locate_ignores_identifier_tails() {
        // "saur" only appears as the tail of longer identifiers
        assert!(matches!(locate(DEX, "saur"), Err(ExtractError::NotFound { .. })));
        assert!(matches!(locate("venusaur: {}", "venu"), Err(ExtractError::NotFound { .. })));
    }

    #[test]
    fn test_locate_skips_non_record_occurrences() {
        let text = r#"note: "pikachu", pikachu: {num: 25}"#;
        let span = locate(text, "pikachu").unwrap();
        assert_eq!(span.text, "{num: 25}");
    }

    #[test]
    fn test_locate_unbalanced() {
        let text = "mew: {num: 151, baseStats: {hp: 100}";
        let result = locate(text, "mew");
        assert!(matches!(
            result,
            Err(ExtractError::UnbalancedDelimiters { open_at: 5, depth: 1, .. })
        ));
    }

    #[test]
    fn test_locate_quoted_key() {
        let span = locate(r#"{"mew": {"num": 151}}"#, "mew").unwrap();
        assert_eq!(span.text, r#"{"num": 151}"#);
    }

    #[test]
    fn test_list_entity_keys_filters_internal_names() {
        let keys = list_entity_keys(DEX, &KeyFilter::default());
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        assert_eq!(keys, vec!["bulbasaur", "ivysaur", "pikachu", "raichu"]);
    }

    #[test]
    fn test_list_entity_keys_denylist_and_prefixes() {
        let text = "battle_x: {}, learnset: {}, gen9: {}, mew: {}, mew: {}";
        let keys = list_entity_keys(text, &KeyFilter::default());
        assert_eq!(keys.len(), 1);
        assert!(keys.contains("mew"));

        let keys = list_entity_keys(text, &KeyFilter::permissive());
        assert_eq!(keys.len(), 4);
    }

    #[test]
    fn test_list_entity_keys_skips_nested_objects() {
        let text = r#"exports.BattleMovedex = {
thunder: {num: 87, flags: {protect: 1}, secondary: {chance: 30}},
tackle: {num: 33, flags: {contact: 1}},
};"#;
        let keys = list_entity_keys(text, &KeyFilter::permissive());
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        assert_eq!(keys, vec!["thunder", "tackle"]);
    }

    #[test]
    fn test_list_entity_keys_under_wrapper_key() {
        let text = "battle_pokedex: {mew: {num: 151, baseStats: {hp: 100}}, mewtwo: {num: 150}}";
        let keys = list_entity_keys(text, &KeyFilter::default());
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        assert_eq!(keys, vec!["mew", "mewtwo"]);
    }

    #[test]
    fn test_entities_by_number_sorts() {
        let text = "raichu: {num: 26}, pichu: {num: 172}, pikachu: {num: 25}, \
                    pikachualola: {num: 25}, missingno: {num: 0}, nonum: {}";
        let keys = list_entity_keys(text, &KeyFilter::default());
        let numbered = entities_by_number(text, &keys);
        let order: Vec<(i64, &str)> = numbered.iter().map(|n| (n.number, n.key.as_str())).collect();
        assert_eq!(
            order,
            vec![(25, "pikachu"), (25, "pikachualola"), (26, "raichu"), (172, "pichu")]
        );
    }
}
