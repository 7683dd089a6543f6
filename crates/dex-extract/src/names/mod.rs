//! Variant name resolution.
//!
//! Record keys fuse a base name and its form suffixes (`charizardmegax`),
//! while external resources are named `base-suffix-suffix`. The resolver
//! recovers the split from key order alone: given ids sorted by national
//! number, a base form comes right before its variants, so an id that
//! extends the last base with dictionary tokens is taken to be a variant
//! of it.
//!
//! This is a heuristic. An unrelated id that happens to start with the
//! previous base and end in dictionary tokens is clustered wrongly, and the
//! resource lookups built from it must fall back (see
//! [`sprite_candidates`]).

pub mod resources;
pub mod suffix;

pub use resources::{SpriteCandidate, sprite_candidates};
pub use suffix::SuffixSet;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

use crate::model::EntityKey;

/// The external name chosen for one id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalName {
    /// `base` alone, or `base` and every suffix joined with `-`.
    pub value: String,
    /// The base the id was clustered under; the id itself for a base form.
    pub base: EntityKey,
    /// Suffix tokens in matched order; empty for a base form.
    pub suffixes: Vec<String>,
}

impl CanonicalName {
    fn base(id: &str) -> Self {
        Self {
            value: id.to_string(),
            base: id.to_string(),
            suffixes: Vec::new(),
        }
    }

    pub fn is_variant(&self) -> bool {
        !self.suffixes.is_empty()
    }

    /// `base-` followed by all suffixes run together (`charizard-megax`).
    ///
    /// Same as `value` unless there are two or more suffixes.
    pub fn compact(&self) -> String {
        if self.suffixes.is_empty() {
            self.base.clone()
        } else {
            format!("{}-{}", self.base, self.suffixes.concat())
        }
    }
}

/// Assigns a canonical name to every id.
///
/// `sorted_ids` must be in national-number order so that base forms
/// precede their variants; [`crate::entities_by_number`] produces it. Ids are
/// lowercased. An id that starts with the current base and whose remainder
/// is fully consumed by `suffixes` becomes a variant named
/// `base-tok1-tok2`; any other id becomes the new current base and is named
/// after itself. A repeated id keeps its first assignment.
pub fn canonicalize<I>(sorted_ids: I, suffixes: &SuffixSet) -> IndexMap<EntityKey, CanonicalName>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut names = IndexMap::new();
    let mut current_base: Option<String> = None;

    for id in sorted_ids {
        let id = id.as_ref().to_lowercase();
        if names.contains_key(&id) {
            continue;
        }

        let variant = current_base.as_deref().and_then(|base| {
            let remainder = id.strip_prefix(base)?;
            let tokens = suffixes.consume(remainder)?;
            Some(CanonicalName {
                value: std::iter::once(base).chain(tokens.iter().copied()).collect::<Vec<_>>().join("-"),
                base: base.to_string(),
                suffixes: tokens.into_iter().map(str::to_string).collect(),
            })
        });

        let name = match variant {
            Some(name) => {
                trace!(id = %id, canonical = %name.value, "variant");
                name
            }
            None => {
                current_base = Some(id.clone());
                CanonicalName::base(&id)
            }
        };
        names.insert(id, name);
    }
    names
}
