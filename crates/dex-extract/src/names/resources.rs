//! Sprite resource identifiers for canonical names.

use serde::Serialize;

use crate::config::ResourceConfig;
use crate::names::CanonicalName;

/// One place a sprite may be fetched from, and the file it is stored as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpriteCandidate {
    pub url: String,
    /// `{number}_{name}.{ext}`
    pub file_name: String,
    pub animated: bool,
}

// Directory, extension and whether the sprite is animated, in fetch order
const SOURCES: &[(&str, &str, bool)] = &[
    ("gen5ani", "gif", true),
    ("ani", "gif", true),
    ("gen5", "png", false),
];

/// Returns sprite candidates for one entity, most preferred first.
///
/// Animated generation-5 sprites come first, then the newer animated set,
/// then static generation-5 sprites. Within each directory the canonical
/// name is tried before the compact form, which only differs for names
/// with several suffixes.
pub fn sprite_candidates(
    config: &ResourceConfig,
    number: i64,
    name: &CanonicalName,
) -> Vec<SpriteCandidate> {
    let base_url = config.sprite_base_url.trim_end_matches('/');
    let compact = name.compact();
    let mut names = vec![name.value.as_str()];
    if compact != name.value {
        names.push(&compact);
    }

    SOURCES
        .iter()
        .flat_map(|&(dir, ext, animated)| {
            names.iter().map(move |n| SpriteCandidate {
                url: format!("{base_url}/{dir}/{n}.{ext}"),
                file_name: format!("{number}_{n}.{ext}"),
                animated,
            })
        })
        .collect()
}
