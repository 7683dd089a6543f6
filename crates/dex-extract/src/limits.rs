//! Fixed bounds used by the scanner, decoder and graph builder.

/// Default cap on the number of nodes in one evolution chain.
///
/// Real lineages have at most three stages; the cap only exists to stop
/// traversal over malformed edge sets.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 8;

/// Smallest depth cap a configuration may set (a root plus one evolution).
pub const MIN_CHAIN_DEPTH: usize = 2;

/// Root resolution never walks more parents than this.
pub const MAX_PARENT_WALK: usize = 64;

/// Longest key the scanner will look up.
pub const MAX_KEY_LEN: usize = 128;

/// Prefixes of top-level object keys that never name an entity.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["battle_", "pokemons_", "learnsets_"];

/// Lowercase internal property names that open a nested object and would
/// otherwise be mistaken for entity keys.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "genderratio",
    "basestats",
    "abilities",
    "evos",
    "eggmoves",
    "tutor_moves",
    "learnset",
    "eventdata",
    "sp",
    "s",
    "d",
    "natdex",
    "gen1",
    "gen2",
    "gen3",
    "gen4",
    "gen5",
    "gen6",
    "gen7",
    "gen8",
    "gen9",
];

/// Base URL sprite candidates are built under.
pub const DEFAULT_SPRITE_BASE_URL: &str = "https://play.pokemonshowdown.com/sprites";
