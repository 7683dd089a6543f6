//! Identifier normalization.
//!
//! Record keys in the corpus are display names reduced to lowercase ASCII
//! letters and digits: `"Mr. Mime"` is keyed `mrmime`, `"Raichu-Alola"` is
//! keyed `raichualola`. Forward-evolution lists hold display names, so they
//! go through the same reduction before lookup.

/// Reduces a display name to its record key.
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Returns true if `s` has at least one lowercase letter and no uppercase letter.
///
/// Digits and underscores are neutral, so `porygon2` and `tutor_moves` pass
/// while `baseStats` and `123` do not.
pub fn is_lowercase_ident(s: &str) -> bool {
    s.chars().any(char::is_lowercase) && !s.chars().any(char::is_uppercase)
}
