//! Variant suffix dictionary.

use lazy_static::lazy_static;

lazy_static! {
    static ref BUILTIN: SuffixSet = SuffixSet::new([
        "mega", "gmax", "x", "y", "attack", "defense", "speed", "alola", "galar", "hisui",
        "paldea", "sandy", "trash", "sunny", "rainy", "snowy", "fan", "frost", "heat", "mow",
        "wash", "crowned", "eternal", "terastal", "stellar", "therian", "incarnate", "sky",
        "black", "white", "resolute", "pirouette", "ash", "origin", "land", "alolatotem",
        "paldeaaqua", "paldeacombat", "paldeablaze", "starter", "megaz", "primal", "sunshine",
        "bug", "dark", "fire", "dragon", "flying", "electric", "fairy", "ice", "grass",
        "psychic", "rock", "poison", "water", "ground", "fighting", "ghost", "steel",
        "bluestriped", "whitestriped", "galarzen", "zen", "bond", "pokeball", "fancy", "blade",
        "small", "large", "super", "neutral", "complete", "unbound", "10", "totem", "pompom",
        "pau", "sensu", "dusk", "school", "midnight", "busted", "bustedtotem", "dawnwings",
        "duskmane", "ultra", "originalmega", "original", "gorging", "gulping", "lowkey",
        "lowkeygmax", "antique", "noice", "hangry", "rapidstrike", "rapidstrikegmax",
        "eternamax", "dada", "shadow", "bloodmoon", "four", "blue", "yellow", "hero", "droopy",
        "stretchy", "curly", "threesegment", "roaming", "hearthflame", "cornerstone",
        "tealtera", "cornerstonetera", "hearthflametera", "wellspring", "wellspringtera",
    ]);
}

/// A set of variant suffix tokens, kept longest first.
///
/// Ties in length are ordered alphabetically so matching is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixSet {
    tokens: Vec<String>,
}

impl Default for SuffixSet {
    /// The dictionary of form suffixes used by the public sprite server.
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl SuffixSet {
    /// Creates a set from arbitrary tokens. Tokens are lowercased; empty and
    /// repeated tokens are dropped.
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut tokens: Vec<String> = tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        tokens.dedup();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Tokens, longest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Returns the longest token that `s` starts with.
    pub fn longest_prefix_of(&self, s: &str) -> Option<&str> {
        self.iter().find(|t| s.starts_with(t))
    }

    /// Splits `remainder` into tokens by repeatedly taking the longest
    /// matching token off its front.
    ///
    /// Returns `None` if some non-empty tail matches no token. Matching is
    /// greedy and never backtracks, so a remainder that only splits with a
    /// shorter first token is not consumed.
    pub fn consume<'s>(&'s self, remainder: &str) -> Option<Vec<&'s str>> {
        let mut rest = remainder;
        let mut consumed = Vec::new();
        while !rest.is_empty() {
            let token = self.longest_prefix_of(rest)?;
            consumed.push(token);
            rest = &rest[token.len()..];
        }
        Some(consumed)
    }
}
