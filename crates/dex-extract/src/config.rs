//! Extraction settings.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`DEX_*`)
//! 2. A TOML file passed to [`ExtractConfig::load`]
//! 3. Compiled defaults
//!
//! Every section is optional in TOML; missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::codec::KeyFilter;
use crate::error::ConfigError;
use crate::limits::{
    DEFAULT_DENYLIST, DEFAULT_EXCLUDED_PREFIXES, DEFAULT_MAX_CHAIN_DEPTH, DEFAULT_SPRITE_BASE_URL,
    MIN_CHAIN_DEPTH,
};
use crate::names::SuffixSet;

/// Overrides `graph.max_chain_depth`.
pub const ENV_MAX_CHAIN_DEPTH: &str = "DEX_MAX_CHAIN_DEPTH";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub scan: ScanConfig,
    pub graph: GraphConfig,
    pub names: NamesConfig,
    pub resources: ResourceConfig,
}

/// Entity key enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Internal property names that open objects but are not entities.
    pub denylist: Vec<String>,
    /// Key prefixes that are never entities.
    pub excluded_prefixes: Vec<String>,
    /// Only accept all-lowercase keys.
    pub require_lowercase: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            excluded_prefixes: DEFAULT_EXCLUDED_PREFIXES.iter().map(|s| s.to_string()).collect(),
            require_lowercase: true,
        }
    }
}

/// Evolution traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Most nodes in one chain; at least 2.
    pub max_chain_depth: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }
}

/// Variant name resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamesConfig {
    /// Replaces the built-in suffix dictionary when non-empty.
    pub suffixes: Vec<String>,
}

/// External resource locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub sprite_base_url: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            sprite_base_url: DEFAULT_SPRITE_BASE_URL.to_string(),
        }
    }
}

impl ExtractConfig {
    /// Loads `path` over the defaults, applies environment overrides and
    /// validates the result.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML string over the defaults. No environment overrides.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `DEX_*` environment variables. Unparsable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(ENV_MAX_CHAIN_DEPTH) {
            self.apply_max_chain_depth_override(&value);
        }
    }

    fn apply_max_chain_depth_override(&mut self, value: &str) {
        match value.trim().parse::<usize>() {
            Ok(depth) => self.graph.max_chain_depth = depth,
            Err(_) => warn!(var = ENV_MAX_CHAIN_DEPTH, value, "ignoring unparsable override"),
        }
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.graph.max_chain_depth < MIN_CHAIN_DEPTH {
            return Err(ConfigError::ValidationFailed {
                field: "graph.max_chain_depth".to_string(),
                message: format!("must be at least {MIN_CHAIN_DEPTH}"),
            });
        }
        if self.resources.sprite_base_url.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "resources.sprite_base_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.names.suffixes.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "names.suffixes".to_string(),
                message: "must not contain empty tokens".to_string(),
            });
        }
        Ok(())
    }

    /// The key filter described by `scan`.
    pub fn key_filter(&self) -> KeyFilter {
        KeyFilter::new(
            &self.scan.denylist,
            &self.scan.excluded_prefixes,
            self.scan.require_lowercase,
        )
    }

    /// The configured suffix dictionary, or the built-in one.
    pub fn suffix_set(&self) -> SuffixSet {
        if self.names.suffixes.is_empty() {
            SuffixSet::default()
        } else {
            SuffixSet::new(&self.names.suffixes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractConfig::default();
        assert_eq!(config.graph.max_chain_depth, DEFAULT_MAX_CHAIN_DEPTH);
        assert!(config.scan.require_lowercase);
        assert!(config.scan.denylist.iter().any(|s| s == "learnset"));
        assert_eq!(config.resources.sprite_base_url, DEFAULT_SPRITE_BASE_URL);
        assert_eq!(config.suffix_set(), SuffixSet::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_overrides() {
        let config = ExtractConfig::from_toml(
            r#"
[graph]
max_chain_depth = 4

[names]
suffixes = ["alola", "galar"]

[scan]
require_lowercase = false
"#,
        )
        .unwrap();
        assert_eq!(config.graph.max_chain_depth, 4);
        assert_eq!(config.suffix_set().len(), 2);
        assert!(!config.scan.require_lowercase);
        // untouched keys keep their defaults
        assert_eq!(config.scan.excluded_prefixes, ScanConfig::default().excluded_prefixes);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(ExtractConfig::from_toml("").unwrap(), ExtractConfig::default());
    }

    #[test]
    fn test_invalid_depth() {
        let result = ExtractConfig::from_toml("[graph]\nmax_chain_depth = 1\n");
        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed { ref field, .. }) if field == "graph.max_chain_depth"
        ));
    }

    #[test]
    fn test_parse_error() {
        let result = ExtractConfig::from_toml("[graph\n");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_depth_override() {
        let mut config = ExtractConfig::default();
        config.apply_max_chain_depth_override(" 5 ");
        assert_eq!(config.graph.max_chain_depth, 5);
        config.apply_max_chain_depth_override("deep");
        assert_eq!(config.graph.max_chain_depth, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ExtractConfig::load(Path::new("/nonexistent/dex.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_key_filter_from_config() {
        let config = ExtractConfig::from_toml("[scan]\ndenylist = [\"mew\"]\n").unwrap();
        let filter = config.key_filter();
        assert!(!filter.accepts("mew"));
        assert!(filter.accepts("learnset"));
        assert!(!filter.accepts("battle_x"));
    }
}
