//! dex-extract: record extraction from object-literal data dumps.
//!
//! Battle simulator data ships as large JavaScript object literals
//! (`exports.BattlePokedex = { bulbasaur: { num: 1, ... }, ... }`). This
//! crate reads typed records out of that text without a JavaScript parser,
//! rebuilds evolution lineages from the per-record forward edges, and
//! recovers external resource names for form variants.
//!
//! # Overview
//!
//! - **Scanner**: locates one record's balanced `{ ... }` span by key
//! - **Decoder**: reads typed fields from a span with a declarative table
//! - **Graph builder**: reconstructs evolution forests with cycle and depth guards
//! - **Name resolver**: clusters ordered ids into base forms and variants
//!
//! # Quick Start
//!
//! ```rust
//! use dex_extract::{EvolutionContext, SourceAccess, Species, decode, locate, schema};
//!
//! let text = r#"exports.BattlePokedex = {
//!     bulbasaur: {num: 1, name: "Bulbasaur", types: ["Grass", "Poison"], evos: ["Ivysaur"]},
//!     ivysaur: {num: 2, name: "Ivysaur", types: ["Grass", "Poison"], evoLevel: 16},
//! };"#;
//!
//! // Decode one record
//! let span = locate(text, "bulbasaur").unwrap();
//! let species = Species::from_record(span.key.clone(), &decode(&span, schema::species_fields()));
//! assert_eq!(species.type2.as_deref(), Some("Poison"));
//!
//! // Rebuild its lineage
//! let ctx = EvolutionContext::new(SourceAccess::new(text));
//! let forest = ctx.build_chain_forest("ivysaur");
//! assert_eq!(forest.chains[0].ids(), vec!["bulbasaur", "ivysaur"]);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (spans, field specs, records, chains)
//! - [`codec`]: Record location and field decoding
//! - [`schema`]: Field tables for species, moves and learnsets
//! - [`graph`]: Evolution forest construction
//! - [`names`]: Variant name canonicalization and sprite candidates
//! - [`validate`]: Semantic checks on projected records
//! - [`config`]: TOML and environment configuration
//! - [`error`]: Error types
//! - [`limits`]: Fixed bounds and defaults
//!
//! # Input Assumptions
//!
//! The scanner counts braces without tracking string literals. Records
//! whose quoted values contain `{` or `}` are outside the supported input.
//! Everything else degrades per record: a missing key or an unclosed span
//! is an error for that key only, and a field that does not match its
//! pattern is simply absent from the decoded record.

pub mod codec;
pub mod config;
pub mod error;
pub mod graph;
pub mod limits;
pub mod model;
pub mod names;
pub mod schema;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{KeyFilter, decode, entities_by_number, list_entity_keys, locate};
pub use config::ExtractConfig;
pub use error::{ConfigError, ErrorCode, ExtractError, TraversalInterrupt, ValidationError};
pub use graph::{EvolutionAccess, EvolutionContext, SourceAccess, build_chain_forest};
pub use model::{
    Chain, ChainForest, DecodedRecord, EntityKey, EntitySpan, EvolutionNode, FieldKind, FieldSpec,
    FieldValue, Learnset, Move, NumberedKey, SourceText, Species, TriggerDescriptor, TriggerKind,
};
pub use names::{CanonicalName, SuffixSet, canonicalize, sprite_candidates};
pub use util::to_id;
pub use validate::validate_species;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
