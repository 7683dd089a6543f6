//! Evolution lineage reconstruction.
//!
//! Records name only their forward evolutions. To answer "what is the full
//! lineage of X" the builder inverts every forward edge once per source
//! (the reverse index held by an [`EvolutionContext`]), walks parents up to
//! the root, then walks forward edges down with an explicit stack.
//!
//! Traversal always terminates: a path never revisits one of its own keys
//! and never grows past the context's depth cap. Either guard cuts the
//! branch where it fires and is reported on the forest.

pub mod access;
pub mod context;
pub mod trigger;

pub use access::{EvolutionAccess, SourceAccess};
pub use context::{EvolutionContext, ReverseIndex, RootResolution};
pub use trigger::classify;

use crate::model::ChainForest;

/// Builds every chain through the lineage containing `species`.
///
/// See [`EvolutionContext::build_chain_forest`].
pub fn build_chain_forest<A: EvolutionAccess>(
    context: &EvolutionContext<A>,
    species: &str,
) -> ChainForest {
    context.build_chain_forest(species)
}
