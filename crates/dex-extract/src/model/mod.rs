//! Data model types for extraction.
//!
//! This module contains the core types shared by the scanner, decoder,
//! graph builder and name resolver:
//! - Source text and located record spans
//! - Field specifications and decoded values
//! - Evolution edges, nodes, chains and forests
//! - Typed projections of decoded records (species, moves, learnsets)

pub mod evolution;
pub mod field;
pub mod record;
pub mod source;
pub mod value;

pub use evolution::{
    Chain, ChainForest, EvolutionEdge, EvolutionNode, NodeDetails, TriggerDescriptor, TriggerKind,
    TriggerParams,
};
pub use field::{FieldKind, FieldSpec};
pub use record::{Accuracy, BaseStats, LearnMethods, Learnset, Move, Species};
pub use source::{EntityKey, EntitySpan, NumberedKey, SourceText};
pub use value::{DecodedRecord, FieldValue};
