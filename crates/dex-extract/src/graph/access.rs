//! Read access to evolution records.

use indexmap::IndexSet;

use crate::codec::{KeyFilter, decode, list_entity_keys, locate};
use crate::error::ExtractError;
use crate::model::{EntityKey, NodeDetails, SourceText, TriggerParams};
use crate::schema::{self, fields};
use crate::util::to_id;

/// What the graph builder needs from a record store.
///
/// Implementations must be deterministic for the lifetime of a context:
/// the reverse index is built from one call to [`list_all_keys`] and never
/// refreshed.
///
/// [`list_all_keys`]: EvolutionAccess::list_all_keys
pub trait EvolutionAccess {
    /// Every entity key in the store, in source order.
    fn list_all_keys(&self) -> IndexSet<EntityKey>;

    /// Keys `key` evolves into, in source order.
    fn forward_edges_of(&self, key: &str) -> Result<Vec<EntityKey>, ExtractError>;

    /// Display name and raw evolution parameters of `key`.
    fn describe(&self, key: &str) -> Result<NodeDetails, ExtractError>;
}

impl<A: EvolutionAccess + ?Sized> EvolutionAccess for &A {
    fn list_all_keys(&self) -> IndexSet<EntityKey> {
        (**self).list_all_keys()
    }

    fn forward_edges_of(&self, key: &str) -> Result<Vec<EntityKey>, ExtractError> {
        (**self).forward_edges_of(key)
    }

    fn describe(&self, key: &str) -> Result<NodeDetails, ExtractError> {
        (**self).describe(key)
    }
}

/// [`EvolutionAccess`] over one source text, via the scanner and decoder.
///
/// Forward edges are written as display names (`evos: ["Ivysaur"]`) and are
/// reduced to keys with [`to_id`].
#[derive(Debug, Clone)]
pub struct SourceAccess {
    source: SourceText,
    filter: KeyFilter,
}

impl SourceAccess {
    /// Creates access with the default key filter.
    pub fn new(source: impl Into<SourceText>) -> Self {
        Self::with_filter(source, KeyFilter::default())
    }

    /// Creates access with a caller-supplied key filter.
    pub fn with_filter(source: impl Into<SourceText>, filter: KeyFilter) -> Self {
        Self {
            source: source.into(),
            filter,
        }
    }

    /// Returns the underlying source text.
    pub fn source(&self) -> &SourceText {
        &self.source
    }
}

impl EvolutionAccess for SourceAccess {
    fn list_all_keys(&self) -> IndexSet<EntityKey> {
        list_entity_keys(self.source.as_str(), &self.filter)
    }

    fn forward_edges_of(&self, key: &str) -> Result<Vec<EntityKey>, ExtractError> {
        let span = locate(self.source.as_str(), key)?;
        let record = decode(&span, schema::forward_edge_fields());
        Ok(record
            .list(fields::EVOS)
            .map(|evos| evos.iter().map(|name| to_id(name)).filter(|id| !id.is_empty()).collect())
            .unwrap_or_default())
    }

    fn describe(&self, key: &str) -> Result<NodeDetails, ExtractError> {
        let span = locate(self.source.as_str(), key)?;
        let record = decode(&span, schema::evolution_fields());
        let text = |field: &str| record.text(field).map(str::to_string);
        Ok(NodeDetails {
            name: record.text(fields::NAME).unwrap_or(&span.key).to_string(),
            params: TriggerParams {
                level: record.integer(fields::EVO_LEVEL),
                evo_type: text(fields::EVO_TYPE),
                item: text(fields::EVO_ITEM),
                move_name: text(fields::EVO_MOVE),
                condition: text(fields::EVO_CONDITION),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEX: &str = r#"{
eevee: {num: 133, name: "Eevee", evos: ["Vaporeon", "Espeon"]},
vaporeon: {num: 134, name: "Vaporeon", prevo: "Eevee", evoType: "useItem", evoItem: "Water Stone"},
espeon: {num: 196, name: "Espeon", prevo: "Eevee", evoType: "levelFriendship", evoCondition: "during the day"},
}"#;

    #[test]
    fn test_forward_edges_are_normalized() {
        let access = SourceAccess::new(DEX);
        assert_eq!(access.forward_edges_of("eevee").unwrap(), vec!["vaporeon", "espeon"]);
        assert!(access.forward_edges_of("espeon").unwrap().is_empty());
    }

    #[test]
    fn test_forward_edges_not_found() {
        let access = SourceAccess::new(DEX);
        assert!(matches!(
            access.forward_edges_of("jolteon"),
            Err(ExtractError::NotFound { .. })
        ));
    }

    #[test]
    fn test_describe_reads_trigger_params() {
        let access = SourceAccess::new(DEX);
        let details = access.describe("vaporeon").unwrap();
        assert_eq!(details.name, "Vaporeon");
        assert_eq!(details.params.evo_type.as_deref(), Some("useItem"));
        assert_eq!(details.params.item.as_deref(), Some("Water Stone"));
        assert_eq!(details.params.level, None);

        let details = access.describe("espeon").unwrap();
        assert_eq!(details.params.condition.as_deref(), Some("during the day"));
    }

    #[test]
    fn test_list_all_keys() {
        let keys = SourceAccess::new(DEX).list_all_keys();
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        assert_eq!(keys, vec!["eevee", "vaporeon", "espeon"]);
    }
}
