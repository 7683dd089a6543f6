//! Evolution graph types.
//!
//! Edges come from one record's forward-evolution list; nodes carry the
//! classified trigger that leads into them; chains are root-to-leaf paths
//! and a forest groups every chain sharing one resolved root.

use serde::Serialize;

use crate::error::TraversalInterrupt;
use crate::model::EntityKey;

/// A directed "evolves into" relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EvolutionEdge {
    pub from: EntityKey,
    pub to: EntityKey,
}

/// What causes an evolution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TriggerKind {
    LevelUp,
    UseItem,
    TradeHeld,
    Friendship,
    MoveLearned,
    /// None of the above; callers format from the raw parameters.
    Other,
}

/// Raw evolution parameters as written on the evolved record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TriggerParams {
    /// `evoLevel`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    /// `evoType`, e.g. `useItem`, `trade`, `levelFriendship`, `levelMove`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evo_type: Option<String>,
    /// `evoItem`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// `evoMove`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_name: Option<String>,
    /// `evoCondition`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl TriggerParams {
    /// Returns true if the record carried no evolution parameters at all.
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.evo_type.is_none()
            && self.item.is_none()
            && self.move_name.is_none()
            && self.condition.is_none()
    }
}

/// A classified trigger plus the parameters it was classified from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TriggerDescriptor {
    pub kind: TriggerKind,
    pub params: TriggerParams,
}

/// What the graph builder needs to know about one record beyond its edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeDetails {
    /// Display name, or the key when the record has none.
    pub name: String,
    pub params: TriggerParams,
}

/// One member of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionNode {
    pub id: EntityKey,
    pub name: String,
    /// Absent on the chain root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerDescriptor>,
}

/// One root-to-leaf path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Chain {
    pub nodes: Vec<EvolutionNode>,
}

impl Chain {
    /// Returns the ordered node ids.
    pub fn ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&EvolutionNode> {
        self.nodes.first()
    }

    pub fn leaf(&self) -> Option<&EvolutionNode> {
        self.nodes.last()
    }
}

/// Every chain reachable from one resolved root.
///
/// No two chains are identical id sequences and none exceeds the depth cap
/// the forest was built with. Guards hit while building are kept in
/// `interruptions`; their chains are still present, truncated at the guard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainForest {
    pub root: Option<EntityKey>,
    pub chains: Vec<Chain>,
    #[serde(skip)]
    pub interruptions: Vec<TraversalInterrupt>,
}

impl ChainForest {
    /// Returns true if the forest holds no chain (query species not found).
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Returns true if any branch was cut short by a guard or a missing record.
    pub fn is_partial(&self) -> bool {
        !self.interruptions.is_empty()
    }

    /// Returns every distinct member id in first-seen order.
    pub fn members(&self) -> Vec<EntityKey> {
        let mut seen = rustc_hash::FxHashSet::default();
        let mut members = Vec::new();
        for node in self.chains.iter().flat_map(|c| c.nodes.iter()) {
            if seen.insert(node.id.as_str()) {
                members.push(node.id.clone());
            }
        }
        members
    }
}
