//! Per-source evolution context: the reverse index and forest construction.
//!
//! A context is created once per source text and passed to every graph
//! call. The reverse index (child to parents) needs a full scan of the
//! source, so it is built lazily on first use, exactly once, and frozen.

use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};

use crate::error::{ExtractError, TraversalInterrupt};
use crate::graph::access::EvolutionAccess;
use crate::limits::{DEFAULT_MAX_CHAIN_DEPTH, MAX_PARENT_WALK, MIN_CHAIN_DEPTH};
use crate::model::{
    Chain, ChainForest, EntityKey, EvolutionEdge, EvolutionNode, NodeDetails, TriggerDescriptor,
};
use crate::util::to_id;

// =============================================================================
// REVERSE INDEX
// =============================================================================

/// Child-to-parent edges for every record in a source.
#[derive(Debug, Clone, Default)]
pub struct ReverseIndex {
    parents: FxHashMap<EntityKey, Vec<EntityKey>>,
    edges: Vec<EvolutionEdge>,
    keys: usize,
    skipped: usize,
}

impl ReverseIndex {
    /// Scans every key once and records each forward edge in reverse.
    ///
    /// Keys whose records cannot be located are skipped and counted.
    pub fn build<A: EvolutionAccess + ?Sized>(access: &A) -> Self {
        let mut index = Self::default();
        for key in access.list_all_keys() {
            index.keys += 1;
            match access.forward_edges_of(&key) {
                Ok(children) => {
                    for child in children {
                        let parents = index.parents.entry(child.clone()).or_default();
                        if parents.contains(&key) {
                            continue;
                        }
                        parents.push(key.clone());
                        index.edges.push(EvolutionEdge {
                            from: key.clone(),
                            to: child,
                        });
                    }
                }
                Err(err) => {
                    debug!(key = %key, code = err.code().code(), "skipping key while indexing");
                    index.skipped += 1;
                }
            }
        }
        info!(
            keys = index.keys,
            edges = index.edges.len(),
            skipped = index.skipped,
            "built evolution reverse index"
        );
        index
    }

    /// Returns the first recorded parent of `key`.
    pub fn parent_of(&self, key: &str) -> Option<&str> {
        self.parents_of(key).first().map(String::as_str)
    }

    /// Returns every recorded parent of `key`, in discovery order.
    pub fn parents_of(&self, key: &str) -> &[EntityKey] {
        self.parents.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of keys scanned.
    pub fn key_count(&self) -> usize {
        self.keys
    }

    /// Distinct forward edges in discovery order.
    pub fn edges(&self) -> &[EvolutionEdge] {
        &self.edges
    }

    /// Number of distinct forward edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of keys skipped because their record could not be located.
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }
}

/// Outcome of walking parents up from a query species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootResolution {
    pub root: EntityKey,
    /// Parent steps taken.
    pub walked: usize,
    /// Set when the walk stopped on a repeated key or the walk limit.
    pub interrupt: Option<TraversalInterrupt>,
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Caller-owned state for evolution queries over one source.
///
/// Safe to share across threads when the access is `Sync`: concurrent first
/// callers wait on a single index build, later callers read it lock-free.
#[derive(Debug)]
pub struct EvolutionContext<A> {
    access: A,
    reverse: OnceLock<ReverseIndex>,
    max_depth: usize,
}

impl<A: EvolutionAccess> EvolutionContext<A> {
    /// Creates a context with the default depth cap.
    pub fn new(access: A) -> Self {
        Self {
            access,
            reverse: OnceLock::new(),
            max_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }

    /// Sets the maximum number of nodes in one chain.
    ///
    /// Values below a root plus one evolution are raised to that minimum.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(MIN_CHAIN_DEPTH);
        self
    }

    pub fn access(&self) -> &A {
        &self.access
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the reverse index, building it on first use.
    pub fn reverse_index(&self) -> &ReverseIndex {
        self.reverse.get_or_init(|| ReverseIndex::build(&self.access))
    }

    /// Returns true once the reverse index has been built.
    pub fn is_indexed(&self) -> bool {
        self.reverse.get().is_some()
    }

    /// Walks first-recorded parents up from `species` to the lineage root.
    ///
    /// A parent already seen on the walk stops it: the current key becomes
    /// the root and the cycle is reported.
    pub fn resolve_root(&self, species: &str) -> RootResolution {
        let index = self.reverse_index();
        let mut current = to_id(species);
        let mut seen = FxHashSet::default();
        seen.insert(current.clone());
        let mut walked = 0;
        let mut interrupt = None;

        while let Some(parent) = index.parent_of(&current) {
            if !seen.insert(parent.to_string()) {
                warn!(at = %current, revisited = parent, "parent walk loops");
                interrupt = Some(TraversalInterrupt::CycleDetected {
                    at: current.clone(),
                    revisited: parent.to_string(),
                });
                break;
            }
            current = parent.to_string();
            walked += 1;
            if walked >= MAX_PARENT_WALK {
                warn!(at = %current, walked, "parent walk limit reached");
                interrupt = Some(TraversalInterrupt::DepthLimitExceeded {
                    at: current.clone(),
                    depth: walked,
                });
                break;
            }
        }

        RootResolution {
            root: current,
            walked,
            interrupt,
        }
    }

    /// Builds every chain through the lineage containing `species`.
    ///
    /// An unknown species yields an empty forest. Use
    /// [`try_build_chain_forest`](Self::try_build_chain_forest) to tell a
    /// missing species apart from one with no evolutions.
    pub fn build_chain_forest(&self, species: &str) -> ChainForest {
        match self.try_build_chain_forest(species) {
            Ok(forest) => forest,
            Err(err) => {
                debug!(species, code = err.code().code(), "no forest for species");
                ChainForest::default()
            }
        }
    }

    /// Builds every chain through the lineage containing `species`, or fails
    /// if the species itself cannot be located.
    pub fn try_build_chain_forest(&self, species: &str) -> Result<ChainForest, ExtractError> {
        let id = to_id(species);
        self.access.forward_edges_of(&id)?;

        let resolution = self.resolve_root(&id);
        let mut forest = ChainForest {
            root: Some(resolution.root.clone()),
            chains: Vec::new(),
            interruptions: resolution.interrupt.into_iter().collect(),
        };

        let paths = self.collect_paths(&resolution.root, &mut forest.interruptions);
        let mut details = FxHashMap::default();
        forest.chains = paths
            .into_iter()
            .map(|path| self.materialize(path, &mut details))
            .collect();

        debug!(
            species = %id,
            root = %resolution.root,
            chains = forest.chains.len(),
            partial = forest.is_partial(),
            "built chain forest"
        );
        Ok(forest)
    }

    /// Returns every distinct member of the lineage containing `species`,
    /// in first-seen chain order.
    pub fn lineage(&self, species: &str) -> Vec<EntityKey> {
        self.build_chain_forest(species).members()
    }

    /// Depth-first walk from `root` with an explicit stack of paths.
    ///
    /// Paths come out in source edge order with exact duplicates removed.
    fn collect_paths(
        &self,
        root: &str,
        interruptions: &mut Vec<TraversalInterrupt>,
    ) -> Vec<Vec<EntityKey>> {
        let mut paths = Vec::new();
        let mut emitted: FxHashSet<Vec<EntityKey>> = FxHashSet::default();
        let mut emit = |path: Vec<EntityKey>, paths: &mut Vec<Vec<EntityKey>>| {
            if emitted.insert(path.clone()) {
                paths.push(path);
            }
        };

        let mut stack = vec![vec![root.to_string()]];
        while let Some(path) = stack.pop() {
            let Some(tail) = path.last() else {
                continue;
            };
            let children = match self.access.forward_edges_of(tail) {
                Ok(children) => children,
                Err(err) => {
                    // the root was located up front, so a failure here is an edge target
                    let from = path.len().checked_sub(2).map_or(tail, |at| &path[at]);
                    debug!(
                        from = %from,
                        target = %tail,
                        code = err.code().code(),
                        "edge target has no record"
                    );
                    interruptions.push(TraversalInterrupt::DanglingEdge {
                        from: from.clone(),
                        target: tail.clone(),
                        cause: err.code(),
                    });
                    Vec::new()
                }
            };
            if children.is_empty() {
                emit(path, &mut paths);
                continue;
            }
            if path.len() >= self.max_depth {
                warn!(at = %tail, depth = self.max_depth, "chain depth limit reached");
                interruptions.push(TraversalInterrupt::DepthLimitExceeded {
                    at: tail.clone(),
                    depth: self.max_depth,
                });
                emit(path, &mut paths);
                continue;
            }

            let mut extended = Vec::with_capacity(children.len());
            let mut cut = false;
            for child in children {
                if path.contains(&child) {
                    warn!(at = %tail, revisited = %child, "evolution edge loops");
                    interruptions.push(TraversalInterrupt::CycleDetected {
                        at: tail.clone(),
                        revisited: child,
                    });
                    cut = true;
                    continue;
                }
                let mut next = path.clone();
                next.push(child);
                extended.push(next);
            }
            if cut {
                emit(path, &mut paths);
            }
            // reversed so the first edge is walked first
            stack.extend(extended.into_iter().rev());
        }
        paths
    }

    fn materialize(
        &self,
        path: Vec<EntityKey>,
        cache: &mut FxHashMap<EntityKey, NodeDetails>,
    ) -> Chain {
        let nodes = path
            .into_iter()
            .enumerate()
            .map(|(position, id)| {
                let details = cache
                    .entry(id.clone())
                    .or_insert_with(|| {
                        self.access.describe(&id).unwrap_or_else(|_| NodeDetails {
                            name: id.clone(),
                            ..Default::default()
                        })
                    })
                    .clone();
                EvolutionNode {
                    trigger: (position > 0)
                        .then(|| TriggerDescriptor::from_params(details.params)),
                    name: details.name,
                    id,
                }
            })
            .collect();
        Chain { nodes }
    }
}
