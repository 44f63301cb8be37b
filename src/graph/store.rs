//! In-memory interaction graph storage
//!
//! Weighted directed adjacency keyed by sender. Only senders own an
//! adjacency entry; an actor that only ever receives is visible as a
//! neighbor but is not a node of the graph keyset.

use super::types::{InteractionRecord, NodeId, Weight};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Self-loop rejected: user {0} cannot message themselves")]
    SelfLoop(NodeId),

    #[error("Invalid weight {weight} for {from} -> {to}: message count must be greater than 0")]
    NonPositiveWeight { from: NodeId, to: NodeId, weight: Weight },

    #[error("User {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("No path from user {from} to user {to}")]
    Unreachable { from: NodeId, to: NodeId },
}

impl GraphError {
    /// Validation failures are recovered locally by skipping the edge
    pub fn is_validation(&self) -> bool {
        matches!(self, GraphError::SelfLoop(_) | GraphError::NonPositiveWeight { .. })
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Outcome of a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Edges that did not exist before
    pub inserted: usize,
    /// Edges whose weight was replaced
    pub overwritten: usize,
    /// Records skipped because source == destination
    pub self_loops: usize,
}

/// Summary counts of the graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    /// Nodes with at least one outgoing edge
    pub source_nodes: usize,
    /// Sources plus destination-only nodes
    pub total_nodes: usize,
    pub edges: usize,
    pub total_weight: i64,
}

/// In-memory interaction graph
///
/// `adjacency`: sender -> (receiver -> weight). Both levels preserve
/// insertion order, which fixes the iteration order of every analysis.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    adjacency: IndexMap<NodeId, IndexMap<NodeId, Weight>>,

    /// Number of distinct (source, destination) pairs
    edge_count: usize,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        GraphStore {
            adjacency: IndexMap::new(),
            edge_count: 0,
        }
    }

    /// Build a store from a record sequence
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = InteractionRecord>,
    {
        let mut store = Self::new();
        store.bulk_load(records);
        store
    }

    /// Insert or overwrite one edge. Returns the previous weight if any.
    fn upsert(&mut self, source: NodeId, destination: NodeId, weight: Weight) -> Option<Weight> {
        let previous = self
            .adjacency
            .entry(source)
            .or_default()
            .insert(destination, weight);
        if previous.is_none() {
            self.edge_count += 1;
        }
        previous
    }

    /// Record that `source` sent `weight` messages to `destination`.
    ///
    /// Rejects self-loops and non-positive weights without touching the
    /// graph. An existing edge for the pair is overwritten.
    pub fn add_edge(&mut self, source: NodeId, destination: NodeId, weight: Weight) -> GraphResult<()> {
        if source == destination {
            warn!("Rejected self-loop for user {}", source);
            return Err(GraphError::SelfLoop(source));
        }
        if weight <= 0 {
            warn!("Rejected {} -> {} with non-positive weight {}", source, destination, weight);
            return Err(GraphError::NonPositiveWeight {
                from: source,
                to: destination,
                weight,
            });
        }

        self.upsert(source, destination, weight);
        info!("Recorded {} -> {} with {} messages", source, destination, weight);
        Ok(())
    }

    /// Load a batch of records.
    ///
    /// Self-loops are skipped. Unlike [`GraphStore::add_edge`], weights are
    /// taken as given: zero and negative counts are stored.
    pub fn bulk_load<I>(&mut self, records: I) -> LoadReport
    where
        I: IntoIterator<Item = InteractionRecord>,
    {
        let mut report = LoadReport::default();

        for record in records {
            if record.is_self_loop() {
                warn!("Skipping self-loop record for user {}", record.source);
                report.self_loops += 1;
                continue;
            }
            match self.upsert(record.source, record.destination, record.weight) {
                Some(_) => report.overwritten += 1,
                None => report.inserted += 1,
            }
        }

        info!(
            "Loaded interaction graph: {} new edges, {} overwritten, {} self-loops skipped",
            report.inserted, report.overwritten, report.self_loops
        );
        report
    }

    /// Outgoing edges of `node`; empty for receive-only or unknown nodes
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Weight)> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(&target, &weight)| (target, weight)))
    }

    /// Outgoing edges of a node that has sent messages
    pub fn query_user(&self, node: NodeId) -> GraphResult<&IndexMap<NodeId, Weight>> {
        self.adjacency.get(&node).ok_or_else(|| {
            debug!("User {} has no outgoing records", node);
            GraphError::NodeNotFound(node)
        })
    }

    /// Weight of a single edge
    pub fn weight(&self, source: NodeId, destination: NodeId) -> Option<Weight> {
        self.adjacency
            .get(&source)
            .and_then(|edges| edges.get(&destination))
            .copied()
    }

    /// The graph keyset: nodes with at least one outgoing edge, in insertion order
    pub fn node_keys(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Whether `node` belongs to the graph keyset
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Size of the graph keyset
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Every edge as a record, grouped by source in insertion order
    pub fn edges(&self) -> impl Iterator<Item = InteractionRecord> + '_ {
        self.adjacency.iter().flat_map(|(&source, edges)| {
            edges
                .iter()
                .map(move |(&destination, &weight)| InteractionRecord::new(source, destination, weight))
        })
    }

    /// Adjacency rows in keyset order, for projecting algorithm views
    pub fn adjacency(&self) -> impl Iterator<Item = (NodeId, &IndexMap<NodeId, Weight>)> + '_ {
        self.adjacency.iter().map(|(&source, edges)| (source, edges))
    }

    /// Total weight received per node, including receive-only nodes.
    /// Ordered by first appearance as a destination. Sums saturate.
    pub fn received_weight(&self) -> IndexMap<NodeId, i64> {
        let mut received: IndexMap<NodeId, i64> = IndexMap::new();
        for record in self.edges() {
            let total = received.entry(record.destination).or_insert(0);
            *total = total.saturating_add(record.weight);
        }
        received
    }

    pub fn statistics(&self) -> GraphStatistics {
        let mut nodes: FxHashSet<NodeId> = self.adjacency.keys().copied().collect();
        let mut total_weight = 0i64;
        for record in self.edges() {
            nodes.insert(record.destination);
            total_weight = total_weight.saturating_add(record.weight);
        }

        GraphStatistics {
            source_nodes: self.adjacency.len(),
            total_nodes: nodes.len(),
            edges: self.edge_count,
            total_weight,
        }
    }
}
