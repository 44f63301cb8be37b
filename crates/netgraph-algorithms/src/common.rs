//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use rustc_hash::FxHashMap;

/// Node Identifier type (i64)
pub type NodeId = i64;

/// Edge weight type (interaction count)
pub type Weight = i64;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Indices `0..source_count` are the nodes that own outgoing edges, in the
/// order the adjacency listed them. Nodes that only ever appear as a
/// destination follow, in order of first appearance. Ranking and traversal
/// start points are restricted to the source prefix.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes (sources and destination-only)
    pub node_count: usize,
    /// Number of nodes that have an adjacency entry; always a prefix of the index space
    pub source_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: FxHashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,

    /// Edge weights: aligned with `out_targets`
    pub weights: Option<Vec<Weight>>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Get weights for outgoing edges of a node
    pub fn weights(&self, idx: usize) -> Option<&[Weight]> {
        self.weights.as_ref().map(|w| {
            let start = self.out_offsets[idx];
            let end = self.out_offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Whether the index belongs to the source prefix
    pub fn is_source(&self, idx: usize) -> bool {
        idx < self.source_count
    }

    /// Dense index of a node that owns outgoing edges
    pub fn source_index(&self, node: NodeId) -> Option<usize> {
        self.node_to_index
            .get(&node)
            .copied()
            .filter(|&idx| self.is_source(idx))
    }

    /// Build a view from an ordered adjacency listing.
    ///
    /// Each entry is a source node and its weighted out-edges. Duplicate
    /// source entries are merged in place. When `weighted` is false the
    /// weights are dropped and algorithms treat every edge as 1.
    pub fn from_adjacency<I, E>(adjacency: I, weighted: bool) -> Self
    where
        I: IntoIterator<Item = (NodeId, E)>,
        E: IntoIterator<Item = (NodeId, Weight)>,
    {
        let mut index_to_node = Vec::new();
        let mut node_to_index = FxHashMap::default();
        let mut rows: Vec<Vec<(NodeId, Weight)>> = Vec::new();

        for (source, edges) in adjacency {
            let idx = *node_to_index.entry(source).or_insert_with(|| {
                index_to_node.push(source);
                rows.push(Vec::new());
                index_to_node.len() - 1
            });
            rows[idx].extend(edges);
        }
        let source_count = index_to_node.len();

        // Destination-only nodes are appended after the source prefix
        for row in &rows {
            for &(target, _) in row {
                node_to_index.entry(target).or_insert_with(|| {
                    index_to_node.push(target);
                    index_to_node.len() - 1
                });
            }
        }
        let node_count = index_to_node.len();

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut flat_weights = if weighted { Some(Vec::new()) } else { None };
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];

        out_offsets.push(0);
        for (u_idx, row) in rows.iter().enumerate() {
            for &(target, weight) in row {
                let v_idx = node_to_index[&target];
                out_targets.push(v_idx);
                incoming[v_idx].push(u_idx);
                if let Some(ref mut w_flat) = flat_weights {
                    w_flat.push(weight);
                }
            }
            out_offsets.push(out_targets.len());
        }
        // Destination-only nodes have no outgoing edges
        for _ in source_count..node_count {
            out_offsets.push(out_targets.len());
        }

        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();
        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            source_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
            weights: flat_weights,
        }
    }
}
