//! Graph algorithms module
//!
//! Algorithms are implemented in the `netgraph-algorithms` crate.
//! This module projects a [`GraphStore`] into a [`GraphView`] and maps
//! algorithm outcomes onto [`GraphError`]. Every function reads the store
//! and builds its own view; none of them mutate the store or call each other.

use crate::graph::{GraphError, GraphResult, GraphStore, NodeId};
use netgraph_algorithms::PathFailure;
use tracing::debug;

// Re-export algorithms
pub use netgraph_algorithms::{
    GraphView,
    page_rank as page_rank_view, PageRankConfig, PageRankResult,
    hits as hits_view, HitsConfig, HitsEntry, HitsResult, HitsSortKey,
    reachability_communities, CommunityResult,
    dijkstra, PathResult,
};

/// How edge weights are carried into a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeWeights {
    /// Interaction counts become edge costs
    Keep,
    /// Plain topology; every edge counts as 1
    Ignore,
}

/// Build a GraphView from the store for algorithm execution
pub fn build_view(store: &GraphStore, weights: EdgeWeights) -> GraphView {
    let adjacency = store.adjacency().map(|(source, edges)| {
        (source, edges.iter().map(|(&target, &weight)| (target, weight)))
    });
    let view = GraphView::from_adjacency(adjacency, weights == EdgeWeights::Keep);
    debug!(
        "Built graph view: {} sources, {} nodes, {} edges",
        view.source_count,
        view.node_count,
        view.out_targets.len()
    );
    view
}

/// Weighted shortest path between two senders
pub fn shortest_path(store: &GraphStore, from: NodeId, to: NodeId) -> GraphResult<PathResult> {
    let view = build_view(store, EdgeWeights::Keep);
    dijkstra(&view, from, to).map_err(|failure| match failure {
        PathFailure::NotInGraph(node) => GraphError::NodeNotFound(node),
        PathFailure::Unreachable => GraphError::Unreachable { from, to },
    })
}

/// PageRank over the graph keyset. Weights do not affect rank flow.
pub fn page_rank(store: &GraphStore, config: PageRankConfig) -> PageRankResult {
    let view = build_view(store, EdgeWeights::Ignore);
    let result = page_rank_view(&view, config);
    debug!(
        "PageRank finished after {} iterations (converged: {})",
        result.iterations, result.converged
    );
    result
}

/// Authority and hub scores over an unweighted projection of the store
pub fn hits(store: &GraphStore, config: HitsConfig) -> HitsResult {
    let view = build_view(store, EdgeWeights::Ignore);
    let result = hits_view(&view, config);
    debug!(
        "HITS finished after {} iterations (converged: {})",
        result.iterations, result.converged
    );
    result
}

/// Forward-reachability partition of the graph
pub fn communities(store: &GraphStore) -> CommunityResult {
    let view = build_view(store, EdgeWeights::Ignore);
    reachability_communities(&view)
}

/// The first community that contains `node`
pub fn user_community(store: &GraphStore, node: NodeId) -> GraphResult<Vec<NodeId>> {
    communities(store)
        .community_of(node)
        .map(<[NodeId]>::to_vec)
        .ok_or(GraphError::NodeNotFound(node))
}
