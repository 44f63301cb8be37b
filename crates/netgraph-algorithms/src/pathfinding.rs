//! Pathfinding algorithms
//!
//! Weighted single-pair shortest path (Dijkstra) over the source prefix.

use super::common::{GraphView, NodeId, Weight};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: Weight,
}

/// Why a path search produced no path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFailure {
    /// The node has no outgoing edges in the view
    NotInGraph(NodeId),
    /// Both endpoints exist but no route connects them
    Unreachable,
}

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq, Eq)]
struct State {
    cost: Weight,
    /// Push order; earlier entries win ties
    seq: u64,
    node_idx: usize,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare costs reversed for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's Algorithm (Weighted Shortest Path)
///
/// Uses edge weights from GraphView if available, otherwise assumes 1.
/// Both endpoints must own outgoing edges. Settled nodes are never
/// relaxed again, which keeps predecessor chains acyclic even when a
/// bulk load admitted non-positive weights.
pub fn dijkstra(
    view: &GraphView,
    source: NodeId,
    target: NodeId,
) -> Result<PathResult, PathFailure> {
    let source_idx = view
        .source_index(source)
        .ok_or(PathFailure::NotInGraph(source))?;
    let target_idx = view
        .source_index(target)
        .ok_or(PathFailure::NotInGraph(target))?;

    let mut dist = vec![Weight::MAX; view.node_count];
    let mut parent: Vec<Option<usize>> = vec![None; view.node_count];
    let mut settled = vec![false; view.node_count];
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    dist[source_idx] = 0;
    heap.push(State { cost: 0, seq, node_idx: source_idx });

    while let Some(State { cost, node_idx, .. }) = heap.pop() {
        if settled[node_idx] {
            continue;
        }
        settled[node_idx] = true;

        if node_idx == target_idx {
            break;
        }

        let weights = view.weights(node_idx);

        for (i, &next_idx) in view.successors(node_idx).iter().enumerate() {
            if settled[next_idx] {
                continue;
            }
            let weight = weights.map_or(1, |w| w[i]);
            let next_cost = cost.saturating_add(weight);

            if next_cost < dist[next_idx] {
                dist[next_idx] = next_cost;
                parent[next_idx] = Some(node_idx);
                seq += 1;
                heap.push(State { cost: next_cost, seq, node_idx: next_idx });
            }
        }
    }

    if dist[target_idx] == Weight::MAX {
        return Err(PathFailure::Unreachable);
    }

    // Reconstruct path
    let mut path = Vec::new();
    let mut curr = Some(target_idx);
    while let Some(idx) = curr {
        path.push(view.index_to_node[idx]);
        curr = parent[idx];
    }
    path.reverse();

    Ok(PathResult {
        source,
        target,
        path,
        cost: dist[target_idx],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dijkstra() {
        // 1->2 (10), 2->3 (5), 1->3 (50), 3->1 (1)
        let view = GraphView::from_adjacency(
            vec![(1, vec![(2, 10), (3, 50)]), (2, vec![(3, 5)]), (3, vec![(1, 1)])],
            true,
        );

        let result = dijkstra(&view, 1, 3).unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.cost, 15);
    }

    #[test]
    fn test_same_source_and_target() {
        let view = GraphView::from_adjacency(vec![(1, vec![(2, 3)])], true);
        let result = dijkstra(&view, 1, 1).unwrap();
        assert_eq!(result.path, vec![1]);
        assert_eq!(result.cost, 0);
    }

    #[test]
    fn test_destination_only_endpoint_is_not_in_graph() {
        let view = GraphView::from_adjacency(vec![(1, vec![(2, 3)])], true);
        assert_eq!(dijkstra(&view, 1, 2), Err(PathFailure::NotInGraph(2)));
        assert_eq!(dijkstra(&view, 7, 1), Err(PathFailure::NotInGraph(7)));
    }

    #[test]
    fn test_unreachable() {
        let view = GraphView::from_adjacency(vec![(1, vec![(2, 3)]), (3, vec![(4, 1)])], true);
        assert_eq!(dijkstra(&view, 1, 3), Err(PathFailure::Unreachable));
    }

    #[test]
    fn test_ties_prefer_first_discovered() {
        // 1->2->4 and 1->3->4 both cost 2; 2 is discovered first
        let view = GraphView::from_adjacency(
            vec![
                (1, vec![(2, 1), (3, 1)]),
                (2, vec![(4, 1)]),
                (3, vec![(4, 1)]),
                (4, vec![(1, 1)]),
            ],
            true,
        );
        let result = dijkstra(&view, 1, 4).unwrap();
        assert_eq!(result.path, vec![1, 2, 4]);
        assert_eq!(result.cost, 2);
    }

    #[test]
    fn test_unweighted_view_counts_hops() {
        let view = GraphView::from_adjacency(
            vec![(1, vec![(2, 100)]), (2, vec![(3, 100)]), (3, vec![(1, 1)])],
            false,
        );
        let result = dijkstra(&view, 1, 3).unwrap();
        assert_eq!(result.cost, 2);
    }

    fn assert_connected(view: &GraphView, path: &[NodeId]) {
        for pair in path.windows(2) {
            let from = view.node_to_index[&pair[0]];
            let to = view.node_to_index[&pair[1]];
            assert!(view.successors(from).contains(&to), "{} -> {} is not an edge", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_zero_weight_edges_are_free() {
        // 1->2->3 costs 0, direct 1->3 costs 1
        let view = GraphView::from_adjacency(
            vec![(1, vec![(2, 0), (3, 1)]), (2, vec![(3, 0)]), (3, vec![(1, 1)])],
            true,
        );
        let result = dijkstra(&view, 1, 3).unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.cost, 0);
        assert_connected(&view, &result.path);
    }

    #[test]
    fn test_negative_edge_into_settled_node_is_ignored() {
        // 2 settles at 1 before 3->2 (-5) is seen, so 1->3->2->4 (cost 9)
        // is never found and 1->2->4 (cost 11) stands
        let view = GraphView::from_adjacency(
            vec![
                (1, vec![(2, 1), (3, 4)]),
                (2, vec![(4, 10)]),
                (3, vec![(2, -5)]),
                (4, vec![(1, 1)]),
            ],
            true,
        );
        let result = dijkstra(&view, 1, 4).unwrap();
        assert_eq!(result.path, vec![1, 2, 4]);
        assert_eq!(result.cost, 11);
        assert_connected(&view, &result.path);
    }

    #[test]
    fn test_negative_cycle_terminates() {
        let view = GraphView::from_adjacency(
            vec![
                (1, vec![(2, 1)]),
                (2, vec![(3, -5)]),
                (3, vec![(2, -5)]),
                (4, vec![(1, 1)]),
            ],
            true,
        );
        assert_eq!(dijkstra(&view, 1, 4), Err(PathFailure::Unreachable));

        let result = dijkstra(&view, 1, 3).unwrap();
        assert_eq!(result.path, vec![1, 2, 3]);
        assert_eq!(result.cost, -4);
        assert_connected(&view, &result.path);
    }
}
