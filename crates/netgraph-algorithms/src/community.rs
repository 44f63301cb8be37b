//! Community detection algorithms
//!
//! Forward-reachability partitioning. A community is everything reachable
//! from an unvisited source node by following outgoing edges only, so a
//! node reached from an earlier start is absorbed into that start's
//! community even if a later source also points at it. This is not an
//! undirected connected-component partition.

use super::common::{GraphView, NodeId};
use rustc_hash::FxHashMap;

/// Result of the reachability partition
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommunityResult {
    /// Communities in discovery order; members in depth-first visitation order
    pub communities: Vec<Vec<NodeId>>,
    /// Map of NodeId -> position in `communities`
    pub node_community: FxHashMap<NodeId, usize>,
}

impl CommunityResult {
    /// The community containing `node`, if any traversal reached it
    pub fn community_of(&self, node: NodeId) -> Option<&[NodeId]> {
        self.node_community
            .get(&node)
            .map(|&c| self.communities[c].as_slice())
    }
}

/// Partition the graph by forward depth-first reachability.
///
/// Start nodes are taken from the source prefix in view order. The
/// traversal uses an explicit stack of (node, next-successor) frames and
/// visits nodes in the same preorder as the recursive formulation.
pub fn reachability_communities(view: &GraphView) -> CommunityResult {
    let mut visited = vec![false; view.node_count];
    let mut result = CommunityResult::default();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..view.source_count {
        if visited[start] {
            continue;
        }

        let community_id = result.communities.len();
        let mut members = Vec::new();

        visited[start] = true;
        members.push(view.index_to_node[start]);
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let (node_idx, cursor) = *frame;
            let successors = view.successors(node_idx);
            if cursor == successors.len() {
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let next_idx = successors[cursor];
            if !visited[next_idx] {
                visited[next_idx] = true;
                members.push(view.index_to_node[next_idx]);
                stack.push((next_idx, 0));
            }
        }

        for &node in &members {
            result.node_community.insert(node, community_id);
        }
        result.communities.push(members);
    }

    result
}
