use netgraph::algo::{self, HitsConfig, HitsSortKey, PageRankConfig};
use netgraph::{GraphError, GraphStore, InteractionRecord, NodeId};
use std::collections::HashSet;

fn build(edges: &[(NodeId, NodeId, i64)]) -> GraphStore {
    GraphStore::from_records(edges.iter().copied().map(InteractionRecord::from))
}

#[test]
fn test_shortest_path_takes_cheaper_two_hop_route() {
    // 1 -> 2 (5), 2 -> 3 (1), 1 -> 3 (10); 3 also sends so it is in the keyset
    let store = build(&[(1, 2, 5), (2, 3, 1), (1, 3, 10), (3, 4, 1)]);

    let result = algo::shortest_path(&store, 1, 3).unwrap();
    assert_eq!(result.cost, 6);
    assert_eq!(result.path, vec![1, 2, 3]);

    // Every hop of the path is an edge of the graph
    let cost: i64 = result
        .path
        .windows(2)
        .map(|hop| store.weight(hop[0], hop[1]).unwrap())
        .sum();
    assert_eq!(cost, result.cost);
}

#[test]
fn test_shortest_path_to_receive_only_node_is_not_found() {
    // 3 never sends, so it is outside the graph keyset
    let store = build(&[(1, 2, 5), (2, 3, 1), (1, 3, 10)]);

    assert_eq!(
        algo::shortest_path(&store, 1, 3),
        Err(GraphError::NodeNotFound(3))
    );
}

#[test]
fn test_shortest_path_to_self() {
    let store = build(&[(1, 2, 5)]);

    let result = algo::shortest_path(&store, 1, 1).unwrap();
    assert_eq!(result.cost, 0);
    assert_eq!(result.path, vec![1]);
}

#[test]
fn test_shortest_path_unreachable_is_distinct_from_not_found() {
    let store = build(&[(1, 2, 1), (2, 1, 1), (3, 4, 1)]);

    let err = algo::shortest_path(&store, 1, 3).unwrap_err();
    assert_eq!(err, GraphError::Unreachable { from: 1, to: 3 });
    assert_eq!(err.to_string(), "No path from user 1 to user 3");
}

#[test]
fn test_shortest_path_sees_incremental_inserts() {
    let mut store = build(&[(1, 2, 5), (2, 3, 5), (3, 1, 1)]);
    assert_eq!(algo::shortest_path(&store, 1, 3).unwrap().cost, 10);

    store.add_edge(1, 3, 2).unwrap();
    let result = algo::shortest_path(&store, 1, 3).unwrap();
    assert_eq!(result.cost, 2);
    assert_eq!(result.path, vec![1, 3]);
}

#[test]
fn test_pagerank_three_cycle() {
    let store = build(&[(1, 2, 1), (2, 3, 1), (3, 1, 1)]);
    let result = algo::page_rank(&store, PageRankConfig::default());

    assert_eq!(result.scores.len(), 3);
    for id in 1..=3 {
        assert!((result.scores[&id] - 0.333).abs() < 1e-3);
    }
}

#[test]
fn test_pagerank_ignores_weights() {
    let light = build(&[(1, 2, 1), (2, 3, 1), (3, 1, 1), (1, 3, 1), (4, 1, 1)]);
    let heavy = build(&[(1, 2, 90), (2, 3, 7), (3, 1, 12), (1, 3, 3), (4, 1, 50)]);

    let a = algo::page_rank(&light, PageRankConfig::default());
    let b = algo::page_rank(&heavy, PageRankConfig::default());

    for id in 1..=4 {
        assert_eq!(a.scores[&id], b.scores[&id]);
    }
}

#[test]
fn test_pagerank_excludes_receive_only_nodes() {
    let store = build(&[(1, 2, 1), (2, 1, 1), (2, 9, 1)]);
    let result = algo::page_rank(&store, PageRankConfig::default());

    assert!(!result.scores.contains_key(&9));
    let total: f64 = result.scores.values().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn test_hits_hub_and_authority() {
    // 1 fans out to everyone; 3 is pointed at by everyone
    let store = build(&[(1, 2, 4), (1, 3, 1), (1, 4, 2), (2, 3, 8), (4, 3, 1), (3, 2, 1)]);
    let result = algo::hits(&store, HitsConfig::default());

    assert_eq!(result.ranked(HitsSortKey::Authority)[0].node, 3);
    assert_eq!(result.ranked(HitsSortKey::Hub)[0].node, 1);

    let authority_norm: f64 = result.authority.values().map(|a| a * a).sum::<f64>().sqrt();
    let hub_norm: f64 = result.hub.values().map(|h| h * h).sum::<f64>().sqrt();
    assert!((authority_norm - 1.0).abs() < 1e-9);
    assert!((hub_norm - 1.0).abs() < 1e-9);
}

#[test]
fn test_communities_two_disjoint_groups() {
    let store = build(&[(1, 2, 3), (3, 4, 7)]);
    let result = algo::communities(&store);

    let sets: Vec<HashSet<NodeId>> = result
        .communities
        .iter()
        .map(|c| c.iter().copied().collect())
        .collect();
    assert_eq!(sets.len(), 2);
    assert!(sets.contains(&HashSet::from([1, 2])));
    assert!(sets.contains(&HashSet::from([3, 4])));
}

#[test]
fn test_communities_are_forward_only() {
    // 1 -> 2 <- 3: not an undirected component
    let store = build(&[(1, 2, 1), (3, 2, 1)]);
    let result = algo::communities(&store);

    assert_eq!(result.communities, vec![vec![1, 2], vec![3]]);
    assert_eq!(algo::user_community(&store, 2), Ok(vec![1, 2]));
    assert_eq!(algo::user_community(&store, 3), Ok(vec![3]));
}

#[test]
fn test_user_community_not_found() {
    let store = build(&[(1, 2, 1)]);
    assert_eq!(
        algo::user_community(&store, 42),
        Err(GraphError::NodeNotFound(42))
    );
}

#[test]
fn test_empty_graph() {
    let store = GraphStore::new();

    assert!(algo::page_rank(&store, PageRankConfig::default()).scores.is_empty());
    assert!(algo::hits(&store, HitsConfig::default()).authority.is_empty());
    assert!(algo::communities(&store).communities.is_empty());
    assert_eq!(
        algo::shortest_path(&store, 1, 2),
        Err(GraphError::NodeNotFound(1))
    );
}
