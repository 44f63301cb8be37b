pub mod common;
pub mod pagerank;
pub mod hits;
pub mod community;
pub mod pathfinding;

pub use common::{GraphView, NodeId, Weight};
pub use pagerank::{page_rank, PageRankConfig, PageRankResult};
pub use hits::{hits, HitsConfig, HitsEntry, HitsResult, HitsSortKey};
pub use community::{reachability_communities, CommunityResult};
pub use pathfinding::{dijkstra, PathFailure, PathResult};
