//! NetGraph interaction analytics
//!
//! Builds an in-memory weighted directed graph from `(sender, receiver,
//! count)` interaction records and answers four classes of query:
//!
//! - Weighted shortest path between two actors (Dijkstra)
//! - Global influence ranking (PageRank)
//! - Authority and hub scores (HITS)
//! - Forward-reachability communities
//!
//! # Node universe
//!
//! Only actors that have sent at least one message own an adjacency entry
//! (the graph keyset). PageRank, HITS and path endpoints are restricted to
//! that keyset. [`ingest::raw_actor_count`] counts every actor that appears
//! in the records, senders and receivers alike.
//!
//! ## Example Usage
//!
//! ```rust
//! use netgraph::{algo, GraphStore, InteractionRecord};
//!
//! let mut store = GraphStore::from_records(vec![
//!     InteractionRecord::new(1, 2, 5),
//!     InteractionRecord::new(2, 3, 1),
//!     InteractionRecord::new(3, 1, 2),
//! ]);
//! store.add_edge(1, 3, 10).unwrap();
//!
//! let path = algo::shortest_path(&store, 1, 3).unwrap();
//! assert_eq!(path.cost, 6);
//! assert_eq!(path.path, vec![1, 2, 3]);
//!
//! let ranks = algo::page_rank(&store, algo::PageRankConfig::default());
//! let total: f64 = ranks.scores.values().sum();
//! assert!((total - 1.0).abs() < 1e-9);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod ingest;

// Re-export main types for convenience
pub use graph::{
    GraphError, GraphResult, GraphStatistics, GraphStore, InteractionRecord, LoadReport, NodeId,
    Weight,
};

pub use config::{ConfigError, NetgraphConfig};

pub use ingest::{
    load_records, parse_records, raw_actor_count, IngestError, IngestReport, IngestResult,
    SkippedRow,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.3.0");
    }
}
