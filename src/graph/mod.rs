//! Core interaction graph
//!
//! This module implements the weighted directed interaction model:
//! - Actors identified by integer ids, with no stored attributes
//! - At most one edge per ordered (sender, receiver) pair; last write wins
//! - Self-loops rejected on every entry point
//! - In-memory, insertion-ordered adjacency owned by a single `GraphStore`

pub mod store;
pub mod types;

// Re-export main types
pub use store::{GraphError, GraphResult, GraphStatistics, GraphStore, LoadReport};
pub use types::{InteractionRecord, NodeId, Weight};
