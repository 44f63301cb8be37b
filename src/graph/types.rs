//! Core type definitions for the interaction graph

use serde::{Deserialize, Serialize};
use std::fmt;

pub use netgraph_algorithms::{NodeId, Weight};

/// One `sender -> receiver` interaction tally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub source: NodeId,
    pub destination: NodeId,
    pub weight: Weight,
}

impl InteractionRecord {
    pub fn new(source: NodeId, destination: NodeId, weight: Weight) -> Self {
        InteractionRecord {
            source,
            destination,
            weight,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }
}

impl fmt::Display for InteractionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.source, self.destination, self.weight)
    }
}

impl From<(NodeId, NodeId, Weight)> for InteractionRecord {
    fn from((source, destination, weight): (NodeId, NodeId, Weight)) -> Self {
        InteractionRecord::new(source, destination, weight)
    }
}
