//! HITS (Hyperlink-Induced Topic Search)
//!
//! Mutual-reinforcement ranking producing an authority and a hub score per
//! source node. Expects an unweighted view; weights are never read.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// HITS configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitsConfig {
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Largest per-node change, in both vectors, below which iteration stops
    pub tolerance: f64,
}

impl Default for HitsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

/// Score used to order a HITS ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HitsSortKey {
    Authority,
    Hub,
}

/// One row of a HITS ranking
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HitsEntry {
    pub node: NodeId,
    pub authority: f64,
    pub hub: f64,
}

/// Result of a HITS run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HitsResult {
    /// Authority scores, unit Euclidean norm
    pub authority: HashMap<NodeId, f64>,
    /// Hub scores, unit Euclidean norm
    pub hub: HashMap<NodeId, f64>,
    /// Iterations actually performed
    pub iterations: usize,
    /// Whether both vectors settled before the iteration cap
    pub converged: bool,
}

impl HitsResult {
    /// All nodes sorted descending by the chosen score, ties by node id
    pub fn ranked(&self, key: HitsSortKey) -> Vec<HitsEntry> {
        let mut entries: Vec<HitsEntry> = self
            .authority
            .iter()
            .map(|(&node, &authority)| HitsEntry {
                node,
                authority,
                hub: self.hub.get(&node).copied().unwrap_or(0.0),
            })
            .collect();

        entries.sort_by(|a, b| {
            let (x, y) = match key {
                HitsSortKey::Authority => (a.authority, b.authority),
                HitsSortKey::Hub => (a.hub, b.hub),
            };
            y.total_cmp(&x).then(a.node.cmp(&b.node))
        });
        entries
    }
}

/// Scale to unit Euclidean norm; a zero vector is divided by 1
fn normalize(scores: &mut [f64]) {
    let norm = scores.iter().map(|s| s * s).sum::<f64>().sqrt();
    let divisor = if norm == 0.0 { 1.0 } else { norm };
    for score in scores.iter_mut() {
        *score /= divisor;
    }
}

fn max_delta(old: &[f64], new: &[f64]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}

/// Calculate authority and hub scores
///
/// Both vectors cover the source prefix only. Hub scores are computed from
/// the previous iteration's authorities; a destination-only target adds
/// nothing to its source's hub score.
pub fn hits(view: &GraphView, config: HitsConfig) -> HitsResult {
    let n = view.source_count;

    let mut authority = vec![1.0; n];
    let mut hub = vec![1.0; n];
    let mut next_authority = vec![0.0; n];
    let mut next_hub = vec![0.0; n];

    let mut iterations = 0;
    let mut converged = false;

    while n > 0 && iterations < config.max_iterations {
        iterations += 1;

        for i in 0..n {
            next_authority[i] = view.predecessors(i).iter().map(|&p| hub[p]).sum();
        }

        for i in 0..n {
            next_hub[i] = view
                .successors(i)
                .iter()
                .filter(|&&s| view.is_source(s))
                .map(|&s| authority[s])
                .sum();
        }

        normalize(&mut next_authority);
        normalize(&mut next_hub);

        let settled = max_delta(&authority, &next_authority) < config.tolerance
            && max_delta(&hub, &next_hub) < config.tolerance;

        authority.copy_from_slice(&next_authority);
        hub.copy_from_slice(&next_hub);

        if settled {
            converged = true;
            break;
        }
    }

    let mut authority_map = HashMap::with_capacity(n);
    let mut hub_map = HashMap::with_capacity(n);
    for idx in 0..n {
        let node = view.index_to_node[idx];
        authority_map.insert(node, authority[idx]);
        hub_map.insert(node, hub[idx]);
    }

    HitsResult {
        authority: authority_map,
        hub: hub_map,
        iterations,
        converged,
    }
}
