//! PageRank algorithm implementation
//!
//! Global influence ranking over the source prefix of a [`GraphView`].
//! Edge weights never influence rank flow: every out-edge carries an equal
//! `1/out_degree` share of its source's rank.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// PageRank configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Summed absolute change across all nodes below which iteration stops
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            max_iterations: 100,
            tolerance: 0.0001,
        }
    }
}

/// Result of a PageRank run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PageRankResult {
    /// Normalized scores; sums to 1.0 for a non-empty source set
    pub scores: HashMap<NodeId, f64>,
    /// Iterations actually performed
    pub iterations: usize,
    /// Whether the tolerance was met before the iteration cap
    pub converged: bool,
}

impl PageRankResult {
    /// Highest-ranked nodes first. Ties are ordered by node id.
    pub fn top_n(&self, n: usize) -> Vec<(NodeId, f64)> {
        let mut ranked: Vec<(NodeId, f64)> = self.scores.iter().map(|(&k, &v)| (k, v)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }
}

/// Calculate PageRank for the graph view
///
/// `N` is the number of source nodes. Destination-only nodes neither hold
/// nor pass on rank, but edges into them still count towards their
/// source's out-degree, so the rank they would absorb leaks out before the
/// final rescale.
pub fn page_rank(view: &GraphView, config: PageRankConfig) -> PageRankResult {
    let n = view.source_count;

    if n == 0 {
        return PageRankResult {
            scores: HashMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    // Initial score is 1/N for all source nodes
    let initial_score = 1.0 / n as f64;
    let mut scores = vec![initial_score; n];
    let mut next_scores = vec![0.0; n];

    let d = config.damping_factor;
    let base_score = (1.0 - d) / n as f64;

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;
        let mut total_diff = 0.0;

        for i in 0..n {
            let mut sum_incoming = 0.0;

            // Predecessors are always sources
            for &source_idx in view.predecessors(i) {
                let out_degree = view.out_degree(source_idx);
                if out_degree > 0 {
                    sum_incoming += scores[source_idx] / out_degree as f64;
                }
            }

            next_scores[i] = base_score + d * sum_incoming;
            total_diff += (next_scores[i] - scores[i]).abs();
        }

        // Swap buffers
        scores.copy_from_slice(&next_scores);

        if total_diff < config.tolerance {
            converged = true;
            break;
        }
    }

    // Rescale by the actual total
    let total: f64 = scores.iter().sum();
    if total > 0.0 {
        for score in scores.iter_mut() {
            *score /= total;
        }
    }

    let mut result = HashMap::with_capacity(n);
    for (idx, score) in scores.into_iter().enumerate() {
        result.insert(view.index_to_node[idx], score);
    }

    PageRankResult {
        scores: result,
        iterations,
        converged,
    }
}
