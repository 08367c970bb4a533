//! Eigenvector centrality via bounded power iteration.
//!
//! # Overview
//!
//! A user scores highly when high-scoring users point at them. The score
//! vector is the principal eigenvector of the **directed** adjacency
//! matrix, accumulated over in-edges: `x(v) ∝ Σ_{u → v} x(u)`. Follows and
//! mentions both count as "pointing at", once per ordered pair.
//!
//! # Algorithm
//!
//! 1. If the graph has no cycle (self-loops count as cycles), the adjacency
//!    matrix is nilpotent and has no dominant eigenvector: stop and report
//!    non-convergence.
//! 2. Initialize scores uniformly.
//! 3. Iterate `x ← (A + I)ᵀ x`, normalized to unit L2 norm. The identity
//!    shift keeps the same eigenvectors but breaks the oscillation that
//!    plain iteration shows on periodic graphs.
//! 4. Stop when the L2 norm of the change drops below `tolerance`, or give
//!    up after `max_iter` iterations.
//!
//! # Output
//!
//! An [`EigenvectorResult`] with per-user scores (non-negative, L2 norm 1)
//! and whether they converged. Unconverged scores are meaningless; callers
//! must check [`EigenvectorResult::converged`].

use std::collections::HashMap;

use petgraph::{
    Direction,
    algo::toposort,
    graph::NodeIndex,
    visit::{IntoNodeIdentifiers, NodeIndexable},
};
use socnet_core::CentralityConfig;
use tracing::{instrument, warn};

use crate::graph::SimpleDigraph;

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Username → score. Empty when not converged.
    pub scores: HashMap<String, f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the iteration converged within `max_iter`.
    pub converged: bool,
}

impl EigenvectorResult {
    fn failed(iterations: usize) -> Self {
        Self {
            scores: HashMap::new(),
            iterations,
            converged: false,
        }
    }
}

/// Compute eigenvector centrality for every user.
///
/// Never fails: graphs without a dominant eigenvector come back with
/// `converged == false`.
#[must_use]
#[instrument(skip(sg, config), fields(nodes = sg.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_centrality(sg: &SimpleDigraph, config: &CentralityConfig) -> EigenvectorResult {
    let g = &sg.graph;
    let n = g.node_count();

    if n == 0 {
        return EigenvectorResult {
            scores: HashMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    if toposort(g, None).is_ok() {
        warn!(nodes = n, "graph is acyclic; eigenvector centrality undefined");
        return EigenvectorResult::failed(0);
    }

    let predecessors: Vec<Vec<NodeIndex>> = g
        .node_identifiers()
        .map(|v| g.neighbors_directed(v, Direction::Incoming).collect())
        .collect();

    let init_val = 1.0 / (n as f64).sqrt();
    let mut scores: Vec<f64> = vec![init_val; n];

    let mut iterations = 0;
    let mut converged = false;

    for iter in 0..config.max_iter {
        iterations = iter + 1;

        // (A + I)ᵀ x
        let mut new_scores = scores.clone();
        for v in g.node_identifiers() {
            let vi = g.to_index(v);
            for &u in &predecessors[vi] {
                new_scores[vi] += scores[g.to_index(u)];
            }
        }

        let norm: f64 = new_scores.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm <= 0.0 || !norm.is_finite() {
            break;
        }
        for x in &mut new_scores {
            *x /= norm;
        }

        let diff: f64 = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt();

        scores = new_scores;

        if diff < config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            nodes = n,
            iterations,
            max_iter = config.max_iter,
            "eigenvector iteration did not converge"
        );
        return EigenvectorResult::failed(iterations);
    }

    let scores = g
        .node_identifiers()
        .map(|idx| (g[idx].clone(), scores[g.to_index(idx)]))
        .collect();

    EigenvectorResult {
        scores,
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
