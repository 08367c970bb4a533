//! Degree centrality.
//!
//! `in_degree` and `out_degree` are raw counts over the [`SimpleDigraph`],
//! and a self-loop adds one to each.
//!
//! The normalized score is `neighbours(v) / (n - 1)`, where `neighbours(v)`
//! is the number of *other* users `v` has an edge to or from. Without
//! reciprocal edges or self-loops this equals `(in + out) / (n - 1)`. A
//! reciprocal pair counts its partner once, so the score never exceeds
//! `1.0`. A self-loop adds nothing, so a user whose only edge is to
//! themselves scores `0.0` like any isolated user. Graphs with a single
//! node score `0.0`.

use std::collections::{HashMap, HashSet};

use petgraph::{Direction, visit::IntoNodeIdentifiers};

use crate::graph::SimpleDigraph;

/// Per-user degree counts and normalized scores.
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeCentrality {
    /// Incoming edges, self-loop included.
    pub in_degree: HashMap<String, usize>,
    /// Outgoing edges, self-loop included.
    pub out_degree: HashMap<String, usize>,
    /// Distinct other users adjacent in either direction.
    pub neighbours: HashMap<String, usize>,
    /// `neighbours / (n - 1)`, in `[0, 1]`.
    pub score: HashMap<String, f64>,
}

/// Compute degree counts and normalized degree centrality for every node.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(sg: &SimpleDigraph) -> DegreeCentrality {
    let g = &sg.graph;
    let n = g.node_count();

    let mut in_degree = HashMap::with_capacity(n);
    let mut out_degree = HashMap::with_capacity(n);
    let mut neighbours = HashMap::with_capacity(n);
    let mut score = HashMap::with_capacity(n);

    for idx in g.node_identifiers() {
        let in_d = g.neighbors_directed(idx, Direction::Incoming).count();
        let out_d = g.neighbors_directed(idx, Direction::Outgoing).count();
        let others = g
            .neighbors_undirected(idx)
            .filter(|&w| w != idx)
            .collect::<HashSet<_>>()
            .len();

        let normalized = if n <= 1 {
            0.0
        } else {
            others as f64 / (n - 1) as f64
        };

        let name = g[idx].clone();
        in_degree.insert(name.clone(), in_d);
        out_degree.insert(name.clone(), out_d);
        neighbours.insert(name.clone(), others);
        score.insert(name, normalized);
    }

    DegreeCentrality {
        in_degree,
        out_degree,
        neighbours,
        score,
    }
}
