//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness measures how often a user lies on shortest paths between
//! other pairs of users. High-betweenness users are brokers: information
//! flowing between otherwise distant parts of the month's network tends to
//! pass through them.
//!
//! # Algorithm
//!
//! Brandes (2001), unweighted and following edge direction. From every
//! source a BFS counts shortest paths to each user; walking that BFS order
//! backwards then hands each user its share of the paths through it. When
//! several shortest `s → t` paths exist, each intermediate user gets the
//! fraction of them it lies on. O(V * E) per month.
//!
//! # Normalization
//!
//! Raw scores are divided by `(n - 1) * (n - 2)`, the number of ordered
//! `(s, t)` pairs excluding the scored node. Graphs with fewer than three
//! nodes score `0.0` everywhere.

use std::collections::{HashMap, VecDeque};

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::{IntoNodeIdentifiers, NodeIndexable},
};
use tracing::instrument;

use crate::graph::SimpleDigraph;

/// Shortest-path structure from one source: visit order, path counts, and
/// each node's predecessors on those paths.
struct PathCounts {
    order: Vec<NodeIndex>,
    sigma: Vec<f64>,
    preds: Vec<Vec<NodeIndex>>,
}

fn count_paths(g: &DiGraph<String, ()>, source: NodeIndex) -> PathCounts {
    let n = g.node_count();
    let mut order = Vec::with_capacity(n);
    let mut sigma = vec![0.0; n];
    let mut preds: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
    let mut dist: Vec<Option<usize>> = vec![None; n];

    sigma[source.index()] = 1.0;
    dist[source.index()] = Some(0);
    let mut queue = VecDeque::from([source]);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let Some(dv) = dist[v.index()] else { continue };

        for w in g.neighbors_directed(v, Direction::Outgoing) {
            let wi = w.index();
            if dist[wi].is_none() {
                dist[wi] = Some(dv + 1);
                queue.push_back(w);
            }
            // A self-loop has dist[w] == dist[v], so it never counts.
            if dist[wi] == Some(dv + 1) {
                sigma[wi] += sigma[v.index()];
                preds[wi].push(v);
            }
        }
    }

    PathCounts {
        order,
        sigma,
        preds,
    }
}

/// Raw (unnormalized) betweenness, indexed by node position.
#[must_use]
pub fn raw_betweenness(sg: &SimpleDigraph) -> Vec<f64> {
    let g = &sg.graph;
    let n = g.node_count();
    let mut total = vec![0.0; n];

    for s in g.node_identifiers() {
        let PathCounts {
            mut order,
            sigma,
            preds,
        } = count_paths(g, s);

        // Farthest first, so a node's dependency is final before it is
        // pushed to its predecessors.
        let mut dependency = vec![0.0; n];
        while let Some(w) = order.pop() {
            let wi = w.index();
            let share = (1.0 + dependency[wi]) / sigma[wi];
            for v in &preds[wi] {
                dependency[v.index()] += sigma[v.index()] * share;
            }
            if w != s {
                total[wi] += dependency[wi];
            }
        }
    }

    total
}

/// Normalized betweenness centrality for every node, in `[0, 1]`.
#[must_use]
#[instrument(skip(sg), fields(nodes = sg.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(sg: &SimpleDigraph) -> HashMap<String, f64> {
    let g = &sg.graph;
    let n = g.node_count();

    if n < 3 {
        return g
            .node_identifiers()
            .map(|idx| (g[idx].clone(), 0.0))
            .collect();
    }

    let scale = ((n - 1) * (n - 2)) as f64;
    let cb = raw_betweenness(sg);

    g.node_identifiers()
        .map(|idx| (g[idx].clone(), cb[g.to_index(idx)] / scale))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
