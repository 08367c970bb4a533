//! Closeness centrality with the Wasserman-Faust correction.
//!
//! # Definition
//!
//! Distances follow edge direction, outward from the scored node. With `r`
//! the number of other nodes reachable from `v` and `Σd` the sum of their
//! BFS distances:
//!
//! ```text
//! C(v) = (r / Σd) * (r / (n - 1))
//! ```
//!
//! The first factor is classic closeness restricted to the reachable set;
//! the second scales it by the fraction of the graph that set covers, so a
//! node one hop from a single neighbour does not outrank a node that
//! reaches everyone in two hops. A node reaching nothing scores `0.0`.

use std::collections::{HashMap, VecDeque};

use petgraph::{
    Direction,
    graph::NodeIndex,
    visit::{IntoNodeIdentifiers, NodeIndexable},
};
use tracing::instrument;

use crate::graph::SimpleDigraph;

/// BFS hop counts from `source` along outgoing edges. `None` = unreachable.
#[must_use]
pub fn bfs_distances(sg: &SimpleDigraph, source: NodeIndex) -> Vec<Option<usize>> {
    let g = &sg.graph;
    let mut dist = vec![None; g.node_count()];
    dist[g.to_index(source)] = Some(0);

    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        let dv = dist[g.to_index(v)].unwrap_or_default();
        for w in g.neighbors_directed(v, Direction::Outgoing) {
            let wi = g.to_index(w);
            if dist[wi].is_none() {
                dist[wi] = Some(dv + 1);
                queue.push_back(w);
            }
        }
    }
    dist
}

/// Closeness of a single node.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_of(sg: &SimpleDigraph, v: NodeIndex) -> f64 {
    let n = sg.node_count();
    if n < 2 {
        return 0.0;
    }

    let vi = sg.graph.to_index(v);
    let (reachable, total) = bfs_distances(sg, v)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| *i != vi)
        .filter_map(|(_, d)| d)
        .fold((0usize, 0usize), |(r, s), d| (r + 1, s + d));

    if reachable == 0 || total == 0 {
        return 0.0;
    }

    let r = reachable as f64;
    (r / total as f64) * (r / (n - 1) as f64)
}

/// Closeness centrality for every node.
#[must_use]
#[instrument(skip(sg), fields(nodes = sg.node_count()))]
pub fn closeness_centrality(sg: &SimpleDigraph) -> HashMap<String, f64> {
    sg.graph
        .node_identifiers()
        .map(|idx| (sg.graph[idx].clone(), closeness_of(sg, idx)))
        .collect()
}
