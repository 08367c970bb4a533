//! Kind-collapsed view of a monthly network.
//!
//! # Overview
//!
//! Centrality works on connectivity, not on interaction kinds. A
//! [`SimpleDigraph`] keeps one edge per ordered user pair no matter how many
//! kinds connect it (a user who both follows and mentions another
//! contributes a single `A → B` edge). Self-loops are kept.
//!
//! Nodes are inserted in sorted username order so node indices, and
//! therefore every iterative computation, are deterministic.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use socnet_core::MonthlyNetwork;
use tracing::instrument;

/// Directed graph with at most one edge per ordered pair.
#[derive(Debug, Clone, Default)]
pub struct SimpleDigraph {
    /// Nodes = usernames, edges = "some interaction from source to target".
    pub graph: DiGraph<String, ()>,
    /// Mapping from username to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
}

impl SimpleDigraph {
    /// Collapse a [`MonthlyNetwork`] into a simple digraph.
    #[must_use]
    #[instrument(skip(net), fields(month = %net.month()))]
    pub fn from_network(net: &MonthlyNetwork) -> Self {
        let users = net.users();
        let mut out = Self::with_nodes(users.iter().map(String::as_str));

        let g = net.graph();
        for edge in g.edge_references() {
            let source = &g[edge.source()].username;
            let target = &g[edge.target()].username;
            out.connect(source, target);
        }
        out
    }

    /// Build from an explicit node list plus edges. Edge endpoints missing
    /// from `nodes` are added.
    #[must_use]
    pub fn from_edges(nodes: &[&str], edges: &[(&str, &str)]) -> Self {
        let mut all: Vec<&str> = nodes.to_vec();
        all.extend(edges.iter().flat_map(|(a, b)| [*a, *b]));
        all.sort_unstable();
        all.dedup();

        let mut out = Self::with_nodes(all.into_iter());
        for (a, b) in edges {
            out.connect(a, b);
        }
        out
    }

    fn with_nodes<'a>(names: impl Iterator<Item = &'a str>) -> Self {
        let mut graph = DiGraph::<String, ()>::new();
        let mut node_map = HashMap::new();
        for name in names {
            let idx = graph.add_node(name.to_string());
            node_map.insert(name.to_string(), idx);
        }
        Self { graph, node_map }
    }

    fn connect(&mut self, source: &str, target: &str) {
        let (Some(&s), Some(&t)) = (self.node_map.get(source), self.node_map.get(target)) else {
            return;
        };
        if !self.graph.contains_edge(s, t) {
            self.graph.add_edge(s, t, ());
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn node_index(&self, username: &str) -> Option<NodeIndex> {
        self.node_map.get(username).copied()
    }

    #[must_use]
    pub fn username(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }
}
