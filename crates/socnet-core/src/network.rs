//! One month's directed, typed interaction graph.
//!
//! # Overview
//!
//! A [`MonthlyNetwork`] wraps a [`petgraph`] directed graph whose nodes are
//! users and whose edges are [`InteractionKind`]s. An edge `A → B` of kind
//! `Following` means "A follows B"; of kind `Mention` it means "A mentioned
//! B in a post". Both kinds may connect the same ordered pair, but each
//! `(source, target, kind)` triple is stored at most once.
//!
//! Self-loops are stored like any other edge.
//!
//! ## Node set
//!
//! A user becomes a node when they are the subject of an ingestion call
//! (active), or when another user's activity names them (referenced-only).
//! Active nodes keep the latest [`ActivityRecord`] ingested for them this
//! month. Nodes and edges are never removed.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::{
    Direction::{Incoming, Outgoing},
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use serde::{Deserialize, Serialize};

use crate::model::{ActivityRecord, Connection, Direction, InteractionKind, KindFilter, MonthKey};

// ---------------------------------------------------------------------------
// UserNode
// ---------------------------------------------------------------------------

/// Node weight: a username plus that user's own activity this month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNode {
    pub username: String,
    /// Latest record (by `observed_at`) with this user as the subject.
    /// `None` for referenced-only users.
    pub activity: Option<ActivityRecord>,
}

impl UserNode {
    /// `true` once the user was the subject of an ingestion call this month.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.activity.is_some()
    }
}

// ---------------------------------------------------------------------------
// ConnectionSet
// ---------------------------------------------------------------------------

/// Neighbours of one user, split by edge direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSet {
    /// Users this user points at.
    pub outbound: BTreeSet<String>,
    /// Users pointing at this user.
    pub inbound: BTreeSet<String>,
}

impl ConnectionSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty() && self.inbound.is_empty()
    }

    /// Flatten into `(direction, user)` pairs.
    #[must_use]
    pub fn pairs(&self) -> BTreeSet<(Direction, String)> {
        self.outbound
            .iter()
            .map(|u| (Direction::Outbound, u.clone()))
            .chain(self.inbound.iter().map(|u| (Direction::Inbound, u.clone())))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// MonthlyNetwork
// ---------------------------------------------------------------------------

/// The interaction graph for a single month.
#[derive(Debug, Clone)]
pub struct MonthlyNetwork {
    month: MonthKey,
    graph: DiGraph<UserNode, InteractionKind>,
    node_map: HashMap<String, NodeIndex>,
    edge_set: HashSet<(NodeIndex, NodeIndex, InteractionKind)>,
}

impl MonthlyNetwork {
    /// An empty network for `month`.
    #[must_use]
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            edge_set: HashSet::new(),
        }
    }

    #[must_use]
    pub const fn month(&self) -> MonthKey {
        self.month
    }

    /// The underlying petgraph graph.
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<UserNode, InteractionKind> {
        &self.graph
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
    pub fn edge_count_of(&self, kind: InteractionKind) -> usize {
        self.graph
            .raw_edges()
            .iter()
            .filter(|e| e.weight == kind)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up the `NodeIndex` for a username.
    #[must_use]
    pub fn node_index(&self, username: &str) -> Option<NodeIndex> {
        self.node_map.get(username).copied()
    }

    #[must_use]
    pub fn contains_user(&self, username: &str) -> bool {
        self.node_map.contains_key(username)
    }

    /// `true` when the user is a node only because someone else named them.
    /// `false` for active users and for users not in the graph.
    #[must_use]
    pub fn is_referenced_only(&self, username: &str) -> bool {
        self.node_index(username)
            .and_then(|idx| self.graph.node_weight(idx))
            .is_some_and(|node| !node.is_active())
    }

    /// The latest activity ingested for `username` this month.
    #[must_use]
    pub fn activity(&self, username: &str) -> Option<&ActivityRecord> {
        self.node_index(username)
            .and_then(|idx| self.graph.node_weight(idx))
            .and_then(|node| node.activity.as_ref())
    }

    /// All usernames in the graph, sorted.
    #[must_use]
    pub fn users(&self) -> Vec<String> {
        let mut users: Vec<String> = self.node_map.keys().cloned().collect();
        users.sort_unstable();
        users
    }

    /// All edges as sorted `(source, target, kind)` triples.
    #[must_use]
    pub fn edges(&self) -> Vec<(String, String, InteractionKind)> {
        let mut edges: Vec<_> = self
            .graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].username.clone(),
                    self.graph[e.target()].username.clone(),
                    *e.weight(),
                )
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Edges of one kind as sorted `(source, target)` pairs.
    #[must_use]
    pub fn edges_of(&self, kind: InteractionKind) -> Vec<(String, String)> {
        self.edges()
            .into_iter()
            .filter(|(_, _, k)| *k == kind)
            .map(|(s, t, _)| (s, t))
            .collect()
    }

    /// Outbound and inbound neighbours of `username` over edges accepted by
    /// `filter`. Empty when the user is not in the graph.
    #[must_use]
    pub fn connections(&self, username: &str, filter: KindFilter) -> ConnectionSet {
        let Some(idx) = self.node_index(username) else {
            return ConnectionSet::default();
        };

        let mut set = ConnectionSet::default();
        for edge in self.graph.edges_directed(idx, Outgoing) {
            if filter.matches(*edge.weight()) {
                set.outbound
                    .insert(self.graph[edge.target()].username.clone());
            }
        }
        for edge in self.graph.edges_directed(idx, Incoming) {
            if filter.matches(*edge.weight()) {
                set.inbound.insert(self.graph[edge.source()].username.clone());
            }
        }
        set
    }

    /// Every typed connection touching `username`, both directions and kinds.
    #[must_use]
    pub fn all_connections(&self, username: &str) -> BTreeSet<Connection> {
        let mut all = BTreeSet::new();
        for kind in InteractionKind::ALL {
            let set = self.connections(username, KindFilter::Only(kind));
            for (direction, user) in set.pairs() {
                all.insert(Connection {
                    direction,
                    kind,
                    user,
                });
            }
        }
        all
    }

    /// Summary statistics for this month.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> NetworkStats {
        let node_count = self.node_count();
        let active_users = self
            .graph
            .raw_nodes()
            .iter()
            .filter(|n| n.weight.is_active())
            .count();

        let mut self_loops = 0;
        let mut pairs = HashSet::new();
        for edge in self.graph.edge_references() {
            if edge.source() == edge.target() {
                self_loops += 1;
            } else {
                pairs.insert((edge.source(), edge.target()));
            }
        }

        let density = if node_count < 2 {
            0.0
        } else {
            pairs.len() as f64 / (node_count * (node_count - 1)) as f64
        };

        NetworkStats {
            month: self.month,
            node_count,
            edge_count: self.edge_count(),
            following_edges: self.edge_count_of(InteractionKind::Following),
            mention_edges: self.edge_count_of(InteractionKind::Mention),
            active_users,
            referenced_only_users: node_count - active_users,
            self_loops,
            density,
        }
    }

    // -----------------------------------------------------------------------
    // Mutation (store only)
    // -----------------------------------------------------------------------

    /// Ensure the record's subject is a node and attach the record, unless
    /// the node already holds a strictly later one.
    pub(crate) fn record_activity(&mut self, record: ActivityRecord) -> NodeIndex {
        let idx = self.ensure_node(&record.username);
        let node = &mut self.graph[idx];
        if node
            .activity
            .as_ref()
            .is_none_or(|held| held.observed_at <= record.observed_at)
        {
            node.activity = Some(record);
        }
        idx
    }

    fn ensure_node(&mut self, username: &str) -> NodeIndex {
        if let Some(idx) = self.node_map.get(username) {
            return *idx;
        }
        let idx = self.graph.add_node(UserNode {
            username: username.to_string(),
            activity: None,
        });
        self.node_map.insert(username.to_string(), idx);
        idx
    }

    /// Record `source → target` of `kind`. Returns `false` if that exact
    /// triple was already present.
    pub(crate) fn record_edge(&mut self, source: &str, target: &str, kind: InteractionKind) -> bool {
        let s = self.ensure_node(source);
        let t = self.ensure_node(target);
        if !self.edge_set.insert((s, t, kind)) {
            return false;
        }
        self.graph.add_edge(s, t, kind);
        true
    }
}

// ---------------------------------------------------------------------------
// NetworkStats
// ---------------------------------------------------------------------------

/// Counts describing one month's network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub month: MonthKey,
    pub node_count: usize,
    pub edge_count: usize,
    pub following_edges: usize,
    pub mention_edges: usize,
    /// Users who were ingestion subjects this month.
    pub active_users: usize,
    pub referenced_only_users: usize,
    pub self_loops: usize,
    /// Distinct ordered pairs of different users with at least one edge,
    /// divided by `n * (n - 1)`. Zero for graphs with fewer than two nodes.
    pub density: f64,
}
