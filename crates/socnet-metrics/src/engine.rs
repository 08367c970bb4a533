//! The centrality engine: four measures for one user in one month.
//!
//! # Overview
//!
//! [`CentralityEngine::get_centrality`] looks up a month in a
//! [`NetworkStore`] and scores a user while holding that month's read lock,
//! so concurrent ingestion into the same month waits until scoring is done.
//! [`CentralityEngine::compute`] does the same work on a network the caller
//! already holds.
//!
//! Each call is a pure function of `(network, username)`; nothing is cached
//! between calls.
//!
//! # Degenerate cases
//!
//! - A user who is not in the month's graph gets [`Centrality::absent`]:
//!   every measure `0.0` and `present == false`.
//! - When power iteration has no dominant eigenvector to find (acyclic
//!   graphs) or hits its iteration cap, the eigenvector measure is
//!   [`Score::Undefined`] for every user of that month.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use socnet_core::{CentralityConfig, MonthKey, MonthlyNetwork, NetworkStore};
use tracing::{debug, instrument};

use crate::graph::SimpleDigraph;
use crate::metrics::{
    betweenness::betweenness_centrality,
    closeness::closeness_centrality,
    degree::{DegreeCentrality, degree_centrality},
    eigenvector::{EigenvectorResult, eigenvector_centrality},
};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A measure that may be numerically undefined.
///
/// Serializes as a number, or `null` when undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Value(f64),
    Undefined,
}

impl Score {
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Undefined => None,
        }
    }

    #[must_use]
    pub const fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }
}

/// The four centrality measures of one user in one month.
///
/// `degree`, `closeness`, and `betweenness` are always defined and lie in
/// `[0, 1]`. `eigenvector` lies in `[0, 1]` when defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centrality {
    pub degree: f64,
    pub closeness: f64,
    pub betweenness: f64,
    pub eigenvector: Score,
    /// `false` when the user is not a node of that month's graph.
    pub present: bool,
}

impl Centrality {
    /// Result for a user with no presence in the month.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            degree: 0.0,
            closeness: 0.0,
            betweenness: 0.0,
            eigenvector: Score::Value(0.0),
            present: false,
        }
    }
}

/// One row of a month-wide ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedUser {
    pub username: String,
    pub centrality: Centrality,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Scores users against monthly networks.
#[derive(Debug, Clone, Default)]
pub struct CentralityEngine {
    config: CentralityConfig,
}

impl CentralityEngine {
    #[must_use]
    pub const fn new(config: CentralityConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &CentralityConfig {
        &self.config
    }

    /// Score `username` in `month`, reading the graph under its month lock.
    ///
    /// The username goes through the store's matching policy first.
    #[must_use]
    #[instrument(skip(self, store))]
    pub fn get_centrality(&self, store: &NetworkStore, username: &str, month: MonthKey) -> Centrality {
        let username = store.username_policy().normalize(username);
        store.with_graph(month, |net| self.compute(net, &username))
    }

    /// Score `username` against a network the caller already holds.
    #[must_use]
    pub fn compute(&self, net: &MonthlyNetwork, username: &str) -> Centrality {
        if !net.contains_user(username) {
            debug!(month = %net.month(), user = username, "user absent from month");
            return Centrality::absent();
        }
        MonthScores::compute(net, &self.config).for_user(username)
    }

    /// Score every user of a network, sorted by username.
    #[must_use]
    #[instrument(skip(self, net), fields(month = %net.month(), nodes = net.node_count()))]
    pub fn rank(&self, net: &MonthlyNetwork) -> Vec<RankedUser> {
        let scores = MonthScores::compute(net, &self.config);
        net.users()
            .into_iter()
            .map(|username| {
                let centrality = scores.for_user(&username);
                RankedUser {
                    username,
                    centrality,
                }
            })
            .collect()
    }

    /// [`Self::rank`] for a month of the store, under its month lock.
    #[must_use]
    pub fn rank_month(&self, store: &NetworkStore, month: MonthKey) -> Vec<RankedUser> {
        store.with_graph(month, |net| self.rank(net))
    }
}

/// All four measures for every node of one month.
struct MonthScores {
    degree: DegreeCentrality,
    closeness: HashMap<String, f64>,
    betweenness: HashMap<String, f64>,
    eigenvector: EigenvectorResult,
}

impl MonthScores {
    fn compute(net: &MonthlyNetwork, config: &CentralityConfig) -> Self {
        let sg = SimpleDigraph::from_network(net);
        Self {
            degree: degree_centrality(&sg),
            closeness: closeness_centrality(&sg),
            betweenness: betweenness_centrality(&sg),
            eigenvector: eigenvector_centrality(&sg, config),
        }
    }

    fn for_user(&self, username: &str) -> Centrality {
        let Some(&degree) = self.degree.score.get(username) else {
            return Centrality::absent();
        };

        let eigenvector = if self.eigenvector.converged {
            self.eigenvector
                .scores
                .get(username)
                .map_or(Score::Undefined, |v| Score::Value(*v))
        } else {
            Score::Undefined
        };

        Centrality {
            degree,
            closeness: self.closeness.get(username).copied().unwrap_or_default(),
            betweenness: self.betweenness.get(username).copied().unwrap_or_default(),
            eigenvector,
            present: true,
        }
    }
}
