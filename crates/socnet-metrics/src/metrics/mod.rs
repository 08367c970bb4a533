//! Centrality metrics over a month's kind-collapsed graph.
//!
//! # Overview
//!
//! Each metric answers a different question about a user's position:
//!
//! - **Degree** (`degree`): how many users does this user touch directly?
//! - **Closeness** (`closeness`): how quickly can this user reach the rest
//!   of the network by following edges outward?
//! - **Betweenness** (`betweenness`): how often does this user broker the
//!   shortest routes between others?
//! - **Eigenvector** (`eigenvector`): is this user pointed at by users who
//!   are themselves pointed at?
//!
//! # Usage
//!
//! All metrics take a [`SimpleDigraph`](crate::graph::SimpleDigraph) and
//! return scores keyed by username.
//!
//! ```rust,ignore
//! use socnet_metrics::graph::SimpleDigraph;
//! use socnet_metrics::metrics::{betweenness, closeness, degree, eigenvector};
//!
//! let sg = SimpleDigraph::from_network(&net);
//! let dc = degree::degree_centrality(&sg);
//! let cc = closeness::closeness_centrality(&sg);
//! let bc = betweenness::betweenness_centrality(&sg);
//! let ev = eigenvector::eigenvector_centrality(&sg, &config);
//! ```

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;
