#![forbid(unsafe_code)]
//! socnet-metrics library.
//!
//! The centrality engine: given one month's network and a user, score the
//! user's structural position by degree, closeness, betweenness, and
//! eigenvector centrality.
//!
//! # Conventions
//!
//! - **Errors**: none surface. Absent users and numerically undefined
//!   measures are values ([`Centrality::absent`], [`Score::Undefined`]).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod engine;
pub mod graph;
pub mod metrics;

pub use engine::{Centrality, CentralityEngine, RankedUser, Score};
pub use graph::SimpleDigraph;
