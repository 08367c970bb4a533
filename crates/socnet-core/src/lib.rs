#![forbid(unsafe_code)]
//! socnet-core library.
//!
//! Monthly social-network snapshots: the data model, the `@mention`
//! tokenizer, the per-month interaction graph, and the store that owns one
//! graph per calendar month.
//!
//! # Conventions
//!
//! - **Errors**: [`NetworkError`] for ingestion and month-key failures;
//!   `anyhow::Result` for config loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod mention;
pub mod model;
pub mod network;
pub mod store;

pub use config::{CentralityConfig, NetworkConfig, UsernameConfig, load_config};
pub use error::{ErrorCode, NetworkError};
pub use mention::extract_mentions;
pub use model::{
    ActivityRecord, Connection, Direction, InteractionKind, KindFilter, MonthKey,
    datetime_from_unix_seconds,
};
pub use network::{ConnectionSet, MonthlyNetwork, NetworkStats, UserNode};
pub use store::{IngestSummary, NetworkStore};
