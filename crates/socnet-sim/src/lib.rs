//! socnet-sim: deterministic synthetic activity for socnet.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

#![forbid(unsafe_code)]

pub mod rng;
pub mod simulator;
pub mod workload;

pub use rng::DeterministicRng;
pub use simulator::{SimulationConfig, Simulator};
pub use workload::Workload;
