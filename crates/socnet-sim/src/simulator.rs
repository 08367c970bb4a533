//! Drives a [`Workload`] into a [`NetworkStore`], one month per step.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use socnet_core::{MonthKey, NetworkStore};
use tracing::{debug, info, instrument};

use crate::workload::Workload;

/// Parameters of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// RNG seed.
    pub seed: u64,
    /// Number of calendar months to simulate, counting back from `start`.
    pub months: u32,
    /// Active users generated per step.
    pub users_per_month: usize,
    /// Percent chance (0-100) that a followee or mention targets an
    /// already generated name instead of a fresh one.
    pub reuse_percent: u8,
    /// Timestamp of the first (latest) step.
    pub start: DateTime<Utc>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            months: 3,
            users_per_month: 20,
            reuse_percent: 0,
            start: Utc::now(),
        }
    }
}

impl SimulationConfig {
    /// Timestamp of step `step`: `start` itself for step 0, otherwise
    /// midnight on the first day of the month `step` months earlier.
    /// `None` once that month falls before the representable calendar.
    #[must_use]
    pub fn step_time(&self, step: u32) -> Option<DateTime<Utc>> {
        if step == 0 {
            return Some(self.start);
        }
        let mut month = self.latest_month();
        for _ in 0..step {
            month = month.prev()?;
        }
        month.first_instant()
    }

    /// Month of the first step, the latest month the run touches.
    #[must_use]
    pub fn latest_month(&self) -> MonthKey {
        MonthKey::from_datetime(&self.start)
    }
}

/// Generates users with follows and posts and ingests them.
#[derive(Debug)]
pub struct Simulator {
    config: SimulationConfig,
    workload: Workload,
}

impl Simulator {
    #[must_use]
    pub const fn new(config: SimulationConfig) -> Self {
        let workload = Workload::new(config.seed, config.reuse_percent);
        Self { config, workload }
    }

    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Ingest every step into `store` and return the active usernames in
    /// generation order. The first belongs to the latest month.
    ///
    /// # Errors
    ///
    /// Fails if the store rejects a generated record.
    #[instrument(skip(self, store), fields(seed = self.config.seed))]
    pub fn run(&mut self, store: &NetworkStore) -> Result<Vec<String>> {
        let mut usernames = Vec::new();

        for step in 0..self.config.months {
            let at = self
                .config
                .step_time(step)
                .with_context(|| format!("Month {step} steps before start is out of range"))?;
            let mut new_edges = 0;

            for _ in 0..self.config.users_per_month {
                let username = self.workload.username();
                let following = self.workload.followees();
                let posts = self.workload.posts();

                let summary = store
                    .add_user(&username, at, &following, &posts)
                    .with_context(|| format!("Failed to ingest simulated user {username}"))?;
                debug!(user = %username, new_edges = summary.new_edges, "ingested");
                new_edges += summary.new_edges;
                usernames.push(username);
            }

            info!(
                month = %MonthKey::from_datetime(&at),
                users = self.config.users_per_month,
                new_edges,
                "simulated month"
            );
        }

        Ok(usernames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            seed,
            months: 3,
            users_per_month: 20,
            reuse_percent: 0,
            start: Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn steps_go_back_one_calendar_month() {
        let cfg = config(0);
        assert_eq!(cfg.step_time(0), Some(cfg.start));
        assert_eq!(
            cfg.step_time(2),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(cfg.latest_month(), MonthKey::new(2024, 3).unwrap());
    }

    #[test]
    fn month_end_start_never_repeats_a_month() {
        // 30-day steps from the 31st would land in March twice.
        let store = NetworkStore::new();
        let cfg = SimulationConfig {
            start: Utc.with_ymd_and_hms(2024, 3, 31, 23, 0, 0).unwrap(),
            ..config(4)
        };
        let users = Simulator::new(cfg).run(&store).unwrap();
        assert_eq!(
            store.months(),
            vec![
                MonthKey::new(2024, 1).unwrap(),
                MonthKey::new(2024, 2).unwrap(),
                MonthKey::new(2024, 3).unwrap(),
            ]
        );
        let march = store.get_graph(MonthKey::new(2024, 3).unwrap());
        let active = users.iter().filter(|u| march.contains_user(u)).count();
        assert_eq!(active, 20);
    }

    #[test]
    fn run_populates_each_month() {
        let store = NetworkStore::new();
        let users = Simulator::new(config(1)).run(&store).unwrap();
        assert_eq!(users.len(), 60);

        let months = store.months();
        assert_eq!(
            months,
            vec![
                MonthKey::new(2024, 1).unwrap(),
                MonthKey::new(2024, 2).unwrap(),
                MonthKey::new(2024, 3).unwrap(),
            ]
        );

        let latest = store.get_graph(MonthKey::new(2024, 3).unwrap());
        for user in &users[..20] {
            assert!(latest.contains_user(user));
            assert!(!latest.is_referenced_only(user));
        }
        assert!(latest.edge_count() >= 20);
    }

    #[test]
    fn same_seed_same_store() {
        let a = NetworkStore::new();
        let b = NetworkStore::new();
        let ua = Simulator::new(config(42)).run(&a).unwrap();
        let ub = Simulator::new(config(42)).run(&b).unwrap();
        assert_eq!(ua, ub);
        for month in a.months() {
            assert_eq!(a.get_graph(month).edges(), b.get_graph(month).edges());
        }
    }

    #[test]
    fn zero_months_is_a_noop() {
        let store = NetworkStore::new();
        let cfg = SimulationConfig {
            months: 0,
            ..config(0)
        };
        assert!(Simulator::new(cfg).run(&store).unwrap().is_empty());
        assert!(store.months().is_empty());
    }
}
