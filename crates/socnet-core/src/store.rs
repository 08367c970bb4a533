//! The Monthly Graph Store: month key → [`MonthlyNetwork`].
//!
//! # Locking
//!
//! The month map sits behind one [`RwLock`] that is only write-locked to
//! create a month. Each month then has its own `RwLock`: ingestion
//! write-locks only the month it touches, and readers such as the centrality
//! engine hold that month's read lock for the whole computation, so they
//! never observe edges added mid-computation. Different months proceed
//! independently.
//!
//! Every write leaves a month consistent (validation happens before any
//! mutation, and mutation is append-only), so a poisoned lock is recovered
//! rather than propagated.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::config::{NetworkConfig, UsernameConfig};
use crate::error::{ErrorCode, NetworkError};
use crate::mention::extract_mentions;
use crate::model::{
    ActivityRecord, Connection, InteractionKind, KindFilter, MonthKey, datetime_from_unix_seconds,
};
use crate::network::{ConnectionSet, MonthlyNetwork};

type SharedMonth = Arc<RwLock<MonthlyNetwork>>;

/// Owns one [`MonthlyNetwork`] per month that has seen activity.
#[derive(Debug, Default)]
pub struct NetworkStore {
    months: RwLock<BTreeMap<MonthKey, SharedMonth>>,
    usernames: UsernameConfig,
}

/// What one ingestion call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    /// Month the activity was filed under.
    pub month: MonthKey,
    /// Edges that did not exist before this call.
    pub new_edges: usize,
    /// Edges that were already present and left unchanged.
    pub repeated_edges: usize,
}

impl NetworkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: &NetworkConfig) -> Self {
        Self {
            months: RwLock::default(),
            usernames: config.usernames.clone(),
        }
    }

    /// Record one user's activity for the month containing `observed_at`.
    ///
    /// The user becomes a node of that month even with no followees and no
    /// posts. Each followee adds a `Following` edge, each `@mention` in each
    /// post adds a `Mention` edge. Repeating a call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] if `username` or any followee
    /// is empty. Nothing is recorded in that case.
    #[instrument(skip(self, following, posts), fields(following = following.len(), posts = posts.len()))]
    pub fn add_user<F, P>(
        &self,
        username: &str,
        observed_at: DateTime<Utc>,
        following: &[F],
        posts: &[P],
    ) -> Result<IngestSummary, NetworkError>
    where
        F: AsRef<str>,
        P: AsRef<str>,
    {
        self.ingest(username, observed_at, following, posts)
    }

    /// Like [`Self::add_user`], with the timestamp given as Unix seconds.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidInput`] for an empty username or
    /// followee, or a timestamp that cannot be resolved to a month.
    pub fn add_user_at_unix<F, P>(
        &self,
        username: &str,
        unix_seconds: i64,
        following: &[F],
        posts: &[P],
    ) -> Result<IngestSummary, NetworkError>
    where
        F: AsRef<str>,
        P: AsRef<str>,
    {
        let observed_at = datetime_from_unix_seconds(unix_seconds)?;
        self.ingest(username, observed_at, following, posts)
    }

    /// Ingest a whole [`ActivityRecord`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_user`].
    pub fn add_activity(&self, record: &ActivityRecord) -> Result<IngestSummary, NetworkError> {
        self.add_user(
            &record.username,
            record.observed_at,
            &record.following,
            &record.posts,
        )
    }

    fn ingest<F, P>(
        &self,
        username: &str,
        observed_at: DateTime<Utc>,
        following: &[F],
        posts: &[P],
    ) -> Result<IngestSummary, NetworkError>
    where
        F: AsRef<str>,
        P: AsRef<str>,
    {
        if username.is_empty() {
            return Err(NetworkError::invalid(
                ErrorCode::EmptyUsername,
                "activity record has an empty username",
            ));
        }
        if let Some(pos) = following.iter().position(|f| f.as_ref().is_empty()) {
            return Err(NetworkError::invalid(
                ErrorCode::EmptyTarget,
                format!("{username} follows an empty username at position {pos}"),
            ));
        }

        let source = self.usernames.normalize(username);
        let mut planned: Vec<(String, InteractionKind)> = following
            .iter()
            .map(|f| (self.usernames.normalize(f.as_ref()), InteractionKind::Following))
            .collect();
        for post in posts {
            planned.extend(
                extract_mentions(post.as_ref())
                    .iter()
                    .map(|m| (self.usernames.normalize(m), InteractionKind::Mention)),
            );
        }

        let record = ActivityRecord {
            username: source.clone(),
            observed_at,
            following: following.iter().map(|f| f.as_ref().to_string()).collect(),
            posts: posts.iter().map(|p| p.as_ref().to_string()).collect(),
        };
        let month = record.month();

        let shared = self.month_or_create(month);
        let mut net = write_month(&shared);
        net.record_activity(record);

        let mut summary = IngestSummary {
            month,
            new_edges: 0,
            repeated_edges: 0,
        };
        for (target, kind) in &planned {
            if net.record_edge(&source, target, *kind) {
                summary.new_edges += 1;
            } else {
                summary.repeated_edges += 1;
            }
        }

        debug!(
            %month,
            user = %source,
            new_edges = summary.new_edges,
            repeated_edges = summary.repeated_edges,
            "ingested activity"
        );
        Ok(summary)
    }

    /// An owned snapshot of a month's network. Unseen months yield an empty
    /// network.
    #[must_use]
    pub fn get_graph(&self, month: MonthKey) -> MonthlyNetwork {
        self.with_graph(month, MonthlyNetwork::clone)
    }

    /// Run `f` against a month's network while holding that month's read
    /// lock. Unseen months are presented as an empty network.
    pub fn with_graph<R>(&self, month: MonthKey, f: impl FnOnce(&MonthlyNetwork) -> R) -> R {
        let Some(shared) = self.month(month) else {
            return f(&MonthlyNetwork::empty(month));
        };
        let net = read_month(&shared);
        f(&net)
    }

    /// Neighbours of `username` in `month` over edges of the selected kind.
    #[must_use]
    pub fn get_connections(
        &self,
        username: &str,
        month: MonthKey,
        filter: KindFilter,
    ) -> ConnectionSet {
        let username = self.usernames.normalize(username);
        self.with_graph(month, |net| net.connections(&username, filter))
    }

    /// Every typed connection of `username` in `month`.
    #[must_use]
    pub fn get_all_connections(
        &self,
        username: &str,
        month: MonthKey,
    ) -> BTreeSet<Connection> {
        let username = self.usernames.normalize(username);
        self.with_graph(month, |net| net.all_connections(&username))
    }

    /// The latest activity ingested for `username` in `month`, if they were
    /// active there.
    #[must_use]
    pub fn get_activity(&self, username: &str, month: MonthKey) -> Option<ActivityRecord> {
        let username = self.usernames.normalize(username);
        self.with_graph(month, |net| net.activity(&username).cloned())
    }

    /// Months with recorded activity, oldest first.
    #[must_use]
    pub fn months(&self) -> Vec<MonthKey> {
        read_map(&self.months).keys().copied().collect()
    }

    /// Username matching policy in effect.
    #[must_use]
    pub const fn username_policy(&self) -> &UsernameConfig {
        &self.usernames
    }

    fn month(&self, month: MonthKey) -> Option<SharedMonth> {
        read_map(&self.months).get(&month).cloned()
    }

    fn month_or_create(&self, month: MonthKey) -> SharedMonth {
        if let Some(shared) = self.month(month) {
            return shared;
        }
        let mut map = self.months.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(map.entry(month).or_insert_with(|| {
            debug!(%month, "created monthly network");
            Arc::new(RwLock::new(MonthlyNetwork::empty(month)))
        }))
    }
}

fn read_map(
    lock: &RwLock<BTreeMap<MonthKey, SharedMonth>>,
) -> RwLockReadGuard<'_, BTreeMap<MonthKey, SharedMonth>> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn read_month(shared: &SharedMonth) -> RwLockReadGuard<'_, MonthlyNetwork> {
    shared.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_month(shared: &SharedMonth) -> RwLockWriteGuard<'_, MonthlyNetwork> {
    shared.write().unwrap_or_else(PoisonError::into_inner)
}
