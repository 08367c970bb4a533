//! Known-topology regression tests for the centrality engine.
//!
//! Each test ingests a hand-crafted month through the store and checks
//! values derived by hand, so any algorithm change that shifts them is
//! caught.

use chrono::{DateTime, TimeZone, Utc};

use socnet_core::{CentralityConfig, MonthKey, NetworkStore};
use socnet_metrics::graph::SimpleDigraph;
use socnet_metrics::metrics::betweenness::betweenness_centrality;
use socnet_metrics::metrics::closeness::closeness_centrality;
use socnet_metrics::metrics::degree::degree_centrality;
use socnet_metrics::metrics::eigenvector::eigenvector_centrality;
use socnet_metrics::{Centrality, CentralityEngine, Score};

const NONE: &[&str] = &[];

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 18, 0, 0).unwrap()
}

fn may() -> MonthKey {
    MonthKey::new(2024, 5).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Store with each `(user, followees)` ingested for May 2024.
fn follow_store(rows: &[(&str, &[&str])]) -> NetworkStore {
    let store = NetworkStore::new();
    for &(user, following) in rows {
        store.add_user(user, at(), following, NONE).unwrap();
    }
    store
}

fn score(store: &NetworkStore, user: &str) -> Centrality {
    CentralityEngine::default().get_centrality(store, user, may())
}

// ---------------------------------------------------------------------------
// Star: hub follows four leaves
// ---------------------------------------------------------------------------

#[test]
fn outward_star() {
    let store = follow_store(&[("hub", &["a", "b", "c", "d"])]);

    let hub = score(&store, "hub");
    assert!(close(hub.degree, 1.0));
    // Reaches all 4 others at distance 1.
    assert!(close(hub.closeness, 1.0));
    assert!(close(hub.betweenness, 0.0));
    // Acyclic month.
    assert_eq!(hub.eigenvector, Score::Undefined);

    let leaf = score(&store, "a");
    assert!(close(leaf.degree, 0.25));
    assert!(close(leaf.closeness, 0.0));
}

// ---------------------------------------------------------------------------
// Bidirectional path: a ⇄ b ⇄ c ⇄ d
// ---------------------------------------------------------------------------

#[test]
fn bidirectional_path() {
    let store = follow_store(&[
        ("a", &["b"]),
        ("b", &["a", "c"]),
        ("c", &["b", "d"]),
        ("d", &["c"]),
    ]);

    let a = score(&store, "a");
    let b = score(&store, "b");

    // degree: a has 1 neighbour of 3, b has 2 of 3.
    assert!(close(a.degree, 1.0 / 3.0));
    assert!(close(b.degree, 2.0 / 3.0));

    // closeness: a reaches 3 at distances 1,2,3 → 3/6; b: 1,1,2 → 3/4.
    assert!(close(a.closeness, 0.5));
    assert!(close(b.closeness, 0.75));

    // betweenness: b serves a↔c, a↔d (4 ordered pairs) of 3*2 = 6.
    assert!(close(b.betweenness, 4.0 / 6.0));
    assert!(close(a.betweenness, 0.0));

    // Undirected path eigenvector: inner nodes score higher.
    let (Score::Value(ea), Score::Value(eb)) = (a.eigenvector, b.eigenvector) else {
        panic!("eigenvector should converge on a strongly connected path");
    };
    assert!(eb > ea);
}

// ---------------------------------------------------------------------------
// Fractional betweenness across parallel routes
// ---------------------------------------------------------------------------

#[test]
fn diamond_splits_betweenness_credit() {
    let store = follow_store(&[("s", &["x", "y"]), ("x", &["t"]), ("y", &["t"])]);

    // Each of x, y lies on 1 of 2 shortest s→t paths: raw 0.5 / (3 * 2).
    assert!(close(score(&store, "x").betweenness, 0.5 / 6.0));
    assert!(close(score(&store, "y").betweenness, 0.5 / 6.0));
    assert!(close(score(&store, "s").betweenness, 0.0));
}

// ---------------------------------------------------------------------------
// Mentions and follows combine into one connectivity edge
// ---------------------------------------------------------------------------

#[test]
fn follow_plus_mention_is_one_hop() {
    let store = NetworkStore::new();
    store
        .add_user("alice", at(), &["bob"], &["hi @bob", "and @carol"])
        .unwrap();

    let alice = score(&store, "alice");
    // 2 distinct neighbours of 2 possible.
    assert!(close(alice.degree, 1.0));
    assert!(close(alice.closeness, 1.0));
}

// ---------------------------------------------------------------------------
// Disconnected months and the Wasserman-Faust correction
// ---------------------------------------------------------------------------

#[test]
fn small_component_does_not_outrank_large_one() {
    let store = follow_store(&[
        ("big", &["b1", "b2"]),
        ("b1", &["b3"]),
        ("b2", &["b4"]),
        ("tiny", &["t1"]),
    ]);

    let big = score(&store, "big");
    let tiny = score(&store, "tiny");
    assert!(big.closeness > tiny.closeness, "{big:?} vs {tiny:?}");
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

#[test]
fn every_measure_within_unit_interval() {
    let store = NetworkStore::new();
    store
        .add_user("a", at(), &["b", "c", "a"], &["@d @e"])
        .unwrap();
    store.add_user("b", at(), &["a", "c"], &["@a"]).unwrap();
    store.add_user("c", at(), &["d"], NONE).unwrap();
    store.add_user("d", at(), &["a", "e"], NONE).unwrap();
    store.add_user("e", at(), NONE, &["@@ @c"]).unwrap();

    let ranked = CentralityEngine::default().rank_month(&store, may());
    assert_eq!(ranked.len(), 6);
    for row in ranked {
        let c = row.centrality;
        for v in [c.degree, c.closeness, c.betweenness] {
            assert!((0.0..=1.0).contains(&v), "{}: {c:?}", row.username);
        }
        if let Score::Value(e) = c.eigenvector {
            assert!((0.0..=1.0).contains(&e), "{}: {c:?}", row.username);
        }
    }
}

// ---------------------------------------------------------------------------
// Free functions agree with the engine
// ---------------------------------------------------------------------------

#[test]
fn engine_matches_free_functions() {
    let store = follow_store(&[("a", &["b"]), ("b", &["c"]), ("c", &["a", "d"])]);
    let net = store.get_graph(may());
    let sg = SimpleDigraph::from_network(&net);

    let dc = degree_centrality(&sg);
    let cc = closeness_centrality(&sg);
    let bc = betweenness_centrality(&sg);
    let ev = eigenvector_centrality(&sg, &CentralityConfig::default());
    assert!(ev.converged);

    for user in net.users() {
        let c = score(&store, &user);
        assert!(close(c.degree, dc.score[&user]));
        assert!(close(c.closeness, cc[&user]));
        assert!(close(c.betweenness, bc[&user]));
        assert_eq!(c.eigenvector, Score::Value(ev.scores[&user]));
    }
}
