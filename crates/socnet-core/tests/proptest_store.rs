use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use socnet_core::{MonthKey, NetworkStore, extract_mentions};

fn arb_username() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_]{1,8}"
}

fn arb_post() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            arb_username(),
            arb_username().prop_map(|u| format!("@{u}")),
        ],
        0..8,
    )
    .prop_map(|words| words.join(" "))
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn ingestion_is_idempotent(
        user in arb_username(),
        following in prop::collection::vec(arb_username(), 0..6),
        posts in prop::collection::vec(arb_post(), 0..4),
        day in 1u32..=28,
    ) {
        let at = Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0).unwrap();
        let month = MonthKey::from_datetime(&at);

        let once = NetworkStore::new();
        once.add_user(&user, at, &following, &posts).unwrap();

        let twice = NetworkStore::new();
        twice.add_user(&user, at, &following, &posts).unwrap();
        let second = twice.add_user(&user, at, &following, &posts).unwrap();

        prop_assert_eq!(second.new_edges, 0);
        prop_assert_eq!(once.get_graph(month).edges(), twice.get_graph(month).edges());
        prop_assert_eq!(once.get_graph(month).users(), twice.get_graph(month).users());
    }

    #[test]
    fn every_node_is_subject_or_edge_endpoint(
        user in arb_username(),
        following in prop::collection::vec(arb_username(), 0..6),
        posts in prop::collection::vec(arb_post(), 0..4),
    ) {
        let at = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let store = NetworkStore::new();
        store.add_user(&user, at, &following, &posts).unwrap();

        let net = store.get_graph(MonthKey::from_datetime(&at));
        let edges = net.edges();
        for node in net.users() {
            let touches = edges.iter().any(|(s, t, _)| *s == node || *t == node);
            prop_assert!(node == user || touches, "{} dangling", node);
        }
    }

    #[test]
    fn other_months_stay_empty(
        user in arb_username(),
        following in prop::collection::vec(arb_username(), 0..6),
        month in 1u32..=12,
    ) {
        let at = Utc.with_ymd_and_hms(2024, month, 15, 0, 0, 0).unwrap();
        let store = NetworkStore::new();
        store.add_user(&user, at, &following, &[] as &[&str]).unwrap();

        let key = MonthKey::from_datetime(&at);
        prop_assert_eq!(store.get_graph(key.next().unwrap()).node_count(), 0);
        prop_assert_eq!(store.get_graph(key.prev().unwrap()).node_count(), 0);
    }

    #[test]
    fn mention_tokens_never_contain_whitespace(text in ".{0,64}") {
        for m in extract_mentions(&text) {
            prop_assert!(!m.is_empty());
            prop_assert!(!m.chars().any(char::is_whitespace));
        }
    }
}
