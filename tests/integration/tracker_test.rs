//! End-to-end tests of the snapshot tracker through the public API

use hex_book::amount::{to_human_string, to_smallest_unit};
use hex_book::orderbook::{
    diff_side, render, size, BookTracker, Ingest, Price, PriceLevel, RawLevel, RawSnapshot,
};
use rust_decimal_macros::dec;

fn horizon(bids: &[(i64, i64, &str)], asks: &[(i64, i64, &str)]) -> RawSnapshot {
    let side = |levels: &[(i64, i64, &str)]| {
        levels
            .iter()
            .map(|&(n, d, amount)| RawLevel::rational(n, d, amount))
            .collect::<Vec<_>>()
    };
    RawSnapshot::new(side(bids), side(asks))
}

#[test]
fn test_heartbeat_idempotence() {
    let mut tracker = BookTracker::new(3).unwrap();
    let raw = horizon(&[(1, 2, "10")], &[(3, 2, "7")]);

    tracker.ingest(&raw).unwrap();
    let before = tracker.latest().unwrap().sequence;
    assert_eq!(tracker.ingest(&raw).unwrap(), Ingest::Heartbeat);
    assert_eq!(tracker.latest().unwrap().sequence, before);
}

#[test]
fn test_first_snapshot_updates_latest() {
    let mut tracker = BookTracker::new(1).unwrap();
    assert!(tracker.is_empty());
    tracker.ingest(&horizon(&[], &[])).unwrap();
    assert!(tracker.latest().is_some());
}

#[test]
fn test_depth_bound_after_many_snapshots() {
    for depth in 1..=4 {
        let mut tracker = BookTracker::new(depth).unwrap();
        for i in 0..(depth * 3) {
            let amount = format!("{}", i + 1);
            tracker
                .ingest(&horizon(&[(1, 2, amount.as_str())], &[]))
                .unwrap();
        }

        let mut steps = 0;
        let mut node = tracker.latest().unwrap();
        while let Some(prev) = tracker.previous(node) {
            node = prev;
            steps += 1;
        }
        assert_eq!(steps, depth);
    }
}

#[test]
fn test_diff_correctness_example() {
    let half = Price { n: 1, d: 2 };
    let third = Price { n: 1, d: 3 };
    let previous = vec![PriceLevel::new(half, dec!(10))];
    let current = vec![
        PriceLevel::new(half, dec!(15)),
        PriceLevel::new(third, dec!(5)),
    ];

    let diff = diff_side(Some(&previous), &current);
    assert_eq!(diff.added, vec![PriceLevel::new(third, dec!(5))]);
    assert!(diff.removed.is_empty());
    assert_eq!(diff.updated.len(), 1);
    assert_eq!(diff.updated[0].delta, dec!(5));
}

#[test]
fn test_amount_delta_only_is_material() {
    let mut tracker = BookTracker::new(3).unwrap();
    tracker
        .ingest(&horizon(&[(1, 2, "10")], &[(2, 1, "3")]))
        .unwrap();
    let outcome = tracker
        .ingest(&horizon(&[(1, 2, "10")], &[(2, 1, "3.5")]))
        .unwrap();
    assert!(matches!(outcome, Ingest::Retained { sequence: 1 }));
}

#[test]
fn test_zero_delta_updates_are_heartbeats() {
    let mut tracker = BookTracker::new(3).unwrap();
    tracker
        .ingest(&horizon(&[(1, 2, "10"), (1, 3, "4")], &[(2, 1, "3")]))
        .unwrap();
    let outcome = tracker
        .ingest(&horizon(&[(1, 2, "10.0"), (1, 3, "4.0000000")], &[(2, 1, "3")]))
        .unwrap();
    assert_eq!(outcome, Ingest::Heartbeat);

    let diff = tracker.last_diff().unwrap();
    assert_eq!(diff.bids.updated.len(), 2);
    assert!(diff.bids.updated.iter().all(|u| u.delta.is_zero()));
}

#[test]
fn test_fixed_point_round_trip() {
    for s in ["0", "1.5000000", "123.4560000", "0.0000001"] {
        let human = to_human_string(to_smallest_unit(s).unwrap());
        let canonical = if s.contains('.') {
            s.to_string()
        } else {
            format!("{}.0000000", s)
        };
        assert_eq!(human, canonical);
    }
}

#[test]
fn test_render_format() {
    let mut tracker = BookTracker::new(3).unwrap();
    let raw = RawSnapshot::new(
        vec![RawLevel::decimal("0.9", "9000000")],
        vec![RawLevel::decimal("1.1", "10")],
    );
    tracker.ingest(&raw).unwrap();

    let latest = tracker.latest().unwrap();
    let line = render(latest);
    assert!(!line.contains('\n'));
    assert!(line.contains("10000000@0.9"));
    assert!(line.contains("10@1.1"));
    assert!(line.contains(" : "));
    assert_eq!(size(latest), 2);
}
