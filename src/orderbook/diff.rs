//! Content diff between two order book states

use super::{Book, Price, PriceLevel};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Amount change at a price present in both states
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelUpdate {
    pub price: Price,
    /// `current.amount - previous.amount`, zero included
    pub delta: Decimal,
}

/// Difference of one book side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SideDiff {
    /// Levels whose price is new, in current order
    pub added: Vec<PriceLevel>,
    /// Levels whose price disappeared, in previous order
    pub removed: Vec<PriceLevel>,
    /// Amount deltas for prices kept, in previous order
    pub updated: Vec<LevelUpdate>,
}

impl SideDiff {
    /// Any add, remove, or non-zero amount delta
    pub fn is_material(&self) -> bool {
        !self.added.is_empty()
            || !self.removed.is_empty()
            || self.updated.iter().any(|u| !u.delta.is_zero())
    }
}

/// Difference of both book sides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookDiff {
    pub bids: SideDiff,
    pub asks: SideDiff,
}

impl BookDiff {
    pub fn is_material(&self) -> bool {
        self.bids.is_material() || self.asks.is_material()
    }
}

/// Two levels are the same level iff their exact prices match
pub fn same_price(a: &PriceLevel, b: &PriceLevel) -> bool {
    a.price == b.price
}

/// Diff one side against its previous state
///
/// With no previous state every current level counts as added.
pub fn diff_side(previous: Option<&[PriceLevel]>, current: &[PriceLevel]) -> SideDiff {
    let Some(previous) = previous else {
        return SideDiff {
            added: current.to_vec(),
            ..Default::default()
        };
    };

    let current_by_price: HashMap<Price, &PriceLevel> =
        current.iter().map(|l| (l.price, l)).collect();
    let previous_by_price: HashMap<Price, &PriceLevel> =
        previous.iter().map(|l| (l.price, l)).collect();

    let added = current
        .iter()
        .filter(|l| !previous_by_price.contains_key(&l.price))
        .cloned()
        .collect();

    let mut removed = Vec::new();
    let mut updated = Vec::new();
    for old in previous {
        match current_by_price.get(&old.price) {
            Some(new) => updated.push(LevelUpdate {
                price: old.price,
                delta: new.amount - old.amount,
            }),
            None => removed.push(old.clone()),
        }
    }

    SideDiff {
        added,
        removed,
        updated,
    }
}

/// Diff both sides of a book against its previous state
pub fn diff_book(previous: Option<&Book>, current: &Book) -> BookDiff {
    BookDiff {
        bids: diff_side(previous.map(|b| b.bids.as_slice()), &current.bids),
        asks: diff_side(previous.map(|b| b.asks.as_slice()), &current.asks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn level(n: i64, d: i64, amount: Decimal) -> PriceLevel {
        PriceLevel::new(Price { n, d }, amount)
    }

    #[test]
    fn test_same_price_ignores_amount() {
        assert!(same_price(&level(1, 2, dec!(10)), &level(1, 2, dec!(99))));
        assert!(!same_price(&level(1, 2, dec!(10)), &level(1, 3, dec!(10))));
        assert!(!same_price(&level(1, 2, dec!(10)), &level(2, 4, dec!(10))));
    }

    #[test]
    fn test_diff_side_added_and_updated() {
        let previous = vec![level(1, 2, dec!(10))];
        let current = vec![level(1, 2, dec!(15)), level(1, 3, dec!(5))];

        let diff = diff_side(Some(&previous), &current);
        assert_eq!(diff.added, vec![level(1, 3, dec!(5))]);
        assert!(diff.removed.is_empty());
        assert_eq!(
            diff.updated,
            vec![LevelUpdate {
                price: Price { n: 1, d: 2 },
                delta: dec!(5),
            }]
        );
        assert!(diff.is_material());
    }

    #[test]
    fn test_diff_side_removed() {
        let previous = vec![level(1, 2, dec!(10)), level(1, 3, dec!(4))];
        let current = vec![level(1, 2, dec!(10))];

        let diff = diff_side(Some(&previous), &current);
        assert!(diff.added.is_empty());
        assert_eq!(diff.removed, vec![level(1, 3, dec!(4))]);
        assert_eq!(diff.updated.len(), 1);
        assert!(diff.updated[0].delta.is_zero());
        assert!(diff.is_material());
    }

    #[test]
    fn test_diff_side_no_previous() {
        let current = vec![level(1, 2, dec!(10)), level(1, 3, dec!(5))];
        let diff = diff_side(None, &current);
        assert_eq!(diff.added, current);
        assert!(diff.removed.is_empty());
        assert!(diff.updated.is_empty());
    }

    #[test]
    fn test_diff_side_zero_delta_not_material() {
        let previous = vec![level(1, 2, dec!(10))];
        let current = vec![level(1, 2, dec!(10.0000000))];
        let diff = diff_side(Some(&previous), &current);
        assert_eq!(diff.updated.len(), 1);
        assert!(!diff.is_material());
    }

    #[test]
    fn test_diff_side_negative_delta() {
        let previous = vec![level(3, 1, dec!(7.5))];
        let current = vec![level(3, 1, dec!(2.5))];
        let diff = diff_side(Some(&previous), &current);
        assert_eq!(diff.updated[0].delta, dec!(-5));
    }

    #[test]
    fn test_diff_book_both_sides() {
        let previous = Book {
            bids: vec![level(1, 2, dec!(10))],
            asks: vec![level(2, 1, dec!(3))],
        };
        let current = Book {
            bids: vec![level(1, 2, dec!(10))],
            asks: vec![],
        };
        let diff = diff_book(Some(&previous), &current);
        assert!(!diff.bids.is_material());
        assert_eq!(diff.asks.removed.len(), 1);
        assert!(diff.is_material());

        let same = diff_book(Some(&current), &current);
        assert!(!same.is_material());
    }
}
