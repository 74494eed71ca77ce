//! One-line order book rendering

use super::{Book, PriceLevel, Snapshot};
use crate::amount;
use rust_decimal::Decimal;

/// Render a snapshot as `" <bid>@<price> ... : <ask>@<price> ... "`
pub fn render(snapshot: &Snapshot) -> String {
    render_book(&snapshot.book)
}

/// Render a book on one line.
///
/// Bids run right to left so the best bid sits next to the `" : "` divider,
/// asks run left to right. Bid amounts are quoted in the counter asset and
/// are shown in base units as `amount / price`.
pub fn render_book(book: &Book) -> String {
    let mut line = String::new();
    for level in &book.bids {
        let token = format!(" {}@{}", format_decimal(base_amount(level)), level.price);
        line.insert_str(0, &token);
    }
    line.push_str(" : ");
    for level in &book.asks {
        line.push_str(&format!("{}@{} ", format_decimal(level.amount), level.price));
    }
    line
}

/// Number of levels on both sides
pub fn size(snapshot: &Snapshot) -> usize {
    snapshot.book.size()
}

/// `amount * d / n`, exact up to `Decimal` precision
fn base_amount(level: &PriceLevel) -> Decimal {
    level
        .amount
        .checked_mul(Decimal::from(level.price.d))
        .and_then(|v| v.checked_div(Decimal::from(level.price.n)))
        .unwrap_or(level.amount)
}

/// Round half-up to 7 digits and drop trailing zeros
pub(crate) fn format_decimal(value: Decimal) -> String {
    match amount::round_to_unit(value) {
        Ok(units) => Decimal::new(units, amount::DECIMALS).normalize().to_string(),
        Err(_) => value.normalize().to_string(),
    }
}
