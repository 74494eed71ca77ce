//! Fixed-point HEXA amounts
//!
//! Amounts travel as human strings with up to 7 fractional digits
//! ("12.3400000") and are computed on as exact integer counts of the
//! smallest unit, where 1 unit = 0.0000001 HEXA.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of fractional digits in a human amount
pub const DECIMALS: u32 = 7;

/// Smallest units per whole HEXA: 10^7
pub const SCALE: i64 = 10_000_000;

/// Fee attached to every HEX make/take, in human form
pub const HEX_FEE: &str = "0.0000100";

/// Errors from amount conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,

    #[error("invalid amount {0:?}: expected digits with an optional '.'")]
    InvalidFormat(String),

    #[error("amount {0:?} overflows the smallest-unit range")]
    Overflow(String),
}

/// Convert a human amount string into smallest units.
///
/// The fractional part is zero-padded to 7 digits; digits beyond the
/// seventh are truncated.
pub fn to_smallest_unit(s: &str) -> Result<i64, AmountError> {
    if s.is_empty() {
        return Err(AmountError::Empty);
    }

    let (left, right) = match s.split_once('.') {
        Some((left, right)) => (left, right),
        None => (s, ""),
    };

    if left.is_empty() && right.is_empty() {
        return Err(AmountError::InvalidFormat(s.to_string()));
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(left) || !all_digits(right) {
        return Err(AmountError::InvalidFormat(s.to_string()));
    }

    let whole: i64 = if left.is_empty() {
        0
    } else {
        left.parse()
            .map_err(|_| AmountError::Overflow(s.to_string()))?
    };

    let mut fraction: String = right.chars().take(DECIMALS as usize).collect();
    while fraction.len() < DECIMALS as usize {
        fraction.push('0');
    }
    // seven ASCII digits always fit
    let fraction: i64 = fraction
        .parse()
        .map_err(|_| AmountError::InvalidFormat(s.to_string()))?;

    whole
        .checked_mul(SCALE)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(|| AmountError::Overflow(s.to_string()))
}

/// Convert smallest units back into the canonical 7-digit human string
pub fn to_human_string(units: i64) -> String {
    let sign = if units < 0 { "-" } else { "" };
    let abs = units.unsigned_abs();
    let scale = SCALE as u64;
    format!(
        "{}{}.{:0width$}",
        sign,
        abs / scale,
        abs % scale,
        width = DECIMALS as usize
    )
}

/// Round a decimal to the nearest smallest unit, ties away from zero
pub fn round_to_unit(value: Decimal) -> Result<i64, AmountError> {
    let rounded = value.round_dp_with_strategy(DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    rounded
        .checked_mul(Decimal::from(SCALE))
        .and_then(|units| units.to_i64())
        .ok_or_else(|| AmountError::Overflow(value.to_string()))
}

/// Round a decimal to 7 digits and format it as a human amount
pub fn decimal_value(value: Decimal) -> Result<String, AmountError> {
    round_to_unit(value).map(to_human_string)
}

/// Add the HEX fee to a human amount
pub fn amount_with_fee(amount: &str) -> Result<String, AmountError> {
    let units = to_smallest_unit(amount)?;
    let fee = to_smallest_unit(HEX_FEE)?;
    units
        .checked_add(fee)
        .map(to_human_string)
        .ok_or_else(|| AmountError::Overflow(amount.to_string()))
}

/// Extract the HEXA amount mentioned in a free-text description.
///
/// Returns the word following the first `"HEXA "`, minus one trailing
/// `.` or `,`.
pub fn parse_hexa(description: &str) -> Option<&str> {
    let index = description.find("HEXA ")?;
    let word = description[index..].split(' ').nth(1)?;
    let word = word
        .strip_suffix('.')
        .or_else(|| word.strip_suffix(','))
        .unwrap_or(word);
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}
