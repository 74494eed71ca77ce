//! Order book snapshot types

use super::render::format_decimal;
use super::TrackerError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Exact rational price `n / d`, as Horizon reports it in `price_r`
///
/// Equality compares numerator and denominator as given; `1/2` and `2/4`
/// are different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    pub n: i64,
    pub d: i64,
}

impl Price {
    /// Create a price, rejecting non-positive parts
    pub fn new(n: i64, d: i64) -> Result<Self, TrackerError> {
        if n <= 0 || d <= 0 {
            return Err(TrackerError::InvalidSnapshot(format!(
                "price {}/{} must have positive numerator and denominator",
                n, d
            )));
        }
        Ok(Self { n, d })
    }

    /// Convert a decimal price into the reduced fraction `mantissa / 10^scale`
    pub fn from_decimal(value: Decimal) -> Result<Self, TrackerError> {
        let mut n = value.mantissa();
        let mut d = 10i128.pow(value.scale());
        let g = gcd(n.abs(), d);
        if g > 1 {
            n /= g;
            d /= g;
        }
        let out_of_range =
            || TrackerError::InvalidSnapshot(format!("price {} out of range", value));
        Self::new(
            i64::try_from(n).map_err(|_| out_of_range())?,
            i64::try_from(d).map_err(|_| out_of_range())?,
        )
    }

    /// Decimal value of the fraction (up to 28 significant digits)
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.n)
            .checked_div(Decimal::from(self.d))
            .unwrap_or_default()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_decimal(self.to_decimal()))
    }
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// A price level in the order book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price at this level
    pub price: Price,
    /// Total amount available
    pub amount: Decimal,
}

impl PriceLevel {
    pub fn new(price: Price, amount: Decimal) -> Self {
        Self { price, amount }
    }
}

/// Price level as received from Horizon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLevel {
    /// Exact rational price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_r: Option<Price>,
    /// Decimal price, used when `price_r` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Decimal amount string
    pub amount: String,
}

impl RawLevel {
    /// Level with an exact rational price
    pub fn rational(n: i64, d: i64, amount: impl Into<String>) -> Self {
        Self {
            price_r: Some(Price { n, d }),
            price: None,
            amount: amount.into(),
        }
    }

    /// Level with a decimal price only
    pub fn decimal(price: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            price_r: None,
            price: Some(price.into()),
            amount: amount.into(),
        }
    }

    fn parse(&self) -> Result<PriceLevel, TrackerError> {
        let price = match (&self.price_r, &self.price) {
            (Some(r), _) => Price::new(r.n, r.d)?,
            (None, Some(p)) => {
                let value = Decimal::from_str(p).map_err(|_| {
                    TrackerError::InvalidSnapshot(format!("non-numeric price {:?}", p))
                })?;
                Price::from_decimal(value)?
            }
            (None, None) => {
                return Err(TrackerError::InvalidSnapshot(
                    "price level without price".to_string(),
                ))
            }
        };

        let amount = Decimal::from_str(&self.amount).map_err(|_| {
            TrackerError::InvalidSnapshot(format!("non-numeric amount {:?}", self.amount))
        })?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(TrackerError::InvalidSnapshot(format!(
                "negative amount {}",
                self.amount
            )));
        }

        Ok(PriceLevel { price, amount })
    }
}

/// Order book message as streamed by Horizon's `/order_book` endpoint
///
/// Extra fields such as `base` and `counter` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub bids: Option<Vec<RawLevel>>,
    #[serde(default)]
    pub asks: Option<Vec<RawLevel>>,
}

impl RawSnapshot {
    pub fn new(bids: Vec<RawLevel>, asks: Vec<RawLevel>) -> Self {
        Self {
            bids: Some(bids),
            asks: Some(asks),
        }
    }
}

/// Validated two-sided book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Bid levels, best first
    pub bids: Vec<PriceLevel>,
    /// Ask levels, best first
    pub asks: Vec<PriceLevel>,
}

impl Book {
    /// Validate a raw snapshot
    pub fn from_raw(raw: &RawSnapshot) -> Result<Self, TrackerError> {
        let bids = raw
            .bids
            .as_deref()
            .ok_or_else(|| TrackerError::InvalidSnapshot("missing bids".to_string()))?;
        let asks = raw
            .asks
            .as_deref()
            .ok_or_else(|| TrackerError::InvalidSnapshot("missing asks".to_string()))?;

        Ok(Self {
            bids: parse_side(bids, "bids")?,
            asks: parse_side(asks, "asks")?,
        })
    }

    /// Total number of levels on both sides
    pub fn size(&self) -> usize {
        self.bids.len() + self.asks.len()
    }
}

fn parse_side(levels: &[RawLevel], side: &str) -> Result<Vec<PriceLevel>, TrackerError> {
    let mut seen = HashSet::with_capacity(levels.len());
    levels
        .iter()
        .map(|raw| {
            let level = raw.parse()?;
            if !seen.insert(level.price) {
                return Err(TrackerError::InvalidSnapshot(format!(
                    "duplicate {} price {}/{}",
                    side, level.price.n, level.price.d
                )));
            }
            Ok(level)
        })
        .collect()
}

/// A retained (non-heartbeat) order book snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Insertion counter within the owning tracker
    pub sequence: u64,
    /// Capture time, non-decreasing across snapshots of one tracker
    pub captured_at: DateTime<Utc>,
    pub book: Book,
}

impl Snapshot {
    pub fn bids(&self) -> &[PriceLevel] {
        &self.book.bids
    }

    pub fn asks(&self) -> &[PriceLevel] {
        &self.book.asks
    }
}
