//! Order book module
//!
//! Snapshot tracking for one HEX trading pair streamed from Horizon:
//! heartbeat suppression by content diff and a bounded history of
//! retained snapshots.

mod book;
mod client;
mod diff;
mod error;
mod render;
mod tracker;

pub use book::{Book, Price, PriceLevel, RawLevel, RawSnapshot, Snapshot};
pub use client::{
    parse_order_book_event, Asset, HorizonClient, HorizonConfig, HORIZON_TESTNET_URL,
};
pub use diff::{diff_book, diff_side, same_price, BookDiff, LevelUpdate, SideDiff};
pub use error::TrackerError;
pub use render::{render, render_book, size};
pub use tracker::{BookTracker, Ingest, DEFAULT_DEPTH};

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Source of raw order book snapshots
#[async_trait]
pub trait BookFeed: Send + Sync {
    /// Subscribe to snapshots, delivered in arrival order
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<RawSnapshot>>;
}
