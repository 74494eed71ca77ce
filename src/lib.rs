//! hex-book: order book tracking for the HEX token exchange on Stellar
//!
//! This library provides the core components for:
//! - Fixed-point HEXA amount conversion
//! - Description chunking into ledger data entries
//! - Order book snapshot tracking with heartbeat suppression
//! - Horizon order book streaming over Server-Sent Events
//! - Structured logging and Prometheus metrics

pub mod amount;
pub mod cli;
pub mod config;
pub mod description;
pub mod orderbook;
pub mod session;
pub mod stream;
pub mod telemetry;
