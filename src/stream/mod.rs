//! Server-Sent Events client library
//!
//! Provides a reusable `text/event-stream` client with automatic
//! reconnection, idle detection, and configurable backoff.

mod client;
mod parser;
mod types;

pub use client::SseClient;
pub use parser::SseParser;
pub use types::{SseEvent, StreamConfig, StreamError, StreamMessage};
