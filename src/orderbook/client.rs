//! Horizon order book streaming client
//!
//! Subscribes to the `/order_book` endpoint of a Stellar Horizon server,
//! which streams the full book of a trading pair as Server-Sent Events.

use super::{BookFeed, RawSnapshot};
use crate::stream::{SseClient, StreamConfig, StreamMessage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

/// Public Horizon testnet
pub const HORIZON_TESTNET_URL: &str = "https://horizon-testnet.stellar.org";

/// A Stellar asset: native lumens, or a code issued by an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub code: String,
    #[serde(default)]
    pub issuer: Option<String>,
}

impl Asset {
    /// Native XLM
    pub fn native() -> Self {
        Self {
            code: "XLM".to_string(),
            issuer: None,
        }
    }

    /// Issued asset
    pub fn issued(code: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            issuer: Some(issuer.into()),
        }
    }

    pub fn is_native(&self) -> bool {
        self.issuer.is_none() && self.code == "XLM"
    }

    /// Horizon `asset_type` for this asset
    pub fn asset_type(&self) -> &'static str {
        if self.is_native() {
            "native"
        } else if self.code.len() <= 4 {
            "credit_alphanum4"
        } else {
            "credit_alphanum12"
        }
    }

    /// Check code and issuer shape
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.is_native() {
            return Ok(());
        }
        if self.code.is_empty()
            || self.code.len() > 12
            || !self.code.chars().all(|c| c.is_ascii_alphanumeric())
        {
            anyhow::bail!("invalid asset code {:?}", self.code);
        }
        match &self.issuer {
            Some(issuer) if !issuer.is_empty() => Ok(()),
            _ => anyhow::bail!("asset {} needs an issuer", self.code),
        }
    }

    fn query(&self, prefix: &str) -> String {
        let mut query = format!("{}_asset_type={}", prefix, self.asset_type());
        if !self.is_native() {
            query.push_str(&format!("&{}_asset_code={}", prefix, self.code));
            if let Some(issuer) = &self.issuer {
                query.push_str(&format!("&{}_asset_issuer={}", prefix, issuer));
            }
        }
        query
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.issuer {
            Some(issuer) => write!(f, "{}:{}", self.code, issuer),
            None => f.write_str(&self.code),
        }
    }
}

/// Configuration for the Horizon client
#[derive(Debug, Clone)]
pub struct HorizonConfig {
    /// Horizon base URL
    pub horizon_url: String,
    /// Asset offered by the book's asks
    pub selling: Asset,
    /// Asset the book is priced in
    pub buying: Asset,
    /// Maximum reconnection attempts (0 = infinite)
    pub max_reconnects: u32,
    /// Initial reconnection delay
    pub initial_delay: Duration,
    /// Maximum reconnection delay
    pub max_delay: Duration,
    /// Reconnect when the stream is silent this long
    pub idle_timeout: Duration,
    /// Channel buffer size for snapshots
    pub buffer_size: usize,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            horizon_url: HORIZON_TESTNET_URL.to_string(),
            selling: Asset::native(),
            buying: Asset::native(),
            max_reconnects: 0, // Infinite retries
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(60),
            buffer_size: 256,
        }
    }
}

impl HorizonConfig {
    /// Streaming URL for the configured pair, starting from now
    pub fn order_book_url(&self) -> String {
        format!(
            "{}/order_book?{}&{}&cursor=now",
            self.horizon_url.trim_end_matches('/'),
            self.selling.query("selling"),
            self.buying.query("buying"),
        )
    }

    /// Event stream settings for the pair's order book
    pub fn stream_config(&self) -> StreamConfig {
        StreamConfig::new(self.order_book_url())
            .max_reconnects(self.max_reconnects)
            .initial_delay(self.initial_delay)
            .max_delay(self.max_delay)
            .idle_timeout(self.idle_timeout)
            .buffer_size(self.buffer_size)
    }
}

/// Horizon order book client
pub struct HorizonClient {
    config: HorizonConfig,
}

impl HorizonClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: HorizonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HorizonConfig {
        &self.config
    }
}

#[async_trait]
impl BookFeed for HorizonClient {
    /// Subscribe to the pair's order book
    ///
    /// The client handles reconnection automatically; snapshots arrive in
    /// stream order.
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<RawSnapshot>> {
        self.config.selling.validate()?;
        self.config.buying.validate()?;
        if self.config.selling == self.config.buying {
            anyhow::bail!("selling and buying asset are both {}", self.config.selling);
        }

        let (tx, rx) = mpsc::channel(self.config.buffer_size);
        let config = self.config.clone();

        tokio::spawn(async move {
            if let Err(e) = run_subscription_loop(config, tx).await {
                tracing::error!(error = %e, "Horizon subscription loop failed");
            }
        });

        tracing::info!(
            selling = %self.config.selling,
            buying = %self.config.buying,
            "Started Horizon order book subscription"
        );

        Ok(rx)
    }
}

/// Forward order book events until the stream or the receiver goes away
async fn run_subscription_loop(
    config: HorizonConfig,
    tx: mpsc::Sender<RawSnapshot>,
) -> anyhow::Result<()> {
    let client = SseClient::new(config.stream_config());
    let mut events = client.connect();

    loop {
        tokio::select! {
            msg = events.recv() => {
                match msg {
                    Some(StreamMessage::Connected) => {
                        tracing::info!("Horizon order book stream connected");
                    }
                    Some(StreamMessage::Event(event)) => {
                        tracing::trace!(
                            id = ?event.id,
                            msg_len = event.data.len(),
                            "Received Horizon event"
                        );

                        match parse_order_book_event(&event.data) {
                            Ok(Some(snapshot)) => {
                                if tx.send(snapshot).await.is_err() {
                                    tracing::debug!("Snapshot receiver dropped");
                                    break;
                                }
                            }
                            Ok(None) => {
                                // Handshake or unrelated event
                            }
                            Err(e) => {
                                tracing::warn!(
                                    error = %e,
                                    msg_preview = %event.data.chars().take(100).collect::<String>(),
                                    "Failed to parse order book event"
                                );
                            }
                        }
                    }
                    Some(StreamMessage::Reconnecting { attempt }) => {
                        tracing::info!(attempt, "Horizon stream reconnecting");
                    }
                    Some(StreamMessage::Disconnected) => {
                        tracing::info!("Horizon stream disconnected");
                        break;
                    }
                    None => {
                        tracing::info!("Horizon stream channel closed");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received shutdown signal");
                break;
            }
        }
    }

    Ok(())
}

/// Parse the data of one Horizon event.
///
/// Returns `Ok(None)` for events that are not order books, such as the
/// `"hello"` sent when the stream opens.
pub fn parse_order_book_event(data: &str) -> anyhow::Result<Option<RawSnapshot>> {
    let value: serde_json::Value = match serde_json::from_str(data) {
        Ok(value) => value,
        Err(_) => return Ok(None),
    };

    let is_book = value
        .as_object()
        .map(|o| o.contains_key("bids") || o.contains_key("asks"))
        .unwrap_or(false);
    if !is_book {
        return Ok(None);
    }

    let snapshot: RawSnapshot = serde_json::from_value(value)?;
    Ok(Some(snapshot))
}
