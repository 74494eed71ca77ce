//! Configuration types for hex-book

use crate::orderbook::{Asset, HorizonConfig, DEFAULT_DEPTH, HORIZON_TESTNET_URL};
use crate::telemetry::LogFormat;
use anyhow::Context;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub horizon: HorizonSection,
    pub market: MarketConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub stream: StreamSettings,
    pub telemetry: TelemetryConfig,
}

/// Horizon server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HorizonSection {
    #[serde(default = "default_horizon_url")]
    pub url: String,
}

fn default_horizon_url() -> String {
    HORIZON_TESTNET_URL.to_string()
}

impl Default for HorizonSection {
    fn default() -> Self {
        Self {
            url: default_horizon_url(),
        }
    }
}

/// Trading pair whose order book is tracked
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    pub selling: Asset,
    pub buying: Asset,
}

/// Snapshot tracker configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Predecessors kept behind the latest snapshot
    #[serde(default = "default_depth")]
    pub depth: usize,
}

fn default_depth() -> usize {
    DEFAULT_DEPTH
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

/// Streaming connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StreamSettings {
    /// Maximum reconnection attempts (0 = infinite)
    #[serde(default)]
    pub max_reconnects: u32,

    /// Initial reconnection delay (milliseconds)
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum reconnection delay (milliseconds)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Reconnect after this many silent seconds
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Snapshot channel buffer size
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_initial_delay_ms() -> u64 {
    1_000
}
fn default_max_delay_ms() -> u64 {
    30_000
}
fn default_idle_timeout_secs() -> u64 {
    60 // Horizon sends keep-alive comments more often than this
}
fn default_buffer_size() -> usize {
    256
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            max_reconnects: 0,
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            idle_timeout_secs: default_idle_timeout_secs(),
            buffer_size: default_buffer_size(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Prometheus exporter port (0 = disabled)
    #[serde(default)]
    pub metrics_port: u16,
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration if the file exists.
    ///
    /// Returns `Ok(None)` only when there is no file at `path`; unreadable,
    /// malformed or invalid files are errors.
    pub fn load_if_exists(path: impl AsRef<Path>) -> anyhow::Result<Option<Self>> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        Self::parse(&content)
            .with_context(|| format!("invalid configuration in {}", path.display()))
            .map(Some)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the tracker or client cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tracker.depth == 0 {
            anyhow::bail!("tracker.depth must be at least 1");
        }
        if self.stream.buffer_size == 0 {
            anyhow::bail!("stream.buffer_size must be at least 1");
        }
        self.market.selling.validate()?;
        self.market.buying.validate()?;
        Ok(())
    }

    /// Client configuration for the configured pair
    pub fn horizon_config(&self) -> HorizonConfig {
        HorizonConfig {
            horizon_url: self.horizon.url.clone(),
            selling: self.market.selling.clone(),
            buying: self.market.buying.clone(),
            max_reconnects: self.stream.max_reconnects,
            initial_delay: Duration::from_millis(self.stream.initial_delay_ms),
            max_delay: Duration::from_millis(self.stream.max_delay_ms),
            idle_timeout: Duration::from_secs(self.stream.idle_timeout_secs),
            buffer_size: self.stream.buffer_size,
        }
    }
}
