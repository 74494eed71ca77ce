//! Stream types and configuration

use std::time::Duration;
use thiserror::Error;

/// SSE client configuration
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Event stream URL
    pub url: String,
    /// Maximum reconnection attempts before giving up (0 = infinite)
    pub max_reconnect_attempts: u32,
    /// Initial delay before first reconnection attempt
    pub initial_reconnect_delay: Duration,
    /// Maximum delay between reconnection attempts
    pub max_reconnect_delay: Duration,
    /// Reconnect if no bytes arrive for this long
    pub idle_timeout: Duration,
    /// Channel buffer size for delivered messages
    pub buffer_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_reconnect_attempts: 10,
            initial_reconnect_delay: Duration::from_secs(1),
            max_reconnect_delay: Duration::from_secs(60),
            idle_timeout: Duration::from_secs(60),
            buffer_size: 1024,
        }
    }
}

impl StreamConfig {
    /// Create a new config with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set maximum reconnection attempts
    pub fn max_reconnects(mut self, n: u32) -> Self {
        self.max_reconnect_attempts = n;
        self
    }

    /// Set initial reconnection delay
    pub fn initial_delay(mut self, d: Duration) -> Self {
        self.initial_reconnect_delay = d;
        self
    }

    /// Set maximum reconnection delay
    pub fn max_delay(mut self, d: Duration) -> Self {
        self.max_reconnect_delay = d;
        self
    }

    /// Set idle timeout
    pub fn idle_timeout(mut self, d: Duration) -> Self {
        self.idle_timeout = d;
        self
    }

    /// Set channel buffer size
    pub fn buffer_size(mut self, n: usize) -> Self {
        self.buffer_size = n;
        self
    }
}

/// One dispatched server-sent event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseEvent {
    /// `event:` field, if any
    pub event: Option<String>,
    /// `data:` lines joined with `\n`
    pub data: String,
    /// Last event id seen when this event was dispatched
    pub id: Option<String>,
}

/// Stream message types
#[derive(Debug, Clone)]
pub enum StreamMessage {
    /// Server-sent event
    Event(SseEvent),
    /// Connection established
    Connected,
    /// Connection closed for good
    Disconnected,
    /// Reconnecting after failure
    Reconnecting { attempt: u32 },
}

/// Stream errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Server answered with a non-success status
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),
    /// No data within the idle timeout
    #[error("No data for {0:?}")]
    IdleTimeout(std::time::Duration),
    /// Server ended the stream
    #[error("Stream ended by server")]
    Closed,
    /// Maximum reconnection attempts exceeded
    #[error("Maximum reconnection attempts exceeded")]
    MaxReconnectsExceeded,
}
