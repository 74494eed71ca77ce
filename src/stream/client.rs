//! SSE client with automatic reconnection

use super::parser::SseParser;
use super::types::{StreamConfig, StreamError, StreamMessage};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

/// Reusable event-stream client with automatic reconnection
pub struct SseClient {
    config: StreamConfig,
    http: reqwest::Client,
}

impl SseClient {
    /// Create a new client with the given configuration
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Create a new client with just a URL using default config
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::new(StreamConfig::new(url))
    }

    /// Get the configured URL
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Connect and return a receiver for messages
    ///
    /// This spawns a background task that handles connection management and
    /// automatic reconnection with exponential backoff. The last event id is
    /// sent back as `Last-Event-ID` so the server can resume the stream.
    pub fn connect(&self) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(self.config.buffer_size);
        let config = self.config.clone();
        let http = self.http.clone();

        tokio::spawn(async move {
            if let Err(e) = Self::run_connection_loop(config, http, tx).await {
                tracing::error!(error = %e, "Event stream connection loop failed");
            }
        });

        rx
    }

    /// Run the connection loop with automatic reconnection
    async fn run_connection_loop(
        config: StreamConfig,
        http: reqwest::Client,
        tx: mpsc::Sender<StreamMessage>,
    ) -> Result<(), StreamError> {
        let mut reconnect_attempts = 0;
        let mut reconnect_delay = config.initial_reconnect_delay;
        let mut parser = SseParser::new();

        loop {
            let mut connected = false;
            let result =
                Self::connect_and_stream(&config, &http, &tx, &mut parser, &mut connected).await;

            if connected {
                reconnect_attempts = 0;
                reconnect_delay = config.initial_reconnect_delay;
            }

            match result {
                Ok(()) => {
                    tracing::info!("Event stream receiver dropped, closing");
                    break;
                }
                Err(e) => {
                    reconnect_attempts += 1;
                    tracing::warn!(
                        error = %e,
                        attempt = reconnect_attempts,
                        "Event stream error, reconnecting..."
                    );

                    // Check max reconnects (0 = infinite)
                    if config.max_reconnect_attempts > 0
                        && reconnect_attempts >= config.max_reconnect_attempts
                    {
                        tracing::error!("Max reconnection attempts reached");
                        let _ = tx.send(StreamMessage::Disconnected).await;
                        return Err(StreamError::MaxReconnectsExceeded);
                    }

                    if tx.is_closed() {
                        tracing::info!("Receiver dropped, stopping reconnection");
                        break;
                    }

                    let _ = tx
                        .send(StreamMessage::Reconnecting {
                            attempt: reconnect_attempts,
                        })
                        .await;

                    if let Some(retry) = parser.retry() {
                        reconnect_delay = reconnect_delay.max(retry);
                    }
                    sleep(reconnect_delay).await;
                    reconnect_delay = (reconnect_delay * 2).min(config.max_reconnect_delay);
                }
            }
        }

        Ok(())
    }

    /// Open the stream and forward events until it fails.
    ///
    /// Returns `Ok(())` only when the receiver is gone.
    async fn connect_and_stream(
        config: &StreamConfig,
        http: &reqwest::Client,
        tx: &mpsc::Sender<StreamMessage>,
        parser: &mut SseParser,
        connected: &mut bool,
    ) -> Result<(), StreamError> {
        tracing::info!(url = %config.url, "Connecting to event stream");

        let mut request = http
            .get(&config.url)
            .header(reqwest::header::ACCEPT, "text/event-stream");
        if let Some(id) = parser.last_event_id() {
            request = request.header("Last-Event-ID", id);
        }

        let response = match timeout(config.idle_timeout, request.send()).await {
            Err(_) => return Err(StreamError::IdleTimeout(config.idle_timeout)),
            Ok(result) => result.map_err(|e| StreamError::ConnectionFailed(e.to_string()))?,
        };
        if !response.status().is_success() {
            return Err(StreamError::HttpStatus(response.status().as_u16()));
        }

        parser.reset_partial();

        tracing::info!("Event stream connected");
        *connected = true;
        if tx.send(StreamMessage::Connected).await.is_err() {
            return Ok(());
        }

        let mut body = response.bytes_stream();
        loop {
            let chunk = match timeout(config.idle_timeout, body.next()).await {
                Err(_) => return Err(StreamError::IdleTimeout(config.idle_timeout)),
                Ok(None) => return Err(StreamError::Closed),
                Ok(Some(Err(e))) => return Err(StreamError::ConnectionFailed(e.to_string())),
                Ok(Some(Ok(chunk))) => chunk,
            };

            for event in parser.push(&chunk) {
                if tx.send(StreamMessage::Event(event)).await.is_err() {
                    return Ok(());
                }
            }
        }
    }
}
