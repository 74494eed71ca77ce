//! Order book session: a tracker plus its logging and metrics
//!
//! One session per subscribed pair. The feed loop (live or replayed) calls
//! [`BookSession::handle`] for every snapshot in arrival order.

use crate::orderbook::{render, BookTracker, Ingest, RawSnapshot, TrackerError};
use crate::telemetry::{self, CounterMetric, GaugeMetric, LatencyMetric};
use chrono::{DateTime, Utc};
use std::io::BufRead;
use std::time::Instant;

/// Result of handling one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Snapshot became the latest; `line` is its rendering
    Retained { sequence: u64, line: String },
    /// No material change
    Heartbeat,
    /// Snapshot was malformed and ignored
    Rejected(TrackerError),
}

/// Running totals for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub retained: u64,
    pub heartbeats: u64,
    pub rejected: u64,
}

pub struct BookSession {
    tracker: BookTracker,
    stats: SessionStats,
}

impl BookSession {
    pub fn new(depth: usize) -> Result<Self, TrackerError> {
        Ok(Self {
            tracker: BookTracker::new(depth)?,
            stats: SessionStats::default(),
        })
    }

    /// Handle a snapshot captured now
    pub fn handle(&mut self, raw: &RawSnapshot) -> Update {
        self.handle_at(raw, Utc::now())
    }

    /// Handle a snapshot with an explicit capture time
    pub fn handle_at(&mut self, raw: &RawSnapshot, captured_at: DateTime<Utc>) -> Update {
        let started = Instant::now();
        let result = self.tracker.ingest_at(raw, captured_at);
        telemetry::record_latency(LatencyMetric::Ingest, started.elapsed());

        match result {
            Ok(Ingest::Retained { sequence }) => {
                self.stats.retained += 1;
                telemetry::increment(CounterMetric::SnapshotsRetained);
                telemetry::set_gauge(GaugeMetric::HistoryLen, self.tracker.len() as f64);

                let (line, levels) = match self.tracker.latest() {
                    Some(latest) => (render(latest), latest.book.size()),
                    None => (String::new(), 0),
                };
                telemetry::set_gauge(GaugeMetric::BookLevels, levels as f64);
                tracing::info!(sequence, levels, book = %line, "Order book changed");

                Update::Retained { sequence, line }
            }
            Ok(Ingest::Heartbeat) => {
                self.stats.heartbeats += 1;
                telemetry::increment(CounterMetric::Heartbeats);
                Update::Heartbeat
            }
            Err(e) => {
                self.stats.rejected += 1;
                telemetry::increment(CounterMetric::InvalidSnapshots);
                tracing::warn!(error = %e, "Rejected order book snapshot");
                Update::Rejected(e)
            }
        }
    }

    /// Feed newline-delimited JSON snapshots through the session.
    ///
    /// Blank lines are skipped. Lines that are not valid snapshot JSON are
    /// reported as rejected and do not stop the replay.
    pub fn replay(&mut self, reader: impl BufRead) -> anyhow::Result<Vec<Update>> {
        let mut updates = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let update = match serde_json::from_str::<RawSnapshot>(line) {
                Ok(raw) => self.handle(&raw),
                Err(e) => {
                    self.stats.rejected += 1;
                    telemetry::increment(CounterMetric::InvalidSnapshots);
                    tracing::warn!(line = index + 1, error = %e, "Unparsable snapshot line");
                    Update::Rejected(TrackerError::InvalidSnapshot(format!(
                        "line {}: {}",
                        index + 1,
                        e
                    )))
                }
            };
            updates.push(update);
        }
        Ok(updates)
    }

    pub fn tracker(&self) -> &BookTracker {
        &self.tracker
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}
