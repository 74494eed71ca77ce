//! Snapshot tracker with heartbeat suppression
//!
//! Horizon re-sends the full book periodically even when nothing changed.
//! The tracker diffs every incoming book against the latest retained one
//! and only retains books that differ materially. Retained snapshots form
//! a newest-first history holding the latest snapshot plus at most `depth`
//! predecessors.

use super::{diff_book, Book, BookDiff, RawSnapshot, Snapshot, TrackerError};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Default number of predecessors kept behind the latest snapshot
pub const DEFAULT_DEPTH: usize = 3;

/// Outcome of a successful ingest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// No material change; only the last diff advanced
    Heartbeat,
    /// A new snapshot became the latest
    Retained { sequence: u64 },
}

/// Order book snapshot tracker for one trading pair
#[derive(Debug, Clone)]
pub struct BookTracker {
    depth: usize,
    /// Newest first
    history: VecDeque<Snapshot>,
    last_diff: Option<BookDiff>,
    last_capture: Option<DateTime<Utc>>,
    next_sequence: u64,
}

impl BookTracker {
    /// Create an empty tracker keeping `depth` predecessors of the latest snapshot
    pub fn new(depth: usize) -> Result<Self, TrackerError> {
        if depth == 0 {
            return Err(TrackerError::InvalidConfiguration(
                "depth must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            depth,
            history: VecDeque::with_capacity(depth + 1),
            last_diff: None,
            last_capture: None,
            next_sequence: 0,
        })
    }

    /// Ingest a raw snapshot captured now
    pub fn ingest(&mut self, raw: &RawSnapshot) -> Result<Ingest, TrackerError> {
        self.ingest_at(raw, Utc::now())
    }

    /// Ingest a raw snapshot with an explicit capture time.
    ///
    /// Invalid input leaves the tracker untouched. A capture time earlier
    /// than the previous one is clamped to it.
    pub fn ingest_at(
        &mut self,
        raw: &RawSnapshot,
        captured_at: DateTime<Utc>,
    ) -> Result<Ingest, TrackerError> {
        let book = Book::from_raw(raw)?;

        let captured_at = match self.last_capture {
            Some(last) if captured_at < last => last,
            _ => captured_at,
        };
        self.last_capture = Some(captured_at);

        if self.is_heartbeat(&book) {
            tracing::debug!(levels = book.size(), "Order book heartbeat");
            return Ok(Ingest::Heartbeat);
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.history.push_front(Snapshot {
            sequence,
            captured_at,
            book,
        });
        self.history.truncate(self.depth + 1);

        tracing::debug!(
            sequence,
            history_len = self.history.len(),
            "Retained order book snapshot"
        );

        Ok(Ingest::Retained { sequence })
    }

    /// Decide whether `incoming` is a heartbeat of the latest snapshot.
    ///
    /// Always replaces the last diff with `incoming` diffed against the
    /// latest snapshot, heartbeat or not. The first book is never a heartbeat.
    pub fn is_heartbeat(&mut self, incoming: &Book) -> bool {
        let latest = self.history.front().map(|s| &s.book);
        let diff = diff_book(latest, incoming);
        let heartbeat = latest.is_some() && !diff.is_material();
        self.last_diff = Some(diff);
        heartbeat
    }

    /// Most recently retained snapshot
    pub fn latest(&self) -> Option<&Snapshot> {
        self.history.front()
    }

    /// Most recently computed diff, including diffs of heartbeats
    pub fn last_diff(&self) -> Option<&BookDiff> {
        self.last_diff.as_ref()
    }

    /// The retained snapshot immediately preceding `snapshot`, if still held
    pub fn previous(&self, snapshot: &Snapshot) -> Option<&Snapshot> {
        let index = self
            .history
            .iter()
            .position(|s| s.sequence == snapshot.sequence)?;
        self.history.get(index + 1)
    }

    /// Retained snapshots, newest to oldest
    pub fn history(&self) -> impl Iterator<Item = &Snapshot> {
        self.history.iter()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for BookTracker {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            history: VecDeque::with_capacity(DEFAULT_DEPTH + 1),
            last_diff: None,
            last_capture: None,
            next_sequence: 0,
        }
    }
}
