//! Order book tracker error types.

use thiserror::Error;

/// Errors raised by the snapshot tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// Snapshot is missing a side or carries an unusable level.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Tracker was constructed with unusable settings.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
