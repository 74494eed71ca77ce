//! Prometheus metrics

use std::time::Duration;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Snapshots that became the latest
    SnapshotsRetained,
    /// Snapshots suppressed as heartbeats
    Heartbeats,
    /// Snapshots rejected as malformed
    InvalidSnapshots,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Levels in the latest snapshot
    BookLevels,
    /// Retained snapshots in the history
    HistoryLen,
}

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Tracker ingest, validation included
    Ingest,
}

fn counter_name(metric: CounterMetric) -> &'static str {
    match metric {
        CounterMetric::SnapshotsRetained => "hexbook_snapshots_retained_total",
        CounterMetric::Heartbeats => "hexbook_heartbeats_total",
        CounterMetric::InvalidSnapshots => "hexbook_invalid_snapshots_total",
    }
}

fn gauge_name(metric: GaugeMetric) -> &'static str {
    match metric {
        GaugeMetric::BookLevels => "hexbook_book_levels",
        GaugeMetric::HistoryLen => "hexbook_history_len",
    }
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    metrics::counter!(counter_name(metric)).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    metrics::gauge!(gauge_name(metric)).set(value);
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::Ingest => "hexbook_ingest_latency_ms",
    };
    metrics::histogram!(metric_name).record(duration.as_secs_f64() * 1_000.0);
}
