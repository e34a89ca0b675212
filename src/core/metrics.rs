//! Logger metrics for observability
//!
//! Counters for how many messages passed the threshold, how many were
//! suppressed by it, and how often individual sinks failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use sinklog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_delivered();
/// metrics.record_suppressed();
///
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.suppressed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Messages that passed the threshold and were broadcast
    delivered: AtomicU64,

    /// Messages rejected by the threshold
    suppressed: AtomicU64,

    /// Individual sink emits that returned an error or panicked
    sink_failures: AtomicU64,

    /// Delivered messages where at least one sink failed
    failed_deliveries: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            failed_deliveries: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_deliveries(&self) -> u64 {
        self.failed_deliveries.load(Ordering::Relaxed)
    }

    /// Record a broadcast message, returning the previous count
    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed_delivery(&self) -> u64 {
        self.failed_deliveries.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of delivered messages with at least one failing sink (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been delivered.
    pub fn failure_rate(&self) -> f64 {
        let delivered = self.delivered() as f64;
        if delivered == 0.0 {
            0.0
        } else {
            (self.failed_deliveries() as f64 / delivered) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.delivered.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.failed_deliveries.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            delivered: AtomicU64::new(self.delivered()),
            suppressed: AtomicU64::new(self.suppressed()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            failed_deliveries: AtomicU64::new(self.failed_deliveries()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.suppressed(), 0);
        assert_eq!(metrics.sink_failures(), 0);
        assert_eq!(metrics.failed_deliveries(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_delivered(), 0);
        assert_eq!(metrics.record_delivered(), 1);
        assert_eq!(metrics.delivered(), 2);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..20 {
            metrics.record_delivered();
        }
        for _ in 0..5 {
            metrics.record_failed_delivery();
        }

        let rate = metrics.failure_rate();
        assert!((24.9..=25.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_delivered();
        metrics.record_sink_failure();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.sink_failures(), 0);
        assert_eq!(snapshot.delivered(), 1);
        assert_eq!(snapshot.sink_failures(), 1);
    }
}
