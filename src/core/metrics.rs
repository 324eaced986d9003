//! Tracer metrics for observability
//!
//! Counters are updated with relaxed atomics and can be read without taking
//! the store lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what a tracer did with the writes it received
///
/// # Example
///
/// ```
/// use trace_buffer::TracerMetrics;
///
/// let metrics = TracerMetrics::new();
/// metrics.record_written();
/// metrics.record_deduplicated();
///
/// assert_eq!(metrics.total_written(), 1);
/// assert_eq!(metrics.deduplicated(), 1);
/// ```
#[derive(Debug)]
pub struct TracerMetrics {
    /// Writes that created a new entry
    total_written: AtomicU64,

    /// Writes merged into an existing entry
    deduplicated: AtomicU64,

    /// Writes dropped because the formatted message was empty
    dropped_empty: AtomicU64,

    /// Writes ignored while the tracer was disabled
    dropped_disabled: AtomicU64,

    /// Messages cut to the length cap
    truncated: AtomicU64,

    groups_evicted: AtomicU64,
    spans_evicted: AtomicU64,
    entries_evicted: AtomicU64,
}

impl TracerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_written: AtomicU64::new(0),
            deduplicated: AtomicU64::new(0),
            dropped_empty: AtomicU64::new(0),
            dropped_disabled: AtomicU64::new(0),
            truncated: AtomicU64::new(0),
            groups_evicted: AtomicU64::new(0),
            spans_evicted: AtomicU64::new(0),
            entries_evicted: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_written(&self) -> u64 {
        self.total_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deduplicated(&self) -> u64 {
        self.deduplicated.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_empty(&self) -> u64 {
        self.dropped_empty.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_disabled(&self) -> u64 {
        self.dropped_disabled.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn truncated(&self) -> u64 {
        self.truncated.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn groups_evicted(&self) -> u64 {
        self.groups_evicted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn spans_evicted(&self) -> u64 {
        self.spans_evicted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_evicted(&self) -> u64 {
        self.entries_evicted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.total_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_deduplicated(&self) -> u64 {
        self.deduplicated.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped_empty(&self) -> u64 {
        self.dropped_empty.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped_disabled(&self) -> u64 {
        self.dropped_disabled.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_truncated(&self) -> u64 {
        self.truncated.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_group_evicted(&self) -> u64 {
        self.groups_evicted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_span_evicted(&self) -> u64 {
        self.spans_evicted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_entry_evicted(&self) -> u64 {
        self.entries_evicted.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of accepted writes that were merged into an existing entry (0.0 - 100.0)
    pub fn dedup_rate(&self) -> f64 {
        let merged = self.deduplicated() as f64;
        let total = self.total_written() as f64 + merged;
        if total == 0.0 {
            0.0
        } else {
            (merged / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        for counter in self.counters() {
            counter.store(0, Ordering::Relaxed);
        }
    }

    fn counters(&self) -> [&AtomicU64; 8] {
        [
            &self.total_written,
            &self.deduplicated,
            &self.dropped_empty,
            &self.dropped_disabled,
            &self.truncated,
            &self.groups_evicted,
            &self.spans_evicted,
            &self.entries_evicted,
        ]
    }
}

impl Default for TracerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TracerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_written: AtomicU64::new(self.total_written()),
            deduplicated: AtomicU64::new(self.deduplicated()),
            dropped_empty: AtomicU64::new(self.dropped_empty()),
            dropped_disabled: AtomicU64::new(self.dropped_disabled()),
            truncated: AtomicU64::new(self.truncated()),
            groups_evicted: AtomicU64::new(self.groups_evicted()),
            spans_evicted: AtomicU64::new(self.spans_evicted()),
            entries_evicted: AtomicU64::new(self.entries_evicted()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = TracerMetrics::new();
        assert_eq!(metrics.total_written(), 0);
        assert_eq!(metrics.deduplicated(), 0);
        assert_eq!(metrics.groups_evicted(), 0);
        assert_eq!(metrics.entries_evicted(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = TracerMetrics::new();
        assert_eq!(metrics.record_span_evicted(), 0);
        assert_eq!(metrics.record_span_evicted(), 1);
        assert_eq!(metrics.spans_evicted(), 2);
    }

    #[test]
    fn test_dedup_rate() {
        let metrics = TracerMetrics::new();
        assert_eq!(metrics.dedup_rate(), 0.0);

        for _ in 0..3 {
            metrics.record_written();
        }
        metrics.record_deduplicated();
        assert_eq!(metrics.dedup_rate(), 25.0);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = TracerMetrics::new();
        metrics.record_written();
        metrics.record_dropped_empty();
        metrics.record_group_evicted();

        metrics.reset();

        assert_eq!(metrics.total_written(), 0);
        assert_eq!(metrics.dropped_empty(), 0);
        assert_eq!(metrics.groups_evicted(), 0);
    }

    #[test]
    fn test_metrics_clone_is_independent() {
        let metrics = TracerMetrics::new();
        metrics.record_truncated();

        let snapshot = metrics.clone();
        metrics.record_truncated();

        assert_eq!(metrics.truncated(), 2);
        assert_eq!(snapshot.truncated(), 1);
    }
}
