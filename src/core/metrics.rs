//! Logger metrics for observability
//!
//! Counters for lines written, lines lost to formatter or write failures,
//! hook failures and lines rendered at a promoted severity.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use step_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_format_error();
///
/// assert_eq!(metrics.lines_written(), 1);
/// assert_eq!(metrics.dropped_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Lines handed to the appender successfully
    lines_written: AtomicU64,

    /// Entries not emitted because the formatter failed
    format_errors: AtomicU64,

    /// Lines the appender failed to write
    write_errors: AtomicU64,

    /// Hook invocations that failed or panicked
    hook_failures: AtomicU64,

    /// Lines whose rendered level differs from the declared one
    promotions: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            lines_written: AtomicU64::new(0),
            format_errors: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            hook_failures: AtomicU64::new(0),
            promotions: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn lines_written(&self) -> u64 {
        self.lines_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn format_errors(&self) -> u64 {
        self.format_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_errors(&self) -> u64 {
        self.write_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn hook_failures(&self) -> u64 {
        self.hook_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn promotions(&self) -> u64 {
        self.promotions.load(Ordering::Relaxed)
    }

    /// Entries that never reached the sink
    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.format_errors() + self.write_errors()
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.lines_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_format_error(&self) -> u64 {
        self.format_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_error(&self) -> u64 {
        self.write_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_hook_failures(&self, count: u64) -> u64 {
        self.hook_failures.fetch_add(count, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_promotion(&self) -> u64 {
        self.promotions.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been processed.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.lines_written() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.lines_written.store(0, Ordering::Relaxed);
        self.format_errors.store(0, Ordering::Relaxed);
        self.write_errors.store(0, Ordering::Relaxed);
        self.hook_failures.store(0, Ordering::Relaxed);
        self.promotions.store(0, Ordering::Relaxed);
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
            lines_written: AtomicU64::new(self.lines_written()),
            format_errors: AtomicU64::new(self.format_errors()),
            write_errors: AtomicU64::new(self.write_errors()),
            hook_failures: AtomicU64::new(self.hook_failures()),
            promotions: AtomicU64::new(self.promotions()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.lines_written(), 0);
        assert_eq!(metrics.dropped_count(), 0);
        assert_eq!(metrics.hook_failures(), 0);
        assert_eq!(metrics.promotions(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_written(), 0);
        assert_eq!(metrics.record_written(), 1);
        assert_eq!(metrics.lines_written(), 2);

        metrics.record_hook_failures(3);
        assert_eq!(metrics.hook_failures(), 3);
    }

    #[test]
    fn test_dropped_counts_format_and_write_errors() {
        let metrics = LoggerMetrics::new();
        metrics.record_format_error();
        metrics.record_write_error();
        metrics.record_write_error();
        assert_eq!(metrics.dropped_count(), 3);
    }

    #[test]
    fn test_metrics_drop_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_written();
        }
        for _ in 0..10 {
            metrics.record_write_error();
        }

        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "Drop rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset_and_clone() {
        let metrics = LoggerMetrics::new();
        metrics.record_written();
        metrics.record_hook_failures(2);
        metrics.record_promotion();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.lines_written(), 0);
        assert_eq!(metrics.promotions(), 0);
        assert_eq!(snapshot.lines_written(), 1);
        assert_eq!(snapshot.hook_failures(), 2);
        assert_eq!(snapshot.promotions(), 1);
    }
}
