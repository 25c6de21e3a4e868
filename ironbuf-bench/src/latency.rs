//! Latency measurement utilities.

use hdrhistogram::Histogram;
use std::time::{Duration, Instant};

/// Latency statistics, all values in nanoseconds.
#[derive(Debug, Clone)]
pub struct LatencyStats {
    /// Minimum recorded latency.
    pub min: u64,
    /// Maximum recorded latency.
    pub max: u64,
    /// Mean latency.
    pub mean: f64,
    /// Median latency (p50).
    pub median: u64,
    /// 99th percentile latency.
    pub p99: u64,
    /// 99.9th percentile latency.
    pub p999: u64,
    /// Sample count.
    pub count: u64,
}

/// Collects latency samples into an HDR histogram and computes statistics.
pub struct LatencyCollector {
    histogram: Histogram<u64>,
}

impl LatencyCollector {
    /// Creates a collector with three significant figures of precision.
    #[must_use]
    pub fn new() -> Self {
        Self {
            histogram: Histogram::new(3).expect("three significant figures is a valid precision"),
        }
    }

    /// Records a latency sample. Values beyond the trackable range are
    /// saturated rather than dropped.
    pub fn record(&mut self, latency: Duration) {
        self.histogram.saturating_record(latency.as_nanos() as u64);
    }

    /// Measures the latency of `f` and records it.
    pub fn measure<F, T>(&mut self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let result = f();
        self.record(start.elapsed());
        result
    }

    /// Computes statistics over the recorded samples.
    ///
    /// Returns `None` if nothing was recorded.
    #[must_use]
    pub fn stats(&self) -> Option<LatencyStats> {
        if self.histogram.is_empty() {
            return None;
        }
        Some(LatencyStats {
            min: self.histogram.min(),
            max: self.histogram.max(),
            mean: self.histogram.mean(),
            median: self.histogram.value_at_quantile(0.5),
            p99: self.histogram.value_at_quantile(0.99),
            p999: self.histogram.value_at_quantile(0.999),
            count: self.histogram.len(),
        })
    }

    /// Clears all samples.
    pub fn clear(&mut self) {
        self.histogram.reset();
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    /// Returns true if no samples have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }
}

impl Default for LatencyCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_over_known_samples() {
        let mut collector = LatencyCollector::new();
        for i in 1..=100u64 {
            collector.record(Duration::from_nanos(i * 100));
        }

        let stats = collector.stats().unwrap();
        assert_eq!(stats.count, 100);
        assert_eq!(stats.min, 100);
        // HDR precision: the max bucket covers the recorded value.
        assert!(stats.max >= 10_000 - 10 && stats.max <= 10_000 + 10);
        assert!(stats.p99 >= stats.median);
        assert!(stats.p999 >= stats.p99);
    }

    #[test]
    fn test_empty_collector_has_no_stats() {
        let collector = LatencyCollector::new();
        assert!(collector.is_empty());
        assert!(collector.stats().is_none());
    }

    #[test]
    fn test_measure_returns_value() {
        let mut collector = LatencyCollector::new();
        let result = collector.measure(|| 42);
        assert_eq!(result, 42);
        assert_eq!(collector.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut collector = LatencyCollector::new();
        collector.record(Duration::from_nanos(500));
        collector.clear();
        assert!(collector.is_empty());
    }
}
