//! Warm-up + timed-iteration measurement loop.
//!
//! Each strategy gets a fixed number of warm-up iterations whose timings
//! are discarded, then a timed run over N iterations of its write/read
//! sequence. Results carry the raw numbers; presentation is the caller's
//! concern.

use std::hint::black_box;
use std::time::{Duration, Instant};

use ironbuf_codec::Result;

use crate::strategy::AccessStrategy;

/// Default warm-up iteration count.
pub const DEFAULT_WARM_UP_ITERATIONS: u64 = 10_000;
/// Default timed iteration count.
pub const DEFAULT_ITERATIONS: u64 = 100_000;

/// Result of one measured strategy run.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Strategy name.
    pub strategy: &'static str,
    /// Timed iterations performed.
    pub iterations: u64,
    /// Wall-clock time of the timed iterations.
    pub elapsed: Duration,
}

impl BenchmarkResult {
    /// Returns operations per second.
    #[must_use]
    pub fn ops_per_second(&self) -> f64 {
        self.iterations as f64 / self.elapsed.as_secs_f64()
    }

    /// Returns the mean latency per operation in nanoseconds.
    #[must_use]
    pub fn avg_latency_nanos(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / self.iterations as f64
    }
}

/// Outcome of one strategy within a comparison run.
#[derive(Debug)]
pub struct StrategyRun {
    /// Strategy name, available even when the run failed.
    pub name: &'static str,
    /// Measured result or the failure that stopped the strategy.
    pub outcome: Result<BenchmarkResult>,
}

/// Measurement loop shared by all strategies.
#[derive(Debug, Clone)]
pub struct Harness {
    warm_up_iterations: u64,
    iterations: u64,
}

impl Harness {
    /// Creates a harness with explicit warm-up and timed iteration counts.
    #[must_use]
    pub fn new(warm_up_iterations: u64, iterations: u64) -> Self {
        Self {
            warm_up_iterations,
            iterations,
        }
    }

    /// Runs one strategy: warm-up first, then the timed loop.
    pub fn run(&self, strategy: &mut dyn AccessStrategy) -> Result<BenchmarkResult> {
        for i in 0..self.warm_up_iterations {
            strategy.write(i)?;
            black_box(strategy.read(i)?);
        }

        let start = Instant::now();
        for i in 0..self.iterations {
            strategy.write(i)?;
            black_box(strategy.read(i)?);
        }
        let elapsed = start.elapsed();

        Ok(BenchmarkResult {
            strategy: strategy.name(),
            iterations: self.iterations,
            elapsed,
        })
    }

    /// Runs every strategy, surfacing per-strategy failures without
    /// aborting the remaining comparisons.
    pub fn run_all(&self, strategies: &mut [Box<dyn AccessStrategy>]) -> Vec<StrategyRun> {
        strategies
            .iter_mut()
            .map(|strategy| {
                let name = strategy.name();
                let outcome = self.run(strategy.as_mut());
                if let Err(error) = &outcome {
                    tracing::warn!("strategy {name} failed: {error}");
                }
                StrategyRun { name, outcome }
            })
            .collect()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(DEFAULT_WARM_UP_ITERATIONS, DEFAULT_ITERATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{ByteArray, CursorWindow};

    #[test]
    fn test_result_ops_per_second() {
        let result = BenchmarkResult {
            strategy: "test",
            iterations: 1_000,
            elapsed: Duration::from_secs(1),
        };
        assert!((result.ops_per_second() - 1_000.0).abs() < 0.001);
    }

    #[test]
    fn test_result_avg_latency() {
        let result = BenchmarkResult {
            strategy: "test",
            iterations: 1_000,
            elapsed: Duration::from_micros(500),
        };
        assert!((result.avg_latency_nanos() - 500.0).abs() < 0.001);
    }

    #[test]
    fn test_run_counts_iterations() {
        let harness = Harness::new(100, 10_000);
        let mut strategy = ByteArray::new();
        let result = harness.run(&mut strategy).unwrap();
        assert_eq!(result.strategy, "byte-array");
        assert_eq!(result.iterations, 10_000);
        assert!(result.elapsed > Duration::ZERO);
    }

    #[test]
    fn test_run_all_keeps_going() {
        // Strategy that always fails, to prove the comparison continues.
        struct Broken;

        impl AccessStrategy for Broken {
            fn name(&self) -> &'static str {
                "broken"
            }
            fn write(&mut self, _i: u64) -> Result<()> {
                Err(ironbuf_core::Error::UseAfterRelease.into())
            }
            fn read(&mut self, _i: u64) -> Result<u64> {
                Err(ironbuf_core::Error::UseAfterRelease.into())
            }
        }

        let harness = Harness::new(1, 10);
        let mut strategies: Vec<Box<dyn AccessStrategy>> = vec![
            Box::new(Broken),
            Box::new(CursorWindow::heap().unwrap()),
        ];
        let runs = harness.run_all(&mut strategies);
        assert_eq!(runs.len(), 2);
        assert!(runs[0].outcome.is_err());
        assert!(runs[1].outcome.is_ok());
        assert_eq!(runs[1].name, "heap-window");
    }

    #[test]
    fn test_default_harness_counts() {
        let harness = Harness::default();
        let debug_str = format!("{:?}", harness);
        assert!(debug_str.contains(&DEFAULT_ITERATIONS.to_string()));
    }
}
