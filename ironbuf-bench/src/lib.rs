//! # IronBuf Bench
//!
//! Benchmarking utilities comparing storage and access strategies behind a
//! uniform write/read capability.

pub mod generator;
pub mod harness;
pub mod latency;
pub mod strategy;

pub use generator::TickGenerator;
pub use harness::{BenchmarkResult, Harness, StrategyRun};
pub use latency::{LatencyCollector, LatencyStats};
pub use strategy::{
    AbsoluteWindow, AccessStrategy, ByteArray, CodecRoundTrip, CursorWindow, RawAddress,
};
