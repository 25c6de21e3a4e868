//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```
//! use ironbuf::prelude::*;
//! ```

// Core types
pub use ironbuf_core::error::{Error as CoreError, Result as CoreResult};
pub use ironbuf_core::{
    ByteOrder, Element, RawRegion, Storage, StorageKind, StoragePool, TypedView, Window,
};

// Codec types
pub use ironbuf_codec::error::{Error as CodecError, Result as CodecResult};
pub use ironbuf_codec::MarketDataMessage;

// Bench types
pub use ironbuf_bench::{
    AccessStrategy, BenchmarkResult, Harness, LatencyCollector, LatencyStats, StrategyRun,
    TickGenerator,
};
