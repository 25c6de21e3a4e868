//! # IronBuf
//!
//! Manual byte-buffer management for low-latency systems.
//!
//! IronBuf provides bounded, cursor-addressed windows over heap or
//! explicitly-released off-heap storage, zero-copy views, a fixed-layout
//! trading message codec, and a benchmark harness comparing access
//! strategies.
//!
//! ## Features
//!
//! - **Bounded windows** - position/limit/capacity cursor discipline with
//!   loud failures instead of silent truncation
//! - **Zero-copy views** - slices, duplicates and typed numeric overlays
//!   over shared storage, every view operation O(1)
//! - **Off-heap storage** - explicit acquire/release outside the allocator's
//!   hot path, with scoped acquisition and use-after-release detection in
//!   debug builds
//! - **Fixed-layout codec** - absolute-offset market data messages suited
//!   to buffer reuse without cursor bookkeeping
//! - **Benchmark harness** - warm-up plus timed iterations across
//!   interchangeable access strategies
//!
//! ## Quick Start
//!
//! ```
//! use ironbuf::prelude::*;
//!
//! let storage = Storage::off_heap(32)?;
//! let mut window = storage.window();
//! MarketDataMessage::encode(&mut window, "AAPL", 150.25, 1000, 1_700_000_000)?;
//! let msg = MarketDataMessage::decode(&window)?;
//! assert_eq!(msg.symbol, "AAPL");
//! storage.release()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Storage, windows, views, pool, errors
//! - [`codec`] - Fixed-layout message codec
//! - [`bench`] - Access strategies and measurement harness

pub mod prelude;

/// Storage, window and view types.
pub mod core {
    pub use ironbuf_core::*;
}

/// Fixed-layout message codec.
pub mod codec {
    pub use ironbuf_codec::*;
}

/// Benchmark strategies and harness.
pub mod bench {
    pub use ironbuf_bench::*;
}

// Re-export commonly used items at the crate root
pub use ironbuf_core::{
    ByteOrder, Element, RawRegion, Storage, StorageKind, StoragePool, TypedView, Window,
};

pub use ironbuf_codec::MarketDataMessage;

pub use ironbuf_bench::{BenchmarkResult, Harness, LatencyCollector, TickGenerator};
