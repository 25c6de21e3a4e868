//! # IronBuf Codec
//!
//! Fixed-layout binary message codec built on IronBuf windows.
//!
//! Encoding and decoding use absolute, cursor-independent offsets so a
//! pre-allocated window can be reused across messages with no position
//! bookkeeping. See [`market_data`] for the wire format.

pub mod error;
pub mod market_data;

pub use error::{Error, Result};
pub use market_data::MarketDataMessage;
