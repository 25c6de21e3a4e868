//! # IronBuf Core
//!
//! Bounded, cursor-addressed byte windows over pluggable backing storage.
//!
//! This crate provides:
//! - [`Storage`] handles over heap or explicitly-released off-heap regions
//! - [`Window`] cursor state machine with sequential and absolute access
//! - Zero-copy views: slices, duplicates and [`TypedView`] numeric overlays
//! - [`StoragePool`] for allocation-free buffer reuse
//! - [`RawRegion`] as the clearly-labeled unchecked comparison path

pub mod error;
pub mod pool;
pub mod raw;
pub mod storage;
pub mod types;
pub mod view;
pub mod window;

pub use error::{Error, Result};
pub use pool::StoragePool;
pub use raw::RawRegion;
pub use storage::{Storage, StorageKind};
pub use types::{ByteOrder, Element};
pub use view::TypedView;
pub use window::Window;
