//! Raw-address access bypassing the window abstraction.
//!
//! [`RawRegion`] exists so the benchmark suite can measure what the window
//! bounds and liveness checks cost. Every accessor is `unsafe`, unchecked
//! and native-ordered. It is deliberately a separate type reachable only via
//! [`Storage::raw`](crate::storage::Storage::raw) so callers cannot wander
//! into it from the safe API; it is not a general-purpose path.

use std::sync::Arc;

use crate::storage::Region;
use crate::types::{ByteOrder, Element};

/// Unchecked raw-address capability over a storage region.
pub struct RawRegion {
    region: Arc<Region>,
}

// Safety: same contract as `Window`, minus any runtime help - the caller
// alone coordinates cross-thread access.
unsafe impl Send for RawRegion {}

impl RawRegion {
    pub(crate) fn over(region: Arc<Region>) -> Self {
        Self { region }
    }

    /// Returns the region capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Writes an element at `offset` with no bounds or liveness check.
    ///
    /// # Safety
    /// `offset + T::WIDTH` must not exceed [`Self::capacity`], and the
    /// region must not have been released.
    #[inline(always)]
    pub unsafe fn write<T: Element>(&self, offset: usize, value: T) {
        // Safety: forwarded to the caller.
        unsafe { T::write(self.region.base().add(offset), value, ByteOrder::native()) }
    }

    /// Reads an element at `offset` with no bounds or liveness check.
    ///
    /// # Safety
    /// `offset + T::WIDTH` must not exceed [`Self::capacity`], and the
    /// region must not have been released.
    #[inline(always)]
    pub unsafe fn read<T: Element>(&self, offset: usize) -> T {
        // Safety: forwarded to the caller.
        unsafe { T::read(self.region.base().add(offset), ByteOrder::native()) }
    }
}

impl std::fmt::Debug for RawRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawRegion")
            .field("capacity", &self.region.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;

    #[test]
    fn test_raw_round_trip() {
        let storage = Storage::off_heap(64).unwrap();
        let raw = storage.raw();
        unsafe {
            raw.write(0, 0xA5u8);
            raw.write(1, 0x1234_5678u32);
            raw.write(5, u64::MAX);
            assert_eq!(raw.read::<u8>(0), 0xA5);
            assert_eq!(raw.read::<u32>(1), 0x1234_5678);
            assert_eq!(raw.read::<u64>(5), u64::MAX);
        }
        storage.release().unwrap();
    }

    #[test]
    fn test_raw_shares_bytes_with_windows() {
        let storage = Storage::heap(16).unwrap();
        let mut window = storage.window();
        window.put_at(0, 0xCAFE_BABEu32).unwrap();

        let raw = storage.raw();
        let through_raw: u32 = unsafe { raw.read(0) };
        assert_eq!(through_raw, 0xCAFE_BABE);
    }
}
