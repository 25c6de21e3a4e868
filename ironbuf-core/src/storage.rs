//! Backing storage: heap and off-heap byte regions.
//!
//! A [`Storage`] handle owns one contiguous, zero-initialized, cache-line
//! aligned byte region and hands out [`Window`]s over it. Heap regions are
//! reclaimed when the last handle, window or view over them drops. Off-heap
//! regions additionally support explicit, deterministic release via
//! [`Storage::release`], the single ownership point for their lifetime.

use std::alloc::{Layout, alloc_zeroed, dealloc};
use std::ptr::NonNull;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};
use crate::raw::RawRegion;
use crate::types::ByteOrder;
use crate::window::Window;

/// Cache line size used for region alignment.
const CACHE_LINE: usize = 64;

/// Where a storage region's bytes live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Allocator-managed region, reclaimed when the last handle drops.
    Heap,
    /// Explicitly released region for latency-sensitive paths.
    OffHeap,
}

/// Shared byte region behind storage handles, windows and views.
pub(crate) struct Region {
    ptr: NonNull<u8>,
    capacity: usize,
    kind: StorageKind,
    layout: Layout,
    released: AtomicBool,
}

// Safety: the region is plain bytes behind a raw pointer. Byte-range access
// is coordinated by the windows and views on top of it; the supported
// cross-thread pattern is one window per thread over disjoint ranges.
unsafe impl Send for Region {}
unsafe impl Sync for Region {}

impl Region {
    fn allocate(capacity: usize, kind: StorageKind) -> Result<Arc<Self>> {
        if capacity == 0 {
            return Err(Error::Allocation { requested: 0 });
        }
        let layout = Layout::from_size_align(capacity, CACHE_LINE)
            .map_err(|_| Error::Allocation { requested: capacity })?;
        // Safety: layout has non-zero size.
        let ptr = NonNull::new(unsafe { alloc_zeroed(layout) })
            .ok_or(Error::Allocation { requested: capacity })?;
        Ok(Arc::new(Self {
            ptr,
            capacity,
            kind,
            layout,
            released: AtomicBool::new(false),
        }))
    }

    /// Fails with [`Error::UseAfterRelease`] if the region was released.
    ///
    /// The check runs in debug builds only; release builds trade it for
    /// branch-free access.
    #[inline(always)]
    pub(crate) fn check_live(&self) -> Result<()> {
        #[cfg(debug_assertions)]
        if self.released.load(Ordering::Relaxed) {
            return Err(Error::UseAfterRelease);
        }
        Ok(())
    }

    #[inline(always)]
    pub(crate) fn base(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub(crate) fn kind(&self) -> StorageKind {
        self.kind
    }

    pub(crate) fn is_live(&self) -> bool {
        !self.released.load(Ordering::Relaxed)
    }

    fn release(&self) -> Result<()> {
        if self.released.swap(true, Ordering::AcqRel) {
            return Err(Error::UseAfterRelease);
        }
        // Safety: the swap above guarantees exactly one deallocation of a
        // pointer obtained from `alloc_zeroed` with this layout.
        unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
        Ok(())
    }

    fn zero(&self) -> Result<()> {
        self.check_live()?;
        // Safety: the pointer is valid for `capacity` bytes while live.
        unsafe { std::ptr::write_bytes(self.ptr.as_ptr(), 0, self.capacity) };
        Ok(())
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        if !self.released.swap(true, Ordering::AcqRel) {
            // Safety: single deallocation, guarded by the released flag.
            unsafe { dealloc(self.ptr.as_ptr(), self.layout) };
        }
    }
}

/// Handle to a contiguous byte region.
///
/// Windows and typed views created from a storage share the region without
/// copying. The handle carries the region's default byte order; windows
/// inherit it at creation and may override it independently.
pub struct Storage {
    region: Arc<Region>,
    order: ByteOrder,
}

impl Storage {
    /// Allocates a heap region of `capacity` bytes.
    pub fn heap(capacity: usize) -> Result<Self> {
        Self::allocate(capacity, StorageKind::Heap)
    }

    /// Allocates an off-heap region of `capacity` bytes.
    ///
    /// Off-heap regions must be released exactly once, either explicitly via
    /// [`Storage::release`] or implicitly when the last reference drops.
    /// Prefer [`Storage::with_off_heap`] so the release is tied to a scope.
    pub fn off_heap(capacity: usize) -> Result<Self> {
        Self::allocate(capacity, StorageKind::OffHeap)
    }

    /// Allocates a zero-initialized region of the given kind.
    ///
    /// # Arguments
    /// * `capacity` - Region size in bytes, must be non-zero
    /// * `kind` - Heap or off-heap placement
    pub fn allocate(capacity: usize, kind: StorageKind) -> Result<Self> {
        Ok(Self {
            region: Region::allocate(capacity, kind)?,
            order: ByteOrder::native(),
        })
    }

    /// Allocates an off-heap region, runs `f` against it, and releases the
    /// region on every exit path, including when `f` fails.
    ///
    /// This is the required idiom for off-heap acquisition outside a pool.
    pub fn with_off_heap<T, F>(capacity: usize, f: F) -> Result<T>
    where
        F: FnOnce(&Storage) -> Result<T>,
    {
        let storage = Storage::off_heap(capacity)?;
        let result = f(&storage);
        let released = storage.release();
        let value = result?;
        released?;
        Ok(value)
    }

    /// Returns the region capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Returns where the region's bytes live.
    #[must_use]
    pub fn kind(&self) -> StorageKind {
        self.region.kind()
    }

    /// Returns the default byte order inherited by new windows.
    #[must_use]
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Sets the default byte order inherited by new windows.
    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Returns false once an off-heap region has been released.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.region.is_live()
    }

    /// Returns a full-capacity window `(position 0, limit capacity)` over
    /// this storage.
    #[must_use]
    pub fn window(&self) -> Window {
        Window::over(Arc::clone(&self.region), self.order)
    }

    /// Returns the raw-address capability over this storage.
    ///
    /// Every access through the result is unsafe, unchecked and
    /// native-ordered; see [`RawRegion`]. Intended for the benchmark
    /// comparison path, not general use.
    #[must_use]
    pub fn raw(&self) -> RawRegion {
        RawRegion::over(Arc::clone(&self.region))
    }

    /// Overwrites the whole region with zeros.
    pub fn zero(&mut self) -> Result<()> {
        self.region.zero()
    }

    /// Releases an off-heap region now, invalidating every window and view
    /// over it.
    ///
    /// Fails with [`Error::UseAfterRelease`] if the region was already
    /// released. For heap storage this is a plain drop; heap regions are
    /// reclaimed when their last reference goes away.
    ///
    /// Accesses after release are caught in debug builds via the region's
    /// liveness flag. Release builds omit that check for speed: a window
    /// used after this call in a release build reads or writes freed memory.
    pub fn release(self) -> Result<()> {
        match self.region.kind() {
            StorageKind::OffHeap => self.region.release(),
            StorageKind::Heap => Ok(()),
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("capacity", &self.region.capacity())
            .field("kind", &self.region.kind())
            .field("order", &self.order)
            .field("live", &self.region.is_live())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_zeroed() {
        let storage = Storage::heap(64).unwrap();
        assert_eq!(storage.capacity(), 64);
        assert_eq!(storage.kind(), StorageKind::Heap);
        let window = storage.window();
        let mut bytes = [0xFFu8; 64];
        window.get_bytes_at(0, &mut bytes).unwrap();
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_allocate_zero_capacity_fails() {
        assert!(matches!(
            Storage::heap(0),
            Err(Error::Allocation { requested: 0 })
        ));
        assert!(matches!(
            Storage::off_heap(0),
            Err(Error::Allocation { requested: 0 })
        ));
    }

    #[test]
    fn test_region_alignment() {
        let storage = Storage::off_heap(128).unwrap();
        let addr = storage.region.base() as usize;
        assert_eq!(addr % CACHE_LINE, 0, "region should be cache-line aligned");
        storage.release().unwrap();
    }

    #[test]
    fn test_off_heap_release() {
        let storage = Storage::off_heap(32).unwrap();
        assert!(storage.is_live());
        storage.release().unwrap();
    }

    #[test]
    fn test_heap_release_is_noop() {
        let storage = Storage::heap(32).unwrap();
        storage.release().unwrap();
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_use_after_release_detected() {
        let storage = Storage::off_heap(32).unwrap();
        let mut window = storage.window();
        storage.release().unwrap();
        assert!(matches!(window.put(1u8), Err(Error::UseAfterRelease)));
        assert!(matches!(
            window.get_at::<u8>(0),
            Err(Error::UseAfterRelease)
        ));
    }

    #[test]
    fn test_with_off_heap_releases_on_success() {
        let value = Storage::with_off_heap(16, |storage| {
            let mut window = storage.window();
            window.put(7u8)?;
            Ok(41 + 1)
        })
        .unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_with_off_heap_releases_on_failure() {
        let result: Result<()> = Storage::with_off_heap(16, |storage| {
            let mut window = storage.window();
            // Deliberately overflow the 16-byte window.
            window.put_at(16, 1u8)?;
            Ok(())
        });
        assert!(matches!(result, Err(Error::Overflow { .. })));
    }

    #[test]
    fn test_default_order_is_native() {
        let storage = Storage::heap(8).unwrap();
        assert_eq!(storage.order(), ByteOrder::native());
    }

    #[test]
    fn test_set_order_inherited_by_new_windows() {
        let mut storage = Storage::heap(8).unwrap();
        storage.set_order(ByteOrder::BigEndian);
        assert_eq!(storage.window().order(), ByteOrder::BigEndian);
    }

    #[test]
    fn test_zero_overwrites_content() {
        let mut storage = Storage::heap(8).unwrap();
        let mut window = storage.window();
        window.put(0xDEAD_BEEFu32).unwrap();
        storage.zero().unwrap();
        assert_eq!(storage.window().get_at::<u32>(0).unwrap(), 0);
    }

    #[test]
    fn test_storage_debug() {
        let storage = Storage::heap(256).unwrap();
        let debug_str = format!("{:?}", storage);
        assert!(debug_str.contains("Storage"));
        assert!(debug_str.contains("256"));
        assert!(debug_str.contains("Heap"));
    }
}
