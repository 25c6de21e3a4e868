//! Bounded, cursor-addressed windows over backing storage.
//!
//! A [`Window`] tracks `(position, limit, capacity, mark)` with the
//! invariant `0 <= mark <= position <= limit <= capacity`. Sequential
//! accessors read or write at `position` and advance it; absolute accessors
//! take an explicit offset and leave the cursor untouched. Every access is
//! bounds-checked against `limit` and fails loudly instead of wrapping or
//! truncating.
//!
//! Windows never copy storage: [`Window::slice`], [`Window::duplicate`] and
//! [`Window::typed_view`] are O(1) views over the same bytes.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::storage::{Region, StorageKind};
use crate::types::{ByteOrder, Element};
use crate::view::TypedView;

/// Cursor-addressed view over a byte region.
///
/// A window's cursor is single-threaded state: concurrent mutation requires
/// external synchronization, or one window per thread over disjoint byte
/// ranges (obtainable via [`Window::slice`]).
pub struct Window {
    region: Arc<Region>,
    /// Byte offset of this window's range within the region.
    start: usize,
    position: usize,
    limit: usize,
    capacity: usize,
    mark: Option<usize>,
    order: ByteOrder,
}

// Safety: a window may move to another thread. Windows whose byte ranges
// overlap must not be used from different threads without external
// synchronization; disjoint slices of one region are safe to use
// concurrently.
unsafe impl Send for Window {}

impl Window {
    pub(crate) fn over(region: Arc<Region>, order: ByteOrder) -> Self {
        let capacity = region.capacity();
        Self {
            region,
            start: 0,
            position: 0,
            limit: capacity,
            capacity,
            mark: None,
            order,
        }
    }

    /// Returns the current cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the current limit.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the window capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `limit - position`.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Returns true if any bytes remain between position and limit.
    #[must_use]
    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Returns the byte order applied to multi-byte access.
    #[must_use]
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Sets the byte order applied to multi-byte access.
    ///
    /// Per-window property; other windows over the same storage keep theirs.
    pub fn set_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Returns the kind of the backing storage.
    #[must_use]
    pub fn kind(&self) -> StorageKind {
        self.region.kind()
    }

    /// Moves the cursor to `position`.
    ///
    /// Fails with [`Error::Overflow`] if `position` exceeds the limit. A
    /// mark beyond the new position is discarded.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.limit {
            return Err(Error::Overflow {
                offset: position,
                width: 0,
                limit: self.limit,
            });
        }
        if self.mark.is_some_and(|m| m > position) {
            self.mark = None;
        }
        self.position = position;
        Ok(())
    }

    /// Sets the limit.
    ///
    /// Fails with [`Error::Overflow`] if `limit` exceeds the capacity. The
    /// position is clamped to the new limit; an invalidated mark is
    /// discarded.
    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        if limit > self.capacity {
            return Err(Error::Overflow {
                offset: limit,
                width: 0,
                limit: self.capacity,
            });
        }
        if self.position > limit {
            self.position = limit;
        }
        if self.mark.is_some_and(|m| m > limit) {
            self.mark = None;
        }
        self.limit = limit;
        Ok(())
    }

    /// Remembers the current position for a later [`Window::reset`].
    pub fn mark(&mut self) {
        self.mark = Some(self.position);
    }

    /// Moves the cursor back to the marked position.
    ///
    /// Fails with [`Error::InvalidMark`] if no mark is set.
    pub fn reset(&mut self) -> Result<()> {
        self.position = self.mark.ok_or(Error::InvalidMark)?;
        Ok(())
    }

    /// Converts a just-filled window into a readable one: `limit` becomes
    /// the current position, `position` resets to zero.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
        self.mark = None;
    }

    /// Resets the position to zero, leaving the limit unchanged, so the same
    /// readable range can be traversed again.
    pub fn rewind(&mut self) {
        self.position = 0;
        self.mark = None;
    }

    /// Resets to a full writable window: `position` zero, `limit` capacity.
    /// The contents are not erased.
    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = self.capacity;
        self.mark = None;
    }

    /// Moves the unread bytes in `[position, limit)` to the front of the
    /// window, then sets `position` past them and `limit` to capacity, so
    /// more data can be appended without losing what was not yet read.
    pub fn compact(&mut self) -> Result<()> {
        let len = self.limit - self.position;
        let base = self.base()?;
        // Safety: source and destination both lie inside this window's
        // range; `copy` handles the overlap.
        unsafe { std::ptr::copy(base.add(self.position), base, len) };
        self.position = len;
        self.limit = self.capacity;
        self.mark = None;
        Ok(())
    }

    #[inline(always)]
    fn base(&self) -> Result<*mut u8> {
        self.region.check_live()?;
        // Safety: `start + capacity <= region.capacity()` by construction.
        Ok(unsafe { self.region.base().add(self.start) })
    }

    #[inline(always)]
    fn writable(&self, offset: usize, width: usize) -> Result<*mut u8> {
        let end = offset.checked_add(width).ok_or(Error::Overflow {
            offset,
            width,
            limit: self.limit,
        })?;
        if end > self.limit {
            return Err(Error::Overflow {
                offset,
                width,
                limit: self.limit,
            });
        }
        // Safety: `offset + width <= limit <= capacity`.
        Ok(unsafe { self.base()?.add(offset) })
    }

    #[inline(always)]
    fn readable(&self, offset: usize, width: usize) -> Result<*const u8> {
        let end = offset.checked_add(width).ok_or(Error::Underflow {
            offset,
            width,
            limit: self.limit,
        })?;
        if end > self.limit {
            return Err(Error::Underflow {
                offset,
                width,
                limit: self.limit,
            });
        }
        // Safety: `offset + width <= limit <= capacity`.
        Ok(unsafe { self.base()?.add(offset) })
    }

    /// Writes an element at the cursor and advances it by the element width.
    ///
    /// Fails with [`Error::Overflow`] if the write would cross the limit.
    #[inline(always)]
    pub fn put<T: Element>(&mut self, value: T) -> Result<()> {
        let ptr = self.writable(self.position, T::WIDTH)?;
        // Safety: `writable` bounds-checked the range.
        unsafe { T::write(ptr, value, self.order) };
        self.position += T::WIDTH;
        Ok(())
    }

    /// Reads an element at the cursor and advances it by the element width.
    ///
    /// Fails with [`Error::Underflow`] if the read would cross the limit.
    #[inline(always)]
    pub fn get<T: Element>(&mut self) -> Result<T> {
        let ptr = self.readable(self.position, T::WIDTH)?;
        // Safety: `readable` bounds-checked the range.
        let value = unsafe { T::read(ptr, self.order) };
        self.position += T::WIDTH;
        Ok(value)
    }

    /// Writes an element at an explicit offset without touching the cursor.
    ///
    /// Still bounds-checked against the limit.
    #[inline(always)]
    pub fn put_at<T: Element>(&mut self, offset: usize, value: T) -> Result<()> {
        let ptr = self.writable(offset, T::WIDTH)?;
        // Safety: `writable` bounds-checked the range.
        unsafe { T::write(ptr, value, self.order) };
        Ok(())
    }

    /// Reads an element at an explicit offset without touching the cursor.
    #[inline(always)]
    pub fn get_at<T: Element>(&self, offset: usize) -> Result<T> {
        let ptr = self.readable(offset, T::WIDTH)?;
        // Safety: `readable` bounds-checked the range.
        Ok(unsafe { T::read(ptr, self.order) })
    }

    /// Writes `src` at the cursor and advances it by `src.len()`.
    pub fn put_bytes(&mut self, src: &[u8]) -> Result<()> {
        let ptr = self.writable(self.position, src.len())?;
        // Safety: `writable` bounds-checked the range; `src` is a distinct
        // allocation.
        unsafe { std::ptr::copy_nonoverlapping(src.as_ptr(), ptr, src.len()) };
        self.position += src.len();
        Ok(())
    }

    /// Fills `dst` from the cursor and advances it by `dst.len()`.
    pub fn get_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        let ptr = self.readable(self.position, dst.len())?;
        // Safety: `readable` bounds-checked the range; `dst` is a distinct
        // allocation.
        unsafe { std::ptr::copy_nonoverlapping(ptr, dst.as_mut_ptr(), dst.len()) };
        self.position += dst.len();
        Ok(())
    }

    /// Writes `src` at an explicit offset without touching the cursor.
    pub fn put_bytes_at(&mut self, offset: usize, src: &[u8]) -> Result<()> {
        let ptr = self.writable(offset, src.len())?;
        // Safety: as in `put_bytes`.
        unsafe { std::ptr::copy_nonoverlapping(src.as_ptr(), ptr, src.len()) };
        Ok(())
    }

    /// Fills `dst` from an explicit offset without touching the cursor.
    pub fn get_bytes_at(&self, offset: usize, dst: &mut [u8]) -> Result<()> {
        let ptr = self.readable(offset, dst.len())?;
        // Safety: as in `get_bytes`.
        unsafe { std::ptr::copy_nonoverlapping(ptr, dst.as_mut_ptr(), dst.len()) };
        Ok(())
    }

    /// Returns an independently-cursored window over this window's
    /// `[position, limit)` range. Shares storage with the parent: bytes
    /// written through either are visible through both, but the cursors
    /// never interact.
    #[must_use]
    pub fn slice(&self) -> Window {
        let capacity = self.remaining();
        Window {
            region: Arc::clone(&self.region),
            start: self.start + self.position,
            position: 0,
            limit: capacity,
            capacity,
            mark: None,
            order: self.order,
        }
    }

    /// Returns a window over the same storage and range with the same
    /// current cursor state. The cursors start synchronized and diverge from
    /// then on.
    #[must_use]
    pub fn duplicate(&self) -> Window {
        Window {
            region: Arc::clone(&self.region),
            start: self.start,
            position: self.position,
            limit: self.limit,
            capacity: self.capacity,
            mark: self.mark,
            order: self.order,
        }
    }

    /// Reinterprets `[position, limit)` as a sequence of `T` elements in the
    /// given byte order, without copying.
    ///
    /// Fails with [`Error::ViewWidth`] if `remaining()` is not a multiple of
    /// the element width.
    pub fn typed_view<T: Element>(&self, order: ByteOrder) -> Result<TypedView<T>> {
        let len_bytes = self.remaining();
        if len_bytes % T::WIDTH != 0 {
            return Err(Error::ViewWidth {
                len: len_bytes,
                width: T::WIDTH,
            });
        }
        Ok(TypedView::over(
            Arc::clone(&self.region),
            self.start + self.position,
            len_bytes / T::WIDTH,
            order,
        ))
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("position", &self.position)
            .field("limit", &self.limit)
            .field("capacity", &self.capacity)
            .field("kind", &self.region.kind())
            .field("order", &self.order)
            .finish()
    }
}
