//! Typed numeric overlays over window ranges.
//!
//! A [`TypedView`] reinterprets a byte range as a sequence of fixed-width
//! elements. Element index `i` maps to byte offset `i * WIDTH` within the
//! range. The view shares storage with the window it came from: an element
//! written here is immediately visible to byte-oriented reads of the same
//! range, and vice versa.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::storage::Region;
use crate::types::{ByteOrder, Element};

/// Fixed-width element overlay over a byte range, created via
/// [`Window::typed_view`](crate::window::Window::typed_view).
///
/// Views built with [`ByteOrder::native`] perform no byte swapping on
/// element access; an explicit non-native order swaps on every access.
pub struct TypedView<T: Element> {
    region: Arc<Region>,
    /// Byte offset of element 0 within the region.
    start: usize,
    /// Element count.
    len: usize,
    order: ByteOrder,
    _element: PhantomData<T>,
}

// Safety: same contract as `Window` - views over overlapping ranges must not
// be used from different threads without external synchronization.
unsafe impl<T: Element> Send for TypedView<T> {}

impl<T: Element> TypedView<T> {
    pub(crate) fn over(region: Arc<Region>, start: usize, len: usize, order: ByteOrder) -> Self {
        Self {
            region,
            start,
            len,
            order,
            _element: PhantomData,
        }
    }

    /// Returns the number of elements in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the view covers no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the byte order applied to element access.
    #[must_use]
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Reads the element at `index`.
    ///
    /// Fails with [`Error::Underflow`] if `index` is out of range.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(Error::Underflow {
                offset: index * T::WIDTH,
                width: T::WIDTH,
                limit: self.len * T::WIDTH,
            });
        }
        self.region.check_live()?;
        // Safety: `start + len * WIDTH <= region.capacity()` by construction
        // and `index < len`.
        let ptr = unsafe { self.region.base().add(self.start + index * T::WIDTH) };
        Ok(unsafe { T::read(ptr, self.order) })
    }

    /// Writes the element at `index`.
    ///
    /// Fails with [`Error::Overflow`] if `index` is out of range.
    #[inline(always)]
    pub fn put(&mut self, index: usize, value: T) -> Result<()> {
        if index >= self.len {
            return Err(Error::Overflow {
                offset: index * T::WIDTH,
                width: T::WIDTH,
                limit: self.len * T::WIDTH,
            });
        }
        self.region.check_live()?;
        // Safety: as in `get`.
        let ptr = unsafe { self.region.base().add(self.start + index * T::WIDTH) };
        unsafe { T::write(ptr, value, self.order) };
        Ok(())
    }
}

impl<T: Element> std::fmt::Debug for TypedView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedView")
            .field("len", &self.len)
            .field("element_width", &T::WIDTH)
            .field("order", &self.order)
            .finish()
    }
}
