//! Access strategies compared by the benchmark harness.
//!
//! Every storage strategy performs the same canonical operation behind the
//! [`AccessStrategy`] capability pair: write a u8 at offset 0, a u32 at
//! offset 1 and a u64 at offset 5, then read the three back as a checksum.
//! New strategies plug into the measurement loop without touching it.

use ironbuf_codec::{MarketDataMessage, Result};
use ironbuf_core::{ByteOrder, RawRegion, Storage, Window};

use crate::generator::SYMBOLS;

/// Buffer size shared by all storage strategies.
pub const BUFFER_SIZE: usize = 1024;

/// A strategy under measurement.
///
/// `write` and `read` take the iteration index so strategies can derive
/// varying values from it; `read` returns a checksum the harness feeds to
/// `black_box` so the work cannot be optimized away.
pub trait AccessStrategy {
    /// Display name of the strategy.
    fn name(&self) -> &'static str;

    /// Performs one write pass for iteration `i`.
    fn write(&mut self, i: u64) -> Result<()>;

    /// Performs one read pass for iteration `i`, returning a checksum.
    fn read(&mut self, i: u64) -> Result<u64>;
}

/// Plain backing-array access, no window abstraction.
pub struct ByteArray {
    buf: Vec<u8>,
}

impl ByteArray {
    /// Creates the strategy with a zeroed buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0; BUFFER_SIZE],
        }
    }
}

impl Default for ByteArray {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessStrategy for ByteArray {
    fn name(&self) -> &'static str {
        "byte-array"
    }

    fn write(&mut self, i: u64) -> Result<()> {
        self.buf[0] = i as u8;
        self.buf[1..5].copy_from_slice(&(i as u32).to_ne_bytes());
        self.buf[5..13].copy_from_slice(&i.to_ne_bytes());
        Ok(())
    }

    fn read(&mut self, _i: u64) -> Result<u64> {
        let byte = u64::from(self.buf[0]);
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.buf[1..5]);
        let mut quad = [0u8; 8];
        quad.copy_from_slice(&self.buf[5..13]);
        Ok(byte
            .wrapping_add(u64::from(u32::from_ne_bytes(word)))
            .wrapping_add(u64::from_ne_bytes(quad)))
    }
}

/// Sequential cursor access through a window, heap or off-heap.
pub struct CursorWindow {
    window: Window,
    label: &'static str,
}

impl CursorWindow {
    /// Window over heap storage.
    pub fn heap() -> Result<Self> {
        Ok(Self {
            window: Storage::heap(BUFFER_SIZE)?.window(),
            label: "heap-window",
        })
    }

    /// Window over off-heap storage. The region is reclaimed when the
    /// strategy drops.
    pub fn off_heap() -> Result<Self> {
        Ok(Self {
            window: Storage::off_heap(BUFFER_SIZE)?.window(),
            label: "off-heap-window",
        })
    }
}

impl AccessStrategy for CursorWindow {
    fn name(&self) -> &'static str {
        self.label
    }

    fn write(&mut self, i: u64) -> Result<()> {
        self.window.set_position(0)?;
        self.window.put(i as u8)?;
        self.window.put(i as u32)?;
        self.window.put(i)?;
        Ok(())
    }

    fn read(&mut self, _i: u64) -> Result<u64> {
        self.window.set_position(0)?;
        let byte = u64::from(self.window.get::<u8>()?);
        let word = u64::from(self.window.get::<u32>()?);
        let quad = self.window.get::<u64>()?;
        Ok(byte.wrapping_add(word).wrapping_add(quad))
    }
}

/// Absolute positioning over off-heap storage, parameterized by byte order
/// so order cost can be isolated from addressing mode.
pub struct AbsoluteWindow {
    window: Window,
    label: &'static str,
}

impl AbsoluteWindow {
    /// The optimized configuration: off-heap, absolute offsets, native
    /// order.
    pub fn optimized() -> Result<Self> {
        Self::build(ByteOrder::native(), "optimized-off-heap")
    }

    /// Same addressing mode with an explicit order; a non-native order pays
    /// a swap on every element access.
    pub fn with_order(order: ByteOrder) -> Result<Self> {
        let label = if order.is_native() {
            "off-heap-absolute-native"
        } else {
            "off-heap-absolute-swapped"
        };
        Self::build(order, label)
    }

    fn build(order: ByteOrder, label: &'static str) -> Result<Self> {
        let mut storage = Storage::off_heap(BUFFER_SIZE)?;
        storage.set_order(order);
        Ok(Self {
            window: storage.window(),
            label,
        })
    }
}

impl AccessStrategy for AbsoluteWindow {
    fn name(&self) -> &'static str {
        self.label
    }

    fn write(&mut self, i: u64) -> Result<()> {
        self.window.put_at(0, i as u8)?;
        self.window.put_at(1, i as u32)?;
        self.window.put_at(5, i)?;
        Ok(())
    }

    fn read(&mut self, _i: u64) -> Result<u64> {
        let byte = u64::from(self.window.get_at::<u8>(0)?);
        let word = u64::from(self.window.get_at::<u32>(1)?);
        let quad = self.window.get_at::<u64>(5)?;
        Ok(byte.wrapping_add(word).wrapping_add(quad))
    }
}

/// Raw-address access bypassing the window abstraction entirely.
///
/// The storage handle is held by the strategy, so the region outlives every
/// raw access it performs.
pub struct RawAddress {
    _storage: Storage,
    raw: RawRegion,
}

impl RawAddress {
    /// Creates the strategy over a fresh off-heap region.
    pub fn new() -> Result<Self> {
        let storage = Storage::off_heap(BUFFER_SIZE)?;
        let raw = storage.raw();
        Ok(Self {
            _storage: storage,
            raw,
        })
    }
}

impl AccessStrategy for RawAddress {
    fn name(&self) -> &'static str {
        "raw-address"
    }

    fn write(&mut self, i: u64) -> Result<()> {
        // Safety: offsets 0..13 lie inside BUFFER_SIZE and `_storage` keeps
        // the region live for the strategy's lifetime.
        unsafe {
            self.raw.write(0, i as u8);
            self.raw.write(1, i as u32);
            self.raw.write(5, i);
        }
        Ok(())
    }

    fn read(&mut self, _i: u64) -> Result<u64> {
        // Safety: as in `write`.
        unsafe {
            let byte = u64::from(self.raw.read::<u8>(0));
            let word = u64::from(self.raw.read::<u32>(1));
            let quad = self.raw.read::<u64>(5);
            Ok(byte.wrapping_add(word).wrapping_add(quad))
        }
    }
}

/// Full message encode + decode per iteration, the representative codec
/// sequence.
pub struct CodecRoundTrip {
    window: Window,
}

impl CodecRoundTrip {
    /// Creates the strategy over an off-heap message buffer.
    pub fn new() -> Result<Self> {
        Ok(Self {
            window: Storage::off_heap(32)?.window(),
        })
    }
}

impl AccessStrategy for CodecRoundTrip {
    fn name(&self) -> &'static str {
        "codec-round-trip"
    }

    fn write(&mut self, i: u64) -> Result<()> {
        MarketDataMessage::encode(
            &mut self.window,
            SYMBOLS[(i as usize) % SYMBOLS.len()],
            150.25 + (i as f64) * 0.01,
            (i as u32) as i32,
            i as i64,
        )?;
        Ok(())
    }

    fn read(&mut self, _i: u64) -> Result<u64> {
        let msg = MarketDataMessage::decode(&self.window)?;
        Ok((msg.quantity as u32).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_strategies() -> Vec<Box<dyn AccessStrategy>> {
        vec![
            Box::new(ByteArray::new()),
            Box::new(CursorWindow::heap().unwrap()),
            Box::new(CursorWindow::off_heap().unwrap()),
            Box::new(AbsoluteWindow::optimized().unwrap()),
            Box::new(AbsoluteWindow::with_order(ByteOrder::native().swapped()).unwrap()),
            Box::new(RawAddress::new().unwrap()),
        ]
    }

    #[test]
    fn test_storage_strategies_agree_on_checksum() {
        let mut checksums = Vec::new();
        for strategy in &mut all_strategies() {
            strategy.write(0x0123_4567_89AB_CDEF).unwrap();
            checksums.push(strategy.read(0x0123_4567_89AB_CDEF).unwrap());
        }
        assert!(
            checksums.windows(2).all(|pair| pair[0] == pair[1]),
            "all storage strategies must observe the same bytes: {checksums:?}"
        );
    }

    #[test]
    fn test_strategy_names_are_distinct() {
        let strategies = all_strategies();
        let mut names: Vec<_> = strategies.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), strategies.len());
    }

    #[test]
    fn test_codec_round_trip_strategy() {
        let mut strategy = CodecRoundTrip::new().unwrap();
        strategy.write(41).unwrap();
        assert_eq!(strategy.read(41).unwrap(), 41);
    }
}
