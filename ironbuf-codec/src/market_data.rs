//! Fixed-layout market data message.
//!
//! The byte layout is the wire contract: offsets and widths must match
//! exactly on both sides of an exchange.
//!
//! # Wire Format
//! ```text
//! +0:  symbol     (char[8], ASCII, space-padded)
//! +8:  price      (f64, IEEE-754)
//! +16: quantity   (i32)
//! +20: timestamp  (i64, nanoseconds)
//! ```
//! Total 28 bytes; buffers are conventionally sized to 32 for alignment
//! headroom.
//!
//! Field byte order follows the window performing the access. Windows
//! default to the native order of the running target, the fastest choice for
//! same-machine hand-off. When messages cross machines of unknown
//! endianness, pin an explicit order (little-endian by convention) on both
//! sides via `set_order` - a deployment-time decision, not something the
//! codec negotiates.

use ironbuf_core::Window;

use crate::error::{Error, Result};

/// Byte offset of the symbol field.
pub const SYMBOL_OFFSET: usize = 0;
/// Width of the symbol field in bytes.
pub const SYMBOL_LENGTH: usize = 8;
/// Byte offset of the price field.
pub const PRICE_OFFSET: usize = 8;
/// Byte offset of the quantity field.
pub const QUANTITY_OFFSET: usize = 16;
/// Byte offset of the timestamp field.
pub const TIMESTAMP_OFFSET: usize = 20;

/// Decoded market data message.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketDataMessage {
    /// Instrument symbol, padding trimmed.
    pub symbol: String,
    /// Trade price.
    pub price: f64,
    /// Traded quantity.
    pub quantity: i32,
    /// Event timestamp in nanoseconds.
    pub timestamp_nanos: i64,
}

impl MarketDataMessage {
    /// Encoded message length in bytes.
    pub const ENCODED_LENGTH: usize = 28;

    /// Encodes a message into `window` using absolute offsets only.
    ///
    /// The cursor is never touched, so the same window can be encoded into
    /// repeatedly without any position bookkeeping. Symbols longer than
    /// eight bytes are truncated; shorter ones are space-padded. Truncation
    /// is defined behavior of the format, not an error.
    pub fn encode(
        window: &mut Window,
        symbol: &str,
        price: f64,
        quantity: i32,
        timestamp_nanos: i64,
    ) -> Result<()> {
        let mut field = [b' '; SYMBOL_LENGTH];
        let bytes = symbol.as_bytes();
        let len = bytes.len().min(SYMBOL_LENGTH);
        field[..len].copy_from_slice(&bytes[..len]);

        window.put_bytes_at(SYMBOL_OFFSET, &field)?;
        window.put_at(PRICE_OFFSET, price)?;
        window.put_at(QUANTITY_OFFSET, quantity)?;
        window.put_at(TIMESTAMP_OFFSET, timestamp_nanos)?;
        Ok(())
    }

    /// Decodes a message from `window` by absolute offsets.
    ///
    /// Fails with [`Error::Truncated`] if the window's capacity cannot hold
    /// a whole message. The symbol is right-trimmed of padding; malformed
    /// symbol bytes decode as an empty string rather than failing.
    pub fn decode(window: &Window) -> Result<Self> {
        if window.capacity() < Self::ENCODED_LENGTH {
            return Err(Error::Truncated {
                required: Self::ENCODED_LENGTH,
                available: window.capacity(),
            });
        }

        let mut field = [0u8; SYMBOL_LENGTH];
        window.get_bytes_at(SYMBOL_OFFSET, &mut field)?;
        let trimmed = field
            .iter()
            .rposition(|&b| b != b' ')
            .map_or(&field[..0], |last| &field[..=last]);
        let symbol = std::str::from_utf8(trimmed).unwrap_or("").to_string();

        Ok(Self {
            symbol,
            price: window.get_at(PRICE_OFFSET)?,
            quantity: window.get_at(QUANTITY_OFFSET)?,
            timestamp_nanos: window.get_at(TIMESTAMP_OFFSET)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironbuf_core::{ByteOrder, Storage};

    fn message_window() -> Window {
        Storage::heap(32).unwrap().window()
    }

    #[test]
    fn test_round_trip() {
        let mut window = message_window();
        MarketDataMessage::encode(&mut window, "AAPL", 150.25, 1000, 1_700_000_000_000_000_000)
            .unwrap();

        let msg = MarketDataMessage::decode(&window).unwrap();
        assert_eq!(msg.symbol, "AAPL");
        assert_eq!(msg.price, 150.25);
        assert_eq!(msg.quantity, 1000);
        assert_eq!(msg.timestamp_nanos, 1_700_000_000_000_000_000);
    }

    #[test]
    fn test_encode_never_moves_cursor() {
        let mut window = message_window();
        MarketDataMessage::encode(&mut window, "MSFT", 280.50, 500, 1).unwrap();
        assert_eq!(window.position(), 0);
        let _ = MarketDataMessage::decode(&window).unwrap();
        assert_eq!(window.position(), 0);
    }

    #[test]
    fn test_repeated_encode_without_clear() {
        let mut window = message_window();
        for i in 0..100i32 {
            MarketDataMessage::encode(
                &mut window,
                "NVDA",
                900.0 + f64::from(i) * 0.01,
                1000 + i,
                i64::from(i),
            )
            .unwrap();
        }
        let msg = MarketDataMessage::decode(&window).unwrap();
        assert_eq!(msg.quantity, 1099);
        assert_eq!(msg.timestamp_nanos, 99);
    }

    #[test]
    fn test_symbol_padding_and_trim() {
        let mut window = message_window();
        MarketDataMessage::encode(&mut window, "GE", 181.11, 1, 2).unwrap();

        let mut raw = [0u8; SYMBOL_LENGTH];
        window.get_bytes_at(SYMBOL_OFFSET, &mut raw).unwrap();
        assert_eq!(&raw, b"GE      ");

        let msg = MarketDataMessage::decode(&window).unwrap();
        assert_eq!(msg.symbol, "GE");
    }

    #[test]
    fn test_long_symbol_truncated() {
        let mut window = message_window();
        MarketDataMessage::encode(&mut window, "VERYLONGSYMBOL", 1.0, 1, 1).unwrap();
        let msg = MarketDataMessage::decode(&window).unwrap();
        assert_eq!(msg.symbol, "VERYLONG");
    }

    #[test]
    fn test_empty_symbol() {
        let mut window = message_window();
        MarketDataMessage::encode(&mut window, "", 1.0, 1, 1).unwrap();
        let msg = MarketDataMessage::decode(&window).unwrap();
        assert_eq!(msg.symbol, "");
    }

    #[test]
    fn test_negative_fields() {
        let mut window = message_window();
        MarketDataMessage::encode(&mut window, "TSLA", -0.125, i32::MIN, i64::MIN).unwrap();
        let msg = MarketDataMessage::decode(&window).unwrap();
        assert_eq!(msg.price, -0.125);
        assert_eq!(msg.quantity, i32::MIN);
        assert_eq!(msg.timestamp_nanos, i64::MIN);
    }

    #[test]
    fn test_decode_truncated_window() {
        let storage = Storage::heap(27).unwrap();
        let window = storage.window();
        assert!(matches!(
            MarketDataMessage::decode(&window),
            Err(Error::Truncated {
                required: 28,
                available: 27
            })
        ));
    }

    #[test]
    fn test_minimum_window_is_28_bytes() {
        let storage = Storage::heap(MarketDataMessage::ENCODED_LENGTH).unwrap();
        let mut window = storage.window();
        MarketDataMessage::encode(&mut window, "AMD", 170.0, 7, 9).unwrap();
        assert_eq!(MarketDataMessage::decode(&window).unwrap().quantity, 7);
    }

    // Offsets and widths are the wire contract; under a pinned order the
    // bytes must land exactly where the layout says.
    #[test]
    fn test_wire_layout_little_endian() {
        let mut storage = Storage::heap(32).unwrap();
        storage.set_order(ByteOrder::LittleEndian);
        let mut window = storage.window();
        MarketDataMessage::encode(&mut window, "IBM", 1.5, 0x0102_0304, 0x1122_3344).unwrap();

        let mut raw = [0u8; 28];
        window.get_bytes_at(0, &mut raw).unwrap();
        assert_eq!(&raw[0..8], b"IBM     ");
        assert_eq!(raw[8..16], 1.5f64.to_le_bytes());
        assert_eq!(raw[16..20], [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(raw[20..28], [0x44, 0x33, 0x22, 0x11, 0, 0, 0, 0]);
    }

    #[test]
    fn test_round_trip_off_heap() {
        let storage = Storage::off_heap(32).unwrap();
        let mut window = storage.window();
        MarketDataMessage::encode(&mut window, "GOOGL", 2800.75, 25, 3).unwrap();
        let msg = MarketDataMessage::decode(&window).unwrap();
        assert_eq!(msg.symbol, "GOOGL");
        assert_eq!(msg.price, 2800.75);
        storage.release().unwrap();
    }
}
