use serde::Serialize;

use crate::bits::BitReader;
use crate::error::WireError;

/// Width of the `bit_length` prefix in bits.
pub const BIT_LENGTH_BITS: u32 = 5;

/// SWF measures coordinates in twips, twenty to the pixel.
pub const TWIPS_PER_PIXEL: i32 = 20;

/// Bit-packed rectangle record.
///
/// ```text
/// ┌────────────┬────────┬────────┬────────┬────────┐
/// │ bit_length │ xmin   │ xmax   │ ymin   │ ymax   │
/// │ 5 bits (u) │ N (s)  │ N (s)  │ N (s)  │ N (s)  │
/// └────────────┴────────┴────────┴────────┴────────┘
///   N = bit_length, (u) unsigned, (s) two's-complement signed
/// ```
///
/// The record is read MSB-first with no alignment between fields, and
/// occupies `ceil((5 + 4 * N) / 8)` bytes. All coordinates are in twips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    /// Bit width of each coordinate field, `0..=31`.
    pub bit_length: u8,
    pub xmin: i32,
    pub xmax: i32,
    pub ymin: i32,
    pub ymax: i32,
}

impl Rect {
    /// Read a rectangle at the cursor's current position.
    ///
    /// The cursor is left immediately after `ymax`, possibly mid-byte; call
    /// [`BitReader::byte_align`] before any byte-aligned field that follows.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if the input ends before all
    /// `5 + 4 * bit_length` bits are available.
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self, WireError> {
        let bits = reader.read_ubits(BIT_LENGTH_BITS)?;
        let xmin = reader.read_sbits(bits)?;
        let xmax = reader.read_sbits(bits)?;
        let ymin = reader.read_sbits(bits)?;
        let ymax = reader.read_sbits(bits)?;

        Ok(Self {
            // A 5-bit field always fits.
            bit_length: u8::try_from(bits).unwrap_or(u8::MAX),
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// Read a rectangle from the start of `buf`.
    ///
    /// Returns the rectangle and the number of bytes it occupies (rounded up
    /// to a whole byte).
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is too short.
    pub fn read_from(buf: &[u8]) -> Result<(Self, usize), WireError> {
        let mut reader = BitReader::new(buf);
        let rect = Self::read(&mut reader)?;
        Ok((rect, reader.bytes_consumed()))
    }

    /// Number of bytes a rectangle with the given field width occupies.
    #[must_use]
    pub fn encoded_len(bit_length: u8) -> usize {
        (BIT_LENGTH_BITS as usize + 4 * usize::from(bit_length)).div_ceil(8)
    }

    /// Extract `bit_length` from the first byte of an encoded rectangle.
    ///
    /// Streaming readers pull this byte first and then the remaining
    /// `encoded_len(bit_length) - 1` bytes.
    #[must_use]
    pub fn bit_length_of(first_byte: u8) -> u8 {
        first_byte >> (8 - BIT_LENGTH_BITS)
    }

    #[must_use]
    pub fn width_twips(&self) -> i32 {
        self.xmax - self.xmin
    }

    #[must_use]
    pub fn height_twips(&self) -> i32 {
        self.ymax - self.ymin
    }

    #[must_use]
    pub fn width_px(&self) -> f64 {
        f64::from(self.width_twips()) / f64::from(TWIPS_PER_PIXEL)
    }

    #[must_use]
    pub fn height_px(&self) -> f64 {
        f64::from(self.height_twips()) / f64::from(TWIPS_PER_PIXEL)
    }
}
