use crate::error::WireError;

/// Widest bit field the cursor will read in one call.
pub const MAX_FIELD_BITS: u32 = 32;

/// Bit cursor over a byte slice.
///
/// SWF packs several header structures as runs of bit fields that are not
/// byte-aligned: a field may start in the middle of one byte and end in the
/// middle of the next. Bits are consumed most-significant first within each
/// byte, and the cursor carries across byte boundaries without realigning
/// between fields.
///
/// ```text
///   byte 0            byte 1
///   7 6 5 4 3 2 1 0   7 6 5 4 3 2 1 0
///   ├─────────┤├──────────────┤├────...
///    field A     field B         field C
///   (5 bits)    (8 bits, straddles bytes)
/// ```
///
/// The position is tracked as an absolute bit index from the start of the
/// slice, so `bit_position() / 8` is the current byte and
/// `bit_position() % 8` the offset inside it.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a cursor positioned at the first bit of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Absolute bit index of the next bit to be read.
    #[must_use]
    pub fn bit_position(&self) -> usize {
        self.pos
    }

    /// Number of bytes touched so far, counting a partially read byte as
    /// consumed. This is where the next byte-aligned read would begin.
    #[must_use]
    pub fn bytes_consumed(&self) -> usize {
        self.pos.div_ceil(8)
    }

    /// Bits left before the end of the slice.
    #[must_use]
    pub fn remaining_bits(&self) -> usize {
        self.buf.len() * 8 - self.pos
    }

    /// Skip to the start of the next byte if the cursor is mid-byte.
    pub fn byte_align(&mut self) {
        self.pos = self.bytes_consumed() * 8;
    }

    /// Read `bits` bits as an unsigned integer, most significant bit first.
    ///
    /// A zero-width read returns 0 and does not move the cursor.
    ///
    /// # Errors
    ///
    /// - [`WireError::BitWidthTooLarge`] if `bits` exceeds 32.
    /// - [`WireError::UnexpectedEof`] if fewer than `bits` bits remain. The
    ///   cursor is left where it was.
    pub fn read_ubits(&mut self, bits: u32) -> Result<u32, WireError> {
        if bits > MAX_FIELD_BITS {
            return Err(WireError::BitWidthTooLarge { bits });
        }
        let width = bits as usize;
        if width > self.remaining_bits() {
            return Err(WireError::UnexpectedEof {
                offset: self.buf.len(),
            });
        }

        let mut value: u32 = 0;
        for _ in 0..width {
            let byte = self.buf[self.pos / 8];
            let bit = (byte >> (7 - (self.pos % 8))) & 1;
            value = (value << 1) | u32::from(bit);
            self.pos += 1;
        }
        Ok(value)
    }

    /// Read `bits` bits as a two's-complement signed integer.
    ///
    /// The top bit of the field is the sign bit, so a 4-bit field holding
    /// `0b1111` reads as `-1` and `0b0111` as `7`.
    ///
    /// # Errors
    ///
    /// Same as [`read_ubits`](Self::read_ubits).
    #[allow(clippy::cast_possible_wrap)]
    pub fn read_sbits(&mut self, bits: u32) -> Result<i32, WireError> {
        let raw = self.read_ubits(bits)?;
        if bits == 0 {
            return Ok(0);
        }
        // Move the field's sign bit into bit 31, then arithmetic-shift back.
        let shift = MAX_FIELD_BITS - bits;
        Ok(((raw << shift) as i32) >> shift)
    }
}
