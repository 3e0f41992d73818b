/// Errors raised while reading SWF header fields out of a byte slice.
///
/// Every variant that can be tied to a position carries the byte offset
/// (from the start of the slice being read) where the read failed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WireError {
    /// Input ended before a complete field could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// Bytes 1–2 of the signature were not the literal "WS".
    #[error("invalid signature: expected \"WS\" after the compression flag, got {found:02X?}")]
    InvalidSignature { found: [u8; 2] },

    /// The compression flag byte was not one of `F`, `C`, `Z`.
    #[error("unknown compression flag {flag:#04X}")]
    UnknownCompression { flag: u8 },

    /// A bit-field width was requested beyond what fits in 32 bits.
    #[error("bit field width {bits} exceeds 32")]
    BitWidthTooLarge { bits: u32 },
}
