use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::WireError;

/// Size in bytes of the frame rate + frame count pair.
pub const FRAME_INFO_SIZE: usize = 4;

/// Frame rate stored as unsigned 8.8 fixed point.
///
/// On the wire this is a little-endian `u16`, so the fractional byte comes
/// first: 24 fps is `[0x00, 0x18]`, 29.97 fps is roughly `[0xF8, 0x1D]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameRate(u16);

impl FrameRate {
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Whole frames per second, fraction discarded.
    #[must_use]
    pub fn whole(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 256.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.as_f64())
    }
}

impl Serialize for FrameRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// The two byte-aligned fields that follow the frame-size rectangle.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────┐
/// │ Offset │ Size    │ Description                  │
/// ├────────┼─────────┼──────────────────────────────┤
/// │ +0     │ 2 bytes │ Frame rate, 8.8 fixed, LE    │
/// │ +2     │ 2 bytes │ Frame count, u16 LE          │
/// └────────┴─────────┴──────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameInfo {
    pub frame_rate: FrameRate,
    pub frame_count: u16,
}

impl FrameInfo {
    /// Parse frame info from the first 4 bytes of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than
    /// [`FRAME_INFO_SIZE`].
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        match buf {
            [r0, r1, c0, c1, ..] => Ok(Self {
                frame_rate: FrameRate::from_raw(u16::from_le_bytes([*r0, *r1])),
                frame_count: u16::from_le_bytes([*c0, *c1]),
            }),
            _ => Err(WireError::UnexpectedEof { offset: buf.len() }),
        }
    }
}
