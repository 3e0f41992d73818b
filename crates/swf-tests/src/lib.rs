//! Fixture builder for SWF header tests.
//!
//! The scanner crates only read SWF; this crate knows how to lay out the
//! bytes of a small movie so tests, benches and the golden generator can
//! describe inputs by their fields instead of hand-packed hex.
//!
//! ```text
//! SwfBuilder::zlib()          signature 'C','W','S'
//!     .version(11)
//!     .frame_size(rect)       bit-packed with the smallest width
//!     .frame_info(0x1800, 285) 8.8 fixed + u16
//!     .filler(12773)          deterministic pseudo-random tag bytes
//!     .build()                header + (compressed) body
//! ```

use std::io::Write;
use std::path::Path;

use flate2::Compression as Level;
use flate2::write::ZlibEncoder;
use swf_wire::header::HEADER_SIZE;
use swf_wire::rect::Rect;

/// MSB-first bit packer, the inverse of `swf_wire::BitReader`.
#[derive(Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bits: usize,
}

impl BitWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `width` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, width: u32) {
        for i in (0..width).rev() {
            if self.bits % 8 == 0 {
                self.bytes.push(0);
            }
            let bit = u8::from((value >> i) & 1 == 1);
            let last = self.bytes.len() - 1;
            self.bytes[last] |= bit << (7 - self.bits % 8);
            self.bits += 1;
        }
    }

    /// Append `value` as a `width`-bit two's-complement field.
    #[allow(clippy::cast_sign_loss)]
    pub fn write_signed(&mut self, value: i32, width: u32) {
        self.write_bits(value as u32, width);
    }

    /// The packed bytes, last byte zero-padded.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Smallest signed field width that holds all four coordinates.
#[must_use]
pub fn min_bit_length(coords: [i32; 4]) -> u8 {
    let widest = coords
        .iter()
        .map(|&v| {
            // Bits needed for the magnitude plus one for the sign.
            let magnitude = if v < 0 { !v } else { v };
            33 - magnitude.leading_zeros()
        })
        .max()
        .unwrap_or(1)
        .min(31);
    u8::try_from(widest).unwrap_or(31)
}

/// Build a `Rect` with the smallest field width for its coordinates.
#[must_use]
pub fn rect(xmin: i32, xmax: i32, ymin: i32, ymax: i32) -> Rect {
    Rect {
        bit_length: min_bit_length([xmin, xmax, ymin, ymax]),
        xmin,
        xmax,
        ymin,
        ymax,
    }
}

/// Bit-pack a rectangle using its `bit_length`.
#[must_use]
pub fn encode_rect(rect: &Rect) -> Vec<u8> {
    let width = u32::from(rect.bit_length);
    let mut writer = BitWriter::new();
    writer.write_bits(width, 5);
    for v in [rect.xmin, rect.xmax, rect.ymin, rect.ymax] {
        writer.write_signed(v, width);
    }
    writer.finish()
}

/// Zlib-compress `data` at the default level.
#[must_use]
pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Level::default());
    encoder
        .write_all(data)
        .and_then(|()| encoder.finish())
        .unwrap_or_else(|e| panic!("in-memory zlib compression failed: {e}"))
}

/// Deterministic filler bytes standing in for a movie's tag stream.
#[must_use]
pub fn filler(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x2545_F491;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            state.to_be_bytes()[1]
        })
        .collect()
}

/// Declarative SWF file builder.
#[derive(Clone, Debug)]
pub struct SwfBuilder {
    signature: [u8; 3],
    version: u8,
    file_length: Option<u32>,
    frame_size: Rect,
    frame_info: Option<(u16, u16)>,
    tail: Vec<u8>,
}

impl SwfBuilder {
    /// Builder with an arbitrary signature. `C` bodies are zlib-compressed,
    /// anything else is written raw.
    #[must_use]
    pub fn with_signature(signature: [u8; 3]) -> Self {
        Self {
            signature,
            version: 10,
            file_length: None,
            frame_size: rect(0, 11000, 0, 8000),
            frame_info: Some((0x1800, 1)),
            tail: vec![0x40, 0x00, 0x00, 0x00], // ShowFrame, End
        }
    }

    #[must_use]
    pub fn uncompressed() -> Self {
        Self::with_signature(*b"FWS")
    }

    #[must_use]
    pub fn zlib() -> Self {
        Self::with_signature(*b"CWS")
    }

    /// LZMA signature with a raw (not actually LZMA) body.
    #[must_use]
    pub fn lzma() -> Self {
        Self::with_signature(*b"ZWS")
    }

    #[must_use]
    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Override the declared file length instead of computing it.
    #[must_use]
    pub fn file_length(mut self, file_length: u32) -> Self {
        self.file_length = Some(file_length);
        self
    }

    #[must_use]
    pub fn frame_size(mut self, rect: Rect) -> Self {
        self.frame_size = rect;
        self
    }

    /// Frame rate as raw 8.8 fixed point, and frame count.
    #[must_use]
    pub fn frame_info(mut self, frame_rate: u16, frame_count: u16) -> Self {
        self.frame_info = Some((frame_rate, frame_count));
        self
    }

    /// Stop the body right after the rectangle.
    #[must_use]
    pub fn without_frame_info(mut self) -> Self {
        self.frame_info = None;
        self.tail.clear();
        self
    }

    /// Replace the tag stream with `len` filler bytes.
    #[must_use]
    pub fn filler(mut self, len: usize) -> Self {
        self.tail = filler(len);
        self
    }

    /// The uncompressed body: rect, frame info, tail.
    #[must_use]
    pub fn body(&self) -> Vec<u8> {
        let mut body = encode_rect(&self.frame_size);
        if let Some((rate, count)) = self.frame_info {
            body.extend_from_slice(&rate.to_le_bytes());
            body.extend_from_slice(&count.to_le_bytes());
        }
        body.extend_from_slice(&self.tail);
        body
    }

    /// Complete file bytes.
    #[must_use]
    pub fn build(&self) -> Vec<u8> {
        let body = self.body();
        let file_length = self.file_length.unwrap_or_else(|| {
            u32::try_from(HEADER_SIZE + body.len()).unwrap_or(u32::MAX)
        });

        let mut out = self.signature.to_vec();
        out.push(self.version);
        out.extend_from_slice(&file_length.to_le_bytes());
        if self.signature[0] == b'C' {
            out.extend_from_slice(&zlib(&body));
        } else {
            out.extend_from_slice(&body);
        }
        out
    }
}

/// Read a golden fixture from `tests/golden/<name>/movie.swf`.
///
/// # Panics
///
/// Panics if the fixture is missing; run `generate_golden` to create it.
#[must_use]
pub fn golden(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden")
        .join(name)
        .join("movie.swf");
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_bit_length_includes_sign_bit() {
        assert_eq!(min_bit_length([0, 0, 0, 0]), 1);
        assert_eq!(min_bit_length([0, 1, 0, 0]), 2);
        assert_eq!(min_bit_length([0, 3200, 0, 5800]), 14);
        assert_eq!(min_bit_length([-1, 0, 0, 0]), 1);
        assert_eq!(min_bit_length([-100, 2000, 0, 0]), 12);
    }

    #[test]
    fn encode_rect_matches_known_bytes() {
        let stage = Rect {
            bit_length: 15,
            xmin: 0,
            xmax: 11000,
            ymin: 0,
            ymax: 8000,
        };
        assert_eq!(
            encode_rect(&stage),
            [0x78, 0x00, 0x05, 0x5F, 0x00, 0x00, 0x0F, 0xA0, 0x00]
        );
    }

    #[test]
    fn encoded_rect_reads_back() {
        let original = rect(-100, 2000, -1, 1);
        let (decoded, consumed) = Rect::read_from(&encode_rect(&original)).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(consumed, Rect::encoded_len(original.bit_length));
    }

    #[test]
    fn build_computes_file_length() {
        let bytes = SwfBuilder::uncompressed().build();
        let declared = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        assert_eq!(declared as usize, bytes.len());
    }

    #[test]
    fn filler_is_deterministic() {
        assert_eq!(filler(64), filler(64));
        assert_ne!(filler(64), vec![0; 64]);
    }
}
