use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::WireError;

/// The two literal bytes that follow the compression flag: ASCII "WS".
pub const SIGNATURE_LITERAL: [u8; 2] = *b"WS";

/// Size of the signature in bytes (flag + "WS").
pub const SIGNATURE_SIZE: usize = 3;

/// Total header size in bytes (fixed). These bytes are never compressed.
pub const HEADER_SIZE: usize = 8;

/// How the body following the 8-byte header is stored.
///
/// | Flag | Variant        | Body                         |
/// |------|----------------|------------------------------|
/// | `F`  | `Uncompressed` | raw bytes                    |
/// | `C`  | `Zlib`         | zlib stream (SWF 6 and up)   |
/// | `Z`  | `Lzma`         | LZMA stream (SWF 13 and up)  |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    Uncompressed,
    Zlib,
    Lzma,
}

impl Compression {
    /// Map a compression flag byte to its variant.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnknownCompression`] for any byte other than
    /// `F`, `C` or `Z`.
    pub fn from_flag(flag: u8) -> Result<Self, WireError> {
        match flag {
            b'F' => Ok(Self::Uncompressed),
            b'C' => Ok(Self::Zlib),
            b'Z' => Ok(Self::Lzma),
            other => Err(WireError::UnknownCompression { flag: other }),
        }
    }

    /// The flag byte that selects this variant.
    #[must_use]
    pub fn flag(self) -> u8 {
        match self {
            Self::Uncompressed => b'F',
            Self::Zlib => b'C',
            Self::Lzma => b'Z',
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uncompressed => "uncompressed",
            Self::Zlib => "zlib",
            Self::Lzma => "lzma",
        };
        f.write_str(name)
    }
}

/// The three signature bytes exactly as they appear in the file.
///
/// Nothing is validated on read: [`read_from`](Self::read_from) stores
/// whatever is present so callers can choose between strict checking
/// ([`validate`](Self::validate)) and pass-through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    compression_format: u8,
    w: u8,
    s: u8,
}

impl Signature {
    /// Build a signature from its three raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self {
            compression_format: bytes[0],
            w: bytes[1],
            s: bytes[2],
        }
    }

    /// Read the first three bytes of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than three
    /// bytes.
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        match buf {
            [flag, w, s, ..] => Ok(Self::from_bytes([*flag, *w, *s])),
            _ => Err(WireError::UnexpectedEof { offset: buf.len() }),
        }
    }

    /// The raw signature bytes.
    #[must_use]
    pub fn to_bytes(self) -> [u8; SIGNATURE_SIZE] {
        [self.compression_format, self.w, self.s]
    }

    /// The compression flag as a character (`'F'`, `'C'` or `'Z'` in a
    /// well-formed file).
    #[must_use]
    pub fn compression_format(self) -> char {
        char::from(self.compression_format)
    }

    /// The raw compression flag byte.
    #[must_use]
    pub fn flag(self) -> u8 {
        self.compression_format
    }

    #[must_use]
    pub fn w(self) -> char {
        char::from(self.w)
    }

    #[must_use]
    pub fn s(self) -> char {
        char::from(self.s)
    }

    /// Decode the compression flag.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnknownCompression`] if the flag is not one of
    /// `F`, `C`, `Z`.
    pub fn compression(self) -> Result<Compression, WireError> {
        Compression::from_flag(self.compression_format)
    }

    /// Whether bytes 1–2 are the literal "WS".
    #[must_use]
    pub fn has_valid_literal(self) -> bool {
        [self.w, self.s] == SIGNATURE_LITERAL
    }

    /// Strict check of the "WS" literal.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidSignature`] carrying the two bytes found.
    pub fn validate(self) -> Result<(), WireError> {
        if self.has_valid_literal() {
            Ok(())
        } else {
            Err(WireError::InvalidSignature {
                found: [self.w, self.s],
            })
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.compression_format(), self.w(), self.s())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// SWF file header — the first 8 bytes of every file.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────────────┐
/// │ Offset │ Size    │ Description                              │
/// ├────────┼─────────┼──────────────────────────────────────────┤
/// │ 0x00   │ 1 byte  │ Compression flag: 'F', 'C' or 'Z'        │
/// │ 0x01   │ 2 bytes │ Literal "WS"                             │
/// │ 0x03   │ 1 byte  │ Version                                  │
/// │ 0x04   │ 4 bytes │ File length, u32 LE (uncompressed total) │
/// └────────┴─────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Header {
    pub signature: Signature,
    pub version: u8,
    /// Total uncompressed size of the file, header included.
    pub file_length: u32,
}

impl Header {
    /// Parse a header from the first 8 bytes of `buf`.
    ///
    /// The signature is taken as-is; see [`Signature::validate`] and
    /// [`Signature::compression`] for the checks a caller may apply.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than
    /// [`HEADER_SIZE`].
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() < HEADER_SIZE {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        let signature = Signature::read_from(buf)?;
        let version = buf[3];
        let file_length = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);

        Ok(Self {
            signature,
            version,
            file_length,
        })
    }

    /// Decode the compression flag of the signature.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnknownCompression`] for an unrecognised flag.
    pub fn compression(&self) -> Result<Compression, WireError> {
        self.signature.compression()
    }
}
