use swf_wire::WireError;
use swf_wire::header::Compression;

/// Errors that can occur while scanning an SWF header.
///
/// Every error is terminal: the scan either returns a complete header and
/// frame size or one of these, never a partial result.
///
/// ```text
///   ScanError
///   ├── UnknownFormat        ← first byte is not 'F', 'C' or 'Z'
///   ├── UnsupportedFormat    ← 'Z' (LZMA) body, recognised but not decoded
///   ├── Decompression        ← 'C' body is not a valid zlib stream
///   ├── TruncatedInput       ← input ended inside a fixed field or the rect
///   ├── InvalidSignature     ← strict policy and bytes 1–2 are not "WS"
///   ├── BodyTooLarge         ← body exceeds the configured limit
///   ├── Wire(WireError)      ← any other wire-level failure
///   └── Io(std::io::Error)   ← the byte source itself failed
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The compression flag is not one of the three known values.
    #[error("unknown format: compression flag {flag:#04X} is not 'F', 'C' or 'Z'")]
    UnknownFormat { flag: u8 },

    /// The compression flag is known but its body codec is not implemented.
    #[error("unsupported format: {compression} compressed bodies are not supported")]
    UnsupportedFormat { compression: Compression },

    /// The zlib decoder rejected the body.
    ///
    /// Covers corrupt streams as well as streams that stop before their
    /// final block.
    #[error("zlib decompression failed: {0}")]
    Decompression(String),

    /// Fewer bytes were available than a field required.
    ///
    /// `offset` is measured in the uncompressed file, so an error inside
    /// the frame-size rectangle reports a value of at least 8.
    #[error("truncated input: data ends at offset {offset}")]
    TruncatedInput { offset: usize },

    /// Strict signature checking found something other than "WS".
    #[error("invalid signature: expected \"WS\" after the compression flag, got {found:02X?}")]
    InvalidSignature { found: [u8; 2] },

    /// The (decompressed) body is larger than `ScanConfig::max_body_size`.
    #[error("body exceeds the {limit}-byte limit")]
    BodyTooLarge { limit: usize },

    /// A wire-level error with no more specific scan counterpart.
    #[error(transparent)]
    Wire(WireError),

    /// An I/O error from the underlying reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Convert a wire error raised while reading a slice that starts `base`
    /// bytes into the uncompressed file.
    pub(crate) fn from_wire_at(err: WireError, base: usize) -> Self {
        match err {
            WireError::UnexpectedEof { offset } => Self::TruncatedInput {
                offset: base + offset,
            },
            WireError::InvalidSignature { found } => Self::InvalidSignature { found },
            WireError::UnknownCompression { flag } => Self::UnknownFormat { flag },
            other @ WireError::BitWidthTooLarge { .. } => Self::Wire(other),
        }
    }
}

impl From<WireError> for ScanError {
    fn from(err: WireError) -> Self {
        Self::from_wire_at(err, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_errors_map_to_scan_kinds() {
        assert!(matches!(
            ScanError::from(WireError::UnknownCompression { flag: b'X' }),
            ScanError::UnknownFormat { flag: b'X' }
        ));
        assert!(matches!(
            ScanError::from(WireError::InvalidSignature { found: *b"XX" }),
            ScanError::InvalidSignature { found } if &found == b"XX"
        ));
        assert!(matches!(
            ScanError::from_wire_at(WireError::UnexpectedEof { offset: 3 }, 8),
            ScanError::TruncatedInput { offset: 11 }
        ));
        assert!(matches!(
            ScanError::from(WireError::BitWidthTooLarge { bits: 40 }),
            ScanError::Wire(_)
        ));
    }

    #[test]
    fn display_names_the_offending_byte() {
        let err = ScanError::UnknownFormat { flag: b'X' };
        assert_eq!(
            err.to_string(),
            "unknown format: compression flag 0x58 is not 'F', 'C' or 'Z'"
        );
        let err = ScanError::UnsupportedFormat {
            compression: Compression::Lzma,
        };
        assert_eq!(
            err.to_string(),
            "unsupported format: lzma compressed bodies are not supported"
        );
    }
}
