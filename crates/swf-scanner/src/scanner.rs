use std::io::{self, Read};

use flate2::read::ZlibDecoder;
use serde::Serialize;
use swf_wire::header::{Compression, HEADER_SIZE, Header};
use swf_wire::movie::{FRAME_INFO_SIZE, FrameInfo};
use swf_wire::rect::Rect;
use tracing::{debug, info_span, warn};

use crate::config::{BodyMode, ScanConfig, SignaturePolicy};
use crate::decompression;
use crate::error::ScanError;

/// A fully buffered scan: header, frame size, and the uncompressed body.
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ ScannedSwf                                               │
/// │   header:      Header      ← signature, version, length  │
/// │   compression: Compression ← decoded from the flag byte  │
/// │   frame_size:  Rect        ← first record of the body    │
/// │   body:        Vec<u8>     ← everything after the header │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// For an uncompressed (`FWS`) file `body` is the raw bytes that followed
/// the header, untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedSwf {
    pub header: Header,
    pub compression: Compression,
    pub frame_size: Rect,
    pub body: Vec<u8>,
}

/// Header, frame size, and the frame rate / count that follow it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MovieHeader {
    pub header: Header,
    pub compression: Compression,
    pub frame_size: Rect,
    pub frame_info: FrameInfo,
}

/// SWF header scanner.
///
/// Scanning is a straight pipeline with no branching back:
///
///   1. **Header**: read the 8 uncompressed bytes (signature, version,
///      file length). Fewer than 8 bytes is `TruncatedInput`.
///   2. **Signature**: under [`SignaturePolicy::Strict`] reject anything
///      but "WS" in bytes 1–2; otherwise pass it through.
///   3. **Dispatch** on the compression flag: `F` keeps the body as is,
///      `C` inflates it with zlib, `Z` is `UnsupportedFormat`, anything
///      else `UnknownFormat`. Nothing past the header is read for `Z` or an
///      unknown flag.
///   4. **Body**: in [`BodyMode::Buffered`] the rest of the source is read
///      and decompressed in one go; in [`BodyMode::Streaming`] only the
///      bytes needed by step 5 are pulled.
///   5. **Frame size**: parse the bit-packed `Rect` at the start of the
///      body.
///
/// The reader is taken by value; pass `&mut reader` to keep using it, and
/// drop it as usual to release the underlying file or socket.
///
/// # Example
///
/// ```rust
/// use swf_scanner::Scanner;
///
/// // FWS, version 10, length 21, then a 15-bit 550x400 px rect.
/// let bytes = [
///     b'F', b'W', b'S', 10, 21, 0, 0, 0,
///     0x78, 0x00, 0x05, 0x5F, 0x00, 0x00, 0x0F, 0xA0, 0x00,
/// ];
/// let (header, rect) = Scanner::default().scan(&bytes[..]).unwrap();
/// assert_eq!(header.signature.to_string(), "FWS");
/// assert_eq!(rect.xmax / 20, 550);
/// assert_eq!(rect.ymax / 20, 400);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    config: ScanConfig,
}

/// Scan with the default configuration (permissive signature, buffered
/// body).
///
/// # Errors
///
/// See [`Scanner::scan`].
pub fn scan<R: Read>(reader: R) -> Result<(Header, Rect), ScanError> {
    Scanner::default().scan(reader)
}

impl Scanner {
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Read the header and frame size from `reader`.
    ///
    /// # Errors
    ///
    /// - [`ScanError::TruncatedInput`] if the source ends inside the header
    ///   or the frame-size rectangle.
    /// - [`ScanError::InvalidSignature`] under the strict policy.
    /// - [`ScanError::UnknownFormat`] / [`ScanError::UnsupportedFormat`] for
    ///   a flag other than `F` or `C`.
    /// - [`ScanError::Decompression`] if a `C` body is not valid zlib.
    /// - [`ScanError::BodyTooLarge`] if the buffered body exceeds the limit.
    /// - [`ScanError::Io`] if the reader fails.
    pub fn scan<R: Read>(&self, reader: R) -> Result<(Header, Rect), ScanError> {
        let span = info_span!("scan", mode = ?self.config.body_mode);
        let _guard = span.enter();

        match self.config.body_mode {
            BodyMode::Buffered => {
                let scanned = self.buffered(reader)?;
                Ok((scanned.header, scanned.frame_size))
            }
            BodyMode::Streaming => {
                let mut stream = self.open_stream(reader)?;
                let (frame_size, _) = stream.read_rect()?;
                Ok((stream.header, frame_size))
            }
        }
    }

    /// Scan and keep the whole uncompressed body.
    ///
    /// Always buffers, whatever the configured [`BodyMode`].
    ///
    /// # Errors
    ///
    /// Same as [`scan`](Self::scan).
    pub fn scan_document<R: Read>(&self, reader: R) -> Result<ScannedSwf, ScanError> {
        let span = info_span!("scan_document");
        let _guard = span.enter();
        self.buffered(reader)
    }

    /// Scan the header, frame size, frame rate and frame count.
    ///
    /// # Errors
    ///
    /// Same as [`scan`](Self::scan); `TruncatedInput` also covers a body
    /// that ends before the 4 bytes of frame info.
    pub fn scan_movie<R: Read>(&self, reader: R) -> Result<MovieHeader, ScanError> {
        let span = info_span!("scan_movie", mode = ?self.config.body_mode);
        let _guard = span.enter();

        match self.config.body_mode {
            BodyMode::Buffered => {
                let scanned = self.buffered(reader)?;
                let offset = Rect::encoded_len(scanned.frame_size.bit_length);
                let frame_info = read_frame_info(&scanned.body, offset)?;
                Ok(MovieHeader {
                    header: scanned.header,
                    compression: scanned.compression,
                    frame_size: scanned.frame_size,
                    frame_info,
                })
            }
            BodyMode::Streaming => {
                let mut stream = self.open_stream(reader)?;
                let (frame_size, rect_len) = stream.read_rect()?;
                let mut buf = [0u8; FRAME_INFO_SIZE];
                stream.read_exact(&mut buf, HEADER_SIZE + rect_len)?;
                let frame_info = FrameInfo::read_from(&buf)?;
                debug!(
                    frame_rate = %frame_info.frame_rate,
                    frame_count = frame_info.frame_count,
                    "read frame info"
                );
                Ok(MovieHeader {
                    header: stream.header,
                    compression: stream.compression,
                    frame_size,
                    frame_info,
                })
            }
        }
    }

    /// Scan an in-memory file.
    ///
    /// # Errors
    ///
    /// Same as [`scan`](Self::scan).
    pub fn scan_bytes(&self, bytes: &[u8]) -> Result<(Header, Rect), ScanError> {
        self.scan(bytes)
    }

    fn buffered<R: Read>(&self, mut reader: R) -> Result<ScannedSwf, ScanError> {
        let (header, compression) = self.read_header(&mut reader)?;
        let limit = self.config.max_body_size;

        let body = match compression {
            Compression::Uncompressed => read_limited(&mut reader, limit, limit)?,
            Compression::Zlib => {
                let cap = decompression::compressed_bound(limit);
                let raw = read_limited(&mut reader, cap, limit)?;
                let body = decompression::inflate(&raw, limit)?;
                debug!(compressed = raw.len(), inflated = body.len(), "inflated body");
                body
            }
            Compression::Lzma => return Err(ScanError::UnsupportedFormat { compression }),
        };

        let frame_size = parse_frame_size(&body)?;
        Ok(ScannedSwf {
            header,
            compression,
            frame_size,
            body,
        })
    }

    fn open_stream<R: Read>(&self, mut reader: R) -> Result<BodyStream<R>, ScanError> {
        let (header, compression) = self.read_header(&mut reader)?;
        let body = match compression {
            Compression::Uncompressed => BodyReader::Raw(reader),
            Compression::Zlib => BodyReader::Zlib(ZlibDecoder::new(reader)),
            Compression::Lzma => return Err(ScanError::UnsupportedFormat { compression }),
        };
        Ok(BodyStream {
            header,
            compression,
            body,
        })
    }

    /// Steps 1–3: fixed header, signature policy, compression dispatch.
    pub(crate) fn read_header<R: Read>(
        &self,
        reader: &mut R,
    ) -> Result<(Header, Compression), ScanError> {
        let mut buf = [0u8; HEADER_SIZE];
        let filled = fill(reader, &mut buf)?;
        if filled < HEADER_SIZE {
            return Err(ScanError::TruncatedInput { offset: filled });
        }
        self.check_header(&buf)
    }

    /// Parse and check an 8-byte header that has already been read.
    pub(crate) fn check_header(
        &self,
        buf: &[u8; HEADER_SIZE],
    ) -> Result<(Header, Compression), ScanError> {
        let header = Header::read_from(buf)?;
        debug!(
            signature = %header.signature,
            version = header.version,
            file_length = header.file_length,
            "read header"
        );

        if !header.signature.has_valid_literal() {
            match self.config.signature_policy {
                SignaturePolicy::Strict => header.signature.validate()?,
                SignaturePolicy::Permissive => {
                    warn!(
                        signature = %header.signature,
                        "signature literal is not \"WS\", passing through"
                    );
                }
            }
        }

        let compression = header.compression()?;
        Ok((header, compression))
    }
}

/// Parse the frame-size rectangle at the start of an uncompressed body.
pub(crate) fn parse_frame_size(body: &[u8]) -> Result<Rect, ScanError> {
    let (rect, _) =
        Rect::read_from(body).map_err(|e| ScanError::from_wire_at(e, HEADER_SIZE))?;
    debug!(
        bit_length = rect.bit_length,
        xmin = rect.xmin,
        xmax = rect.xmax,
        ymin = rect.ymin,
        ymax = rect.ymax,
        "read frame size"
    );
    Ok(rect)
}

fn read_frame_info(body: &[u8], offset: usize) -> Result<FrameInfo, ScanError> {
    let rest = body.get(offset..).unwrap_or_default();
    FrameInfo::read_from(rest).map_err(|e| ScanError::from_wire_at(e, HEADER_SIZE + offset))
}

/// Read the remainder of `reader`, failing once more than `cap` bytes
/// arrive. `limit` is the configured body limit reported in the error.
fn read_limited<R: Read>(
    reader: &mut R,
    cap: usize,
    limit: usize,
) -> Result<Vec<u8>, ScanError> {
    let mut out = Vec::new();
    let take = u64::try_from(cap).unwrap_or(u64::MAX).saturating_add(1);
    reader.take(take).read_to_end(&mut out)?;
    if out.len() > cap {
        return Err(ScanError::BodyTooLarge { limit });
    }
    Ok(out)
}

/// Read until `buf` is full or the source is exhausted, returning the number
/// of bytes read. A short count means EOF, not an error.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Body source for the streaming mode.
enum BodyReader<R: Read> {
    Raw(R),
    Zlib(ZlibDecoder<R>),
}

impl<R: Read> Read for BodyReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Raw(r) => r.read(buf),
            Self::Zlib(r) => r.read(buf),
        }
    }
}

/// A header that has been read and checked, with its body still unread.
struct BodyStream<R: Read> {
    header: Header,
    compression: Compression,
    body: BodyReader<R>,
}

impl<R: Read> BodyStream<R> {
    /// Fill `buf` from the body; `offset` is the file offset of `buf[0]`,
    /// used for `TruncatedInput`.
    fn read_exact(&mut self, buf: &mut [u8], offset: usize) -> Result<(), ScanError> {
        let filled = match fill(&mut self.body, buf) {
            Ok(n) => n,
            // The zlib adapter reports corrupt data as an I/O error.
            Err(e) if matches!(self.body, BodyReader::Zlib(_)) => {
                return Err(ScanError::Decompression(e.to_string()));
            }
            Err(e) => return Err(ScanError::Io(e)),
        };
        if filled < buf.len() {
            return Err(ScanError::TruncatedInput {
                offset: offset + filled,
            });
        }
        Ok(())
    }

    /// Pull exactly the bytes of the frame-size rectangle and parse them.
    ///
    /// Returns the rectangle and its encoded length in bytes.
    fn read_rect(&mut self) -> Result<(Rect, usize), ScanError> {
        let mut first = [0u8; 1];
        self.read_exact(&mut first, HEADER_SIZE)?;

        let len = Rect::encoded_len(Rect::bit_length_of(first[0]));
        let mut buf = vec![0u8; len];
        buf[0] = first[0];
        self.read_exact(&mut buf[1..], HEADER_SIZE + 1)?;

        let rect = parse_frame_size(&buf)?;
        Ok((rect, len))
    }
}
