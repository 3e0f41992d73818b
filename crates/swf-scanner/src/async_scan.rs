use swf_wire::header::{Compression, HEADER_SIZE, Header};
use swf_wire::rect::Rect;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{Instrument, debug, info_span};

use crate::decompression;
use crate::error::ScanError;
use crate::scanner::{Scanner, parse_frame_size};

impl Scanner {
    /// Asynchronous [`scan`](Self::scan) over any `AsyncRead` source.
    ///
    /// Bytes are pulled off `reader` asynchronously; parsing is the same
    /// synchronous pipeline. The body is always buffered, whatever the
    /// configured [`BodyMode`](crate::BodyMode).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use swf_scanner::Scanner;
    ///
    /// async fn frame_size(path: &str) -> Result<(i32, i32), Box<dyn std::error::Error>> {
    ///     let file = tokio::fs::File::open(path).await?;
    ///     let (_, rect) = Scanner::default().scan_async(file).await?;
    ///     Ok((rect.width_twips(), rect.height_twips()))
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`scan`](Self::scan).
    pub async fn scan_async<R: AsyncRead + Unpin>(
        &self,
        reader: R,
    ) -> Result<(Header, Rect), ScanError> {
        self.scan_async_inner(reader)
            .instrument(info_span!("scan_async"))
            .await
    }

    async fn scan_async_inner<R: AsyncRead + Unpin>(
        &self,
        mut reader: R,
    ) -> Result<(Header, Rect), ScanError> {
        let mut buf = [0u8; HEADER_SIZE];
        let mut filled = 0;
        while filled < HEADER_SIZE {
            let n = reader.read(&mut buf[filled..]).await?;
            if n == 0 {
                return Err(ScanError::TruncatedInput { offset: filled });
            }
            filled += n;
        }
        let (header, compression) = self.check_header(&buf)?;

        let limit = self.config().max_body_size;
        let body = match compression {
            Compression::Uncompressed => read_limited(&mut reader, limit, limit).await?,
            Compression::Zlib => {
                let cap = decompression::compressed_bound(limit);
                let raw = read_limited(&mut reader, cap, limit).await?;
                let body = decompression::inflate(&raw, limit)?;
                debug!(compressed = raw.len(), inflated = body.len(), "inflated body");
                body
            }
            Compression::Lzma => return Err(ScanError::UnsupportedFormat { compression }),
        };

        let frame_size = parse_frame_size(&body)?;
        Ok((header, frame_size))
    }
}

async fn read_limited<R: AsyncRead + Unpin>(
    reader: &mut R,
    cap: usize,
    limit: usize,
) -> Result<Vec<u8>, ScanError> {
    let mut out = Vec::new();
    let take = u64::try_from(cap).unwrap_or(u64::MAX).saturating_add(1);
    reader.take(take).read_to_end(&mut out).await?;
    if out.len() > cap {
        return Err(ScanError::BodyTooLarge { limit });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::ZlibEncoder;

    use super::*;
    use crate::config::ScanConfig;

    const STAGE_RECT: [u8; 9] = [0x78, 0x00, 0x01, 0x90, 0x00, 0x00, 0x0B, 0x54, 0x00];

    fn cws(body: &[u8]) -> Vec<u8> {
        let mut out = b"CWS".to_vec();
        out.push(11);
        out.extend_from_slice(&12794u32.to_le_bytes());
        let mut encoder = ZlibEncoder::new(out, flate2::Compression::default());
        encoder.write_all(body).unwrap();
        encoder.finish().unwrap()
    }

    #[tokio::test]
    async fn scan_async_matches_sync_scan() {
        let bytes = cws(&STAGE_RECT);
        let scanner = Scanner::default();
        let expected = scanner.scan(bytes.as_slice()).unwrap();
        let actual = scanner.scan_async(bytes.as_slice()).await.unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.0.file_length, 12794);
        assert_eq!(actual.1.xmax / 20, 160);
    }

    #[tokio::test]
    async fn scan_async_over_duplex_stream() {
        let bytes = cws(&STAGE_RECT);
        let (mut tx, rx) = tokio::io::duplex(4);
        let writer = tokio::spawn(async move {
            use tokio::io::AsyncWriteExt;
            tx.write_all(&bytes).await.unwrap();
        });
        let (header, rect) = Scanner::default().scan_async(rx).await.unwrap();
        writer.await.unwrap();
        assert_eq!(header.signature.to_string(), "CWS");
        assert_eq!(rect.ymax / 20, 290);
    }

    #[tokio::test]
    async fn scan_async_truncated_header() {
        let result = Scanner::default().scan_async(&b"CWS\x0b"[..]).await;
        assert!(matches!(result, Err(ScanError::TruncatedInput { offset: 4 })));
    }

    #[tokio::test]
    async fn scan_async_honours_signature_policy() {
        let mut bytes = cws(&STAGE_RECT);
        bytes[1] = b'X';
        let result = Scanner::new(ScanConfig::strict())
            .scan_async(bytes.as_slice())
            .await;
        assert!(matches!(result, Err(ScanError::InvalidSignature { .. })));
    }

    #[tokio::test]
    async fn scan_async_rejects_lzma() {
        let mut bytes = cws(&STAGE_RECT);
        bytes[0] = b'Z';
        let result = Scanner::default().scan_async(bytes.as_slice()).await;
        assert!(matches!(result, Err(ScanError::UnsupportedFormat { .. })));
    }
}
