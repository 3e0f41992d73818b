// Zlib inflation for 'C' bodies.
//
// Drives `flate2::Decompress` directly rather than `read::ZlibDecoder`: the
// reader adapter reports a stream that stops before its final block as a
// clean EOF, and a buffered scan must reject those.

use flate2::{Decompress, FlushDecompress, Status};

use crate::error::ScanError;

/// Output growth step while inflating.
const CHUNK_SIZE: usize = 32 * 1024;

/// Inflate a complete zlib stream.
///
/// Bytes after the end of the stream are ignored.
///
/// # Errors
///
/// - [`ScanError::Decompression`] if the data is not a zlib stream, is
///   corrupt, or ends before the stream is complete.
/// - [`ScanError::BodyTooLarge`] if the output grows past `max_size`.
pub(crate) fn inflate(data: &[u8], max_size: usize) -> Result<Vec<u8>, ScanError> {
    let mut inflater = Decompress::new(true);
    let initial = data.len().saturating_mul(4).clamp(CHUNK_SIZE, max_size.max(CHUNK_SIZE));
    let mut out = Vec::with_capacity(initial);

    loop {
        if out.len() == out.capacity() {
            out.reserve(CHUNK_SIZE);
        }

        let consumed = total_in(&inflater);
        let produced = out.len();
        let input = data.get(consumed..).unwrap_or_default();

        let status = inflater
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|e| ScanError::Decompression(e.to_string()))?;

        if out.len() > max_size {
            return Err(ScanError::BodyTooLarge { limit: max_size });
        }

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                // Spare output room was available, so no progress means the
                // input ran dry mid-stream.
                if out.len() == produced && total_in(&inflater) == consumed {
                    return Err(ScanError::Decompression(format!(
                        "stream ended after {consumed} bytes without a final block"
                    )));
                }
            }
        }
    }
}

/// Largest zlib stream that can inflate to at most `len` bytes.
///
/// Incompressible input grows under deflate; this is zlib's own
/// `compressBound`, which covers stored-block framing plus the stream
/// header and checksum.
pub(crate) fn compressed_bound(len: usize) -> usize {
    len.saturating_add(len >> 12)
        .saturating_add(len >> 14)
        .saturating_add(len >> 25)
        .saturating_add(13)
}

fn total_in(inflater: &Decompress) -> usize {
    usize::try_from(inflater.total_in()).unwrap_or(usize::MAX)
}
