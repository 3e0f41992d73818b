/// Implementation of `swf validate`.
///
/// Runs a buffered scan, which decompresses the entire body, and reports
/// either a series of success checkmarks (`✓`) or a diagnostic failure
/// line (`✗`). A file length that disagrees with the body is flagged with
/// `⚠` but is not a failure.
///
/// # Success output
///
/// ```text
/// ✓ Signature: CWS (zlib)
/// ✓ Header: version 11, declares 12794 bytes
/// ✓ Body: 12786 bytes after decompression
/// ✓ Frame size: 160 x 290 px
/// ✓ File length: matches body
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: unknown compression flag 0x58 ('X')
/// ```
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result, anyhow};
use swf_scanner::{BodyMode, ScanError, ScannedSwf, Scanner};
use swf_wire::header::HEADER_SIZE;
use tracing::debug;

use crate::ValidateArgs;

/// Run the `swf validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or fails to scan.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let path = &args.scan.file;
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;

    let scanner = Scanner::new(args.scan.config(BodyMode::Buffered));
    debug!(path = %path.display(), config = ?scanner.config(), "validating");
    match scanner.scan_document(BufReader::new(file)) {
        Ok(scanned) => {
            println!("{}", report(&scanned));
            Ok(())
        }
        Err(e) => {
            println!("✗ Error: {}", diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

/// Success report for a file that scanned cleanly.
pub fn report(scanned: &ScannedSwf) -> String {
    let header = &scanned.header;
    let rect = &scanned.frame_size;
    let actual_len = HEADER_SIZE + scanned.body.len();

    let length_line = if u32::try_from(actual_len).is_ok_and(|len| len == header.file_length) {
        "✓ File length: matches body".to_string()
    } else {
        format!(
            "⚠ File length: header declares {} bytes, found {actual_len}",
            header.file_length
        )
    };

    [
        format!("✓ Signature: {} ({})", header.signature, scanned.compression),
        format!(
            "✓ Header: version {}, declares {} bytes",
            header.version, header.file_length
        ),
        format!("✓ Body: {} bytes after decompression", scanned.body.len()),
        format!("✓ Frame size: {} x {} px", rect.width_px(), rect.height_px()),
        length_line,
    ]
    .join("\n")
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `ScanError` into a human-readable diagnostic string.
///
/// ```text
/// ┌────────────────────┬──────────────────────────────────────────────┐
/// │ ScanError variant  │ Diagnostic                                   │
/// ├────────────────────┼──────────────────────────────────────────────┤
/// │ UnknownFormat      │ "unknown compression flag 0x58 ('X')"        │
/// │ UnsupportedFormat  │ "LZMA-compressed (ZWS) files are not …"      │
/// │ TruncatedInput     │ "file is truncated at byte N"                │
/// │ InvalidSignature   │ "not an SWF file: signature bytes …"         │
/// │ everything else    │ "<error Display>"                            │
/// └────────────────────┴──────────────────────────────────────────────┘
/// ```
pub fn diagnostic(e: &ScanError) -> String {
    match e {
        ScanError::UnknownFormat { flag } => {
            let shown = if flag.is_ascii_graphic() {
                format!(" ('{}')", char::from(*flag))
            } else {
                String::new()
            };
            format!("unknown compression flag {flag:#04X}{shown}")
        }
        ScanError::UnsupportedFormat { .. } => {
            "LZMA-compressed (ZWS) files are not supported".to_string()
        }
        ScanError::TruncatedInput { offset } => format!("file is truncated at byte {offset}"),
        ScanError::InvalidSignature { found } => format!(
            "not an SWF file: signature bytes 1-2 are {:?}, expected \"WS\"",
            String::from_utf8_lossy(found)
        ),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use swf_wire::header::{Compression, Header, Signature};
    use swf_wire::rect::Rect;

    use super::*;

    fn scanned(file_length: u32) -> ScannedSwf {
        ScannedSwf {
            header: Header {
                signature: Signature::from_bytes(*b"FWS"),
                version: 10,
                file_length,
            },
            compression: Compression::Uncompressed,
            frame_size: Rect {
                bit_length: 15,
                xmin: 0,
                xmax: 11000,
                ymin: 0,
                ymax: 8000,
            },
            body: vec![0; 13],
        }
    }

    #[test]
    fn report_for_consistent_file() {
        assert_snapshot!(report(&scanned(21)), @r"
        ✓ Signature: FWS (uncompressed)
        ✓ Header: version 10, declares 21 bytes
        ✓ Body: 13 bytes after decompression
        ✓ Frame size: 550 x 400 px
        ✓ File length: matches body
        ");
    }

    #[test]
    fn report_flags_length_mismatch() {
        let text = report(&scanned(12794));
        assert!(text.ends_with("⚠ File length: header declares 12794 bytes, found 21"));
    }

    #[test]
    fn diagnostics() {
        assert_eq!(
            diagnostic(&ScanError::UnknownFormat { flag: b'X' }),
            "unknown compression flag 0x58 ('X')"
        );
        assert_eq!(
            diagnostic(&ScanError::UnknownFormat { flag: 0x00 }),
            "unknown compression flag 0x00"
        );
        assert_eq!(
            diagnostic(&ScanError::UnsupportedFormat {
                compression: Compression::Lzma
            }),
            "LZMA-compressed (ZWS) files are not supported"
        );
        assert_eq!(
            diagnostic(&ScanError::TruncatedInput { offset: 5 }),
            "file is truncated at byte 5"
        );
        assert_eq!(
            diagnostic(&ScanError::InvalidSignature { found: *b"XY" }),
            "not an SWF file: signature bytes 1-2 are \"XY\", expected \"WS\""
        );
        assert_eq!(
            diagnostic(&ScanError::BodyTooLarge { limit: 10 }),
            "body exceeds the 10-byte limit"
        );
    }
}
