/// Implementation of `swf inspect`.
///
/// Scans a file and prints its header fields to stdout, either as aligned
/// text or (with `--json`) as a JSON object.
///
/// # Output format
///
/// ```text
/// Signature:   CWS (zlib)
/// Version:     11
/// File length: 12794 bytes
/// Frame size:  160 x 290 px (3200 x 5800 twips)
/// Bounds:      xmin=0 xmax=3200 ymin=0 ymax=5800 (15-bit fields)
/// Frame rate:  24.00 fps
/// Frame count: 285
/// ```
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use swf_scanner::{BodyMode, MovieHeader, Scanner};
use tracing::debug;

use crate::InspectArgs;

/// Run the `swf inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its header does not
/// scan (unknown or unsupported compression, truncated data, etc.).
pub fn run(args: &InspectArgs) -> Result<()> {
    let path = &args.scan.file;
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;

    let mode = if args.streaming {
        BodyMode::Streaming
    } else {
        BodyMode::Buffered
    };
    debug!(path = %path.display(), ?mode, "inspecting");
    let movie = Scanner::new(args.scan.config(mode))
        .scan_movie(BufReader::new(file))
        .with_context(|| format!("failed to scan {}", path.display()))?;

    if args.json {
        println!("{}", render_json(&movie)?);
    } else {
        println!("{}", render_text(&movie));
    }
    Ok(())
}

/// Aligned, human-readable summary.
pub fn render_text(movie: &MovieHeader) -> String {
    let header = &movie.header;
    let rect = &movie.frame_size;
    [
        format!("Signature:   {} ({})", header.signature, movie.compression),
        format!("Version:     {}", header.version),
        format!("File length: {} bytes", header.file_length),
        format!(
            "Frame size:  {} x {} px ({} x {} twips)",
            rect.width_px(),
            rect.height_px(),
            rect.width_twips(),
            rect.height_twips()
        ),
        format!(
            "Bounds:      xmin={} xmax={} ymin={} ymax={} ({}-bit fields)",
            rect.xmin, rect.xmax, rect.ymin, rect.ymax, rect.bit_length
        ),
        format!("Frame rate:  {} fps", movie.frame_info.frame_rate),
        format!("Frame count: {}", movie.frame_info.frame_count),
    ]
    .join("\n")
}

/// Pretty-printed JSON object.
///
/// # Errors
///
/// Only fails if serialization itself fails, which the plain value types
/// here never trigger.
pub fn render_json(movie: &MovieHeader) -> Result<String> {
    serde_json::to_string_pretty(movie).context("failed to serialize header")
}
