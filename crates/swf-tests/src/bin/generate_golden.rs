//! Golden fixture generator for the SWF header test suite.
//!
//! This binary creates all fixture files under `tests/golden/`. Run it again
//! after changing the fixture builder to regenerate the committed binaries.
//! Each fixture directory holds the movie and a `manifest.json` describing
//! the header fields the tests expect to read back.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p swf-tests
//! ```
//!
//! # Generated fixtures
//!
//! | Directory        | Contents                                          |
//! |------------------|---------------------------------------------------|
//! | signup           | CWS v11, 160 x 290 px, 24 fps, 285 frames         |
//! | uncompressed     | FWS v10, 550 x 400 px, 30 fps                     |
//! | negative_origin  | FWS v8, stage rectangle with negative minimums    |
//! | zero_rect        | FWS v6, zero-width rectangle fields               |
//! | lzma             | ZWS v13, rejected as unsupported                  |
//! | truncated_zlib   | CWS v11, compressed body cut in half              |
//! | unknown_flag     | XWS, rejected as an unknown format                |

#![allow(clippy::pedantic)]

use std::path::Path;

use swf_tests::{SwfBuilder, rect};
use swf_wire::rect::Rect;

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    generate_signup(&golden_dir);
    generate_uncompressed(&golden_dir);
    generate_negative_origin(&golden_dir);
    generate_zero_rect(&golden_dir);
    generate_lzma(&golden_dir);
    generate_truncated_zlib(&golden_dir);
    generate_unknown_flag(&golden_dir);

    println!("All golden fixtures written to {}", golden_dir.display());
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {}", path.display());
}

fn write_manifest(dir: &Path, json: &str) {
    write_file(&dir.join("manifest.json"), json.as_bytes());
}

fn movie_path(dir: &Path) -> std::path::PathBuf {
    dir.join("movie.swf")
}

// ── Fixture generators ────────────────────────────────────────────────────────

fn generate_signup(golden: &Path) {
    let dir = golden.join("signup");
    write_manifest(
        &dir,
        r#"{
  "description": "Zlib-compressed movie with a 160 x 290 px stage and a padded 15-bit rectangle.",
  "signature": "CWS",
  "version": 11,
  "file_length": 12794,
  "frame_size": { "bit_length": 15, "xmin": 0, "xmax": 3200, "ymin": 0, "ymax": 5800 },
  "frame_rate": 24.0,
  "frame_count": 285
}"#,
    );

    // Authoring tools often write 15-bit fields even when 14 would do.
    let stage = Rect {
        bit_length: 15,
        xmin: 0,
        xmax: 3200,
        ymin: 0,
        ymax: 5800,
    };
    let movie = SwfBuilder::zlib()
        .version(11)
        .frame_size(stage)
        .frame_info(0x1800, 285)
        .filler(12773)
        .build();
    write_file(&movie_path(&dir), &movie);
}

fn generate_uncompressed(golden: &Path) {
    let dir = golden.join("uncompressed");
    write_manifest(
        &dir,
        r#"{
  "description": "Uncompressed movie; the body is stored verbatim after the header.",
  "signature": "FWS",
  "version": 10,
  "file_length": 25,
  "frame_size": { "bit_length": 15, "xmin": 0, "xmax": 11000, "ymin": 0, "ymax": 8000 },
  "frame_rate": 30.0,
  "frame_count": 1
}"#,
    );

    let movie = SwfBuilder::uncompressed()
        .version(10)
        .frame_info(0x1E00, 1)
        .build();
    write_file(&movie_path(&dir), &movie);
}

fn generate_negative_origin(golden: &Path) {
    let dir = golden.join("negative_origin");
    write_manifest(
        &dir,
        r#"{
  "description": "Stage rectangle whose minimum corner sits left of and above the origin.",
  "signature": "FWS",
  "version": 8,
  "file_length": 23,
  "frame_size": { "bit_length": 11, "xmin": -200, "xmax": 1000, "ymin": -400, "ymax": 800 },
  "frame_rate": 12.5,
  "frame_count": 2
}"#,
    );

    let movie = SwfBuilder::uncompressed()
        .version(8)
        .frame_size(rect(-200, 1000, -400, 800))
        .frame_info(0x0C80, 2)
        .build();
    write_file(&movie_path(&dir), &movie);
}

fn generate_zero_rect(golden: &Path) {
    let dir = golden.join("zero_rect");
    write_manifest(
        &dir,
        r#"{
  "description": "Rectangle with a zero bit length; all four fields read as 0 from a single byte.",
  "signature": "FWS",
  "version": 6,
  "file_length": 17,
  "frame_size": { "bit_length": 0, "xmin": 0, "xmax": 0, "ymin": 0, "ymax": 0 },
  "frame_rate": 12.0,
  "frame_count": 1
}"#,
    );

    let movie = SwfBuilder::uncompressed()
        .version(6)
        .frame_size(Rect::default())
        .frame_info(0x0C00, 1)
        .build();
    write_file(&movie_path(&dir), &movie);
}

fn generate_lzma(golden: &Path) {
    let dir = golden.join("lzma");
    write_manifest(
        &dir,
        r#"{
  "description": "LZMA signature. The scanner recognizes the flag but does not decode the body.",
  "signature": "ZWS",
  "version": 13,
  "error": "unsupported"
}"#,
    );

    let movie = SwfBuilder::lzma().version(13).build();
    write_file(&movie_path(&dir), &movie);
}

fn generate_truncated_zlib(golden: &Path) {
    let dir = golden.join("truncated_zlib");
    write_manifest(
        &dir,
        r#"{
  "description": "Zlib body cut in half. Streaming scans still read the rectangle; buffered scans fail.",
  "signature": "CWS",
  "version": 11,
  "frame_size": { "bit_length": 15, "xmin": 0, "xmax": 11000, "ymin": 0, "ymax": 8000 },
  "error": "decompression"
}"#,
    );

    let mut movie = SwfBuilder::zlib().version(11).filler(20_000).build();
    let cut = 8 + (movie.len() - 8) / 2;
    movie.truncate(cut);
    write_file(&movie_path(&dir), &movie);
}

fn generate_unknown_flag(golden: &Path) {
    let dir = golden.join("unknown_flag");
    write_manifest(
        &dir,
        r#"{
  "description": "Compression flag 'X' is not one of F, C or Z.",
  "signature": "XWS",
  "error": "unknown_format"
}"#,
    );

    let movie = SwfBuilder::with_signature(*b"XWS").build();
    write_file(&movie_path(&dir), &movie);
}
