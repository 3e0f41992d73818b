#![no_main]

use libfuzzer_sys::fuzz_target;
use swf_scanner::{ScanConfig, Scanner};

// Fuzz target: full scan of arbitrary bytes in both body modes.
//
// Catches bugs in:
// - Header length and flag dispatch
// - Zlib streams that are corrupt or stop early
// - Rect bit widths running past the end of the body
//
// Whenever the buffered scan succeeds, the streaming scan must agree.
fuzz_target!(|data: &[u8]| {
    let config = ScanConfig {
        max_body_size: 1 << 20,
        ..ScanConfig::default()
    };
    let buffered = Scanner::new(config).scan_movie(data);
    let streaming = Scanner::new(ScanConfig::streaming()).scan_movie(data);

    if let Ok(movie) = buffered {
        assert_eq!(streaming.ok(), Some(movie));
    }
});
