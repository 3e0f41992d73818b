#![no_main]

use libfuzzer_sys::fuzz_target;
use swf_wire::header::{HEADER_SIZE, Header};

// Fuzz target: Header::read_from on arbitrary bytes.
//
// Any input of at least 8 bytes parses; shorter input fails. A parsed
// header writes back to the bytes it came from.
fuzz_target!(|data: &[u8]| {
    match Header::read_from(data) {
        Ok(header) => {
            assert!(data.len() >= HEADER_SIZE);
            assert_eq!(header.signature.to_bytes(), data[..3]);
            assert_eq!(header.version, data[3]);
            assert_eq!(header.file_length.to_le_bytes(), data[4..8]);
            let _ = header.compression();
        }
        Err(_) => assert!(data.len() < HEADER_SIZE),
    }
});
