#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use swf_wire::bits::BitReader;

#[derive(Debug, Arbitrary)]
struct Input {
    widths: Vec<u8>,
    data: Vec<u8>,
}

// Fuzz target: BitReader reads of arbitrary widths.
//
// Each successful read advances the cursor by exactly its width, a failed
// read leaves the cursor where it was, and the cursor never passes the end
// of the buffer.
fuzz_target!(|input: Input| {
    let mut reader = BitReader::new(&input.data);
    for (i, &width) in input.widths.iter().enumerate() {
        let bits = u32::from(width % 40);
        let before = reader.bit_position();
        let result = if i % 2 == 0 {
            reader.read_ubits(bits).map(|_| ())
        } else {
            reader.read_sbits(bits).map(|_| ())
        };
        match result {
            Ok(()) => assert_eq!(reader.bit_position(), before + bits as usize),
            Err(_) => assert_eq!(reader.bit_position(), before),
        }
        assert!(reader.bit_position() <= input.data.len() * 8);
    }
});
