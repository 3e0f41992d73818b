#![no_main]

use libfuzzer_sys::fuzz_target;
use swf_wire::rect::Rect;

// Fuzz target: Rect::read_from on arbitrary bytes.
//
// A decoded rectangle consumes exactly its encoded length and every field
// fits in a signed integer of `bit_length` bits.
fuzz_target!(|data: &[u8]| {
    let Ok((rect, consumed)) = Rect::read_from(data) else {
        return;
    };
    assert_eq!(consumed, Rect::encoded_len(rect.bit_length));
    assert!(consumed <= data.len());

    if rect.bit_length == 0 {
        assert_eq!(rect, Rect::default());
        return;
    }
    let max = (1i64 << (rect.bit_length - 1)) - 1;
    let min = -(1i64 << (rect.bit_length - 1));
    for v in [rect.xmin, rect.xmax, rect.ymin, rect.ymax] {
        assert!((min..=max).contains(&i64::from(v)));
    }
});
