#![no_main]

use bpk_wire::frame::FrameHeader;
use libfuzzer_sys::fuzz_target;

// Fuzz target: FrameHeader::read_from length prefix parsing.
//
// Catches bugs in:
// - Prefixes longer than five bytes
// - Values above i32::MAX
// - Truncated prefixes
fuzz_target!(|data: &[u8]| {
    if let Ok(header) = FrameHeader::read_from(data) {
        assert!((1..=5).contains(&header.prefix_len));
        assert!(header.body_len <= i32::MAX as usize);
    }
});
