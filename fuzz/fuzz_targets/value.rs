#![no_main]

use bpk_decoder::decode_value;
use libfuzzer_sys::fuzz_target;

// Fuzz target: single MessagePack value decoding.
//
// Catches bugs in:
// - Length headers larger than the input
// - Integer width handling and uint64 overflow
// - Nesting depth enforcement
fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = decode_value(data, 0) {
        assert!(consumed <= data.len());
        assert!(value.depth() <= bpk_decoder::config::DEFAULT_MAX_DEPTH);
    }
});
