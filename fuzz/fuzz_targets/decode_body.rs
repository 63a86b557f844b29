#![no_main]

use bpk_decoder::BlazorPackDecoder;
use libfuzzer_sys::fuzz_target;

// Fuzz target: BlazorPackDecoder::decode over a whole request body.
//
// Catches bugs in:
// - Frame walking (cursor never passes the end of the body)
// - Overrun probing against the rest of the body
// - Error bookkeeping (one message or one hard error per walked frame)
fuzz_target!(|data: &[u8]| {
    let decoded = BlazorPackDecoder::decode(data);
    assert!(decoded.bytes_consumed <= data.len());
    if decoded.terminal.is_none() {
        assert_eq!(decoded.bytes_consumed, data.len());
    }
    for err in &decoded.errors {
        assert!(err.offset < data.len());
    }
});
