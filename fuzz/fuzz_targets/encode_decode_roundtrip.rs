#![no_main]

use bpk_decoder::BlazorPackDecoder;
use bpk_encoder::BlazorPackEncoder;
use libfuzzer_sys::fuzz_target;

// Fuzz target: decode -> encode -> decode -> encode stability.
//
// Whatever the decoder recovers from arbitrary bytes must re-encode to
// a body that decodes cleanly, and a second pass must produce the same
// bytes. Bytes are compared rather than values so NaN floats compare
// equal.
fuzz_target!(|data: &[u8]| {
    let first = BlazorPackDecoder::decode(data);
    if first.messages.is_empty() {
        return;
    }

    let body = BlazorPackEncoder::new()
        .add_messages(first.messages)
        .encode()
        .unwrap();

    let second = BlazorPackDecoder::decode(&body);
    assert!(second.is_complete(), "{:?}", second.errors);

    let again = BlazorPackEncoder::new()
        .add_messages(second.messages)
        .encode()
        .unwrap();
    assert_eq!(again, body);
});
