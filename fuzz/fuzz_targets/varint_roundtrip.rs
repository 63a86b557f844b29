#![no_main]

use bpk_wire::frame::{write_frame, FrameHeader};
use bpk_wire::varint::{decode_varint, encode_varint};
use libfuzzer_sys::fuzz_target;

// Fuzz target: varint and frame prefix write->read roundtrip.
//
// Input format:
//   bytes 0..8: u64 value (little-endian) for the varint roundtrip
//   bytes 8..:  frame body for the prefix roundtrip
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }

    let value = u64::from_le_bytes(data[..8].try_into().unwrap());
    let mut buf = [0u8; 10];
    let written = encode_varint(value, &mut buf);
    let (decoded, consumed) = decode_varint(&buf[..written]).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(consumed, written);

    let body = &data[8..];
    let mut wire = Vec::new();
    write_frame(body, &mut wire).unwrap();
    let header = FrameHeader::read_from(&wire).unwrap();
    assert_eq!(header.body_len, body.len());
    assert_eq!(header.frame_len(), wire.len());
    assert_eq!(&wire[header.prefix_len..], body);
});
