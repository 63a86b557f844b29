//! Shared request bodies for the integration tests and benchmarks.
//!
//! Bodies are built with the encoder rather than checked in as binary
//! fixtures, so they always match the current wire format.

#![warn(clippy::pedantic)]

use bpk_encoder::BlazorPackEncoder;
use bpk_types::GenericValue;
use bpk_wire::frame::write_frame;

/// One `StartCircuit` invocation, a JS-interop call, a byte-array push,
/// a completion with headers, and a ping.
///
/// # Panics
///
/// Never; the messages are well within encoder limits.
pub fn circuit_body() -> Vec<u8> {
    BlazorPackEncoder::new()
        .add_invocation(
            None,
            "StartCircuit",
            vec![
                GenericValue::from("https://app.example/"),
                GenericValue::from("https://app.example/counter"),
                GenericValue::from("[]"),
                GenericValue::from(""),
            ],
        )
        .add_invocation(
            Some("1"),
            "BeginInvokeDotNetFromJS",
            vec![
                GenericValue::from("1"),
                GenericValue::Null,
                GenericValue::from("DispatchEventAsync"),
                GenericValue::Integer(1),
                GenericValue::from("[{\"eventHandlerId\":4,\"eventName\":\"click\"},{}]"),
            ],
        )
        .add_invocation(
            None,
            "ReceiveByteArray",
            vec![GenericValue::Integer(3), GenericValue::Binary(vec![0xDE, 0xAD, 0xBE, 0xEF])],
        )
        .add_message(
            3,
            vec![
                GenericValue::Map(vec![
                    (GenericValue::from("trace"), GenericValue::from("abc")),
                    (GenericValue::Integer(2), GenericValue::Boolean(false)),
                ]),
                GenericValue::from("1"),
                GenericValue::Integer(3),
                GenericValue::Float(-0.25),
            ],
        )
        .add_ping()
        .encode()
        .expect("circuit body should encode")
}

/// `count` render-batch acknowledgements, the most common message in a
/// busy circuit.
///
/// # Panics
///
/// Panics if `count` is zero.
pub fn render_ack_body(count: usize) -> Vec<u8> {
    let mut encoder = BlazorPackEncoder::new();
    for batch in 0..count {
        let batch = i64::try_from(batch).expect("batch id fits in i64");
        encoder.add_invocation(
            None,
            "OnRenderCompleted",
            vec![GenericValue::Integer(batch), GenericValue::Null],
        );
    }
    encoder.encode().expect("render acks should encode")
}

/// One invocation carrying a single binary argument of `size` bytes.
///
/// # Panics
///
/// Never for sizes that fit in memory.
pub fn large_binary_body(size: usize) -> Vec<u8> {
    let payload: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
    BlazorPackEncoder::new()
        .add_invocation(
            None,
            "ReceiveByteArray",
            vec![GenericValue::Integer(0), GenericValue::Binary(payload)],
        )
        .encode()
        .expect("binary body should encode")
}

/// Frame a raw MessagePack value without going through the encoder,
/// for bodies the encoder would refuse to produce.
///
/// # Panics
///
/// Panics if `value` is longer than `i32::MAX` bytes.
pub fn frame(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    write_frame(value, &mut out).expect("frame length fits the prefix");
    out
}

/// Parse a hex dump (whitespace ignored) into bytes.
///
/// # Panics
///
/// Panics on invalid hex; only used with literal test vectors.
pub fn from_hex(dump: &str) -> Vec<u8> {
    let compact: String = dump.split_whitespace().collect();
    hex::decode(compact).expect("test vector is valid hex")
}
