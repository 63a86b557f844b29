//! Conformance tests against hand-assembled BlazorPack bodies.
//!
//! Each vector is written out byte by byte the way a Blazor Server
//! client puts it on the wire. The decoder must recover the expected
//! messages, the encoder must reproduce the exact bytes, and the
//! rendered text is pinned with inline snapshots.

use bpk_decoder::{BlazorPackDecoder, DecodeError};
use bpk_encoder::BlazorPackEncoder;
use bpk_render::{BinaryEncoding, DefaultRenderer, OutputMode, RenderConfig, StreamRenderer};
use bpk_tests::{frame, from_hex};
use bpk_types::{GenericMessage, GenericValue};
use insta::assert_snapshot;

/// `[1, {}, nil, "OnRenderCompleted", [2, nil]]`
const RENDER_COMPLETED: &str = "
    19 95 01 80 c0 b1
    4f 6e 52 65 6e 64 65 72 43 6f 6d 70 6c 65 74 65 64
    92 02 c0
";

/// `[3, {}, "1", 3, 42]`
const COMPLETION_RESULT: &str = "07 95 03 80 a1 31 03 2a";

/// `[5, {}, "7"]`
const CANCEL: &str = "05 93 05 80 a1 37";

/// `[6]`
const PING: &str = "02 91 06";

/// `[7, nil, true]`
const CLOSE: &str = "04 93 07 c0 c3";

fn render(body: &[u8], config: &RenderConfig) -> String {
    let decoded = BlazorPackDecoder::decode(body);
    DefaultRenderer
        .render_decoded(&decoded, config)
        .expect("render should succeed")
}

fn minimal() -> RenderConfig {
    RenderConfig {
        mode: OutputMode::Minimal,
        ..RenderConfig::default()
    }
}

// ── Decoding ──────────────────────────────────────────────────────────────────

#[test]
fn decodes_hand_assembled_messages() {
    let body = from_hex(&[RENDER_COMPLETED, COMPLETION_RESULT, CANCEL, PING, CLOSE].concat());
    let messages = BlazorPackDecoder::decode(&body)
        .into_result()
        .expect("vectors are well formed");

    assert_eq!(
        messages,
        vec![
            GenericMessage::new(
                1,
                vec![
                    GenericValue::Map(vec![]),
                    GenericValue::Null,
                    GenericValue::from("OnRenderCompleted"),
                    GenericValue::Array(vec![GenericValue::Integer(2), GenericValue::Null]),
                ],
            ),
            GenericMessage::new(
                3,
                vec![
                    GenericValue::Map(vec![]),
                    GenericValue::from("1"),
                    GenericValue::Integer(3),
                    GenericValue::Integer(42),
                ],
            ),
            GenericMessage::new(5, vec![GenericValue::Map(vec![]), GenericValue::from("7")]),
            GenericMessage::new(6, vec![]),
            GenericMessage::new(7, vec![GenericValue::Null, GenericValue::Boolean(true)]),
        ]
    );
}

#[test]
fn decodes_every_integer_width() {
    // [9, 0x7f, -32, 0xcc ff, 0xcd ffff, 0xce ffffffff, 0xcf i64::MAX,
    //  0xd0 -128, 0xd1 -32768, 0xd2 i32::MIN, 0xd3 i64::MIN]
    let value = from_hex(
        "9b 09 7f e0
         cc ff
         cd ff ff
         ce ff ff ff ff
         cf 7f ff ff ff ff ff ff ff
         d0 80
         d1 80 00
         d2 80 00 00 00
         d3 80 00 00 00 00 00 00 00",
    );
    let decoded = BlazorPackDecoder::decode(&frame(&value));
    assert!(decoded.is_complete(), "{:?}", decoded.errors);

    let fields: Vec<i64> = decoded.messages[0]
        .fields
        .iter()
        .map(|v| v.as_i64().expect("integer field"))
        .collect();
    assert_eq!(
        fields,
        vec![
            0x7F,
            -32,
            0xFF,
            0xFFFF,
            0xFFFF_FFFF,
            i64::MAX,
            -128,
            -32768,
            i64::from(i32::MIN),
            i64::MIN,
        ]
    );
}

#[test]
fn decodes_wide_headers() {
    // [9, str8 "hi", bin16 [1 2], array16 [nil], map16 {1: 2}, float32 1.5]
    let value = from_hex(
        "96 09
         d9 02 68 69
         c5 00 02 01 02
         dc 00 01 c0
         de 00 01 01 02
         ca 3f c0 00 00",
    );
    let decoded = BlazorPackDecoder::decode(&frame(&value));
    assert!(decoded.is_complete(), "{:?}", decoded.errors);
    assert_eq!(
        decoded.messages[0].fields,
        vec![
            GenericValue::from("hi"),
            GenericValue::Binary(vec![1, 2]),
            GenericValue::Array(vec![GenericValue::Null]),
            GenericValue::Map(vec![(GenericValue::Integer(1), GenericValue::Integer(2))]),
            GenericValue::Float(1.5),
        ]
    );
}

#[test]
fn uint64_above_i64_is_an_integer_overflow() {
    let value = from_hex("92 09 cf ff ff ff ff ff ff ff ff");
    let decoded = BlazorPackDecoder::decode(&frame(&value));
    assert!(decoded.messages.is_empty());
    assert!(matches!(
        decoded.errors[0].error,
        DecodeError::IntegerOverflow { offset: 3 }
    ));
}

// ── Encoding ──────────────────────────────────────────────────────────────────

#[test]
fn encoder_reproduces_vectors() {
    let body = BlazorPackEncoder::new()
        .add_invocation(
            None,
            "OnRenderCompleted",
            vec![GenericValue::Integer(2), GenericValue::Null],
        )
        .add_completion_result("1", Some(GenericValue::Integer(42)))
        .add_cancel_invocation("7")
        .add_ping()
        .add_close(None, true)
        .encode()
        .expect("encoding should succeed");

    assert_eq!(
        hex::encode(&body),
        hex::encode(from_hex(
            &[RENDER_COMPLETED, COMPLETION_RESULT, CANCEL, PING, CLOSE].concat()
        ))
    );
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[test]
fn json_snapshot() {
    let text = render(&from_hex(RENDER_COMPLETED), &RenderConfig::default());
    assert_snapshot!(text, @r#"[{"kind":1,"fields":[{},null,"OnRenderCompleted",[2,null]]}]"#);
}

#[test]
fn pretty_snapshot_with_names() {
    let config = RenderConfig {
        mode: OutputMode::JsonPretty,
        include_kind_names: true,
        ..RenderConfig::default()
    };
    let text = render(&from_hex(COMPLETION_RESULT), &config);
    assert_snapshot!(text, @r#"
    [
      {
        "kind": 3,
        "name": "Completion",
        "fields": [
          {},
          "1",
          3,
          42
        ]
      }
    ]
    "#);
}

#[test]
fn minimal_snapshot() {
    let body = from_hex(&[RENDER_COMPLETED, PING, CLOSE].concat());
    let text = render(&body, &minimal());
    assert_snapshot!(text, @r#"
    #0 Invocation(1) [{},null,"OnRenderCompleted",[2,null]]
    #1 Ping(6) []
    #2 Close(7) [null,true]
    "#);
}

#[test]
fn binary_snapshots() {
    let body = BlazorPackEncoder::new()
        .add_message(42, vec![GenericValue::Binary(vec![0xDE, 0xAD, 0xBE, 0xEF])])
        .encode()
        .expect("encoding should succeed");

    assert_snapshot!(render(&body, &minimal()), @r#"#0 Unknown(42) [{"$binary":"deadbeef"}]"#);

    let base64 = RenderConfig {
        mode: OutputMode::Minimal,
        binary: BinaryEncoding::Base64,
        ..RenderConfig::default()
    };
    assert_snapshot!(render(&body, &base64), @r#"#0 Unknown(42) [{"$binary":"3q2+7w=="}]"#);
}

#[test]
fn error_marker_snapshots() {
    // Ping, a frame holding the never-used 0xC1 tag, then a cut-off prefix.
    let body = from_hex("02 91 06  02 91 c1  80");

    assert_snapshot!(render(&body, &RenderConfig::default()), @r#"[{"kind":6,"fields":[]},{"$error":{"kind":"UnsupportedTag","index":1,"offset":5,"recovered":false,"message":"unsupported type tag 0xC1 at offset 5"}},{"$error":{"kind":"TruncatedInput","offset":7,"terminal":true,"message":"truncated input: data ends at offset 7"}}]"#);

    assert_snapshot!(render(&body, &minimal()), @r"
    #0 Ping(6) []
    ! #1 UnsupportedTag at offset 5: unsupported type tag 0xC1 at offset 5
    ! stopped: TruncatedInput: truncated input: data ends at offset 7
    ");
}

#[test]
fn recovered_string_snapshot() {
    let body = from_hex("04 92 01 a1 ff");
    assert_snapshot!(render(&body, &minimal()), @r#"
    #0 Invocation(1) ["�"]
    ! #0 InvalidEncoding at offset 3: invalid UTF-8 in string at offset 3 (recovered)
    "#);
}
