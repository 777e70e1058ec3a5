// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::cast_sign_loss)] // Test data conversions
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::unreadable_literal)] // Large test constants
#![allow(clippy::doc_markdown)] // Test documentation
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::too_many_lines)] // Example/test code
#![allow(clippy::similar_names)] // Test variable naming
#![allow(clippy::cast_possible_wrap)] // Test conversions

//! Wire layout vectors through the public API.
//!
//! Each vector is encoded, compared against the expected hex, decoded back
//! and re-encoded; the re-encoded bytes must be identical.

use std::sync::Arc;
use wirepack::{
    DecodeConfig, Endianness, PacketInstance, PacketSchema, ScalarType, TrailingBytes,
    TypeDescriptor, Value, WireError,
};

/// Encode, compare, decode, re-encode.
fn layout_test(name: &str, packet: &PacketInstance, expected_hex: &str) -> Vec<u8> {
    let encoded = packet
        .serialize()
        .unwrap_or_else(|e| panic!("{name}: encode failed: {e}"));
    assert_eq!(packet.to_hex().unwrap(), expected_hex, "{name}: hex mismatch");
    assert_eq!(
        packet.serialized_size().unwrap(),
        encoded.len(),
        "{name}: serialized_size disagrees with encode"
    );

    let mut decoded = PacketInstance::new(packet.schema());
    let consumed = decoded
        .deserialize_with(&encoded, &DecodeConfig::strict())
        .unwrap_or_else(|e| panic!("{name}: decode failed: {e}"));
    assert_eq!(consumed, encoded.len(), "{name}: consumed != encoded length");
    assert_eq!(&decoded, packet, "{name}: roundtrip value mismatch");

    let re_encoded = decoded.serialize().unwrap();
    assert_eq!(re_encoded, encoded, "{name}: re-encoded bytes differ");
    encoded
}

fn scalar_schema(ty: ScalarType) -> Arc<PacketSchema> {
    PacketSchema::builder("Scalar")
        .scalar("v", ty)
        .build()
        .unwrap()
}

fn scalar_packet(ty: ScalarType, v: impl Into<Value>) -> PacketInstance {
    PacketInstance::from_values(&scalar_schema(ty), [("v", v)]).unwrap()
}

// ===========================================================================
// Scalars
// ===========================================================================

#[test]
fn layout_scalar_big_endian() {
    layout_test("u16_be", &scalar_packet(ScalarType::u16_be(), 0xCAFEu16), "CAFE");
    layout_test("u32_be", &scalar_packet(ScalarType::u32_be(), 0xDEADBEEFu32), "DEADBEEF");
    layout_test(
        "u64_be",
        &scalar_packet(ScalarType::u64_be(), 0xDEADBEEFCAFEBABEu64),
        "DEADBEEFCAFEBABE",
    );
    layout_test("i16_be", &scalar_packet(ScalarType::i16_be(), -256i16), "FF00");
}

#[test]
fn layout_scalar_little_endian() {
    layout_test("u16_le", &scalar_packet(ScalarType::u16_le(), 0xCAFEu16), "FECA");
    layout_test("i32_le", &scalar_packet(ScalarType::i32_le(), -42i32), "D6FFFFFF");
    layout_test(
        "u64_le",
        &scalar_packet(ScalarType::u64_le(), u64::MAX),
        "FFFFFFFFFFFFFFFF",
    );
    layout_test(
        "i64_le",
        &scalar_packet(ScalarType::i64_le(), i64::MIN),
        "0000000000000080",
    );
}

#[test]
fn layout_scalar_odd_widths() {
    let u24 = ScalarType::new(3, false, Endianness::Big).unwrap();
    layout_test("u24_be", &scalar_packet(u24, 0x123456u32), "123456");

    let i40 = ScalarType::new(5, true, Endianness::Little).unwrap();
    layout_test("i40_le", &scalar_packet(i40, -2i64), "FEFFFFFFFF");
}

// ===========================================================================
// Arrays
// ===========================================================================

#[test]
fn layout_reading_frame() {
    let schema = PacketSchema::builder("Reading")
        .scalar("header", ScalarType::u8())
        .scalar("timestamp", ScalarType::u32_be())
        .scalar("length", ScalarType::u8())
        .counted_bytes("data", "length")
        .tail_bytes("tail")
        .build()
        .unwrap();

    let mut packet = PacketInstance::new(&schema);
    packet.set("header", 1u8).unwrap();
    packet.set("timestamp", 12345u32).unwrap();
    packet.set_counted("data", vec![1u8, 2, 3, 4]).unwrap();
    packet.set("tail", vec![5u8, 6]).unwrap();

    let bytes = layout_test("reading", &packet, "010000303904010203040506");
    assert_eq!(bytes.len(), 12);

    // Empty variable parts
    let empty = PacketInstance::new(&schema);
    layout_test("reading_empty", &empty, "000000000000");
}

#[test]
fn layout_counted_words() {
    let schema = PacketSchema::builder("Words")
        .scalar("count", ScalarType::u16_le())
        .counted_array("words", ScalarType::u32_be(), "count")
        .scalar("crc", ScalarType::u8())
        .build()
        .unwrap();

    let mut packet = PacketInstance::new(&schema);
    packet.set_counted("words", vec![1u32, 0xFFFF_FFFF]).unwrap();
    packet.set("crc", 0x5Au8).unwrap();
    layout_test("counted_words", &packet, "020000000001FFFFFFFF5A");
}

#[test]
fn layout_fixed_matrix() {
    let row = TypeDescriptor::fixed_array(ScalarType::i8(), 2);
    let schema = PacketSchema::builder("Matrix")
        .field("m", TypeDescriptor::fixed_array(row, 2))
        .build()
        .unwrap();
    assert_eq!(schema.static_size(), Some(4));

    let packet = PacketInstance::from_values(
        &schema,
        [("m", vec![vec![1i8, -1], vec![-128i8, 127]])],
    )
    .unwrap();
    layout_test("matrix", &packet, "01FF807F");
}

// ===========================================================================
// Embedded
// ===========================================================================

#[test]
fn layout_embedded_header() {
    let header = PacketSchema::builder("Header")
        .field_with_default("version", ScalarType::u8(), 1u8)
        .scalar("kind", ScalarType::u8())
        .scalar("length", ScalarType::u16_be())
        .build()
        .unwrap();
    let message = PacketSchema::builder("Message")
        .embedded("header", &header)
        .counted_bytes("body", "len")
        .build();
    // The length source must live in the same schema as the array
    assert!(matches!(message, Err(WireError::Schema(_))));

    let message = PacketSchema::builder("Message")
        .embedded("header", &header)
        .scalar("len", ScalarType::u8())
        .counted_bytes("body", "len")
        .build()
        .unwrap();

    let mut head = PacketInstance::new(&header);
    head.set("kind", 7u8).unwrap();
    head.set("length", 3u16).unwrap();

    let mut packet = PacketInstance::new(&message);
    packet.set("header", head).unwrap();
    packet.set_counted("body", b"abc".as_slice()).unwrap();
    layout_test("embedded_header", &packet, "0107000303616263");
}

// ===========================================================================
// Failure modes
// ===========================================================================

#[test]
fn decode_failures_are_atomic() {
    let schema = PacketSchema::builder("Pair")
        .scalar("a", ScalarType::u16_be())
        .scalar("b", ScalarType::u16_be())
        .build()
        .unwrap();
    let mut packet = PacketInstance::decode(&schema, &[0, 1, 0, 2]).unwrap();

    for truncated in 0..4 {
        let buf = [9u8, 9, 9, 9];
        assert!(matches!(
            packet.deserialize(&buf[..truncated]),
            Err(WireError::BufferUnderrun { .. })
        ));
        assert_eq!(packet.get_as::<u16>("a").unwrap(), 1);
        assert_eq!(packet.get_as::<u16>("b").unwrap(), 2);
    }
}

#[test]
fn trailing_bytes_policy() {
    let schema = scalar_schema(ScalarType::u8());
    let mut packet = PacketInstance::new(&schema);

    assert_eq!(packet.deserialize(&[1, 2, 3]), Ok(1));
    let strict = DecodeConfig::new().with_trailing_bytes(TrailingBytes::Reject);
    assert_eq!(
        packet.deserialize_with(&[4, 5], &strict),
        Err(WireError::TrailingBytes { offset: 1, count: 1 })
    );
    assert_eq!(packet.get_as::<u8>("v").unwrap(), 1);
}

#[test]
fn hostile_length_field() {
    let schema = PacketSchema::builder("Hostile")
        .scalar("n", ScalarType::u64_be())
        .counted_bytes("data", "n")
        .build()
        .unwrap();
    let buf = [0xFF; 12];
    let err = PacketInstance::decode(&schema, &buf).unwrap_err();
    assert_eq!(
        err,
        WireError::BufferUnderrun {
            offset: 12,
            needed: 1,
            available: 0
        }
    );
}

#[test]
fn negative_length_field() {
    let schema = PacketSchema::builder("Negative")
        .scalar("n", ScalarType::i16_be())
        .counted_bytes("data", "n")
        .build()
        .unwrap();
    let err = PacketInstance::decode(&schema, &[0xFF, 0xFE, 1, 2]).unwrap_err();
    assert_eq!(
        err,
        WireError::LengthMismatch {
            declared: -2,
            actual: 0
        }
    );
}
