// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fuzz target for packet decoding
//!
//! Feeds arbitrary bytes to schemas covering every length mode and embedding.
//! Decoding must never panic, and whatever decodes must re-encode to the
//! bytes it consumed.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wirepack::{DecodeConfig, Endianness, PacketInstance, PacketSchema, ScalarType, TypeDescriptor};

fuzz_target!(|data: &[u8]| {
    let Ok(inner) = PacketSchema::builder("Inner")
        .scalar("id", ScalarType::u16_le())
        .array("pair", ScalarType::i8(), 2)
        .build()
    else {
        return;
    };
    let Ok(i24) = TypeDescriptor::scalar(3, true, Endianness::Big) else {
        return;
    };
    let Ok(schema) = PacketSchema::builder("Fuzz")
        .scalar("kind", ScalarType::u8())
        .field("stamp", i24)
        .scalar("count", ScalarType::i16_be())
        .counted_array("items", &inner, "count")
        .scalar("n", ScalarType::u32_le())
        .counted_bytes("blob", "n")
        .tail_array("words", ScalarType::u16_be())
        .build()
    else {
        return;
    };

    // ----------------------------------------------------------------
    // 1. Lenient decode - must not panic
    // ----------------------------------------------------------------
    let mut packet = PacketInstance::new(&schema);
    if let Ok(consumed) = packet.deserialize(data) {
        // Decoded values always re-encode to the consumed prefix
        let encoded = packet.serialize().expect("decoded packet must encode");
        assert_eq!(&encoded[..], &data[..consumed]);
    }

    // ----------------------------------------------------------------
    // 2. Strict decode - must not panic, never commits on error
    // ----------------------------------------------------------------
    let mut strict = PacketInstance::new(&schema);
    let before = strict.clone();
    if strict
        .deserialize_with(data, &DecodeConfig::strict())
        .is_err()
    {
        assert_eq!(strict, before);
    }
});
