// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # wirepack - declarative fixed-layout packet serialization
//!
//! Declare the exact on-wire layout of a message as an ordered list of typed
//! fields, then serialize instances to bytes and deserialize bytes back into
//! instances. Byte order, field width and field order are fixed by the
//! schema, never inferred.
//!
//! # Features
//!
//! - **Scalar**: 1 to 8 byte integers, signed or unsigned, big or little endian
//! - **Array**: fixed count, counted by an earlier field, or consuming the rest
//!   of the buffer
//! - **Embedded**: another schema inlined as a single field
//! - **Atomic decode**: a failed deserialize leaves the instance unchanged
//!
//! # Example
//!
//! ```rust
//! use wirepack::{PacketInstance, PacketSchema, ScalarType};
//!
//! let schema = PacketSchema::builder("Reading")
//!     .scalar("header", ScalarType::u8())
//!     .scalar("timestamp", ScalarType::u32_be())
//!     .scalar("length", ScalarType::u8())
//!     .counted_bytes("data", "length")
//!     .tail_bytes("tail")
//!     .build()
//!     .unwrap();
//!
//! let mut packet = PacketInstance::new(&schema);
//! packet.set("header", 1u8).unwrap();
//! packet.set("timestamp", 12345u32).unwrap();
//! packet.set_counted("data", vec![1u8, 2, 3, 4]).unwrap();
//! packet.set("tail", vec![5u8, 6]).unwrap();
//! assert_eq!(packet.to_hex().unwrap(), "010000303904010203040506");
//!
//! let decoded = PacketInstance::decode(&schema, &packet.serialize().unwrap()).unwrap();
//! assert_eq!(decoded.get_as::<u32>("timestamp").unwrap(), 12345);
//! ```

mod array;
mod builder;
mod codec;
mod config;
mod descriptor;
mod embedded;
mod error;
mod instance;
mod scalar;
mod schema;
mod value;

pub use array::{ArrayType, LengthMode};
pub use builder::PacketSchemaBuilder;
pub use codec::{FieldCodec, Scope, WireReader};
pub use config::{DecodeConfig, TrailingBytes, TRAILING_BYTES_ENV};
pub use descriptor::TypeDescriptor;
pub use embedded::EmbeddedType;
pub use error::{Result, WireError};
pub use instance::PacketInstance;
pub use scalar::{Endianness, ScalarType, MAX_SCALAR_WIDTH};
pub use schema::{FieldSpec, PacketSchema};
pub use value::{FromValue, Value};
