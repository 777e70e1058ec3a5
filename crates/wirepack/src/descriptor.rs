// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors.
//!
//! A [`TypeDescriptor`] describes how one field is laid out on the wire.
//! Descriptors are plain values: build them once and share them through the
//! schema that owns them.

use crate::codec::{FieldCodec, Scope, WireReader};
use crate::{
    ArrayType, EmbeddedType, Endianness, LengthMode, PacketSchema, Result, ScalarType, Value,
};
use std::sync::Arc;

/// Wire layout of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// Fixed-width integer.
    Scalar(ScalarType),
    /// Repeated element.
    Array(ArrayType),
    /// Another packet, inlined.
    Embedded(EmbeddedType),
}

impl TypeDescriptor {
    /// Scalar of arbitrary width (1..=8 bytes).
    pub fn scalar(width: usize, signed: bool, endianness: Endianness) -> Result<Self> {
        ScalarType::new(width, signed, endianness).map(Self::Scalar)
    }

    /// Array with a schema-time element count.
    pub fn fixed_array(element: impl Into<TypeDescriptor>, count: usize) -> Self {
        Self::Array(ArrayType::new(element, LengthMode::Fixed(count)))
    }

    /// Array whose count is held by an earlier scalar field.
    pub fn counted_array(
        element: impl Into<TypeDescriptor>,
        length_field: impl Into<String>,
    ) -> Self {
        Self::Array(ArrayType::new(
            element,
            LengthMode::FromField(length_field.into()),
        ))
    }

    /// Array consuming the rest of the buffer.
    pub fn tail_array(element: impl Into<TypeDescriptor>) -> Self {
        Self::Array(ArrayType::new(element, LengthMode::Remaining))
    }

    /// Inline another schema.
    pub fn embedded(schema: &Arc<PacketSchema>) -> Self {
        Self::Embedded(EmbeddedType::new(schema))
    }

    /// Human-readable type name.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Array(_) => "array",
            Self::Embedded(_) => "embedded",
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_embedded(&self) -> Option<&EmbeddedType> {
        match self {
            Self::Embedded(e) => Some(e),
            _ => None,
        }
    }

    /// Encode a single value to a fresh buffer.
    pub fn encode(&self, value: &Value, scope: &Scope<'_>) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.min_size());
        self.encode_into(value, scope, &mut out)?;
        Ok(out)
    }

    /// Decode one value at `cursor`, returning it with the bytes consumed.
    pub fn decode(&self, buf: &[u8], cursor: usize, scope: &Scope<'_>) -> Result<(Value, usize)> {
        let mut reader = WireReader::at(buf, cursor);
        let value = self.decode_from(&mut reader, scope)?;
        Ok((value, reader.offset() - cursor))
    }
}

impl FieldCodec for TypeDescriptor {
    fn encode_into(&self, value: &Value, scope: &Scope<'_>, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Self::Scalar(s) => s.encode_into(value, scope, out),
            Self::Array(a) => a.encode_into(value, scope, out),
            Self::Embedded(e) => e.encode_into(value, scope, out),
        }
    }

    fn decode_from(&self, reader: &mut WireReader<'_>, scope: &Scope<'_>) -> Result<Value> {
        match self {
            Self::Scalar(s) => s.decode_from(reader, scope),
            Self::Array(a) => a.decode_from(reader, scope),
            Self::Embedded(e) => e.decode_from(reader, scope),
        }
    }

    fn static_size(&self) -> Option<usize> {
        match self {
            Self::Scalar(s) => s.static_size(),
            Self::Array(a) => a.static_size(),
            Self::Embedded(e) => e.static_size(),
        }
    }

    fn min_size(&self) -> usize {
        match self {
            Self::Scalar(s) => s.min_size(),
            Self::Array(a) => a.min_size(),
            Self::Embedded(e) => e.min_size(),
        }
    }

    fn zero_value(&self) -> Value {
        match self {
            Self::Scalar(s) => s.zero_value(),
            Self::Array(a) => a.zero_value(),
            Self::Embedded(e) => e.zero_value(),
        }
    }

    fn validate(&self, value: &Value) -> Result<()> {
        match self {
            Self::Scalar(s) => s.validate(value),
            Self::Array(a) => a.validate(value),
            Self::Embedded(e) => e.validate(value),
        }
    }

    fn encoded_len(&self, value: &Value) -> Result<usize> {
        match self {
            Self::Scalar(s) => s.encoded_len(value),
            Self::Array(a) => a.encoded_len(value),
            Self::Embedded(e) => e.encoded_len(value),
        }
    }
}

impl From<ScalarType> for TypeDescriptor {
    fn from(v: ScalarType) -> Self {
        Self::Scalar(v)
    }
}

impl From<ArrayType> for TypeDescriptor {
    fn from(v: ArrayType) -> Self {
        Self::Array(v)
    }
}

impl From<EmbeddedType> for TypeDescriptor {
    fn from(v: EmbeddedType) -> Self {
        Self::Embedded(v)
    }
}

impl From<&Arc<PacketSchema>> for TypeDescriptor {
    fn from(v: &Arc<PacketSchema>) -> Self {
        Self::embedded(v)
    }
}
