// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! PacketInstance container and the serialize/deserialize engine.

use crate::codec::{FieldCodec, Scope, WireReader};
use crate::{
    DecodeConfig, FromValue, LengthMode, PacketSchema, Result, TrailingBytes, Value, WireError,
};
use std::fmt;
use std::sync::Arc;

/// Field values bound to a schema.
///
/// Values are stored positionally, one slot per schema field, and always
/// match their field's descriptor: `set` validates before committing and
/// `deserialize` commits only after the whole buffer decoded.
#[derive(Debug, Clone)]
pub struct PacketInstance {
    schema: Arc<PacketSchema>,
    values: Vec<Value>,
}

impl PacketInstance {
    /// Create a new instance holding the schema's defaults.
    pub fn new(schema: &Arc<PacketSchema>) -> Self {
        Self {
            schema: Arc::clone(schema),
            values: schema.default_values(),
        }
    }

    /// Create from explicit values; unspecified fields keep their defaults.
    pub fn from_values<I, K, V>(schema: &Arc<PacketSchema>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut instance = Self::new(schema);
        for (name, value) in values {
            instance.set(name.as_ref(), value)?;
        }
        Ok(instance)
    }

    /// Decode a buffer into a fresh instance (lenient trailing policy).
    pub fn decode(schema: &Arc<PacketSchema>, buf: &[u8]) -> Result<Self> {
        let mut instance = Self::new(schema);
        instance.deserialize(buf)?;
        Ok(instance)
    }

    pub(crate) fn from_parts(schema: Arc<PacketSchema>, values: Vec<Value>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self { schema, values }
    }

    /// Get the schema.
    pub fn schema(&self) -> &Arc<PacketSchema> {
        &self.schema
    }

    /// Get the message kind name.
    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    pub(crate) fn values(&self) -> &[Value] {
        &self.values
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.schema
            .field_index(name)
            .ok_or_else(|| WireError::UnknownField(name.to_string()))
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Result<&Value> {
        let index = self.index_of(name)?;
        Ok(&self.values[index])
    }

    /// Get a field value converted to a Rust type.
    pub fn get_as<T: FromValue>(&self, name: &str) -> Result<T> {
        T::from_value(self.get(name)?)
    }

    /// Set a field value by name.
    ///
    /// The value is checked against the field's descriptor first; on error
    /// the instance is unchanged. A counted array's length source is not
    /// updated (see [`set_counted`](Self::set_counted)).
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let index = self.index_of(name)?;
        let value = value.into();
        self.schema.fields()[index].ty().validate(&value)?;
        self.values[index] = value;
        Ok(())
    }

    /// Set a counted array together with its length field.
    pub fn set_counted(&mut self, array_name: &str, elements: impl Into<Value>) -> Result<()> {
        let index = self.index_of(array_name)?;
        let field = &self.schema.fields()[index];
        let source = match field.ty().as_array().map(|arr| arr.length()) {
            Some(LengthMode::FromField(source)) => source,
            _ => {
                return Err(WireError::type_mismatch(
                    "counted array",
                    field.ty().kind_name(),
                ))
            }
        };
        let source_index = self.index_of(source)?;

        let elements = elements.into();
        field.ty().validate(&elements)?;
        let count = elements.as_list().map_or(0, <[Value]>::len);
        let count = Value::from(count);
        self.schema.fields()[source_index].ty().validate(&count)?;

        self.values[source_index] = count;
        self.values[index] = elements;
        Ok(())
    }

    /// Iterate over `(name, value)` pairs in wire order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name())
            .zip(self.values.iter())
    }

    /// Encode all fields in schema order.
    ///
    /// All-or-nothing: on error no bytes are returned.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.schema.min_size());
        encode_values(&self.schema, &self.values, &mut out)?;
        Ok(out)
    }

    /// Encoded length of the current values.
    pub fn serialized_size(&self) -> Result<usize> {
        self.schema
            .fields()
            .iter()
            .zip(&self.values)
            .map(|(field, value)| field.ty().encoded_len(value))
            .sum()
    }

    /// Decode `buf` into this instance, ignoring trailing bytes.
    ///
    /// Returns the number of bytes consumed. Atomic: on error the current
    /// values are left untouched.
    pub fn deserialize(&mut self, buf: &[u8]) -> Result<usize> {
        self.deserialize_with(buf, &DecodeConfig::default())
    }

    /// Decode `buf` into this instance under an explicit policy.
    pub fn deserialize_with(&mut self, buf: &[u8], config: &DecodeConfig) -> Result<usize> {
        let mut reader = WireReader::new(buf);
        let staged = match decode_values(&self.schema, &mut reader) {
            Ok(values) => values,
            Err(e) => {
                log::debug!(
                    "[wirepack] decode of '{}' failed ({} bytes): {}",
                    self.schema.name(),
                    buf.len(),
                    e
                );
                return Err(e);
            }
        };

        let consumed = reader.offset();
        let trailing = reader.remaining();
        if trailing > 0 && config.trailing_bytes == TrailingBytes::Reject {
            log::debug!(
                "[wirepack] rejecting '{}': {} trailing bytes after offset {}",
                self.schema.name(),
                trailing,
                consumed
            );
            return Err(WireError::TrailingBytes {
                offset: consumed,
                count: trailing,
            });
        }

        self.values = staged;
        log::trace!(
            "[wirepack] decoded '{}': {} bytes consumed, {} ignored",
            self.schema.name(),
            consumed,
            trailing
        );
        Ok(consumed)
    }

    /// Serialized form as uppercase hex.
    pub fn to_hex(&self) -> Result<String> {
        let bytes = self.serialize()?;
        Ok(bytes.iter().map(|b| format!("{:02X}", b)).collect())
    }
}

impl PartialEq for PacketInstance {
    fn eq(&self, other: &Self) -> bool {
        self.schema.same_schema(&other.schema) && self.values == other.values
    }
}

impl Eq for PacketInstance {}

impl fmt::Display for PacketInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_hex() {
            Ok(hex) => f.write_str(&hex),
            Err(e) => write!(f, "<{}: {}>", self.type_name(), e),
        }
    }
}

/// Encode `values` (positionally aligned with `schema`) onto `out`.
///
/// Fields are strictly sequential: counted arrays look up their length
/// source among the values being encoded.
pub(crate) fn encode_values(
    schema: &PacketSchema,
    values: &[Value],
    out: &mut Vec<u8>,
) -> Result<()> {
    let scope = Scope::new(schema, values);
    for (field, value) in schema.fields().iter().zip(values) {
        field.ty().encode_into(value, &scope, out)?;
    }
    Ok(())
}

/// Decode every field of `schema` at the reader's position into a staging
/// vector. Nothing is committed anywhere on error.
pub(crate) fn decode_values(
    schema: &PacketSchema,
    reader: &mut WireReader<'_>,
) -> Result<Vec<Value>> {
    let mut staged = Vec::with_capacity(schema.len());
    for field in schema.fields() {
        let value = field
            .ty()
            .decode_from(reader, &Scope::new(schema, &staged))?;
        staged.push(value);
    }
    Ok(staged)
}
