// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Repeated element codec.

use crate::codec::{FieldCodec, Scope, WireReader};
use crate::{Result, TypeDescriptor, Value, WireError};

/// How many elements an array holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LengthMode {
    /// Schema-time constant.
    Fixed(usize),
    /// Current value of an earlier scalar field.
    FromField(String),
    /// Every whole element left in the buffer (last top-level field only).
    Remaining,
}

impl LengthMode {
    /// Whether the count depends on data rather than the schema.
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, Self::Fixed(_))
    }
}

/// Array type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    element: Box<TypeDescriptor>,
    length: LengthMode,
}

impl ArrayType {
    pub fn new(element: impl Into<TypeDescriptor>, length: LengthMode) -> Self {
        Self {
            element: Box::new(element.into()),
            length,
        }
    }

    pub fn element(&self) -> &TypeDescriptor {
        &self.element
    }

    pub fn length(&self) -> &LengthMode {
        &self.length
    }

    /// Name of the length-source field, for `FromField` arrays.
    pub fn length_field(&self) -> Option<&str> {
        match &self.length {
            LengthMode::FromField(name) => Some(name),
            _ => None,
        }
    }

    fn expect_list(value: &Value) -> Result<&[Value]> {
        value
            .as_list()
            .ok_or_else(|| WireError::type_mismatch("list", value.kind_name()))
    }

    /// Declared count from the length-source field.
    fn declared_count(name: &str, scope: &Scope<'_>) -> Result<i128> {
        let source = scope
            .lookup(name)
            .ok_or_else(|| WireError::UnknownField(name.to_string()))?;
        source
            .as_int()
            .ok_or_else(|| WireError::type_mismatch("integer length", source.kind_name()))
    }

    /// Element count to decode at the reader's position.
    fn decode_count(&self, reader: &WireReader<'_>, scope: &Scope<'_>) -> Result<usize> {
        match &self.length {
            LengthMode::Fixed(count) => Ok(*count),
            LengthMode::FromField(name) => {
                let declared = Self::declared_count(name, scope)?;
                usize::try_from(declared)
                    .map_err(|_| WireError::LengthMismatch { declared, actual: 0 })
            }
            LengthMode::Remaining => match self.element.static_size() {
                Some(size) if size > 0 => Ok(reader.remaining() / size),
                _ => Err(WireError::schema(
                    "remaining-length array needs a fixed-size element",
                )),
            },
        }
    }
}

impl FieldCodec for ArrayType {
    fn encode_into(&self, value: &Value, scope: &Scope<'_>, out: &mut Vec<u8>) -> Result<()> {
        let items = Self::expect_list(value)?;
        match &self.length {
            LengthMode::Fixed(count) if items.len() != *count => {
                return Err(WireError::LengthMismatch {
                    declared: *count as i128,
                    actual: items.len(),
                });
            }
            LengthMode::FromField(name) => {
                let declared = Self::declared_count(name, scope)?;
                if declared != items.len() as i128 {
                    return Err(WireError::LengthMismatch {
                        declared,
                        actual: items.len(),
                    });
                }
            }
            _ => {}
        }
        let detached = Scope::detached();
        for item in items {
            self.element.encode_into(item, &detached, out)?;
        }
        Ok(())
    }

    fn decode_from(&self, reader: &mut WireReader<'_>, scope: &Scope<'_>) -> Result<Value> {
        let count = self.decode_count(reader, scope)?;
        // Never trust a length field for the allocation size
        let mut items = Vec::with_capacity(count.min(reader.remaining()));
        let detached = Scope::detached();
        for _ in 0..count {
            items.push(self.element.decode_from(reader, &detached)?);
        }
        Ok(Value::List(items))
    }

    fn static_size(&self) -> Option<usize> {
        match &self.length {
            LengthMode::Fixed(count) => self.element.static_size()?.checked_mul(*count),
            _ => None,
        }
    }

    fn min_size(&self) -> usize {
        match &self.length {
            LengthMode::Fixed(count) => self.element.min_size().saturating_mul(*count),
            _ => 0,
        }
    }

    fn zero_value(&self) -> Value {
        match &self.length {
            LengthMode::Fixed(count) => Value::List(vec![self.element.zero_value(); *count]),
            _ => Value::List(Vec::new()),
        }
    }

    fn validate(&self, value: &Value) -> Result<()> {
        let items = Self::expect_list(value)?;
        if let LengthMode::Fixed(count) = &self.length {
            if items.len() != *count {
                return Err(WireError::LengthMismatch {
                    declared: *count as i128,
                    actual: items.len(),
                });
            }
        }
        items.iter().try_for_each(|item| self.element.validate(item))
    }

    fn encoded_len(&self, value: &Value) -> Result<usize> {
        Self::expect_list(value)?
            .iter()
            .map(|item| self.element.encoded_len(item))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PacketSchema, ScalarType};

    #[test]
    fn test_fixed_array_roundtrip() {
        let arr = ArrayType::new(ScalarType::u16_le(), LengthMode::Fixed(3));
        let value = Value::from(vec![1u16, 0x0203, 0xFFFF]);

        let mut out = Vec::new();
        arr.encode_into(&value, &Scope::detached(), &mut out)
            .expect("encode");
        assert_eq!(out, [0x01, 0x00, 0x03, 0x02, 0xFF, 0xFF]);

        let mut reader = WireReader::new(&out);
        let decoded = arr
            .decode_from(&mut reader, &Scope::detached())
            .expect("decode");
        assert_eq!(decoded, value);
        assert_eq!(arr.static_size(), Some(6));
    }

    #[test]
    fn test_fixed_array_wrong_count() {
        let arr = ArrayType::new(ScalarType::u8(), LengthMode::Fixed(4));
        let mut out = Vec::new();
        let err = arr
            .encode_into(&Value::from(vec![1u8, 2]), &Scope::detached(), &mut out)
            .unwrap_err();
        assert_eq!(
            err,
            WireError::LengthMismatch {
                declared: 4,
                actual: 2
            }
        );
        assert!(arr.validate(&Value::from(vec![1u8, 2])).is_err());
    }

    #[test]
    fn test_element_failure_aborts_decode() {
        let arr = ArrayType::new(ScalarType::u16_be(), LengthMode::Fixed(3));
        let data = [0u8; 5];
        let mut reader = WireReader::new(&data);
        let err = arr
            .decode_from(&mut reader, &Scope::detached())
            .unwrap_err();
        assert!(matches!(err, WireError::BufferUnderrun { offset: 4, .. }));
    }

    #[test]
    fn test_remaining_counts_whole_elements() {
        let arr = ArrayType::new(ScalarType::u16_be(), LengthMode::Remaining);
        let data = [0, 1, 0, 2, 0xAA];
        let mut reader = WireReader::new(&data);
        let decoded = arr
            .decode_from(&mut reader, &Scope::detached())
            .expect("decode");
        assert_eq!(decoded, Value::from(vec![1u16, 2]));
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_from_field_uses_scope() {
        let schema = PacketSchema::builder("Counted")
            .scalar("count", ScalarType::u8())
            .counted_array("items", ScalarType::u8(), "count")
            .build()
            .expect("schema");
        let arr = ArrayType::new(ScalarType::u8(), LengthMode::FromField("count".into()));

        let resolved = [Value::Int(2)];
        let scope = Scope::new(&schema, &resolved);
        let data = [7u8, 8, 9];
        let mut reader = WireReader::new(&data);
        let decoded = arr.decode_from(&mut reader, &scope).expect("decode");
        assert_eq!(decoded, Value::from(vec![7u8, 8]));

        let mut out = Vec::new();
        let err = arr
            .encode_into(&Value::from(vec![1u8, 2, 3]), &scope, &mut out)
            .unwrap_err();
        assert_eq!(
            err,
            WireError::LengthMismatch {
                declared: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_negative_length_is_rejected() {
        let schema = PacketSchema::builder("Signed")
            .scalar("count", ScalarType::i8())
            .counted_array("items", ScalarType::u8(), "count")
            .build()
            .expect("schema");
        let arr = ArrayType::new(ScalarType::u8(), LengthMode::FromField("count".into()));
        let resolved = [Value::Int(-1)];
        let mut reader = WireReader::new(&[1, 2]);
        let err = arr
            .decode_from(&mut reader, &Scope::new(&schema, &resolved))
            .unwrap_err();
        assert_eq!(
            err,
            WireError::LengthMismatch {
                declared: -1,
                actual: 0
            }
        );
    }

    #[test]
    fn test_huge_length_does_not_preallocate() {
        let schema = PacketSchema::builder("Huge")
            .scalar("count", ScalarType::u32_be())
            .counted_array("items", ScalarType::u8(), "count")
            .build()
            .expect("schema");
        let arr = ArrayType::new(ScalarType::u8(), LengthMode::FromField("count".into()));
        let resolved = [Value::Int(0xFFFF_FFFF)];
        let mut reader = WireReader::new(&[1, 2, 3]);
        let err = arr
            .decode_from(&mut reader, &Scope::new(&schema, &resolved))
            .unwrap_err();
        assert!(matches!(err, WireError::BufferUnderrun { offset: 3, .. }));
    }
}
