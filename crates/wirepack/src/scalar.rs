// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-width integer codec.
//!
//! | Constructor | Width | Signed | Byte order |
//! |-------------|-------|--------|------------|
//! | `u8`/`i8`   | 1     | no/yes | n/a        |
//! | `u16_be`    | 2     | no     | big        |
//! | `i16_le`    | 2     | yes    | little     |
//! | `u32_be`    | 4     | no     | big        |
//! | `i64_le`    | 8     | yes    | little     |
//!
//! Any width from 1 to 8 bytes is accepted through [`ScalarType::new`].

use crate::codec::{FieldCodec, Scope, WireReader};
use crate::{Result, Value, WireError};

/// Widest supported scalar, in bytes.
pub const MAX_SCALAR_WIDTH: usize = 8;

/// Byte order of a multi-byte scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Endianness {
    /// Most significant byte first (network order).
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

/// Fixed-width integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalarType {
    width: u8,
    signed: bool,
    endianness: Endianness,
}

macro_rules! scalar_ctor {
    ($name:ident, $width:expr, $signed:expr, $endianness:ident) => {
        pub const fn $name() -> Self {
            Self {
                width: $width,
                signed: $signed,
                endianness: Endianness::$endianness,
            }
        }
    };
}

impl ScalarType {
    /// Create a scalar of `width` bytes (1..=8).
    pub fn new(width: usize, signed: bool, endianness: Endianness) -> Result<Self> {
        if !(1..=MAX_SCALAR_WIDTH).contains(&width) {
            return Err(WireError::schema(format!(
                "scalar width must be 1..={} bytes, got {}",
                MAX_SCALAR_WIDTH, width
            )));
        }
        Ok(Self {
            width: width as u8,
            signed,
            endianness,
        })
    }

    scalar_ctor!(u8, 1, false, Big);
    scalar_ctor!(i8, 1, true, Big);
    scalar_ctor!(u16_be, 2, false, Big);
    scalar_ctor!(u16_le, 2, false, Little);
    scalar_ctor!(i16_be, 2, true, Big);
    scalar_ctor!(i16_le, 2, true, Little);
    scalar_ctor!(u32_be, 4, false, Big);
    scalar_ctor!(u32_le, 4, false, Little);
    scalar_ctor!(i32_be, 4, true, Big);
    scalar_ctor!(i32_le, 4, true, Little);
    scalar_ctor!(u64_be, 8, false, Big);
    scalar_ctor!(u64_le, 8, false, Little);
    scalar_ctor!(i64_be, 8, true, Big);
    scalar_ctor!(i64_le, 8, true, Little);

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    fn bits(&self) -> u32 {
        u32::from(self.width) * 8
    }

    /// Smallest representable value.
    pub fn min_value(&self) -> i128 {
        if self.signed {
            -(1i128 << (self.bits() - 1))
        } else {
            0
        }
    }

    /// Largest representable value.
    pub fn max_value(&self) -> i128 {
        if self.signed {
            (1i128 << (self.bits() - 1)) - 1
        } else {
            (1i128 << self.bits()) - 1
        }
    }

    /// Reject values outside `[min_value, max_value]`.
    pub fn check_range(&self, value: i128) -> Result<()> {
        let (min, max) = (self.min_value(), self.max_value());
        if value < min || value > max {
            return Err(WireError::Range { value, min, max });
        }
        Ok(())
    }

    /// Encode an in-range integer.
    pub fn encode_int(&self, value: i128, out: &mut Vec<u8>) -> Result<()> {
        self.check_range(value)?;
        // Two's complement: the low `width` bytes carry the value for both
        // signednesses once the range check has passed.
        let raw = value as u64;
        let width = self.width();
        match self.endianness {
            Endianness::Big => out.extend_from_slice(&raw.to_be_bytes()[8 - width..]),
            Endianness::Little => out.extend_from_slice(&raw.to_le_bytes()[..width]),
        }
        Ok(())
    }

    /// Decode one integer at the reader's offset.
    pub fn decode_int(&self, reader: &mut WireReader<'_>) -> Result<i128> {
        let bytes = reader.read_bytes(self.width())?;
        let raw = match self.endianness {
            Endianness::Big => bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)),
            Endianness::Little => bytes
                .iter()
                .rev()
                .fold(0u64, |acc, b| (acc << 8) | u64::from(*b)),
        };
        if self.signed {
            let shift = 64 - self.bits();
            Ok(i128::from(((raw << shift) as i64) >> shift))
        } else {
            Ok(i128::from(raw))
        }
    }

    fn expect_int(value: &Value) -> Result<i128> {
        value
            .as_int()
            .ok_or_else(|| WireError::type_mismatch("integer", value.kind_name()))
    }
}

impl FieldCodec for ScalarType {
    fn encode_into(&self, value: &Value, _scope: &Scope<'_>, out: &mut Vec<u8>) -> Result<()> {
        self.encode_int(Self::expect_int(value)?, out)
    }

    fn decode_from(&self, reader: &mut WireReader<'_>, _scope: &Scope<'_>) -> Result<Value> {
        self.decode_int(reader).map(Value::Int)
    }

    fn static_size(&self) -> Option<usize> {
        Some(self.width())
    }

    fn min_size(&self) -> usize {
        self.width()
    }

    fn zero_value(&self) -> Value {
        Value::Int(0)
    }

    fn validate(&self, value: &Value) -> Result<()> {
        self.check_range(Self::expect_int(value)?)
    }

    fn encoded_len(&self, value: &Value) -> Result<usize> {
        self.validate(value)?;
        Ok(self.width())
    }
}
