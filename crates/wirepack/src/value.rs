// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field values.

use crate::{PacketInstance, Result, WireError};

/// A field value held by a [`PacketInstance`].
///
/// Shapes mirror the descriptor variants: scalars hold `Int`, arrays hold
/// `List`, embedded structures hold `Packet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Any scalar. `i128` covers both 64-bit signed and unsigned ranges.
    Int(i128),
    /// Array elements, in wire order.
    List(Vec<Value>),
    /// Embedded structure.
    Packet(PacketInstance),
}

impl Value {
    /// Shape name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::List(_) => "list",
            Self::Packet(_) => "packet",
        }
    }

    /// Try to get as integer.
    pub fn as_int(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as embedded packet.
    pub fn as_packet(&self) -> Option<&PacketInstance> {
        match self {
            Self::Packet(p) => Some(p),
            _ => None,
        }
    }

    /// Try to get as mutable embedded packet.
    pub fn as_packet_mut(&mut self) -> Option<&mut PacketInstance> {
        match self {
            Self::Packet(p) => Some(p),
            _ => None,
        }
    }

    /// Collect a list of integers as bytes (each element must fit in `u8`).
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        self.as_list()?
            .iter()
            .map(|v| v.as_int().and_then(|i| u8::try_from(i).ok()))
            .collect()
    }
}

// Conversion traits
macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Int(i128::from(v))
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, u64, i8, i16, i32, i64, i128);

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Self::Int(v as i128)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::List(v.iter().map(|b| Self::Int(i128::from(*b))).collect())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<PacketInstance> for Value {
    fn from(v: PacketInstance) -> Self {
        Self::Packet(v)
    }
}

/// Trait for typed extraction from a [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

macro_rules! impl_from_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Result<Self> {
                    match value {
                        Value::Int(v) => <$ty>::try_from(*v).map_err(|_| WireError::Range {
                            value: *v,
                            min: <$ty>::MIN as i128,
                            max: <$ty>::MAX as i128,
                        }),
                        other => Err(WireError::type_mismatch(
                            stringify!($ty),
                            other.kind_name(),
                        )),
                    }
                }
            }
        )*
    };
}

impl_from_value_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64);

impl FromValue for i128 {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_int()
            .ok_or_else(|| WireError::type_mismatch("integer", value.kind_name()))
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            other => Err(WireError::type_mismatch("list", other.kind_name())),
        }
    }
}

impl FromValue for PacketInstance {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Packet(p) => Ok(p.clone()),
            other => Err(WireError::type_mismatch("packet", other.kind_name())),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}
