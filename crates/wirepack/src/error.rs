// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for schema construction, field access and wire operations.

use thiserror::Error;

/// Errors raised by schema definition, field access, encode and decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Malformed schema: duplicate names, unresolved length references,
    /// cyclic embedding, invalid defaults.
    #[error("schema error: {0}")]
    Schema(String),

    /// Scalar value does not fit the declared width/signedness.
    #[error("value {value} out of range [{min}, {max}]")]
    Range { value: i128, min: i128, max: i128 },

    /// Decode needs more bytes than remain in the buffer.
    #[error("buffer underrun at offset {offset}: needed {needed} bytes, have {available}")]
    BufferUnderrun {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Array element count disagrees with its declared length.
    #[error("length mismatch: declared {declared} elements, got {actual}")]
    LengthMismatch { declared: i128, actual: usize },

    /// Value shape does not match the field's descriptor.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// No field with this name in the schema.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Unconsumed bytes after the last field (only under a strict policy).
    #[error("{count} trailing bytes after offset {offset}")]
    TrailingBytes { offset: usize, count: usize },
}

impl WireError {
    pub(crate) fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub(crate) fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Result type for wirepack operations.
pub type Result<T> = std::result::Result<T, WireError>;
