// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field codec contract and the bounds-checked read cursor.
//!
//! Every descriptor variant implements [`FieldCodec`]. Encoding appends to a
//! caller-owned `Vec<u8>` so the packet engine can discard the whole buffer
//! on failure; decoding advances a [`WireReader`] and returns the value.

use crate::{PacketSchema, Result, Value, WireError};

/// Encode/decode capability shared by all type descriptors.
pub trait FieldCodec {
    /// Append the wire form of `value` to `out`.
    ///
    /// On error, `out` may hold partial output; callers discard it.
    fn encode_into(&self, value: &Value, scope: &Scope<'_>, out: &mut Vec<u8>) -> Result<()>;

    /// Decode one value at the reader's current offset.
    fn decode_from(&self, reader: &mut WireReader<'_>, scope: &Scope<'_>) -> Result<Value>;

    /// Encoded size when it does not depend on data.
    fn static_size(&self) -> Option<usize>;

    /// Smallest possible encoded size (variable arrays empty).
    fn min_size(&self) -> usize;

    /// Zero value used when a field declares no default.
    fn zero_value(&self) -> Value;

    /// Check a value's shape and range without encoding it.
    ///
    /// Length-source consistency of counted arrays is not checked here; it
    /// depends on sibling values and is enforced at encode time.
    fn validate(&self, value: &Value) -> Result<()>;

    /// Encoded size of a specific value.
    fn encoded_len(&self, value: &Value) -> Result<usize>;
}

/// Sibling values visible to a field while its packet is being processed.
///
/// During encode this is the instance's full value set; during decode it
/// holds only the fields staged so far.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    schema: Option<&'a PacketSchema>,
    resolved: &'a [Value],
}

impl<'a> Scope<'a> {
    /// Scope over `resolved`, positionally aligned with `schema`'s fields.
    pub fn new(schema: &'a PacketSchema, resolved: &'a [Value]) -> Self {
        Self {
            schema: Some(schema),
            resolved,
        }
    }

    /// Scope with no siblings (standalone encode/decode, array elements).
    pub fn detached() -> Self {
        Self {
            schema: None,
            resolved: &[],
        }
    }

    /// Look up an already-resolved sibling by name.
    pub fn lookup(&self, name: &str) -> Option<&'a Value> {
        let schema = self.schema?;
        let index = schema.field_index(name)?;
        self.resolved.get(index)
    }
}

/// Immutable cursor for reading (bounds-checked, zero-copy).
#[derive(Debug)]
pub struct WireReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Reader positioned at `offset`.
    pub fn at(buffer: &'a [u8], offset: usize) -> Self {
        Self { buffer, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(WireError::BufferUnderrun {
                offset: self.offset,
                needed: len,
                available,
            });
        }
        let slice = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_sequential_reads() {
        let data = [1u8, 2, 3, 4, 5];
        let mut reader = WireReader::new(&data);
        assert_eq!(reader.read_bytes(2).expect("read 2"), &[1, 2]);
        assert_eq!(reader.offset(), 2);
        assert_eq!(reader.remaining(), 3);
        assert_eq!(reader.read_bytes(3).expect("read 3"), &[3, 4, 5]);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_reader_underrun_reports_offset() {
        let data = [0xAAu8; 3];
        let mut reader = WireReader::at(&data, 2);
        let err = reader.read_bytes(2).unwrap_err();
        assert_eq!(
            err,
            WireError::BufferUnderrun {
                offset: 2,
                needed: 2,
                available: 1
            }
        );
        // Failed read does not advance
        assert_eq!(reader.offset(), 2);
    }

    #[test]
    fn test_reader_past_end() {
        let data = [0u8; 2];
        let reader = WireReader::at(&data, 5);
        assert_eq!(reader.remaining(), 0);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_detached_scope_has_no_siblings() {
        assert!(Scope::detached().lookup("length").is_none());
    }
}
