// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Nested packet codec.
//!
//! The inner packet is written inline, with no length prefix or terminator,
//! so an embedded field costs exactly the inner packet's encoded size.

use crate::codec::{FieldCodec, Scope, WireReader};
use crate::instance::{decode_values, encode_values};
use crate::{PacketInstance, PacketSchema, Result, Value, WireError};
use std::sync::Arc;

/// Embedded structure type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedType {
    schema: Arc<PacketSchema>,
}

impl EmbeddedType {
    pub fn new(schema: &Arc<PacketSchema>) -> Self {
        Self {
            schema: Arc::clone(schema),
        }
    }

    pub fn schema(&self) -> &Arc<PacketSchema> {
        &self.schema
    }

    /// Unwrap a packet value bound to this type's schema.
    fn expect_packet<'v>(&self, value: &'v Value) -> Result<&'v PacketInstance> {
        let packet = value
            .as_packet()
            .ok_or_else(|| WireError::type_mismatch(self.schema.name(), value.kind_name()))?;
        if !packet.schema().same_schema(&self.schema) {
            return Err(WireError::type_mismatch(
                self.schema.name(),
                packet.type_name(),
            ));
        }
        Ok(packet)
    }
}

impl FieldCodec for EmbeddedType {
    fn encode_into(&self, value: &Value, _scope: &Scope<'_>, out: &mut Vec<u8>) -> Result<()> {
        let packet = self.expect_packet(value)?;
        encode_values(&self.schema, packet.values(), out)
    }

    fn decode_from(&self, reader: &mut WireReader<'_>, _scope: &Scope<'_>) -> Result<Value> {
        let values = decode_values(&self.schema, reader)?;
        Ok(Value::Packet(PacketInstance::from_parts(
            Arc::clone(&self.schema),
            values,
        )))
    }

    fn static_size(&self) -> Option<usize> {
        self.schema.static_size()
    }

    fn min_size(&self) -> usize {
        self.schema.min_size()
    }

    fn zero_value(&self) -> Value {
        Value::Packet(PacketInstance::new(&self.schema))
    }

    fn validate(&self, value: &Value) -> Result<()> {
        let packet = self.expect_packet(value)?;
        self.schema
            .fields()
            .iter()
            .zip(packet.values())
            .try_for_each(|(field, v)| field.ty().validate(v))
    }

    fn encoded_len(&self, value: &Value) -> Result<usize> {
        let packet = self.expect_packet(value)?;
        self.schema
            .fields()
            .iter()
            .zip(packet.values())
            .map(|(field, v)| field.ty().encoded_len(v))
            .sum()
    }
}
