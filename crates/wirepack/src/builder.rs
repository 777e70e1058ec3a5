// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for PacketSchema.

use crate::{FieldSpec, PacketSchema, Result, ScalarType, TypeDescriptor, Value};
use std::sync::Arc;

/// Builder for creating [`PacketSchema`] instances.
///
/// Fields are appended in wire order. Validation is deferred to
/// [`build`](Self::build).
#[derive(Debug)]
pub struct PacketSchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl PacketSchemaBuilder {
    /// Create a new builder for a message kind.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field with a type descriptor.
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<TypeDescriptor>) -> Self {
        self.fields.push(FieldSpec::new(name, ty));
        self
    }

    /// Add a field with an explicit default.
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        ty: impl Into<TypeDescriptor>,
        default: impl Into<Value>,
    ) -> Self {
        self.fields
            .push(FieldSpec::new(name, ty).with_default(default));
        self
    }

    /// Add a prepared field.
    pub fn spec(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Add a scalar field.
    pub fn scalar(self, name: impl Into<String>, ty: ScalarType) -> Self {
        self.field(name, ty)
    }

    /// Add a fixed-count array field.
    pub fn array(
        self,
        name: impl Into<String>,
        element: impl Into<TypeDescriptor>,
        count: usize,
    ) -> Self {
        self.field(name, TypeDescriptor::fixed_array(element, count))
    }

    /// Add an array counted by an earlier scalar field.
    pub fn counted_array(
        self,
        name: impl Into<String>,
        element: impl Into<TypeDescriptor>,
        length_field: impl Into<String>,
    ) -> Self {
        self.field(name, TypeDescriptor::counted_array(element, length_field))
    }

    /// Add an array consuming the rest of the buffer (last field only).
    pub fn tail_array(self, name: impl Into<String>, element: impl Into<TypeDescriptor>) -> Self {
        self.field(name, TypeDescriptor::tail_array(element))
    }

    /// Add a fixed-size byte string.
    pub fn bytes(self, name: impl Into<String>, count: usize) -> Self {
        self.array(name, ScalarType::u8(), count)
    }

    /// Add a byte string counted by an earlier scalar field.
    pub fn counted_bytes(self, name: impl Into<String>, length_field: impl Into<String>) -> Self {
        self.counted_array(name, ScalarType::u8(), length_field)
    }

    /// Add a byte string consuming the rest of the buffer.
    pub fn tail_bytes(self, name: impl Into<String>) -> Self {
        self.tail_array(name, ScalarType::u8())
    }

    /// Add a nested packet field.
    pub fn embedded(self, name: impl Into<String>, schema: &Arc<PacketSchema>) -> Self {
        self.field(name, TypeDescriptor::embedded(schema))
    }

    /// Validate and build the schema.
    pub fn build(self) -> Result<Arc<PacketSchema>> {
        PacketSchema::define(self.name, self.fields)
    }
}
