// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Packet schemas: ordered, immutable field lists.
//!
//! A schema is validated once in [`PacketSchema::define`] and shared through
//! an `Arc` by every instance of its message kind. After construction the
//! encode/decode engine can rely on:
//!
//! - unique, non-empty field names;
//! - every counted array's length source being an earlier scalar field,
//!   and every counted element consuming at least one byte;
//! - a remaining-length array only in the last position;
//! - no nested variable-length arrays;
//! - no embedding of greedy schemas or of a schema with the same name;
//! - defaults that validate against their descriptors and serialize as-is.

use crate::codec::FieldCodec;
use crate::{LengthMode, PacketSchemaBuilder, Result, TypeDescriptor, Value, WireError};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// One named, typed slot in a packet layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    ty: TypeDescriptor,
    default: Option<Value>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
        }
    }

    /// Set the value a fresh instance starts with.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    /// Declared default, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Declared default, or the descriptor's zero value.
    pub fn initial_value(&self) -> Value {
        match &self.default {
            Some(v) => v.clone(),
            None => self.ty.zero_value(),
        }
    }
}

/// Immutable wire layout of one message kind.
#[derive(Debug, PartialEq, Eq)]
pub struct PacketSchema {
    name: String,
    fields: Vec<FieldSpec>,
    static_size: Option<usize>,
    min_size: usize,
}

impl PacketSchema {
    /// Validate `fields` and build a shareable schema.
    ///
    /// Embedding cycles are detected by schema name: a schema may not embed,
    /// at any depth, another schema carrying its own name, even an unrelated
    /// one. Give distinct message kinds distinct names.
    pub fn define(name: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Arc<Self>> {
        let name = name.into();
        if name.is_empty() {
            return Err(WireError::schema("schema name must not be empty"));
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(WireError::schema(format!(
                    "{}: field #{} has an empty name",
                    name, index
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(WireError::schema(format!(
                    "{}: duplicate field name '{}'",
                    name, field.name
                )));
            }
            check_top_level(&name, &fields, index)?;
            check_nesting(&name, &field.name, &field.ty, false)?;
        }

        for index in 0..fields.len() {
            check_default(&name, &fields, index)?;
        }

        let static_size = fields
            .iter()
            .try_fold(0usize, |acc, f| acc.checked_add(f.ty.static_size()?));
        let min_size = fields
            .iter()
            .fold(0usize, |acc, f| acc.saturating_add(f.ty.min_size()));

        log::debug!(
            "[wirepack] defined schema '{}' ({} fields, static size {:?}, min size {})",
            name,
            fields.len(),
            static_size,
            min_size
        );

        Ok(Arc::new(Self {
            name,
            fields,
            static_size,
            min_size,
        }))
    }

    /// Start a fluent schema definition.
    pub fn builder(name: impl Into<String>) -> PacketSchemaBuilder {
        PacketSchemaBuilder::new(name)
    }

    /// Message kind name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in wire order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encoded size when every field is statically sized.
    pub fn static_size(&self) -> Option<usize> {
        self.static_size
    }

    /// Bytes needed by a message whose variable arrays are all empty.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Whether the last field consumes the rest of the buffer.
    pub fn is_greedy(&self) -> bool {
        matches!(
            self.fields.last().map(|f| &f.ty),
            Some(TypeDescriptor::Array(arr)) if *arr.length() == LengthMode::Remaining
        )
    }

    /// Whether a schema named `name` is embedded anywhere below this one.
    pub fn embeds(&self, name: &str) -> bool {
        self.fields.iter().any(|f| descriptor_embeds(&f.ty, name))
    }

    /// Initial value of every field, keyed by name.
    pub fn compute_defaults(&self) -> HashMap<String, Value> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.initial_value()))
            .collect()
    }

    /// Initial values in field order.
    pub(crate) fn default_values(&self) -> Vec<Value> {
        self.fields.iter().map(FieldSpec::initial_value).collect()
    }

    /// Identity first, structure second.
    pub(crate) fn same_schema(&self, other: &PacketSchema) -> bool {
        std::ptr::eq(self, other) || self == other
    }
}

fn descriptor_embeds(ty: &TypeDescriptor, name: &str) -> bool {
    match ty {
        TypeDescriptor::Scalar(_) => false,
        TypeDescriptor::Array(arr) => descriptor_embeds(arr.element(), name),
        TypeDescriptor::Embedded(e) => e.schema().name() == name || e.schema().embeds(name),
    }
}

/// Length-mode rules that depend on the field's position.
fn check_top_level(schema: &str, fields: &[FieldSpec], index: usize) -> Result<()> {
    let field = &fields[index];
    let TypeDescriptor::Array(arr) = &field.ty else {
        return Ok(());
    };
    match arr.length() {
        LengthMode::Fixed(_) => Ok(()),
        LengthMode::FromField(source) => {
            let source_index = fields[..index]
                .iter()
                .position(|f| &f.name == source)
                .ok_or_else(|| {
                    WireError::schema(format!(
                        "{}: length field '{}' of '{}' must be declared before it",
                        schema, source, field.name
                    ))
                })?;
            if fields[source_index].ty.as_scalar().is_none() {
                return Err(WireError::schema(format!(
                    "{}: length field '{}' of '{}' is not a scalar",
                    schema, source, field.name
                )));
            }
            // Each decoded element must consume input, or the count is unbounded
            if arr.element().min_size() == 0 {
                return Err(WireError::schema(format!(
                    "{}: counted array '{}' has a zero-size element",
                    schema, field.name
                )));
            }
            Ok(())
        }
        LengthMode::Remaining => {
            if index + 1 != fields.len() {
                return Err(WireError::schema(format!(
                    "{}: remaining-length array '{}' must be the last field",
                    schema, field.name
                )));
            }
            match arr.element().static_size() {
                Some(size) if size > 0 => Ok(()),
                _ => Err(WireError::schema(format!(
                    "{}: remaining-length array '{}' needs a fixed-size element",
                    schema, field.name
                ))),
            }
        }
    }
}

/// Rules for descriptors below the top level, and for embedded schemas.
fn check_nesting(schema: &str, field: &str, ty: &TypeDescriptor, nested: bool) -> Result<()> {
    match ty {
        TypeDescriptor::Scalar(_) => Ok(()),
        TypeDescriptor::Array(arr) => {
            if nested && arr.length().is_dynamic() {
                return Err(WireError::schema(format!(
                    "{}: field '{}' nests a variable-length array",
                    schema, field
                )));
            }
            check_nesting(schema, field, arr.element(), true)
        }
        TypeDescriptor::Embedded(e) => {
            let inner = e.schema();
            if inner.is_greedy() {
                return Err(WireError::schema(format!(
                    "{}: field '{}' embeds '{}', which ends in a remaining-length array",
                    schema,
                    field,
                    inner.name()
                )));
            }
            if inner.name() == schema || inner.embeds(schema) {
                return Err(WireError::schema(format!(
                    "{}: field '{}' embeds '{}' cyclically",
                    schema,
                    field,
                    inner.name()
                )));
            }
            Ok(())
        }
    }
}

/// A fresh instance built from the defaults must be serializable.
fn check_default(schema: &str, fields: &[FieldSpec], index: usize) -> Result<()> {
    let field = &fields[index];
    if let Some(default) = &field.default {
        field.ty.validate(default).map_err(|e| {
            WireError::schema(format!(
                "{}: invalid default for '{}': {}",
                schema, field.name, e
            ))
        })?;
    }

    let Some(source) = field.ty.as_array().and_then(|arr| arr.length_field()) else {
        return Ok(());
    };
    let declared = fields
        .iter()
        .find(|f| f.name == source)
        .and_then(|f| f.initial_value().as_int());
    let actual = field.initial_value().as_list().map_or(0, <[Value]>::len);
    if declared != Some(actual as i128) {
        return Err(WireError::schema(format!(
            "{}: '{}' starts with {} elements but '{}' defaults to {:?}",
            schema, field.name, actual, source, declared
        )));
    }
    Ok(())
}
