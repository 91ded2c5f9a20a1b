// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::reflect::UnsupportedKind;
use thiserror::Error;

/// Error type for schema construction.
///
/// Any of these halts reflection of the whole type tree. Schemas are expected to
/// be built once at startup, so these indicate a programming error in the
/// reflected types rather than a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReflectError {
    /// The type has no determinable shape.
    #[error("Invalid kind for type '{type_name}'")]
    InvalidType { type_name: String },

    /// The shape cannot be represented in a schema.
    #[error("Unsupported kind {kind} for type '{type_name}'")]
    UnsupportedShape {
        kind: UnsupportedKind,
        type_name: String,
    },

    /// The record refers to itself through its fields.
    #[error("Type '{type_name}' refers to itself; cyclic records cannot be reflected")]
    CyclicType { type_name: String },
}

/// Error type returned by resolvers to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The default resolver was handed something other than a record.
    #[error("Cannot resolve field '{field}': source is a {found}, not a record")]
    NotARecord { field: String, found: &'static str },

    /// No field of the source record carries the requested name.
    #[error("Field '{field}' not found on record '{record}'")]
    FieldNotFound { field: String, record: String },

    /// The field holds a value the resolver cannot handle.
    #[error("Field '{field}' holds a {found}, expected {expected}")]
    UnexpectedValue {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}
