// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Use README.md as crate documentation.
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod error;
mod naming;
mod number;
mod reflect;
mod reflector;
mod schema;
mod selection;
mod tags;
mod type_map;
mod value;

pub use error::{ReflectError, ResolveError};
pub use naming::{GlobalNameGenerator, NameGenerator, SequentialNameGenerator};
pub use number::Number;
pub use reflect::{FieldInfo, FloatKind, IntKind, Kind, Reflect, TypeInfo, TypeKey, UnsupportedKind};
pub use reflector::{include_field, reflect, reflect_field, reflect_type, Reflector};
pub use schema::{
    resolver, Field, ObjectType, ResolveFn, ResolveInfo, ResolveParams, Resolver, Scalar, Type,
};
pub use selection::{selected_fields, FieldAst, Selection};
pub use tags::{Tags, EXCLUDE_TAG, SERIALIZE_TAG};
pub use type_map::{default_resolver, default_type_map, TypeMap, TypeMapping};
pub use value::{Record, RecordField, Value};

#[cfg(feature = "time")]
pub use type_map::time_resolver;
