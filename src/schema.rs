// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The schema model produced by the reflector.
//!
//! It is the subset of the GraphQL type system that reflection can yield:
//!
//! ```text
//! Scalar   String | Int | Float | Boolean
//! Object   a named type with an ordered set of fields
//! List     [T] for any T
//! ```
//!
//! Each object field carries its output [`Type`] together with the [`Resolver`]
//! the executor calls to obtain the field's value from the parent value.
//!
//! Properties of the model:
//!     - Types are immutable once built and shared via `Arc`.
//!     - Object type names are generated by the reflector and never deduplicated:
//!       two reflections of the same record produce two distinct object types.
//!     - A type serializes to a JSON description (`kind`, `name`, `fields`,
//!       `ofType`).

use core::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::ResolveError;
use crate::selection::{selected_fields, FieldAst};
use crate::value::Value;

/// Signature of a field resolver.
pub type ResolveFn = dyn Fn(&ResolveParams<'_>) -> Result<Value, ResolveError> + Send + Sync;

/// A shareable field resolver.
pub type Resolver = Arc<ResolveFn>;

/// Wraps a function or closure into a [`Resolver`].
pub fn resolver<F>(f: F) -> Resolver
where
    F: Fn(&ResolveParams<'_>) -> Result<Value, ResolveError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Arguments handed to a resolver by the executor.
#[derive(Debug, Clone, Copy)]
pub struct ResolveParams<'a> {
    /// Value of the parent object.
    pub source: &'a Value,
    pub info: ResolveInfo<'a>,
}

/// Information about the field being resolved.
#[derive(Debug, Clone, Copy)]
pub struct ResolveInfo<'a> {
    pub field_name: &'a str,
    /// Query AST nodes of the executing field.
    pub field_asts: &'a [FieldAst],
}

impl ResolveInfo<'_> {
    /// Names of the fields requested at `path` below the executing field.
    /// See [`selected_fields`].
    pub fn selected_fields(&self, path: &[&str]) -> Vec<String> {
        selected_fields(path, self.field_asts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    String,
    Int,
    Float,
    Boolean,
}

impl Scalar {
    pub fn name(&self) -> &'static str {
        match self {
            Scalar::String => "String",
            Scalar::Int => "Int",
            Scalar::Float => "Float",
            Scalar::Boolean => "Boolean",
        }
    }

    /// Coerces a resolved value into this scalar's output representation.
    /// Values that cannot be represented become `Null`.
    pub fn serialize(&self, value: &Value) -> Value {
        match (self, value) {
            (_, Value::Null) => Value::Null,

            (Scalar::String, Value::String(_)) => value.clone(),
            (Scalar::String, _) => Value::from(value.to_string()),

            (Scalar::Int, Value::Number(n)) => match n.as_i64() {
                Some(i) if i32::try_from(i).is_ok() => Value::from(i),
                _ => Value::Null,
            },
            (Scalar::Int, Value::Bool(b)) => Value::from(i64::from(*b)),
            (Scalar::Int, Value::String(s)) => match s.parse::<i32>() {
                Ok(i) => Value::from(i),
                Err(_) => Value::Null,
            },

            (Scalar::Float, Value::Number(n)) => match n.as_f64() {
                Some(f) => Value::from(f),
                None => Value::Null,
            },
            (Scalar::Float, Value::Bool(b)) => Value::from(if *b { 1.0 } else { 0.0 }),
            (Scalar::Float, Value::String(s)) => match s.parse::<f64>() {
                Ok(f) => Value::from(f),
                Err(_) => Value::Null,
            },

            (Scalar::Boolean, Value::Bool(_)) => value.clone(),
            (Scalar::Boolean, Value::Number(n)) => match n.as_f64() {
                Some(f) => Value::Bool(f != 0.0),
                None => Value::Null,
            },
            (Scalar::Boolean, Value::String(s)) => match s.as_ref() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::Null,
            },

            _ => Value::Null,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A schema output type.
#[derive(Clone)]
pub enum Type {
    Scalar(Scalar),
    Object(Arc<ObjectType>),
    List(Arc<Type>),
}

impl Type {
    pub fn list(of: Type) -> Type {
        Type::List(Arc::new(of))
    }

    /// Name of a named type; lists have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Type::Scalar(s) => Some(s.name()),
            Type::Object(o) => Some(o.name()),
            Type::List(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Type::Scalar(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Type::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Element type of a list.
    pub fn of_type(&self) -> Option<&Type> {
        match self {
            Type::List(t) => Some(t),
            _ => None,
        }
    }

    /// Same node, not just the same shape.
    pub fn ptr_eq(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Scalar(a), Type::Scalar(b)) => a == b,
            (Type::Object(a), Type::Object(b)) => Arc::ptr_eq(a, b),
            (Type::List(a), Type::List(b)) => Arc::ptr_eq(a, b) || a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    // GraphQL notation: String, [Int], user3
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Scalar(s) => write!(f, "{s}"),
            Type::Object(o) => f.write_str(o.name()),
            Type::List(t) => write!(f, "[{t}]"),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Scalar(s) => write!(f, "{s}"),
            Type::Object(o) => fmt::Debug::fmt(o.as_ref(), f),
            Type::List(t) => write!(f, "[{t:?}]"),
        }
    }
}

impl Serialize for Type {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Type::Scalar(s) => {
                map.serialize_entry("kind", "scalar")?;
                map.serialize_entry("name", s.name())?;
            }
            Type::Object(o) => {
                map.serialize_entry("kind", "object")?;
                map.serialize_entry("name", o.name())?;
                let fields: IndexMap<&str, &Type> =
                    o.fields().map(|(k, v)| (k.as_str(), v.ty())).collect();
                map.serialize_entry("fields", &fields)?;
            }
            Type::List(t) => {
                map.serialize_entry("kind", "list")?;
                map.serialize_entry("ofType", t.as_ref())?;
            }
        }
        map.end()
    }
}

/// A named object type with fields in discovery order.
pub struct ObjectType {
    name: String,
    fields: IndexMap<String, Field>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>, fields: IndexMap<String, Field>) -> Self {
        ObjectType {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.fields.iter()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// A named, typed and resolvable member of an object type.
#[derive(Clone)]
pub struct Field {
    name: String,
    ty: Type,
    resolve: Resolver,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type, resolve: Resolver) -> Self {
        Field {
            name: name.into(),
            ty,
            resolve,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolve
    }

    /// Invokes the bound resolver.
    pub fn resolve(&self, params: &ResolveParams<'_>) -> Result<Value, ResolveError> {
        (self.resolve)(params)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type", &self.ty)
            .finish_non_exhaustive()
    }
}
