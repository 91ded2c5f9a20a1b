// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Type descriptors consumed by the reflector.
//!
//! Rust has no runtime field reflection, so every reflectable type describes its
//! own shape through [`Reflect::type_info`]. The descriptor names the type
//! (a [`TypeKey`] used for override lookups), classifies it into a closed
//! [`Kind`], and for records lists the declared fields with their tags. The same
//! trait also produces the runtime [`Value`] image that resolvers read from.
//!
//! Record types normally get their implementation from [`crate::record!`].

use crate::tags::Tags;
use crate::value::{Record, Value};

use core::any::TypeId;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

#[cfg(feature = "time")]
use chrono::{DateTime, FixedOffset, Utc};

/// Opaque identity of a Rust type. Equality, ordering and hashing use only the
/// `TypeId`; the type name is kept for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeKey {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatKind {
    F32,
    F64,
}

/// Shapes that have no schema representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedKind {
    Map,
    Func,
    Chan,
    Pointer,
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnsupportedKind::Map => "map",
            UnsupportedKind::Func => "func",
            UnsupportedKind::Chan => "chan",
            UnsupportedKind::Pointer => "ptr",
        })
    }
}

/// Structural classification of a type.
#[derive(Debug, Clone)]
pub enum Kind {
    /// No determinable shape.
    Invalid,
    Bool,
    Int(IntKind),
    Float(FloatKind),
    String,
    /// Open kind whose shape is only known at runtime.
    Any,
    Struct(Vec<FieldInfo>),
    Sequence(Box<TypeInfo>),
    Unsupported(UnsupportedKind),
}

#[derive(Debug, Clone)]
pub struct TypeInfo {
    key: TypeKey,
    name: &'static str,
    kind: Kind,
}

/// A declared record field.
#[derive(Clone)]
pub struct FieldInfo {
    pub name: &'static str,
    pub tags: Tags,
    // Lazy: a record may refer to itself.
    ty: fn() -> TypeInfo,
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish()
    }
}

impl FieldInfo {
    pub fn new<T: Reflect>(name: &'static str, tags: Tags) -> Self {
        FieldInfo {
            name,
            tags,
            ty: T::type_info,
        }
    }

    pub fn type_info(&self) -> TypeInfo {
        (self.ty)()
    }
}

impl TypeInfo {
    pub fn new<T: ?Sized + 'static>(name: &'static str, kind: Kind) -> Self {
        TypeInfo {
            key: TypeKey::of::<T>(),
            name,
            kind,
        }
    }

    pub fn of<T: Reflect>() -> Self {
        T::type_info()
    }

    pub fn record<T: ?Sized + 'static>(name: &'static str, fields: Vec<FieldInfo>) -> Self {
        Self::new::<T>(name, Kind::Struct(fields))
    }

    pub fn sequence<T: ?Sized + 'static>(name: &'static str, elem: TypeInfo) -> Self {
        Self::new::<T>(name, Kind::Sequence(Box::new(elem)))
    }

    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }
}

/// Implemented by every type that can be reflected into a schema.
pub trait Reflect: 'static {
    /// Describes the shape of `Self`.
    fn type_info() -> TypeInfo
    where
        Self: Sized;

    /// Runtime image of this value.
    fn to_value(&self) -> Value;
}

impl Reflect for bool {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("bool", Kind::Bool)
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Reflect for String {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("String", Kind::String)
    }

    fn to_value(&self) -> Value {
        Value::from(self.as_str())
    }
}

impl Reflect for &'static str {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("str", Kind::String)
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

macro_rules! reflect_numbers {
    ($($t:ty => $kind:expr),* $(,)?) => {
        $(
            impl Reflect for $t {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<Self>(stringify!($t), $kind)
                }

                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

reflect_numbers! {
    i8 => Kind::Int(IntKind::I8),
    i16 => Kind::Int(IntKind::I16),
    i32 => Kind::Int(IntKind::I32),
    i64 => Kind::Int(IntKind::I64),
    isize => Kind::Int(IntKind::Isize),
    u8 => Kind::Int(IntKind::U8),
    u16 => Kind::Int(IntKind::U16),
    u32 => Kind::Int(IntKind::U32),
    u64 => Kind::Int(IntKind::U64),
    usize => Kind::Int(IntKind::Usize),
    f32 => Kind::Float(FloatKind::F32),
    f64 => Kind::Float(FloatKind::F64),
}

impl Reflect for Value {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("Value", Kind::Any)
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Reflect for () {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("()", Kind::Invalid)
    }

    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::sequence::<Self>("Vec", T::type_info())
    }

    fn to_value(&self) -> Value {
        Value::from(self.iter().map(Reflect::to_value).collect::<Vec<_>>())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::sequence::<Self>("array", T::type_info())
    }

    fn to_value(&self) -> Value {
        Value::from(self.iter().map(Reflect::to_value).collect::<Vec<_>>())
    }
}

// Indirections. Values read through them, but the reflector refuses them.

impl<T: Reflect> Reflect for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("Option", Kind::Unsupported(UnsupportedKind::Pointer))
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

macro_rules! reflect_pointers {
    ($($p:ident),*) => {
        $(
            impl<T: Reflect> Reflect for $p<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::new::<Self>(stringify!($p), Kind::Unsupported(UnsupportedKind::Pointer))
                }

                fn to_value(&self) -> Value {
                    (**self).to_value()
                }
            }
        )*
    };
}

reflect_pointers!(Box, Rc, Arc);

impl<K: 'static, V: 'static, S: 'static> Reflect for HashMap<K, V, S> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("HashMap", Kind::Unsupported(UnsupportedKind::Map))
    }

    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl<K: 'static, V: 'static> Reflect for BTreeMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("BTreeMap", Kind::Unsupported(UnsupportedKind::Map))
    }

    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl<R: 'static> Reflect for fn() -> R {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("fn", Kind::Unsupported(UnsupportedKind::Func))
    }

    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl<A: 'static, R: 'static> Reflect for fn(A) -> R {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("fn", Kind::Unsupported(UnsupportedKind::Func))
    }

    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl<T: 'static> Reflect for Sender<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("Sender", Kind::Unsupported(UnsupportedKind::Chan))
    }

    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl<T: 'static> Reflect for Receiver<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new::<Self>("Receiver", Kind::Unsupported(UnsupportedKind::Chan))
    }

    fn to_value(&self) -> Value {
        Value::Null
    }
}

// Timestamps are records without exposed fields. The default type map
// overrides them with a string scalar.

#[cfg(feature = "time")]
impl Reflect for DateTime<Utc> {
    fn type_info() -> TypeInfo {
        TypeInfo::record::<Self>("DateTime", Vec::new())
    }

    fn to_value(&self) -> Value {
        Value::Time(*self)
    }
}

#[cfg(feature = "time")]
impl Reflect for DateTime<FixedOffset> {
    fn type_info() -> TypeInfo {
        TypeInfo::record::<Self>("DateTime", Vec::new())
    }

    fn to_value(&self) -> Value {
        Value::Time(self.with_timezone(&Utc))
    }
}

/// Declares a record struct and derives its [`Reflect`] implementation.
///
/// Field metadata is given with a `#[tags(...)]` attribute. Fields without a
/// `json` tag are kept in the struct but never exposed in a schema.
///
/// ```rust,ignore
/// gql_reflector::record! {
///     #[derive(Debug, Default)]
///     pub struct User {
///         #[tags(json = "id")]
///         pub id: u64,
///         #[tags(json = "email", gqlexclude = "public")]
///         pub email: String,
///         pub password_hash: String,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[tags($($key:ident = $val:literal),* $(,)?)])?
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $($fvis $field: $ty,)*
        }

        impl $crate::Reflect for $name {
            fn type_info() -> $crate::TypeInfo {
                $crate::TypeInfo::record::<Self>(
                    stringify!($name),
                    vec![$(
                        $crate::FieldInfo::new::<$ty>(
                            stringify!($field),
                            $crate::Tags::new(&[$($((stringify!($key), $val)),*)?]),
                        ),
                    )*],
                )
            }

            fn to_value(&self) -> $crate::Value {
                #[allow(unused_mut)]
                let mut record = $crate::Record::new(stringify!($name));
                $(
                    record.push(
                        stringify!($field),
                        $crate::Tags::new(&[$($((stringify!($key), $val)),*)?]),
                        $crate::Reflect::to_value(&self.$field),
                    );
                )*
                $crate::Value::from(record)
            }
        }
    };
}
