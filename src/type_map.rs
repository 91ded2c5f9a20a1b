// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use crate::error::ResolveError;
use crate::reflect::{Reflect, TypeKey};
use crate::schema::{resolver, ResolveParams, Resolver, Scalar, Type};
use crate::tags::SERIALIZE_TAG;
use crate::value::Value;

#[cfg(feature = "time")]
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Output type and resolver registered for a Rust type.
#[derive(Clone)]
pub struct TypeMapping {
    pub output: Type,
    pub resolver: Resolver,
}

impl TypeMapping {
    pub fn new(output: Type, resolver: Resolver) -> Self {
        TypeMapping { output, resolver }
    }
}

/// Overrides of the default reflection, keyed by exact type identity.
///
/// A type found in the map is not descended into: the reflector uses the
/// registered output type verbatim and binds the registered resolver to fields
/// of that type. There is no structural fallback; a newtype around `String`
/// is a different key than `String`.
///
/// Tables are plain values. To customize, clone [`default_type_map`] and insert.
#[derive(Clone, Default)]
pub struct TypeMap {
    inner: BTreeMap<TypeKey, TypeMapping>,
}

lazy_static::lazy_static! {
    static ref DEFAULT_TYPE_MAP: TypeMap = TypeMap::builtin();
}

/// The process-wide default table, built on first use.
pub fn default_type_map() -> &'static TypeMap {
    &DEFAULT_TYPE_MAP
}

impl TypeMap {
    /// Create a new, empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with an entry for every primitive and for the timestamp types.
    ///
    /// Use [`default_type_map`] to share the memoized instance.
    pub fn builtin() -> Self {
        let string = || TypeMapping::new(Type::Scalar(Scalar::String), resolver(default_resolver));
        let int = || TypeMapping::new(Type::Scalar(Scalar::Int), resolver(default_resolver));
        let float = || TypeMapping::new(Type::Scalar(Scalar::Float), resolver(default_resolver));
        let boolean = || TypeMapping::new(Type::Scalar(Scalar::Boolean), resolver(default_resolver));

        let map = TypeMap::new()
            .with::<String>(string())
            .with::<&'static str>(string())
            .with::<bool>(boolean())
            .with::<i8>(int())
            .with::<i16>(int())
            .with::<i32>(int())
            .with::<i64>(int())
            .with::<isize>(int())
            .with::<u8>(int())
            .with::<u16>(int())
            .with::<u32>(int())
            .with::<u64>(int())
            .with::<usize>(int())
            .with::<f32>(float())
            .with::<f64>(float());

        #[cfg(feature = "time")]
        let map = {
            let time = || TypeMapping::new(Type::Scalar(Scalar::String), resolver(time_resolver));
            map.with::<DateTime<Utc>>(time())
                .with::<DateTime<FixedOffset>>(time())
        };

        tracing::debug!(entries = map.len(), "built default type map");
        map
    }

    /// Register `mapping` for `T`, returning the mapping it replaces.
    pub fn insert<T: Reflect>(&mut self, mapping: TypeMapping) -> Option<TypeMapping> {
        self.inner.insert(TypeKey::of::<T>(), mapping)
    }

    pub fn insert_key(&mut self, key: TypeKey, mapping: TypeMapping) -> Option<TypeMapping> {
        self.inner.insert(key, mapping)
    }

    /// Builder form of [`TypeMap::insert`].
    pub fn with<T: Reflect>(mut self, mapping: TypeMapping) -> Self {
        self.insert::<T>(mapping);
        self
    }

    pub fn get(&self, key: &TypeKey) -> Option<&TypeMapping> {
        self.inner.get(key)
    }

    pub fn remove(&mut self, key: &TypeKey) -> Option<TypeMapping> {
        self.inner.remove(key)
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.inner.contains_key(key)
    }

    /// Resolver for fields of type `key`: the registered one, else
    /// [`default_resolver`].
    pub fn resolver(&self, key: &TypeKey) -> Resolver {
        match self.inner.get(key) {
            Some(mapping) => mapping.resolver.clone(),
            None => resolver(default_resolver),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeKey, &TypeMapping)> {
        self.inner.iter()
    }
}

/// Resolves a field by searching the source record for the field whose
/// serialization name equals the field being resolved.
///
/// The lookup goes by name at call time, so it does not depend on the order in
/// which fields were declared.
pub fn default_resolver(p: &ResolveParams<'_>) -> Result<Value, ResolveError> {
    let record = match p.source {
        Value::Record(r) => r,
        other => {
            return Err(ResolveError::NotARecord {
                field: p.info.field_name.to_string(),
                found: other.kind_name(),
            })
        }
    };
    record
        .find_by_tag(SERIALIZE_TAG, p.info.field_name)
        .cloned()
        .ok_or_else(|| ResolveError::FieldNotFound {
            field: p.info.field_name.to_string(),
            record: record.type_name().to_string(),
        })
}

/// Resolves a timestamp field to its RFC 3339 text in UTC, with whole seconds:
/// `2009-11-10T23:00:00Z`.
#[cfg(feature = "time")]
pub fn time_resolver(p: &ResolveParams<'_>) -> Result<Value, ResolveError> {
    match default_resolver(p)? {
        Value::Time(t) => Ok(Value::from(t.to_rfc3339_opts(SecondsFormat::Secs, true))),
        other => Err(ResolveError::UnexpectedValue {
            field: p.info.field_name.to_string(),
            expected: "time",
            found: other.kind_name(),
        }),
    }
}
