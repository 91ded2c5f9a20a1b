// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::ReflectError;
use crate::naming::{GlobalNameGenerator, NameGenerator};
use crate::reflect::{FieldInfo, Kind, Reflect, TypeInfo, TypeKey};
use crate::schema::{Field, ObjectType, Scalar, Type};
use crate::tags::{EXCLUDE_TAG, SERIALIZE_TAG};
use crate::type_map::{default_type_map, TypeMap};

static GLOBAL_NAMES: GlobalNameGenerator = GlobalNameGenerator;

/// Builds schema types out of type descriptors.
///
/// A reflector bundles the three inputs that steer reflection: the override
/// table, the exclusion token and the source of object type names.
///
/// ```rust,ignore
/// let mut map = default_type_map().clone();
/// map.insert::<Money>(TypeMapping::new(Type::Scalar(Scalar::String), resolver(money)));
///
/// let ty = Reflector::new()
///     .with_type_map(&map)
///     .with_exclude("public")
///     .reflect::<Account>("account")?;
/// ```
#[derive(Clone, Copy)]
pub struct Reflector<'a> {
    type_map: &'a TypeMap,
    exclude: &'a str,
    names: &'a dyn NameGenerator,
}

impl Default for Reflector<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Reflector<'static> {
    /// Default type map, no exclusions, process-wide names.
    pub fn new() -> Self {
        Reflector {
            type_map: default_type_map(),
            exclude: "",
            names: &GLOBAL_NAMES,
        }
    }
}

impl<'a> Reflector<'a> {
    pub fn with_type_map<'b>(self, type_map: &'b TypeMap) -> Reflector<'b>
    where
        'a: 'b,
    {
        Reflector {
            type_map,
            exclude: self.exclude,
            names: self.names,
        }
    }

    /// Fields whose `gqlexclude` tag lists `exclude` are left out. The empty
    /// token excludes nothing.
    pub fn with_exclude<'b>(self, exclude: &'b str) -> Reflector<'b>
    where
        'a: 'b,
    {
        Reflector {
            type_map: self.type_map,
            exclude,
            names: self.names,
        }
    }

    pub fn with_name_generator<'b>(self, names: &'b dyn NameGenerator) -> Reflector<'b>
    where
        'a: 'b,
    {
        Reflector {
            type_map: self.type_map,
            exclude: self.exclude,
            names,
        }
    }

    pub fn type_map(&self) -> &'a TypeMap {
        self.type_map
    }

    pub fn exclude(&self) -> &'a str {
        self.exclude
    }

    /// Reflects `T`, using `name` as the base of generated object type names.
    pub fn reflect<T: Reflect>(&self, name: &str) -> Result<Type, ReflectError> {
        self.reflect_type(name, &T::type_info())
    }

    /// Returns the schema type that represents `info`, recursively.
    pub fn reflect_type(&self, name: &str, info: &TypeInfo) -> Result<Type, ReflectError> {
        self.reflect_type_impl(name, info, &mut Vec::new())
    }

    /// Returns a field named `name` whose type represents `info` and whose
    /// resolver is the one registered for `info`, or the default resolver.
    pub fn reflect_field(&self, name: &str, info: &TypeInfo) -> Result<Field, ReflectError> {
        self.reflect_field_impl(name, info, &mut Vec::new())
    }

    fn reflect_field_impl(
        &self,
        name: &str,
        info: &TypeInfo,
        enclosing: &mut Vec<TypeKey>,
    ) -> Result<Field, ReflectError> {
        let ty = self.reflect_type_impl(name, info, enclosing)?;
        let resolve = self.type_map.resolver(info.key());
        Ok(Field::new(name, ty, resolve))
    }

    fn reflect_type_impl(
        &self,
        name: &str,
        info: &TypeInfo,
        enclosing: &mut Vec<TypeKey>,
    ) -> Result<Type, ReflectError> {
        if let Some(mapping) = self.type_map.get(info.key()) {
            return Ok(mapping.output.clone());
        }

        match info.kind() {
            Kind::String => Ok(Type::Scalar(Scalar::String)),
            // The shape of an open value is unknown until runtime; it is
            // exposed as text.
            Kind::Any => Ok(Type::Scalar(Scalar::String)),
            Kind::Bool => Ok(Type::Scalar(Scalar::Boolean)),
            Kind::Int(_) => Ok(Type::Scalar(Scalar::Int)),
            Kind::Float(_) => Ok(Type::Scalar(Scalar::Float)),
            Kind::Struct(fields) => self.reflect_struct(name, info, fields, enclosing),
            Kind::Sequence(elem) => Ok(Type::list(self.reflect_type_impl(name, elem, enclosing)?)),
            Kind::Invalid => Err(ReflectError::InvalidType {
                type_name: info.key().name().to_string(),
            }),
            Kind::Unsupported(kind) => Err(ReflectError::UnsupportedShape {
                kind: *kind,
                type_name: info.key().name().to_string(),
            }),
        }
    }

    fn reflect_struct(
        &self,
        name: &str,
        info: &TypeInfo,
        fields: &[FieldInfo],
        enclosing: &mut Vec<TypeKey>,
    ) -> Result<Type, ReflectError> {
        if enclosing.contains(info.key()) {
            return Err(ReflectError::CyclicType {
                type_name: info.key().name().to_string(),
            });
        }
        enclosing.push(*info.key());

        let mut out = IndexMap::with_capacity(fields.len());
        for f in fields {
            if !include_field(f, self.exclude) {
                tracing::trace!(record = info.name(), field = f.name, "field excluded");
                continue;
            }
            let exposed = f.tags.first(SERIALIZE_TAG);
            let field = self.reflect_field_impl(exposed, &f.type_info(), enclosing)?;
            if out.insert(exposed.to_string(), field).is_some() {
                tracing::warn!(
                    record = info.name(),
                    field = exposed,
                    "several fields share one exposed name; the last one wins"
                );
            }
        }

        enclosing.pop();

        // Named after the fields so that nested objects get the lower suffixes.
        let type_name = self.names.next_name(name);
        tracing::debug!(record = info.name(), name = %type_name, fields = out.len(), "generated object type");
        Ok(Type::Object(Arc::new(ObjectType::new(type_name, out))))
    }
}

/// Whether a record field belongs in the schema.
///
/// It must carry a non-empty serialization name, and its exclusion tag must not
/// list `exclude`.
pub fn include_field(field: &FieldInfo, exclude: &str) -> bool {
    if field.tags.first(SERIALIZE_TAG).is_empty() {
        return false;
    }
    exclude.is_empty() || !field.tags.contains(EXCLUDE_TAG, exclude)
}

/// Returns the schema type that represents `info`, recursively, naming object
/// types with the process-wide counter.
pub fn reflect_type(
    name: &str,
    info: &TypeInfo,
    type_map: &TypeMap,
    exclude: &str,
) -> Result<Type, ReflectError> {
    Reflector::new()
        .with_type_map(type_map)
        .with_exclude(exclude)
        .reflect_type(name, info)
}

/// Returns the schema field that represents `info`; see [`reflect_type`].
pub fn reflect_field(
    name: &str,
    info: &TypeInfo,
    type_map: &TypeMap,
    exclude: &str,
) -> Result<Field, ReflectError> {
    Reflector::new()
        .with_type_map(type_map)
        .with_exclude(exclude)
        .reflect_field(name, info)
}

/// Reflects `T` with the default type map and no exclusions. The type's own
/// name is the base of generated object type names.
pub fn reflect<T: Reflect>() -> Result<Type, ReflectError> {
    let info = T::type_info();
    Reflector::new().reflect_type(info.name(), &info)
}
