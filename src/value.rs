// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::number::Number;
use crate::tags::Tags;

use core::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

#[cfg(feature = "time")]
use chrono::{DateTime, SecondsFormat, Utc};

// Resolvers may run on any thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(Arc<str>),
    Array(Arc<Vec<Value>>),

    // Runtime image of a reflected record: declared fields with their tags.
    Record(Arc<Record>),

    #[cfg(feature = "time")]
    Time(DateTime<Utc>),
}

/// Runtime image of a record value.
///
/// A record remembers, for every declared field, the field's tags alongside its
/// current value. The default resolver locates fields through these tags rather
/// than through their position, so it is insensitive to field order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: &'static str,
    fields: Vec<RecordField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub name: &'static str,
    pub tags: Tags,
    pub value: Value,
}

impl Record {
    pub fn new(type_name: &'static str) -> Self {
        Record {
            type_name,
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn push(&mut self, name: &'static str, tags: Tags, value: Value) {
        self.fields.push(RecordField { name, tags, value });
    }

    pub fn with_field(mut self, name: &'static str, tags: Tags, value: Value) -> Self {
        self.push(name, tags, value);
        self
    }

    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    /// Value of the declared field called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Value of the first field whose tag `key` has `name` as its first token.
    pub fn find_by_tag(&self, key: &str, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.tags.first(key) == name)
            .map(|f| &f.value)
    }
}

impl Serialize for Record {
    // Only fields carrying a serialization name are emitted, keyed by that name.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let tagged: Vec<_> = self
            .fields
            .iter()
            .filter_map(|f| match f.tags.first(crate::tags::SERIALIZE_TAG) {
                "" => None,
                name => Some((name, &f.value)),
            })
            .collect();
        let mut map = serializer.serialize_map(Some(tagged.len()))?;
        for (k, v) in tagged {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s.as_ref()),
            Value::Number(n) => n.serialize(serializer),
            Value::Array(a) => a.serialize(serializer),
            Value::Record(r) => r.serialize(serializer),
            #[cfg(feature = "time")]
            Value::Time(t) => serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            // Bare text, so that coercing to a string does not add quotes.
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n}"),
            #[cfg(feature = "time")]
            Value::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            _ => match serde_json::to_string(self) {
                Ok(s) => write!(f, "{s}"),
                Err(_e) => Err(fmt::Error),
            },
        }
    }
}

impl Value {
    pub fn new_array() -> Value {
        Value::from(Vec::<Value>::new())
    }

    pub fn to_json_str(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
            #[cfg(feature = "time")]
            Value::Time(_) => "time",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Result<&bool> {
        match self {
            Value::Bool(b) => Ok(b),
            _ => Err(anyhow!("not a bool")),
        }
    }

    pub fn as_string(&self) -> Result<&Arc<str>> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(anyhow!("not a string")),
        }
    }

    pub fn as_number(&self) -> Result<&Number> {
        match self {
            Value::Number(n) => Ok(n),
            _ => Err(anyhow!("not a number")),
        }
    }

    pub fn as_array(&self) -> Result<&Vec<Value>> {
        match self {
            Value::Array(a) => Ok(a),
            _ => Err(anyhow!("not an array")),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(a) => Ok(Arc::make_mut(a)),
            _ => Err(anyhow!("not an array")),
        }
    }

    pub fn as_record(&self) -> Result<&Record> {
        match self {
            Value::Record(r) => Ok(r),
            _ => Err(anyhow!("not a record")),
        }
    }

    #[cfg(feature = "time")]
    pub fn as_time(&self) -> Result<&DateTime<Utc>> {
        match self {
            Value::Time(t) => Ok(t),
            _ => Err(anyhow!("not a time")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

macro_rules! from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(Arc::new(a))
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(Arc::new(r))
    }
}

#[cfg(feature = "time")]
impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}
