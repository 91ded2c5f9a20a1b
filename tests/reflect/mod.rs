// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use crate::common::{assert_query_error, execute, root_field};
use anyhow::Result;
use gql_reflector::*;
use serde_json::json;

fn reflected<T: Reflect>(name: &str, root: &str, exclude: &str, value: &T) -> Result<Field> {
    let ty = Reflector::new().with_exclude(exclude).reflect::<T>(name)?;
    Ok(root_field(root, ty, value.to_value()))
}

#[test]
fn basic_type() -> Result<()> {
    let field = reflected("a", "s", "", &6i64)?;
    assert_eq!(execute(&field, "")?, json!({"data": {"s": 6}}));
    Ok(())
}

#[test]
fn simple_struct() -> Result<()> {
    gql_reflector::record! {
        struct S {
            #[tags(json = "a")]
            a: String,
        }
    }

    let field = reflected(
        "s",
        "s",
        "",
        &S {
            a: "hello world".to_string(),
        },
    )?;
    assert_eq!(
        execute(&field, "{a}")?,
        json!({"data": {"s": {"a": "hello world"}}})
    );
    Ok(())
}

#[test]
fn exclude() -> Result<()> {
    gql_reflector::record! {
        struct S {
            #[tags(json = "a", gqlexclude = "ignore")]
            a: String,
            #[tags(json = "b", gqlexclude = "f,ignore ,h")]
            b: String,
            #[tags(json = "c", gqlexclude = "c")]
            c: String,
        }
    }

    let value = S {
        a: "hello world".to_string(),
        b: "hello world".to_string(),
        c: "hello world".to_string(),
    };
    let field = reflected("s", "s", "ignore", &value)?;

    assert_query_error(&field, "{a}", r#"Cannot query field "a" on type"#);
    assert_query_error(&field, "{b}", r#"Cannot query field "b" on type"#);
    assert_eq!(
        execute(&field, "{c}")?,
        json!({"data": {"s": {"c": "hello world"}}})
    );
    Ok(())
}

#[test]
fn fields_without_serialization_name() -> Result<()> {
    gql_reflector::record! {
        struct S {
            #[tags(json = "a")]
            a: String,
            b: String,
        }
    }

    let value = S {
        a: "hello world".to_string(),
        b: "hello world".to_string(),
    };
    let field = reflected("s", "s", "ignore", &value)?;

    assert_eq!(
        execute(&field, "{a}")?,
        json!({"data": {"s": {"a": "hello world"}}})
    );
    assert_query_error(&field, "{b}", r#"Cannot query field "b" on type "#);
    Ok(())
}

#[cfg(feature = "time")]
mod data_types {
    use super::*;

    gql_reflector::record! {
        struct DataTypes {
            #[tags(json = "bool")]
            bool_: bool,
            #[tags(json = "string")]
            string: String,
            #[tags(json = "int")]
            int: isize,
            #[tags(json = "int_8")]
            int8: i8,
            #[tags(json = "int_16")]
            int16: i16,
            #[tags(json = "int_32")]
            int32: i32,
            #[tags(json = "int_64")]
            int64: i64,
            #[tags(json = "uint")]
            uint: usize,
            #[tags(json = "uint_8")]
            uint8: u8,
            #[tags(json = "uint_16")]
            uint16: u16,
            #[tags(json = "uint_32")]
            uint32: u32,
            #[tags(json = "uint_64")]
            uint64: u64,
            #[tags(json = "float_32")]
            float32: f32,
            #[tags(json = "float_64")]
            float64: f64,
            #[tags(json = "time")]
            time: chrono::DateTime<chrono::Utc>,
        }
    }

    #[test]
    fn data_types() -> Result<()> {
        let value = DataTypes {
            bool_: true,
            string: "string".to_string(),
            int: -5,
            int8: -5,
            int16: -5,
            int32: -5,
            int64: -5,
            uint: 5,
            uint8: 5,
            uint16: 5,
            uint32: 5,
            uint64: 5,
            float32: 5.5,
            float64: 5.5,
            time: chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2009, 11, 10, 23, 0, 0).unwrap(),
        };
        let field = reflected("data_types", "dt", "", &value)?;

        let result = execute(
            &field,
            r#"{
                bool
                string
                int
                int_8
                int_16
                int_32
                int_64
                uint
                uint_8
                uint_16
                uint_32
                uint_64
                float_32
                float_64
                time
            }"#,
        )?;

        assert_eq!(
            result,
            json!({
                "data": {
                    "dt": {
                        "bool": true,
                        "string": "string",
                        "int": -5,
                        "int_8": -5,
                        "int_16": -5,
                        "int_32": -5,
                        "int_64": -5,
                        "uint": 5,
                        "uint_8": 5,
                        "uint_16": 5,
                        "uint_32": 5,
                        "uint_64": 5,
                        "float_32": 5.5,
                        "float_64": 5.5,
                        "time": "2009-11-10T23:00:00Z"
                    }
                }
            })
        );
        Ok(())
    }
}

gql_reflector::record! {
    struct T1 {
        #[tags(json = "g")]
        g: String,
        #[tags(json = "i")]
        i: Value,
        #[tags(json = "is")]
        is: Vec<Value>,
    }
}

gql_reflector::record! {
    struct ComplexStruct {
        #[tags(json = "a")]
        a: String,
        #[tags(json = "b")]
        b: i32,
        #[tags(json = "s")]
        s: Vec<String>,
        #[tags(json = "single_t_1")]
        single_t1: T1,
        #[tags(json = "many_t_1_s")]
        many_t1s: Vec<T1>,
        #[tags(json = "c", gqlexclude = "ignore_me")]
        c: i32,
        #[tags(json = "c1", gqlexclude = "ignore_me2,ignore_me,ignore_me3")]
        c1: i32,
    }
}

fn t1(g: &str) -> T1 {
    T1 {
        g: g.to_string(),
        i: Value::Null,
        is: vec![],
    }
}

#[test]
fn complex_struct() -> Result<()> {
    let value = ComplexStruct {
        a: "hello world".to_string(),
        b: 6,
        s: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        single_t1: T1 {
            g: "GGG".to_string(),
            i: Value::from("a string"),
            is: vec![
                Value::from("another string"),
                Value::from(5),
                Value::from("and yes"),
            ],
        },
        many_t1s: vec![t1("G1"), t1("G2")],
        c: 1,
        c1: 2,
    };
    let field = reflected("t", "t", "ignore_me", &value)?;

    let result = execute(
        &field,
        r#"{
            a
            b
            single_t_1 {
                g
                i
                is
            }
            s
            many_t_1_s {
                g
                i
                is
            }
        }"#,
    )?;

    assert_eq!(
        result,
        json!({
            "data": {
                "t": {
                    "b": 6,
                    "many_t_1_s": [
                        {"is": [], "g": "G1", "i": null},
                        {"g": "G2", "i": null, "is": []}
                    ],
                    "s": ["A", "B", "C"],
                    "single_t_1": {
                        "i": "a string",
                        "is": ["another string", "5", "and yes"],
                        "g": "GGG"
                    },
                    "a": "hello world"
                }
            }
        })
    );

    assert_query_error(&field, "{c}", r#"Cannot query field "c" on type"#);
    assert_query_error(&field, "{c1}", r#"Cannot query field "c1" on type"#);
    Ok(())
}

#[test]
fn array() -> Result<()> {
    let field = reflected("a", "s", "", &vec!["hello".to_string(), "world".to_string()])?;
    assert_eq!(
        execute(&field, "")?,
        json!({"data": {"s": ["hello", "world"]}})
    );
    Ok(())
}

#[test]
fn resolution_is_order_independent() -> Result<()> {
    gql_reflector::record! {
        struct Forward {
            #[tags(json = "x")]
            x: i32,
            #[tags(json = "y")]
            y: String,
        }
    }
    gql_reflector::record! {
        struct Backward {
            #[tags(json = "y")]
            y: String,
            #[tags(json = "x")]
            x: i32,
        }
    }

    // Schema from one declaration order, values from the other.
    let ty = reflect::<Forward>()?;
    let source = Backward {
        y: "why".to_string(),
        x: 10,
    };
    let field = root_field("r", ty, source.to_value());
    assert_eq!(
        execute(&field, "{x y}")?,
        json!({"data": {"r": {"x": 10, "y": "why"}}})
    );
    Ok(())
}

#[test]
fn custom_mapping() -> Result<()> {
    gql_reflector::record! {
        struct Money {
            #[tags(json = "cents")]
            cents: i64,
        }
    }
    gql_reflector::record! {
        struct Account {
            #[tags(json = "owner")]
            owner: String,
            #[tags(json = "balance")]
            balance: Money,
        }
    }

    fn money(p: &ResolveParams<'_>) -> Result<Value, ResolveError> {
        let cents = default_resolver(p)?;
        let record = cents.as_record().map_err(|_| ResolveError::UnexpectedValue {
            field: p.info.field_name.to_string(),
            expected: "record",
            found: cents.kind_name(),
        })?;
        let cents = record
            .get("cents")
            .and_then(|v| v.as_number().ok())
            .and_then(|n| n.as_i64())
            .unwrap_or_default();
        Ok(Value::from(format!("${}.{:02}", cents / 100, cents % 100)))
    }

    let map = default_type_map()
        .clone()
        .with::<Money>(TypeMapping::new(Type::Scalar(Scalar::String), resolver(money)));
    let ty = Reflector::new().with_type_map(&map).reflect::<Account>("account")?;

    let value = Account {
        owner: "ana".to_string(),
        balance: Money { cents: 1234 },
    };
    let field = root_field("acct", ty, value.to_value());
    assert_eq!(
        execute(&field, "{owner balance}")?,
        json!({"data": {"acct": {"owner": "ana", "balance": "$12.34"}}})
    );

    assert_query_error(&field, "{balance {cents}}", "must not have a selection");
    Ok(())
}

#[test]
fn distinct_object_names() -> Result<()> {
    gql_reflector::record! {
        struct S {
            #[tags(json = "a")]
            a: String,
        }
    }

    let first = reflect::<S>()?;
    let second = reflect::<S>()?;
    assert_ne!(first.name(), second.name());
    Ok(())
}

#[test]
fn unsupported_kinds() {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::mpsc::Receiver;

    assert!(reflect::<HashMap<String, i32>>().is_err());
    assert!(reflect::<BTreeMap<String, i32>>().is_err());
    assert!(reflect::<fn() -> i32>().is_err());
    assert!(reflect::<Receiver<i32>>().is_err());
    assert!(reflect::<Option<String>>().is_err());
    assert!(reflect::<std::sync::Arc<String>>().is_err());
    assert!(reflect::<()>().is_err());
}

#[test]
fn schema_description() -> Result<()> {
    gql_reflector::record! {
        struct Inner {
            #[tags(json = "x")]
            x: f64,
        }
    }
    gql_reflector::record! {
        struct Outer {
            #[tags(json = "items")]
            items: Vec<Inner>,
        }
    }

    let names = SequentialNameGenerator::new();
    let ty = Reflector::new()
        .with_name_generator(&names)
        .reflect::<Outer>("outer")?;
    assert_eq!(
        serde_json::to_value(&ty)?,
        json!({
            "kind": "object",
            "name": "outer2",
            "fields": {
                "items": {
                    "kind": "list",
                    "ofType": {
                        "kind": "object",
                        "name": "items1",
                        "fields": { "x": { "kind": "scalar", "name": "Float" } }
                    }
                }
            }
        })
    );
    Ok(())
}
