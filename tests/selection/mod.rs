// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

use crate::common::{execute, parse};
use anyhow::{bail, Result};
use gql_reflector::*;
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::{Arc, Mutex};
use test_generator::test_resources;

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Case {
    pub note: String,
    pub query: String,
    #[serde(default)]
    pub path: Vec<String>,
    pub want: Vec<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Test {
    cases: Vec<Case>,
}

fn yaml_test_impl(file: &str) -> Result<()> {
    println!("\nrunning {}", file);

    let yaml = std::fs::read_to_string(file)?;
    let test: Test = serde_yaml::from_str(&yaml)?;

    for case in &test.cases {
        print!("case {} ", &case.note);

        let fields = parse(&case.query)?;
        let path: Vec<&str> = case.path.iter().map(String::as_str).collect();
        let selected = selected_fields(&path, &fields);
        if selected != case.want {
            bail!(
                "{}: selected {:?} at path {:?}, expected {:?}",
                case.note,
                selected,
                case.path,
                case.want
            );
        }

        println!("passed");
    }
    println!("{} cases passed.", test.cases.len());
    Ok(())
}

fn yaml_test(file: &str) -> Result<()> {
    match yaml_test_impl(file) {
        Ok(_) => Ok(()),
        Err(e) => {
            // If Err is returned, it doesn't always get printed by cargo test.
            // Therefore, panic with the error.
            panic!("{}", e);
        }
    }
}

#[test]
#[ignore = "intended for running a single yaml file"]
fn one_yaml() -> Result<()> {
    let mut file = String::default();
    for a in env::args() {
        if a.ends_with(".yaml") {
            file = a;
            break;
        }
    }

    if file.is_empty() {
        bail!("missing yaml test file");
    }

    yaml_test(file.as_str())
}

#[test_resources("tests/selection/cases/*.yaml")]
fn run(path: &str) {
    yaml_test(path).unwrap()
}

gql_reflector::record! {
    struct D {
        #[tags(json = "x")]
        x: i32,
        #[tags(json = "y")]
        y: i32,
    }
}

gql_reflector::record! {
    struct S {
        #[tags(json = "a")]
        a: String,
        #[tags(json = "b")]
        b: String,
        #[tags(json = "c")]
        c: String,
        #[tags(json = "d")]
        d: D,
    }
}

#[test]
fn selected_fields_inside_resolver() -> Result<()> {
    let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
    let record = S {
        a: "hello world".to_string(),
        b: String::new(),
        c: String::new(),
        d: D { x: 1, y: 2 },
    }
    .to_value();

    let ty = reflect::<S>()?;
    let log = seen.clone();
    let field = Field::new(
        "s",
        ty,
        resolver(move |p| {
            let mut log = log.lock().unwrap();
            log.push(p.info.selected_fields(&[]));
            log.push(p.info.selected_fields(&["s"]));
            log.push(p.info.selected_fields(&["s", "d"]));
            log.push(p.info.selected_fields(&["xxx"]));
            Ok(record.clone())
        }),
    );

    let result = execute(&field, "{a b d{x}}")?;
    assert_eq!(
        result,
        serde_json::json!({"data": {"s": {"a": "hello world", "b": "", "d": {"x": 1}}}})
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], ["s"]);
    assert_eq!(seen[1], ["a", "b", "d"]);
    assert_eq!(seen[2], ["x"]);
    assert!(seen[3].is_empty());
    Ok(())
}

#[test]
fn nested_resolver_sees_its_own_field() -> Result<()> {
    let seen: Arc<Mutex<Vec<String>>> = Arc::default();
    let log = seen.clone();

    let mut map = default_type_map().clone();
    map.insert::<D>(TypeMapping::new(
        Type::Scalar(Scalar::String),
        resolver(move |p| {
            let mut log = log.lock().unwrap();
            log.extend(p.info.selected_fields(&[]));
            Ok(Value::from("d"))
        }),
    ));

    let ty = Reflector::new().with_type_map(&map).reflect::<S>("s")?;
    let value = S {
        a: String::new(),
        b: String::new(),
        c: String::new(),
        d: D { x: 0, y: 0 },
    };
    let field = crate::common::root_field("s", ty, value.to_value());
    execute(&field, "{d}")?;

    assert_eq!(*seen.lock().unwrap(), ["d"]);
    Ok(())
}
