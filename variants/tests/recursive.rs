//
// Copyright (c) 2023 ZettaScale Technology
//
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// http://www.eclipse.org/legal/epl-2.0, or the Apache License, Version 2.0
// which is available at https://www.apache.org/licenses/LICENSE-2.0.
//
// SPDX-License-Identifier: EPL-2.0 OR Apache-2.0
//
// Contributors:
//   Pierre Avital, <pierre.avital@me.com>
//

use variants::{Alternative, Alternatives, BinarySearch, JumpTable, Recursive, Variant, Visit};

#[derive(Alternative, Debug, Clone, PartialEq)]
#[alternative(from(Vec<Json>))]
struct Array(Vec<Json>);
impl From<Vec<Json>> for Array {
    fn from(value: Vec<Json>) -> Self {
        Array(value)
    }
}

type Json = Variant![bool, f64, String, recursive Array];

struct Render;
impl Visit<&bool> for Render {
    type Output = String;
    fn visit(self, value: &bool) -> String {
        value.to_string()
    }
}
impl Visit<&f64> for Render {
    type Output = String;
    fn visit(self, value: &f64) -> String {
        value.to_string()
    }
}
impl Visit<&String> for Render {
    type Output = String;
    fn visit(self, value: &String) -> String {
        format!("{value:?}")
    }
}
impl Visit<&Array> for Render {
    type Output = String;
    fn visit(self, Array(items): &Array) -> String {
        let items = items.iter().map(|item| item.visit(Render)).collect::<Vec<_>>();
        format!("[{}]", items.join(","))
    }
}

fn sample() -> Json {
    Json::new(vec![
        Json::new(true),
        Json::new(1.5),
        Json::new(Array(vec![Json::new("nested")])),
    ])
}

#[test]
fn recursive_alternatives() {
    let json = sample();
    assert_eq!(json.which(), 3);
    assert_eq!(json.visit(Render), r#"[true,1.5,["nested"]]"#);
    assert_eq!(Json::new(String::from("s")).which(), 2);
}

#[test]
fn copies_are_deep() {
    let json = sample();
    let mut copy = json.clone();
    assert_eq!(copy, json);
    let original = json.get::<Array, _>().unwrap().0.as_ptr();
    let copied = copy.get::<Array, _>().unwrap().0.as_ptr();
    assert_ne!(original, copied);
    copy.get_mut::<Array, _>().unwrap().0.pop();
    assert_ne!(copy, json);
    assert_eq!(json.visit(Render), r#"[true,1.5,["nested"]]"#);
    copy.clone_from(&json);
    assert_eq!(copy, json);
}

#[test]
fn moves_leave_wrappers_empty() {
    let mut wrapper = Recursive::new(Array(Vec::new()));
    let moved = wrapper.take();
    assert!(wrapper.is_empty());
    assert!(!moved.is_empty());
    let copied = moved.clone();
    assert!(!moved.is_empty());
    assert_eq!(copied, moved);
    let json = Json::new(moved);
    assert_eq!(json.which(), 3);
    assert_eq!(json.take::<Array, _>().ok(), Some(Array(Vec::new())));
}

#[test]
fn engines_walk_trees_alike() {
    let tree = sample().with_engine::<JumpTable>();
    assert_eq!(tree.visit(Render), r#"[true,1.5,["nested"]]"#);
    let tree = tree.with_engine::<BinarySearch>();
    assert_eq!(
        tree.match_ref((
            |_: &bool| 0,
            |_: &f64| 0,
            |_: &String| 0,
            |array: &Array| array.0.len(),
        )),
        3
    );
    let _: Variant<Alternatives![bool, f64, String, recursive Array], BinarySearch> = tree;
}
