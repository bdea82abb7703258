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

use variants::{multivisit, Variant, Visit};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Circle(f64);
#[derive(Debug, Clone, Copy, PartialEq)]
struct Square(f64);
impl variants::Alternative for Circle {}
impl variants::Alternative for Square {}

type Shape = Variant![Circle, Square];

struct Overlap;
impl Visit<(&Circle, &Circle)> for Overlap {
    type Output = &'static str;
    fn visit(self, _: (&Circle, &Circle)) -> &'static str {
        "circle/circle"
    }
}
impl Visit<(&Circle, &Square)> for Overlap {
    type Output = &'static str;
    fn visit(self, _: (&Circle, &Square)) -> &'static str {
        "circle/square"
    }
}
impl Visit<(&Square, &Circle)> for Overlap {
    type Output = &'static str;
    fn visit(self, _: (&Square, &Circle)) -> &'static str {
        "square/circle"
    }
}
impl Visit<(&Square, &Square)> for Overlap {
    type Output = &'static str;
    fn visit(self, _: (&Square, &Square)) -> &'static str {
        "square/square"
    }
}

#[test]
fn pairs() {
    let circle = Shape::new(Circle(1.0));
    let square = Shape::new(Square(2.0));
    assert_eq!(multivisit!(Overlap; &circle, &circle), "circle/circle");
    assert_eq!(multivisit!(Overlap; &circle, &square), "circle/square");
    assert_eq!(multivisit!(Overlap; &square, &circle), "square/circle");
    assert_eq!(multivisit!(Overlap; &square, &square), "square/square");
}

struct Record;
impl<A: core::fmt::Debug, B: core::fmt::Debug + Default, C: core::fmt::Debug>
    Visit<(&A, &mut B, C)> for Record
{
    type Output = String;
    fn visit(self, (a, b, c): (&A, &mut B, C)) -> String {
        let taken = core::mem::take(b);
        format!("{a:?} {taken:?} {c:?}")
    }
}

#[test]
fn mixed_value_categories() {
    let a = <Variant![u8, char]>::new('a');
    let mut b = <Variant![String, i32]>::new(String::from("b"));
    let c = <Variant![f64, bool]>::new(true);
    assert_eq!(multivisit!(Record; &a, &mut b, c), "'a' \"b\" true");
    assert_eq!(b.get::<String, _>().map(String::as_str), Some(""));
}

struct Total;
impl<A: Copy + Into<f64>, B: Copy + Into<f64>, C: Copy + Into<f64>, D: Copy + Into<f64>>
    Visit<(&A, &B, &C, &D)> for Total
{
    type Output = f64;
    fn visit(self, (a, b, c, d): (&A, &B, &C, &D)) -> f64 {
        (*a).into() + (*b).into() + (*c).into() + (*d).into()
    }
}

#[test]
fn four_ways() {
    type N = Variant![u8, f32, i32];
    let values = [N::new(1u8), N::new(2.0f32), N::new(3), N::new(4u8)];
    let [a, b, c, d] = &values;
    assert_eq!(multivisit!(Total; a, b, c, d), 10.0);
    assert_eq!(variants::multivisit::multivisit(Total, a, (b, (c, (d, ())))), 10.0);
}
