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

//! Visiting several variants at once.
//!
//! Variants are peeled one at a time: each dispatch appends the concrete item it found to an
//! accumulator tuple, and hands over to the next variant. Once all are peeled, the visitor is
//! called with the whole tuple, so a visitor over `n` variants implements `Visit<(A, B, ..)>`
//! for each combination of items.

use crate::dispatch::{Dispatch, Engine, Mut, Own, Ref, Visit};
use crate::Variant;

/// Something that can be dispatched on: `&Variant`, `&mut Variant` or `Variant`.
pub trait Accept<V> {
    type Output;
    fn accept(self, visitor: V) -> Self::Output;
}
impl<'a, L: Dispatch<Ref<'a>, V>, E: Engine, V> Accept<V> for &'a Variant<L, E> {
    type Output = L::Output;
    fn accept(self, visitor: V) -> L::Output {
        self.visit(visitor)
    }
}
impl<'a, L: Dispatch<Mut<'a>, V>, E: Engine, V> Accept<V> for &'a mut Variant<L, E> {
    type Output = L::Output;
    fn accept(self, visitor: V) -> L::Output {
        self.visit_mut(visitor)
    }
}
impl<L: Dispatch<Own, V>, E: Engine, V> Accept<V> for Variant<L, E> {
    type Output = L::Output;
    fn accept(self, visitor: V) -> L::Output {
        self.into_visit(visitor)
    }
}

/// Tuples that can grow by one element.
pub trait Append<X> {
    type Output;
    fn append(self, x: X) -> Self::Output;
}
macro_rules! append {
    ($(($($t: ident),*))*) => {$(
        impl<$($t,)* X> Append<X> for ($($t,)*) {
            type Output = ($($t,)* X,);
            #[allow(non_snake_case)]
            fn append(self, x: X) -> Self::Output {
                let ($($t,)*) = self;
                ($($t,)* x,)
            }
        }
    )*};
}
append! {
    ()
    (A)
    (A, B)
    (A, B, C)
    (A, B, C, D)
    (A, B, C, D, F)
    (A, B, C, D, F, G)
    (A, B, C, D, F, G, H)
}

/// The visitor handed to each variant but the last: `Rest` is a `(next, rest)` chain ending
/// with `()`.
pub struct Peel<V, Acc, Rest> {
    visitor: V,
    acc: Acc,
    rest: Rest,
}
impl<X, V, Acc: Append<X>> Visit<X> for Peel<V, Acc, ()>
where
    V: Visit<Acc::Output>,
{
    type Output = V::Output;
    fn visit(self, item: X) -> V::Output {
        self.visitor.visit(self.acc.append(item))
    }
}
impl<X, V, Acc: Append<X>, W, R> Visit<X> for Peel<V, Acc, (W, R)>
where
    W: Accept<Peel<V, Acc::Output, R>>,
{
    type Output = W::Output;
    fn visit(self, item: X) -> W::Output {
        let (next, rest) = self.rest;
        next.accept(Peel {
            visitor: self.visitor,
            acc: self.acc.append(item),
            rest,
        })
    }
}

/// Calls `visitor` with a tuple of the active alternatives of `first` and of each variant in
/// `rest`, a `(next, rest)` chain ending with `()`. Prefer the [`multivisit!`](crate::multivisit!)
/// macro, which builds the chain.
pub fn multivisit<V, W, R>(visitor: V, first: W, rest: R) -> W::Output
where
    W: Accept<Peel<V, (), R>>,
{
    first.accept(Peel {
        visitor,
        acc: (),
        rest,
    })
}

/// Visits up to 8 variants at once: `multivisit!(visitor; &a, &mut b, c)`.
///
/// Each argument's form decides how its alternative is passed: by reference, mutable
/// reference, or value.
/// ```
/// # use variants_core::*;
/// struct Sum;
/// impl<A: Copy + Into<f64>, B: Copy + Into<f64>> Visit<(&A, &B)> for Sum {
///     type Output = f64;
///     fn visit(self, (a, b): (&A, &B)) -> f64 {
///         (*a).into() + (*b).into()
///     }
/// }
/// let a = <Variant![u8, f32]>::new(1u8);
/// let b = <Variant![i32, f64]>::new(2.5);
/// assert_eq!(multivisit!(Sum; &a, &b), 3.5);
/// ```
#[macro_export]
macro_rules! multivisit {
    (@rest) => { () };
    (@rest $head: expr $(, $tail: expr)*) => {
        ($head, $crate::multivisit!(@rest $($tail),*))
    };
    ($visitor: expr; $first: expr $(, $rest: expr)* $(,)?) => {
        $crate::multivisit::multivisit($visitor, $first, $crate::multivisit!(@rest $($rest),*))
    };
}
