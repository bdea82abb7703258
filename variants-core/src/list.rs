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

//! Type-level lists of alternatives, and the algebra used to index, search and split them.

use core::marker::PhantomData;

use crate::classify::{Alternative, Class};
use crate::nat::{Halve, Nat, Succ, Zero};
use crate::storage::Union;
#[cfg(feature = "alloc")]
use crate::{classify::cast_same, recursive::Recursive};

/// Marks an alternative that is stored in place.
pub struct Inline<T>(PhantomData<T>);
/// Marks an alternative that is stored behind a [`Recursive`] indirection, which lets a
/// variant contain itself.
#[cfg(feature = "alloc")]
pub struct Boxed<T>(PhantomData<T>);

/// Describes how an alternative is stored (`Stored`), and what visitors see of it (`Visible`).
pub trait Slot {
    type Stored;
    type Visible;
    fn wrap(value: Self::Visible) -> Self::Stored;
    fn unwrap(stored: Self::Stored) -> Self::Visible;
    fn view(stored: &Self::Stored) -> &Self::Visible;
    fn view_mut(stored: &mut Self::Stored) -> &mut Self::Visible;
    /// Moves `value` onto the live `dst`.
    fn assign(dst: &mut Self::Stored, value: Self::Stored) {
        *dst = value
    }
}
impl<T> Slot for Inline<T> {
    type Stored = T;
    type Visible = T;
    fn wrap(value: T) -> T {
        value
    }
    fn unwrap(stored: T) -> T {
        stored
    }
    fn view(stored: &T) -> &T {
        stored
    }
    fn view_mut(stored: &mut T) -> &mut T {
        stored
    }
}
#[cfg(feature = "alloc")]
impl<T> Slot for Boxed<T> {
    type Stored = Recursive<T>;
    type Visible = T;
    fn wrap(value: T) -> Recursive<T> {
        Recursive::new(value)
    }
    fn unwrap(stored: Recursive<T>) -> T {
        stored.into_inner()
    }
    fn view(stored: &Recursive<T>) -> &T {
        stored.get()
    }
    fn view_mut(stored: &mut Recursive<T>) -> &mut T {
        stored.get_mut()
    }
    fn assign(dst: &mut Recursive<T>, value: Recursive<T>) {
        if value.is_empty() {
            *dst = value
        } else {
            dst.assign(value.into_inner())
        }
    }
}

/// The construction side of a [`Slot`].
pub trait SlotClass: Slot {
    const CLASS: Class;
    /// Boxed slots also adopt their wrapper, whatever their class.
    const BOXED: bool = false;
    fn adopt<S: Alternative>(source: S) -> Result<Self::Stored, S>;
    /// Like [`Self::adopt`], but assigns the result onto the live `dst`.
    ///
    /// `dst` is left untouched if `source` is refused, or if adopting it panics.
    fn adopt_onto<S: Alternative>(source: S, dst: &mut Self::Stored) -> Result<(), S> {
        Self::adopt(source).map(|stored| Self::assign(dst, stored))
    }
}
impl<T: Alternative> SlotClass for Inline<T> {
    const CLASS: Class = T::CLASS;
    fn adopt<S: Alternative>(source: S) -> Result<T, S> {
        T::adopt(source)
    }
}
/// Boxed slots accept whatever their wrapped type adopts, and the wrapper itself.
#[cfg(feature = "alloc")]
impl<T: Alternative> SlotClass for Boxed<T> {
    const CLASS: Class = T::CLASS;
    const BOXED: bool = true;
    fn adopt<S: Alternative>(source: S) -> Result<Recursive<T>, S> {
        match T::adopt(source) {
            Ok(value) => Ok(Recursive::new(value)),
            Err(source) => cast_same::<S, Recursive<T>>(source),
        }
    }
    fn adopt_onto<S: Alternative>(source: S, dst: &mut Recursive<T>) -> Result<(), S> {
        match T::adopt(source) {
            Ok(value) => {
                dst.assign(value);
                Ok(())
            }
            Err(source) => cast_same::<S, Recursive<T>>(source).map(|wrapper| *dst = wrapper),
        }
    }
}

/// The empty list.
pub struct End;
/// A list starting with `S`, followed by `T`.
pub struct Cons<S, T>(PhantomData<(S, T)>);

pub trait TypeList {
    const LEN: usize;
    type Len: Nat;
    /// A union of every alternative's stored type.
    type Cell;
    /// Drops the `which`th alternative in place.
    /// # Safety
    /// `cell` must point to a live value of the `which`th alternative.
    unsafe fn destroy(which: usize, cell: *mut u8);
}
impl TypeList for End {
    const LEN: usize = 0;
    type Len = Zero;
    type Cell = ();
    unsafe fn destroy(_: usize, _: *mut u8) {
        unreachable_unchecked!()
    }
}
impl<S: Slot, T: TypeList> TypeList for Cons<S, T> {
    const LEN: usize = T::LEN + 1;
    type Len = Succ<T::Len>;
    type Cell = Union<S::Stored, T::Cell>;
    unsafe fn destroy(which: usize, cell: *mut u8) {
        if which == 0 {
            core::ptr::drop_in_place(cell.cast::<S::Stored>())
        } else {
            T::destroy(which - 1, cell)
        }
    }
}

/// Finds where `X` sits in a list. `I` is inferred, and only there to keep impls disjoint.
pub trait Locate<X, I>: TypeList {
    const INDEX: usize;
    type Slot: Slot<Visible = X>;
}
impl<X, T: TypeList> Locate<X, Zero> for Cons<Inline<X>, T> {
    const INDEX: usize = 0;
    type Slot = Inline<X>;
}
#[cfg(feature = "alloc")]
impl<X, T: TypeList> Locate<X, Zero> for Cons<Boxed<X>, T> {
    const INDEX: usize = 0;
    type Slot = Boxed<X>;
}
impl<X, I, S: Slot, T: Locate<X, I>> Locate<X, Succ<I>> for Cons<S, T> {
    const INDEX: usize = T::INDEX + 1;
    type Slot = T::Slot;
}
pub type SlotOf<L, X, I> = <L as Locate<X, I>>::Slot;
pub type StoredOf<L, X, I> = <SlotOf<L, X, I> as Slot>::Stored;

/// Like [`Locate`], but matches the exact slot rather than the visible type.
pub trait Contains<S, I>: TypeList {
    const INDEX: usize;
}
impl<S: Slot, T: TypeList> Contains<S, Zero> for Cons<S, T> {
    const INDEX: usize = 0;
}
impl<S, I, H: Slot, T: Contains<S, I>> Contains<S, Succ<I>> for Cons<H, T> {
    const INDEX: usize = T::INDEX + 1;
}

/// Proof that every alternative of `Self` is also an alternative of `Super`.
///
/// `Indices` is a list of [`Contains`] indices, inferred at the call site.
pub trait Embed<Super: TypeList, Indices>: TypeList {
    /// Moves the `which`th alternative from `src` to `dst`, returning its index in `Super`.
    /// # Safety
    /// `src` must hold a live `which`th alternative, which is considered moved-from afterwards.
    /// `dst` must be valid for writes of `Super::Cell`.
    unsafe fn embed(which: usize, src: *const u8, dst: *mut u8) -> usize;
}
impl<Super: TypeList> Embed<Super, ()> for End {
    unsafe fn embed(_: usize, _: *const u8, _: *mut u8) -> usize {
        unreachable_unchecked!()
    }
}
impl<Super, S, T, I, Is> Embed<Super, (I, Is)> for Cons<S, T>
where
    Super: Contains<S, I>,
    S: Slot,
    T: Embed<Super, Is>,
{
    unsafe fn embed(which: usize, src: *const u8, dst: *mut u8) -> usize {
        if which == 0 {
            core::ptr::copy_nonoverlapping(src.cast::<S::Stored>(), dst.cast::<S::Stored>(), 1);
            <Super as Contains<S, I>>::INDEX
        } else {
            T::embed(which - 1, src, dst)
        }
    }
}

/// Index-directed access to a list, for each of the 256 possible indices.
///
/// Deep indices resolve through as many nested impls: past a hundred or so, the using crate
/// needs a higher `#![recursion_limit]`.
pub trait TypeAt<const I: usize>: TypeList {
    type Slot: Slot;
}
impl<S: Slot, T: TypeList> TypeAt<0> for Cons<S, T> {
    type Slot = S;
}
macro_rules! type_at {
    ($first: literal $(, $i: literal)*) => {
        type_at!(@after $first; $($i),*);
    };
    (@after $prev: literal; $i: literal $(, $rest: literal)*) => {
        impl<S: Slot, T: TypeAt<$prev>> TypeAt<$i> for Cons<S, T> {
            type Slot = <T as TypeAt<$prev>>::Slot;
        }
        type_at!(@after $i; $($rest),*);
    };
    (@after $prev: literal;) => {};
}
type_at!(
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
    26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47, 48, 49,
    50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63, 64
);
type_at!(
    64, 65, 66, 67, 68, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79, 80, 81, 82, 83, 84, 85, 86, 87,
    88, 89, 90, 91, 92, 93, 94, 95, 96, 97, 98, 99, 100, 101, 102, 103, 104, 105, 106, 107, 108,
    109, 110, 111, 112, 113, 114, 115, 116, 117, 118, 119, 120, 121, 122, 123, 124, 125, 126, 127,
    128
);
type_at!(
    128, 129, 130, 131, 132, 133, 134, 135, 136, 137, 138, 139, 140, 141, 142, 143, 144, 145, 146,
    147, 148, 149, 150, 151, 152, 153, 154, 155, 156, 157, 158, 159, 160, 161, 162, 163, 164, 165,
    166, 167, 168, 169, 170, 171, 172, 173, 174, 175, 176, 177, 178, 179, 180, 181, 182, 183, 184,
    185, 186, 187, 188, 189, 190, 191, 192
);
type_at!(
    192, 193, 194, 195, 196, 197, 198, 199, 200, 201, 202, 203, 204, 205, 206, 207, 208, 209, 210,
    211, 212, 213, 214, 215, 216, 217, 218, 219, 220, 221, 222, 223, 224, 225, 226, 227, 228, 229,
    230, 231, 232, 233, 234, 235, 236, 237, 238, 239, 240, 241, 242, 243, 244, 245, 246, 247, 248,
    249, 250, 251, 252, 253, 254, 255
);
/// The type visitors see for the `I`th alternative of `L`.
pub type Nth<L, const I: usize> = <<L as TypeAt<I>>::Slot as Slot>::Visible;
/// The type the `I`th alternative of `L` is stored as.
pub type NthStored<L, const I: usize> = <<L as TypeAt<I>>::Slot as Slot>::Stored;

/// Splits a list after its `K` first elements.
pub trait Split<K>: TypeList {
    type Left: TypeList;
    type Right: TypeList;
}
impl<L: TypeList> Split<Zero> for L {
    type Left = End;
    type Right = L;
}
impl<K, S: Slot, T: Split<K>> Split<Succ<K>> for Cons<S, T> {
    type Left = Cons<S, T::Left>;
    type Right = T::Right;
}
pub type HalfOf<L> = <<L as TypeList>::Len as Halve>::Half;
pub type LeftOf<L> = <L as Split<HalfOf<L>>>::Left;
pub type RightOf<L> = <L as Split<HalfOf<L>>>::Right;

/// Builds an alternative list.
///
/// Alternatives prefixed with `recursive` are stored behind a [`Recursive`] indirection.
/// ```
/// # use variants_core::*;
/// type Numbers = Alternatives![f64, f32, i32];
/// assert_eq!(<Numbers as TypeList>::LEN, 3);
/// ```
#[macro_export]
macro_rules! Alternatives {
    () => { $crate::End };
    (recursive $head: ty $(, $($tail: tt)*)?) => {
        $crate::Cons<$crate::Boxed<$head>, $crate::Alternatives![$($($tail)*)?]>
    };
    ($head: ty $(, $($tail: tt)*)?) => {
        $crate::Cons<$crate::Inline<$head>, $crate::Alternatives![$($($tail)*)?]>
    };
}
