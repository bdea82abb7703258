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

//! Classification of alternative types, and the "safely constructible" relation that drives
//! [`Variant::new`](crate::Variant::new).
//!
//! Numbers are sorted into classes (integers, characters, booleans, floats), and given a
//! portable rank within their class. A value may only flow into a slot of the same class whose
//! rank is at least its own: narrowing, sign changes (except same-rank signed to unsigned) and
//! class changes are refused. Pointers may only flow into pointers to the same pointee, and never
//! mix with numbers. Everything else is [`Class::Opaque`]: opaque values never flow into numbers
//! or pointers, and opaque targets only see numbers or pointers if they declare adopting them.
//! Whatever remains undecided defers to the target's [`Alternative::adopt`].

use core::any::TypeId;
use core::mem::ManuallyDrop;

/// The class a type belongs to when deciding safe conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Integer { rank: u8, signed: bool },
    Character { rank: u8 },
    Boolean,
    Floating { rank: u8 },
    Pointer,
    /// Any other type. `numbers` and `pointers` tell whether its [`Alternative::adopt`] may
    /// accept values of those classes; other opaque values are always left to `adopt`.
    Opaque { numbers: bool, pointers: bool },
}
impl Class {
    /// An opaque type that only adopts opaque values.
    pub const OPAQUE: Class = Class::Opaque {
        numbers: false,
        pointers: false,
    };
    /// `self`, also adopting values of class `source`.
    ///
    /// Only meaningful on opaque classes: other classes are returned unchanged.
    pub const fn accepting(self, source: Class) -> Class {
        match (self, source) {
            (Class::Opaque { numbers, .. }, Class::Pointer) => Class::Opaque {
                numbers,
                pointers: true,
            },
            (Class::Opaque { .. }, Class::Opaque { .. }) => self,
            (Class::Opaque { pointers, .. }, _) => Class::Opaque {
                numbers: true,
                pointers,
            },
            _ => self,
        }
    }
    /// The class of an owning wrapper around `inner`, adopting whatever `inner` adopts.
    pub const fn wrapping(inner: Class) -> Class {
        match inner {
            Class::Opaque { .. } => inner,
            _ => Class::OPAQUE.accepting(inner),
        }
    }
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Class::Integer { .. } | Class::Character { .. } | Class::Boolean | Class::Floating { .. }
        )
    }
}

/// The outcome of [`verdict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The conversion is always accepted.
    Safe,
    /// The conversion is always refused.
    Unsafe,
    /// The target's [`Alternative::adopt`] decides.
    Deferred,
}

/// Decides whether a value of class `source` may initialize a slot of class `target`.
pub const fn verdict(target: Class, source: Class) -> Verdict {
    const fn deferred_if(adopts: bool) -> Verdict {
        if adopts {
            Verdict::Deferred
        } else {
            Verdict::Unsafe
        }
    }
    const fn ranked(target: u8, source: u8) -> Verdict {
        if target >= source {
            Verdict::Safe
        } else {
            Verdict::Unsafe
        }
    }
    match (target, source) {
        (Class::Opaque { .. }, Class::Opaque { .. }) => Verdict::Deferred,
        (Class::Opaque { pointers, .. }, Class::Pointer) => deferred_if(pointers),
        (Class::Opaque { numbers, .. }, _) => deferred_if(numbers),
        (_, Class::Opaque { .. }) => Verdict::Unsafe,
        (Class::Pointer, Class::Pointer) => Verdict::Deferred,
        (Class::Pointer, _) | (_, Class::Pointer) => Verdict::Unsafe,
        (
            Class::Integer {
                rank: target,
                signed: to_signed,
            },
            Class::Integer {
                rank: source,
                signed: from_signed,
            },
        ) => {
            if to_signed == from_signed {
                ranked(target, source)
            } else if from_signed && target == source {
                Verdict::Safe
            } else {
                Verdict::Unsafe
            }
        }
        (Class::Character { rank: target }, Class::Character { rank: source })
        | (Class::Floating { rank: target }, Class::Floating { rank: source }) => {
            ranked(target, source)
        }
        (Class::Boolean, Class::Boolean) => Verdict::Safe,
        _ => Verdict::Unsafe,
    }
}

/// Shorthand for `verdict(A::CLASS, B::CLASS)`.
pub const fn safely_constructible<A: Alternative, B: Alternative>() -> Verdict {
    verdict(A::CLASS, B::CLASS)
}

/// A numeric value, widened to the largest representation of its class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Signed(i128),
    Unsigned(u128),
    Float(f64),
    Char(char),
    Bool(bool),
}

/// A type that may be stored in a [`Variant`](crate::Variant).
///
/// Opaque types only need an empty impl (or `#[derive(Alternative)]`): they will then accept
/// values of their own type only. An opaque type overriding `adopt` to accept numbers or
/// pointers must say so in its `CLASS` (see [`Class::accepting`]), or those values will never
/// reach it.
pub trait Alternative: Sized + 'static {
    const CLASS: Class = Class::OPAQUE;
    /// Numeric types expose their value here so that other numeric types may adopt it.
    fn to_scalar(&self) -> Option<Scalar> {
        None
    }
    /// Attempts to build `Self` from `source`, handing `source` back if that conversion
    /// isn't safe.
    fn adopt<S: Alternative>(source: S) -> Result<Self, S> {
        cast_same(source)
    }
}

/// Moves `source` into a `D` if and only if `S` and `D` are the same type.
pub fn cast_same<S: 'static, D: 'static>(source: S) -> Result<D, S> {
    if TypeId::of::<S>() == TypeId::of::<D>() {
        let source = ManuallyDrop::new(source);
        // SAFETY: `S` and `D` are the same type, and `source` won't be dropped.
        Ok(unsafe { core::ptr::read(&*source as *const S as *const D) })
    } else {
        Err(source)
    }
}

/// Tries `cast_same` into `$ty`, returning `$map(value)` from the enclosing function on success,
/// and rebinding `$source` otherwise.
macro_rules! accept {
    ($source: ident as $ty: ty => $map: expr) => {
        let $source = match $crate::classify::cast_same::<_, $ty>($source) {
            Ok(value) => return Ok($map(value)),
            Err(source) => source,
        };
    };
}
pub(crate) use accept;

macro_rules! integers {
    ($($t: ty => $rank: literal, $signed: literal;)*) => {$(
        impl Alternative for $t {
            const CLASS: Class = Class::Integer { rank: $rank, signed: $signed };
            fn to_scalar(&self) -> Option<Scalar> {
                Some(if $signed {
                    Scalar::Signed(*self as i128)
                } else {
                    Scalar::Unsigned(*self as u128)
                })
            }
            fn adopt<S: Alternative>(source: S) -> Result<Self, S> {
                if let Verdict::Safe = verdict(Self::CLASS, S::CLASS) {
                    match source.to_scalar() {
                        Some(Scalar::Signed(value)) => return Ok(value as $t),
                        Some(Scalar::Unsigned(value)) => return Ok(value as $t),
                        _ => {}
                    }
                }
                Err(source)
            }
        }
    )*};
}
integers! {
    i8 => 2, true;
    u8 => 2, false;
    i16 => 4, true;
    u16 => 4, false;
    i32 => 6, true;
    u32 => 6, false;
    isize => 7, true;
    usize => 7, false;
    i64 => 8, true;
    u64 => 8, false;
    i128 => 10, true;
    u128 => 10, false;
}

macro_rules! floats {
    ($($t: ty => $rank: literal;)*) => {$(
        impl Alternative for $t {
            const CLASS: Class = Class::Floating { rank: $rank };
            fn to_scalar(&self) -> Option<Scalar> {
                Some(Scalar::Float(*self as f64))
            }
            fn adopt<S: Alternative>(source: S) -> Result<Self, S> {
                if let Verdict::Safe = verdict(Self::CLASS, S::CLASS) {
                    if let Some(Scalar::Float(value)) = source.to_scalar() {
                        return Ok(value as $t);
                    }
                }
                Err(source)
            }
        }
    )*};
}
floats! {
    f32 => 1;
    f64 => 2;
}

impl Alternative for char {
    const CLASS: Class = Class::Character { rank: 1 };
    fn to_scalar(&self) -> Option<Scalar> {
        Some(Scalar::Char(*self))
    }
    fn adopt<S: Alternative>(source: S) -> Result<Self, S> {
        match source.to_scalar() {
            Some(Scalar::Char(value)) if verdict(Self::CLASS, S::CLASS) == Verdict::Safe => {
                Ok(value)
            }
            _ => Err(source),
        }
    }
}
impl Alternative for bool {
    const CLASS: Class = Class::Boolean;
    fn to_scalar(&self) -> Option<Scalar> {
        Some(Scalar::Bool(*self))
    }
    fn adopt<S: Alternative>(source: S) -> Result<Self, S> {
        match source.to_scalar() {
            Some(Scalar::Bool(value)) if verdict(Self::CLASS, S::CLASS) == Verdict::Safe => {
                Ok(value)
            }
            _ => Err(source),
        }
    }
}
impl Alternative for () {}

impl<T: ?Sized + 'static> Alternative for *const T {
    const CLASS: Class = Class::Pointer;
    fn adopt<S: Alternative>(source: S) -> Result<Self, S> {
        accept!(source as *const T => core::convert::identity);
        accept!(source as *mut T => |ptr: *mut T| ptr as *const T);
        accept!(source as &'static mut T => |ptr: &'static mut T| ptr as *const T);
        cast_same::<_, &'static T>(source).map(|ptr| ptr as *const T)
    }
}
impl<T: ?Sized + 'static> Alternative for *mut T {
    const CLASS: Class = Class::Pointer;
    fn adopt<S: Alternative>(source: S) -> Result<Self, S> {
        accept!(source as *mut T => core::convert::identity);
        cast_same::<_, &'static mut T>(source).map(|ptr| ptr as *mut T)
    }
}
impl<T: ?Sized + 'static> Alternative for &'static T {
    const CLASS: Class = Class::Pointer;
    fn adopt<S: Alternative>(source: S) -> Result<Self, S> {
        accept!(source as &'static T => core::convert::identity);
        cast_same::<_, &'static mut T>(source).map(|ptr| -> &'static T { ptr })
    }
}
impl<T: ?Sized + 'static> Alternative for &'static mut T {
    const CLASS: Class = Class::Pointer;
}

impl<T: 'static> Alternative for Option<T> {}
impl<T: 'static, const N: usize> Alternative for [T; N] {}

#[cfg(feature = "alloc")]
mod alloc_impls {
    use super::*;
    use alloc::{boxed::Box, string::String, vec::Vec};

    impl Alternative for String {
        const CLASS: Class = Class::OPAQUE.accepting(Class::Pointer);
        fn adopt<S: Alternative>(source: S) -> Result<Self, S> {
            accept!(source as String => core::convert::identity);
            accept!(source as &'static str => String::from);
            cast_same::<_, Box<str>>(source).map(String::from)
        }
    }
    impl<T: 'static> Alternative for Vec<T> {
        fn adopt<S: Alternative>(source: S) -> Result<Self, S> {
            accept!(source as Vec<T> => core::convert::identity);
            cast_same::<_, Box<[T]>>(source).map(Vec::from)
        }
    }
    impl<T: ?Sized + 'static> Alternative for Box<T> {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn numeric_classes() -> [Class; 17] {
        [
            i8::CLASS,
            u8::CLASS,
            i16::CLASS,
            u16::CLASS,
            i32::CLASS,
            u32::CLASS,
            isize::CLASS,
            usize::CLASS,
            i64::CLASS,
            u64::CLASS,
            i128::CLASS,
            u128::CLASS,
            f32::CLASS,
            f64::CLASS,
            char::CLASS,
            bool::CLASS,
            <*const u8>::CLASS,
        ]
    }

    #[test]
    fn conversion_boundaries() {
        assert_eq!(safely_constructible::<f64, f32>(), Verdict::Safe);
        assert_eq!(safely_constructible::<f32, f64>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<f64, i32>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<i32, f32>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<i64, i32>(), Verdict::Safe);
        assert_eq!(safely_constructible::<i32, i64>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<u32, i32>(), Verdict::Safe);
        assert_eq!(safely_constructible::<u64, i32>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<i64, u32>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<u32, u8>(), Verdict::Safe);
        assert_eq!(safely_constructible::<bool, u8>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<u8, bool>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<char, u32>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<*const u8, usize>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<usize, *const u8>(), Verdict::Unsafe);
        assert_eq!(
            safely_constructible::<*const u8, *mut u8>(),
            Verdict::Deferred
        );
        assert_eq!(safely_constructible::<(), u8>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<u8, ()>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<*const u8, ()>(), Verdict::Unsafe);
        assert_eq!(safely_constructible::<(), Option<u8>>(), Verdict::Deferred);
    }

    #[test]
    fn opaque_acceptance() {
        let strings = Class::OPAQUE.accepting(Class::Pointer);
        assert_eq!(verdict(strings, <&'static str>::CLASS), Verdict::Deferred);
        assert_eq!(verdict(strings, i32::CLASS), Verdict::Unsafe);
        assert_eq!(verdict(strings, Class::OPAQUE), Verdict::Deferred);
        let wrapped = Class::wrapping(f64::CLASS);
        assert_eq!(wrapped, Class::OPAQUE.accepting(f32::CLASS));
        assert_eq!(verdict(wrapped, f32::CLASS), Verdict::Deferred);
        assert_eq!(verdict(wrapped, <*const u8>::CLASS), Verdict::Unsafe);
        assert_eq!(Class::wrapping(strings), strings);
        assert_eq!(i32::CLASS.accepting(Class::Pointer), i32::CLASS);
    }

    #[test]
    fn adoption() {
        assert_eq!(i64::adopt(-3i8), Ok(-3));
        assert_eq!(u32::adopt(-1i32), Ok(u32::MAX));
        assert_eq!(i32::adopt(3u8), Err(3u8));
        assert_eq!(f64::adopt(1.5f32), Ok(1.5));
        assert_eq!(f32::adopt(1.5f64), Err(1.5f64));
        assert_eq!(char::adopt('x'), Ok('x'));
        assert_eq!(bool::adopt(1u8), Err(1u8));
        let byte = 7u8;
        let ptr: *mut u8 = &byte as *const u8 as *mut u8;
        assert_eq!(<*const u8>::adopt(ptr), Ok(ptr as *const u8));
        assert!(<*const u16>::adopt(ptr).is_err());
        assert_eq!(<&'static str>::adopt("asdf"), Ok("asdf"));
        assert_eq!(<()>::adopt(()), Ok(()));
        assert_eq!(<()>::adopt(0u8), Err(0u8));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn adoption_alloc() {
        use alloc::{boxed::Box, string::String, vec, vec::Vec};
        assert_eq!(String::adopt("asdf"), Ok(String::from("asdf")));
        let boxed: Box<str> = "boxed".into();
        assert_eq!(String::adopt(boxed), Ok(String::from("boxed")));
        assert_eq!(String::adopt('c'), Err('c'));
        let slice: Box<[u8]> = vec![1, 2].into_boxed_slice();
        assert_eq!(Vec::<u8>::adopt(slice), Ok(vec![1, 2]));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]
        #[test]
        fn no_conversion_cycles(a in 0..17usize, b in 0..17usize) {
            let classes = numeric_classes();
            let (a, b) = (classes[a], classes[b]);
            if verdict(a, b) == Verdict::Safe && verdict(b, a) == Verdict::Safe {
                prop_assert_eq!(a, b);
            }
        }

        #[test]
        fn numbers_never_meet_pointers(a in 0..16usize) {
            let number = numeric_classes()[a];
            prop_assert!(number.is_numeric());
            prop_assert_eq!(verdict(number, Class::Pointer), Verdict::Unsafe);
            prop_assert_eq!(verdict(Class::Pointer, number), Verdict::Unsafe);
        }

        #[test]
        fn widening_keeps_values(value in any::<i32>()) {
            prop_assert_eq!(i64::adopt(value), Ok(value as i64));
            prop_assert_eq!(i128::adopt(value), Ok(value as i128));
            prop_assert_eq!(f64::adopt(value), Err(value));
        }
    }
}
