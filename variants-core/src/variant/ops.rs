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

//! Internal visitors, working on stored representations through raw pointers.

use core::cmp::Ordering;
use core::fmt::{Debug, Formatter};
use core::hash::{Hash, Hasher};

use crate::dispatch::{Place, Visit};
use crate::list::Slot;

/// Clones the visited value into `dst`, which must not hold a live value.
pub struct Cloner {
    pub dst: *mut u8,
}
impl<T: Clone> Visit<*const T> for Cloner {
    type Output = ();
    fn visit(self, src: *const T) {
        unsafe { core::ptr::write(self.dst.cast::<T>(), (*src).clone()) }
    }
}

/// Clones the visited value into `dst`, which must hold a live value of the same type.
pub struct CloneInto {
    pub dst: *mut u8,
}
impl<T: Clone> Visit<*const T> for CloneInto {
    type Output = ();
    fn visit(self, src: *const T) {
        unsafe { (*self.dst.cast::<T>()).clone_from(&*src) }
    }
}

/// Moves the value at `src` onto the visited place through [`Slot::assign`].
pub struct MoveAssign {
    pub src: *const u8,
}
impl<S: Slot> Visit<Place<S>> for MoveAssign {
    type Output = ();
    fn visit(self, dst: Place<S>) {
        unsafe { S::assign(&mut *dst.0, core::ptr::read(self.src.cast::<S::Stored>())) }
    }
}

pub struct Equals {
    pub other: *const u8,
}
impl<T: PartialEq> Visit<*const T> for Equals {
    type Output = bool;
    fn visit(self, this: *const T) -> bool {
        unsafe { *this == *self.other.cast::<T>() }
    }
}

/// Only compiles if every alternative is `Eq`.
pub struct AssertEq;
impl<T: Eq> Visit<*const T> for AssertEq {
    type Output = ();
    fn visit(self, _: *const T) {}
}

pub struct Compare {
    pub other: *const u8,
}
impl<T: PartialOrd> Visit<*const T> for Compare {
    type Output = Option<Ordering>;
    fn visit(self, this: *const T) -> Option<Ordering> {
        unsafe { (*this).partial_cmp(&*self.other.cast::<T>()) }
    }
}

pub struct Order {
    pub other: *const u8,
}
impl<T: Ord> Visit<*const T> for Order {
    type Output = Ordering;
    fn visit(self, this: *const T) -> Ordering {
        unsafe { (*this).cmp(&*self.other.cast::<T>()) }
    }
}

// Hashing and formatting borrow the hasher/formatter, which would force higher-ranked bounds
// on the trait impls. Instead, these visitors fetch a monomorphized function to call.
pub type HashThunk = unsafe fn(*const u8, &mut dyn Hasher);
pub struct HashWith;
impl<T: Hash> Visit<*const T> for HashWith {
    type Output = HashThunk;
    fn visit(self, _: *const T) -> HashThunk {
        hash_erased::<T>
    }
}
unsafe fn hash_erased<T: Hash>(ptr: *const u8, mut state: &mut dyn Hasher) {
    (*ptr.cast::<T>()).hash(&mut state)
}

pub type FmtThunk =
    for<'a, 'b> unsafe fn(*const u8, &'a mut Formatter<'b>) -> core::fmt::Result;
pub struct FmtWith;
impl<T: Debug> Visit<*const T> for FmtWith {
    type Output = FmtThunk;
    fn visit(self, _: *const T) -> FmtThunk {
        fmt_erased::<T>
    }
}
unsafe fn fmt_erased<T: Debug>(ptr: *const u8, f: &mut Formatter<'_>) -> core::fmt::Result {
    (*ptr.cast::<T>()).fmt(f)
}
