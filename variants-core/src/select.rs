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

//! Alternative selection for [`Variant::new`](crate::Variant::new).
//!
//! Candidates are walked in declaration order; the first one that isn't ruled out by
//! [`verdict`] and whose [`SlotClass::adopt`] accepts the value wins.

use core::marker::PhantomData;

use crate::classify::{verdict, Alternative, Class, Verdict};
use crate::list::{Cons, End, SlotClass};

/// The verdict for a `source` value in slot `S`.
const fn admits<S: SlotClass>(source: Class) -> Verdict {
    match (S::BOXED, source) {
        (true, Class::Opaque { .. }) => Verdict::Deferred,
        _ => verdict(S::CLASS, source),
    }
}

pub trait Select<Src>: crate::list::TypeList {
    /// How many alternatives are not ruled out outright.
    const CANDIDATES: usize;
    /// Writes the adopted value to `cell`, returning its index.
    /// # Safety
    /// `cell` must be valid for writes of `Self::Cell`.
    unsafe fn select(source: Src, cell: *mut u8, index: usize) -> usize;
    /// Selects like [`Self::select`], but assigns onto `live` instead if the selected
    /// alternative is the `which`th one. Returns the selected index either way.
    /// # Safety
    /// `live` must point to a storage cell of `Self` holding a live `which`th alternative,
    /// and `fresh` must be valid for writes of `Self::Cell`.
    unsafe fn select_onto(
        source: Src,
        live: *mut u8,
        which: usize,
        fresh: *mut u8,
        index: usize,
    ) -> usize;
}
impl<Src: Alternative> Select<Src> for End {
    const CANDIDATES: usize = 0;
    unsafe fn select(_: Src, _: *mut u8, _: usize) -> usize {
        no_candidate::<Src>()
    }
    unsafe fn select_onto(_: Src, _: *mut u8, _: usize, _: *mut u8, _: usize) -> usize {
        no_candidate::<Src>()
    }
}
impl<S: SlotClass, T: Select<Src>, Src: Alternative> Select<Src> for Cons<S, T> {
    const CANDIDATES: usize = match admits::<S>(Src::CLASS) {
        Verdict::Unsafe => T::CANDIDATES,
        Verdict::Safe | Verdict::Deferred => T::CANDIDATES + 1,
    };
    unsafe fn select(source: Src, cell: *mut u8, index: usize) -> usize {
        if let Verdict::Unsafe = admits::<S>(Src::CLASS) {
            return T::select(source, cell, index + 1);
        }
        match S::adopt(source) {
            Ok(stored) => {
                core::ptr::write(cell.cast::<S::Stored>(), stored);
                index
            }
            Err(source) => T::select(source, cell, index + 1),
        }
    }
    unsafe fn select_onto(
        source: Src,
        live: *mut u8,
        which: usize,
        fresh: *mut u8,
        index: usize,
    ) -> usize {
        if let Verdict::Unsafe = admits::<S>(Src::CLASS) {
            return T::select_onto(source, live, which, fresh, index + 1);
        }
        if index != which {
            return match S::adopt(source) {
                Ok(stored) => {
                    core::ptr::write(fresh.cast::<S::Stored>(), stored);
                    index
                }
                Err(source) => T::select_onto(source, live, which, fresh, index + 1),
            };
        }
        match S::adopt_onto(source, &mut *live.cast::<S::Stored>()) {
            Ok(()) => index,
            Err(source) => T::select_onto(source, live, which, fresh, index + 1),
        }
    }
}

#[cold]
#[track_caller]
fn no_candidate<Src>() -> ! {
    crate::debug!(
        "every candidate refused a `{}`",
        core::any::type_name::<Src>()
    );
    panic!(
        "no alternative accepts a value of type `{}`",
        core::any::type_name::<Src>()
    )
}

/// Fails to compile when no alternative of `L` may be built from `Src`.
pub(crate) struct Selectable<L, Src>(PhantomData<(L, Src)>);
impl<L: Select<Src>, Src> Selectable<L, Src> {
    pub(crate) const CHECKED: () = assert!(
        L::CANDIDATES > 0,
        "no alternative may safely be constructed from this type"
    );
}
