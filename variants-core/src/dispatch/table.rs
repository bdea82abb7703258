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

//! Dispatch through a constant table of thunks, one per alternative.
//!
//! The table is built as nested `#[repr(C)]` rows of identical function pointers, which is
//! laid out exactly like an array of them.

use super::{Mode, Project, Visit};
use crate::list::{Cons, End, Slot, TypeList};

pub type Thunk<M, V, O> = unsafe fn(<M as Mode>::Ptr, V) -> O;

#[repr(C)]
#[derive(Clone, Copy)]
pub struct Row<F, Rest> {
    entry: F,
    rest: Rest,
}

pub trait Thunks<M: Mode, V, O>: TypeList {
    type Table: Copy;
    const TABLE: Self::Table;
}
impl<M: Mode, V, O> Thunks<M, V, O> for End {
    type Table = ();
    const TABLE: () = ();
}
impl<S, T, M, V, O> Thunks<M, V, O> for Cons<S, T>
where
    S: Slot,
    T: Thunks<M, V, O>,
    M: Project<S>,
    V: Visit<M::Item, Output = O>,
{
    type Table = Row<Thunk<M, V, O>, T::Table>;
    const TABLE: Self::Table = Row {
        entry: thunk::<S, M, V, O>,
        rest: T::TABLE,
    };
}

unsafe fn thunk<S: Slot, M: Project<S>, V: Visit<M::Item, Output = O>, O>(
    ptr: M::Ptr,
    visitor: V,
) -> O {
    visitor.visit(M::project(ptr))
}

/// # Safety
/// `ptr` must point to a storage cell of `L` holding a live `which`th alternative.
#[inline(always)]
pub unsafe fn call<L: Thunks<M, V, O>, M: Mode, V, O>(which: usize, ptr: M::Ptr, visitor: V) -> O {
    let rows = &L::TABLE;
    debug_assert_eq!(
        core::mem::size_of::<L::Table>(),
        L::LEN * core::mem::size_of::<Thunk<M, V, O>>()
    );
    debug_assert!(which < L::LEN, "alternative index out of range");
    let entries = (rows as *const L::Table).cast::<Thunk<M, V, O>>();
    (*entries.add(which))(ptr, visitor)
}
