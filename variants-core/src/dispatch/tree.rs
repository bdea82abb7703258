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

//! Dispatch as a balanced binary search over the list.

use super::{table, Mode, Project, Visit};
use crate::list::{Cons, End, HalfOf, LeftOf, RightOf, Slot, Split, TypeList};
use crate::nat::Halve;

/// Calls `V` with the `which`th alternative of `Self`, seen through `M`.
pub trait Dispatch<M: Mode, V>: TypeList {
    type Output;
    /// Binary search over `which`.
    /// # Safety
    /// `ptr` must point to a storage cell of `Self` holding a live `which`th alternative.
    unsafe fn tree(which: usize, ptr: M::Ptr, visitor: V) -> Self::Output;
    /// Jump table lookup of `which`.
    /// # Safety
    /// `ptr` must point to a storage cell of `Self` holding a live `which`th alternative.
    unsafe fn table(which: usize, ptr: M::Ptr, visitor: V) -> Self::Output;
}

impl<S: Slot, M: Project<S>, V: Visit<M::Item>> Dispatch<M, V> for Cons<S, End> {
    type Output = V::Output;
    #[inline(always)]
    unsafe fn tree(which: usize, ptr: M::Ptr, visitor: V) -> V::Output {
        debug_assert_eq!(which, 0, "alternative index out of range");
        visitor.visit(M::project(ptr))
    }
    #[inline(always)]
    unsafe fn table(which: usize, ptr: M::Ptr, visitor: V) -> V::Output {
        <Self as Dispatch<M, V>>::tree(which, ptr, visitor)
    }
}

impl<S, S2, T, M, V> Dispatch<M, V> for Cons<S, Cons<S2, T>>
where
    S: Slot,
    S2: Slot,
    T: TypeList,
    M: Mode,
    <Self as TypeList>::Len: Halve,
    Self: Split<HalfOf<Self>>,
    LeftOf<Self>: Dispatch<M, V>,
    RightOf<Self>: Dispatch<M, V, Output = <LeftOf<Self> as Dispatch<M, V>>::Output>,
    Self: table::Thunks<M, V, <LeftOf<Self> as Dispatch<M, V>>::Output>,
{
    type Output = <LeftOf<Self> as Dispatch<M, V>>::Output;
    #[inline(always)]
    unsafe fn tree(which: usize, ptr: M::Ptr, visitor: V) -> Self::Output {
        let pivot = <LeftOf<Self> as TypeList>::LEN;
        if which < pivot {
            <LeftOf<Self> as Dispatch<M, V>>::tree(which, ptr, visitor)
        } else {
            <RightOf<Self> as Dispatch<M, V>>::tree(which - pivot, ptr, visitor)
        }
    }
    #[inline(always)]
    unsafe fn table(which: usize, ptr: M::Ptr, visitor: V) -> Self::Output {
        table::call::<Self, M, V, Self::Output>(which, ptr, visitor)
    }
}
