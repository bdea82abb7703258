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

//! Visitor dispatch over the alternatives of a list.
//!
//! A visitor is any type implementing [`Visit`] for each item it may receive. The [`Mode`]
//! decides what items look like: `&T` ([`Ref`]), `&mut T` ([`Mut`]), `T` ([`Own`]), or raw
//! pointers to the stored representation ([`RawRef`], [`RawMut`]), the latter being what the
//! variant's own trait impls use. [`RawMut`] hands out a [`Place`], which keeps the slot known
//! so that assignments may go through [`Slot::assign`].
//!
//! Two strategies are provided: a binary search over compile-time halves of the list
//! ([`tree`]), whose leaves are direct and inlinable calls, and a jump table of
//! monomorphized thunks ([`table`]). [`Engine`]s pick between them, and are selected through
//! [`Variant`](crate::Variant)'s second type parameter.

use core::marker::PhantomData;

use crate::list::Slot;

pub mod table;
pub mod tree;

pub use tree::Dispatch;

/// One `impl` per accepted item: together, they form an overloaded visitor.
///
/// All impls a dispatch may reach must agree on `Output`.
pub trait Visit<Item> {
    type Output;
    fn visit(self, item: Item) -> Self::Output;
}

/// How the active alternative is handed to visitors.
pub trait Mode {
    type Ptr: Copy;
}
/// Turns a pointer to the storage cell into the item visitors of this mode receive.
pub trait Project<S: Slot>: Mode {
    type Item;
    /// # Safety
    /// `ptr` must point to a live `S::Stored`. In [`Own`] mode, it is moved-from afterwards.
    unsafe fn project(ptr: Self::Ptr) -> Self::Item;
}

/// Visitors receive `&'a T`.
pub struct Ref<'a>(PhantomData<&'a ()>);
/// Visitors receive `&'a mut T`.
pub struct Mut<'a>(PhantomData<&'a mut ()>);
/// Visitors receive `T`.
pub struct Own;
/// Visitors receive `*const Stored`, with recursive wrappers left visible.
pub struct RawRef;
/// Visitors receive a [`Place`], with recursive wrappers left visible.
pub struct RawMut;

/// A pointer to the live stored representation of slot `S`.
pub struct Place<S: Slot>(pub *mut S::Stored);

impl<'a> Mode for Ref<'a> {
    type Ptr = *const u8;
}
impl<'a, S: Slot> Project<S> for Ref<'a>
where
    S::Stored: 'a,
    S::Visible: 'a,
{
    type Item = &'a S::Visible;
    unsafe fn project(ptr: *const u8) -> Self::Item {
        S::view(&*ptr.cast::<S::Stored>())
    }
}
impl<'a> Mode for Mut<'a> {
    type Ptr = *mut u8;
}
impl<'a, S: Slot> Project<S> for Mut<'a>
where
    S::Stored: 'a,
    S::Visible: 'a,
{
    type Item = &'a mut S::Visible;
    unsafe fn project(ptr: *mut u8) -> Self::Item {
        S::view_mut(&mut *ptr.cast::<S::Stored>())
    }
}
impl Mode for Own {
    type Ptr = *mut u8;
}
impl<S: Slot> Project<S> for Own {
    type Item = S::Visible;
    unsafe fn project(ptr: *mut u8) -> S::Visible {
        S::unwrap(core::ptr::read(ptr.cast::<S::Stored>()))
    }
}
impl Mode for RawRef {
    type Ptr = *const u8;
}
impl<S: Slot> Project<S> for RawRef {
    type Item = *const S::Stored;
    unsafe fn project(ptr: *const u8) -> Self::Item {
        ptr.cast()
    }
}
impl Mode for RawMut {
    type Ptr = *mut u8;
}
impl<S: Slot> Project<S> for RawMut {
    type Item = Place<S>;
    unsafe fn project(ptr: *mut u8) -> Place<S> {
        Place(ptr.cast())
    }
}

/// A dispatch strategy.
pub trait Engine {
    /// # Safety
    /// `ptr` must point to a storage cell of `L` holding a live `which`th alternative.
    unsafe fn dispatch<M: Mode, V, L: Dispatch<M, V>>(
        which: usize,
        ptr: M::Ptr,
        visitor: V,
    ) -> L::Output;
}

/// Binary search over the discriminant: `log2(N)` predictable branches, inlined leaves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinarySearch;
/// A single indirect call through a constant table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JumpTable;
/// [`BinarySearch`] for lists of at most [`ADAPTIVE_THRESHOLD`] alternatives, [`JumpTable`]
/// beyond.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Adaptive;
pub const ADAPTIVE_THRESHOLD: usize = 8;

impl Engine for BinarySearch {
    #[inline(always)]
    unsafe fn dispatch<M: Mode, V, L: Dispatch<M, V>>(
        which: usize,
        ptr: M::Ptr,
        visitor: V,
    ) -> L::Output {
        L::tree(which, ptr, visitor)
    }
}
impl Engine for JumpTable {
    #[inline(always)]
    unsafe fn dispatch<M: Mode, V, L: Dispatch<M, V>>(
        which: usize,
        ptr: M::Ptr,
        visitor: V,
    ) -> L::Output {
        L::table(which, ptr, visitor)
    }
}
impl Engine for Adaptive {
    #[inline(always)]
    unsafe fn dispatch<M: Mode, V, L: Dispatch<M, V>>(
        which: usize,
        ptr: M::Ptr,
        visitor: V,
    ) -> L::Output {
        if L::LEN <= ADAPTIVE_THRESHOLD {
            L::tree(which, ptr, visitor)
        } else {
            L::table(which, ptr, visitor)
        }
    }
}

/// Passes `args` along with every item: the wrapped visitor receives `(item, args)`.
pub struct WithArgs<V, A> {
    visitor: V,
    args: A,
}
impl<V, A> WithArgs<V, A> {
    pub const fn new(visitor: V, args: A) -> Self {
        Self { visitor, args }
    }
}
impl<X, V: Visit<(X, A)>, A> Visit<X> for WithArgs<V, A> {
    type Output = V::Output;
    fn visit(self, item: X) -> V::Output {
        self.visitor.visit((item, self.args))
    }
}
