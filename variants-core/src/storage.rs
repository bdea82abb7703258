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

//! The storage cell: a buffer large and aligned enough for any alternative of a list.
//!
//! Every alternative lives at offset 0 of the cell. The cell never knows which alternative it
//! holds: that's the discriminant's job, so every operation here is `unsafe`.

use core::mem::{ManuallyDrop, MaybeUninit};

use crate::list::{NthStored, TypeAt, TypeList};

#[repr(C)]
pub union Union<Head, Tail> {
    pub head: ManuallyDrop<Head>,
    pub tail: ManuallyDrop<Tail>,
}

#[repr(transparent)]
pub struct Storage<L: TypeList> {
    cell: MaybeUninit<L::Cell>,
}

impl<L: TypeList> Storage<L> {
    pub const SIZE: usize = core::mem::size_of::<L::Cell>();
    pub const ALIGN: usize = core::mem::align_of::<L::Cell>();

    pub const fn uninit() -> Self {
        Self {
            cell: MaybeUninit::uninit(),
        }
    }
    pub fn address(&self) -> *const u8 {
        self.cell.as_ptr().cast()
    }
    pub fn address_mut(&mut self) -> *mut u8 {
        self.cell.as_mut_ptr().cast()
    }

    /// # Safety
    /// `T` must be the stored type of one of `L`'s alternatives, and the cell must not hold a
    /// live value.
    pub unsafe fn write<T>(&mut self, value: T) {
        debug_assert!(core::mem::size_of::<T>() <= Self::SIZE);
        core::ptr::write(self.address_mut().cast::<T>(), value)
    }
    /// # Safety
    /// The cell must hold a live `T`, which the caller takes ownership of.
    pub unsafe fn read<T>(&self) -> T {
        core::ptr::read(self.address().cast::<T>())
    }
    /// # Safety
    /// The cell must hold a live `T`.
    pub unsafe fn get<T>(&self) -> &T {
        &*self.address().cast::<T>()
    }
    /// # Safety
    /// The cell must hold a live `T`.
    pub unsafe fn get_mut<T>(&mut self) -> &mut T {
        &mut *self.address_mut().cast::<T>()
    }

    /// # Safety
    /// The cell must not hold a live value.
    pub unsafe fn construct_at<const I: usize>(&mut self, value: NthStored<L, I>)
    where
        L: TypeAt<I>,
    {
        self.write(value)
    }
    /// # Safety
    /// The cell must hold a live `I`th alternative.
    pub unsafe fn destroy_at<const I: usize>(&mut self)
    where
        L: TypeAt<I>,
    {
        core::ptr::drop_in_place(self.address_mut().cast::<NthStored<L, I>>())
    }
    /// # Safety
    /// The cell must hold a live `which`th alternative.
    pub unsafe fn destroy(&mut self, which: usize) {
        L::destroy(which, self.address_mut())
    }
    /// # Safety
    /// The cell must hold a live `I`th alternative.
    pub unsafe fn reinterpret_as<const I: usize>(&self) -> &NthStored<L, I>
    where
        L: TypeAt<I>,
    {
        self.get()
    }
    /// # Safety
    /// The cell must hold a live `I`th alternative.
    pub unsafe fn reinterpret_as_mut<const I: usize>(&mut self) -> &mut NthStored<L, I>
    where
        L: TypeAt<I>,
    {
        self.get_mut()
    }
    /// # Safety
    /// The cell must hold a live `I`th alternative, which is considered moved-from afterwards.
    pub unsafe fn take_at<const I: usize>(&mut self) -> NthStored<L, I>
    where
        L: TypeAt<I>,
    {
        self.read()
    }
}
