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

//! An owning indirection, allowing a variant to (indirectly) contain itself.

use alloc::boxed::Box;
use core::ops::{Deref, DerefMut};

use crate::classify::{accept, Alternative, Class};

/// A heap-allocated `T`, owned exclusively.
///
/// A `Recursive` always holds a value, unless it was explicitly moved from with [`Self::take`].
/// Reading from a moved-from wrapper panics; it may only be assigned to or dropped.
pub struct Recursive<T> {
    boxed: Option<Box<T>>,
}

impl<T> Recursive<T> {
    pub fn new(value: T) -> Self {
        Self {
            boxed: Some(Box::new(value)),
        }
    }
    /// Returns `true` if `self` was moved from.
    pub const fn is_empty(&self) -> bool {
        self.boxed.is_none()
    }
    /// Moves the allocation out of `self`, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        Self {
            boxed: self.boxed.take(),
        }
    }
    /// # Panics
    /// If `self` was moved from.
    pub fn get(&self) -> &T {
        match &self.boxed {
            Some(boxed) => &**boxed,
            None => moved_from(),
        }
    }
    /// # Panics
    /// If `self` was moved from.
    pub fn get_mut(&mut self) -> &mut T {
        match &mut self.boxed {
            Some(boxed) => &mut **boxed,
            None => moved_from(),
        }
    }
    /// # Panics
    /// If `self` was moved from.
    pub fn into_inner(self) -> T {
        match self.boxed {
            Some(boxed) => *boxed,
            None => moved_from(),
        }
    }
    /// Stores `value`, reusing the current allocation if there is one.
    pub fn assign(&mut self, value: T) {
        match &mut self.boxed {
            Some(boxed) => {
                crate::trace!("Recursive<{}>: reusing allocation", core::any::type_name::<T>());
                **boxed = value
            }
            None => self.boxed = Some(Box::new(value)),
        }
    }
}

#[cold]
#[track_caller]
fn moved_from() -> ! {
    panic!("attempted to read a `Recursive` after it was moved from")
}

impl<T: Clone> Clone for Recursive<T> {
    fn clone(&self) -> Self {
        Self::new(self.get().clone())
    }
    fn clone_from(&mut self, source: &Self) {
        match &mut self.boxed {
            Some(boxed) => (**boxed).clone_from(source.get()),
            None => *self = source.clone(),
        }
    }
}
impl<T> Deref for Recursive<T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.get()
    }
}
impl<T> DerefMut for Recursive<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}
impl<T> From<T> for Recursive<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
impl<T: Default> Default for Recursive<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
impl<T: PartialEq> PartialEq for Recursive<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}
impl<T: Eq> Eq for Recursive<T> {}
impl<T: PartialOrd> PartialOrd for Recursive<T> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.get().partial_cmp(other.get())
    }
}
impl<T: Ord> Ord for Recursive<T> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.get().cmp(other.get())
    }
}
impl<T: core::hash::Hash> core::hash::Hash for Recursive<T> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::hash::Hash::hash(self.get(), state)
    }
}
impl<T: core::fmt::Debug> core::fmt::Debug for Recursive<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.boxed {
            Some(boxed) => core::fmt::Debug::fmt(&**boxed, f),
            None => f.write_str("<moved>"),
        }
    }
}

impl<T: Alternative> Alternative for Recursive<T> {
    const CLASS: Class = Class::wrapping(T::CLASS);
    fn adopt<S: Alternative>(source: S) -> Result<Self, S> {
        accept!(source as Recursive<T> => core::convert::identity);
        T::adopt(source).map(Recursive::new)
    }
}
