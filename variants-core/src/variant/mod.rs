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

//! The variant itself: a storage cell, a discriminant, and a dispatch engine.

use core::marker::PhantomData;
use core::mem::ManuallyDrop;

use crate::classify::Alternative;
use crate::dispatch::{Adaptive, Dispatch, Engine, Mut, Own, RawMut, RawRef, Ref, WithArgs};
use crate::error::WrongAlternative;
use crate::list::{Embed, Locate, Nth, NthStored, Slot, SlotOf, StoredOf, TypeAt, TypeList};
use crate::matching::Handlers;
use crate::select::{Select, Selectable};
use crate::storage::Storage;

#[doc(hidden)]
pub mod ops;
use ops::*;

/// A tagged union of the alternatives listed in `L`, dispatching visitors with `E`.
///
/// Name these with the [`Variant!`](crate::Variant!) macro:
/// ```
/// # use variants_core::*;
/// let v = <Variant![f64, f32, i32]>::new(5);
/// assert_eq!(v.which(), 2);
/// assert_eq!(v.get::<i32, _>(), Some(&5));
/// ```
pub struct Variant<L: TypeList, E: Engine = Adaptive> {
    which: u8,
    storage: Storage<L>,
    engine: PhantomData<E>,
}

struct Limits<L>(PhantomData<L>);
impl<L: TypeList> Limits<L> {
    const CHECKED: () = assert!(
        L::LEN > 0 && L::LEN <= 256,
        "a Variant must have between 1 and 256 alternatives"
    );
}

impl<L: TypeList, E: Engine> Variant<L, E> {
    pub const ALTERNATIVES: usize = L::LEN;

    /// # Safety
    /// `storage` must hold a live `which`th alternative.
    unsafe fn from_raw(which: usize, storage: Storage<L>) -> Self {
        let () = Limits::<L>::CHECKED;
        debug_assert!(which < L::LEN);
        Self {
            which: which as u8,
            storage,
            engine: PhantomData,
        }
    }

    /// The index of the active alternative.
    pub const fn which(&self) -> usize {
        self.which as usize
    }

    /// Stores `value` in the first alternative that may safely be built from it.
    ///
    /// Numbers and pointers may only widen into their own class (see [`crate::classify`]), and
    /// other types go through [`Alternative::adopt`]. Compilation fails if no alternative may
    /// ever accept `S`:
    /// ```compile_fail
    /// # use variants_core::*;
    /// // Neither a `String` nor a `u8` may ever hold an `i32`.
    /// let _ = <Variant![String, u8]>::new(1i32);
    /// ```
    ///
    /// # Panics
    /// If every remaining candidate's `adopt` refused `value`.
    pub fn new<S: Alternative>(value: S) -> Self
    where
        L: Select<S>,
    {
        let () = Selectable::<L, S>::CHECKED;
        let mut storage = Storage::uninit();
        let which = unsafe { L::select(value, storage.address_mut(), 0) };
        crate::trace!(
            "selected alternative {which} for a `{}`",
            core::any::type_name::<S>()
        );
        unsafe { Self::from_raw(which, storage) }
    }
    /// Stores `value` as the alternative of type `T`, without any conversion.
    pub fn in_place<T, I>(value: T) -> Self
    where
        L: Locate<T, I>,
    {
        let mut storage = Storage::uninit();
        unsafe {
            storage.write(<SlotOf<L, T, I> as Slot>::wrap(value));
            Self::from_raw(<L as Locate<T, I>>::INDEX, storage)
        }
    }
    /// Stores `value` as the `I`th alternative.
    pub fn at<const I: usize>(value: Nth<L, I>) -> Self
    where
        L: TypeAt<I>,
    {
        let mut storage = Storage::uninit();
        unsafe {
            storage.construct_at::<I>(<<L as TypeAt<I>>::Slot as Slot>::wrap(value));
            Self::from_raw(I, storage)
        }
    }
    /// Builds a variant from one over a subset of `L`'s alternatives, keeping the active value.
    pub fn from_subset<Sub: TypeList, Is, E2: Engine>(source: Variant<Sub, E2>) -> Self
    where
        Sub: Embed<L, Is>,
    {
        let source = ManuallyDrop::new(source);
        let mut storage = Storage::uninit();
        unsafe {
            let which = Sub::embed(source.which(), source.storage.address(), storage.address_mut());
            crate::trace!("widened alternative {} to {which}", source.which());
            Self::from_raw(which, storage)
        }
    }
    /// Converts `self` into a variant over a superset of its alternatives.
    pub fn widen<Super: TypeList, Is>(self) -> Variant<Super, E>
    where
        L: Embed<Super, Is>,
    {
        Variant::from_subset(self)
    }
    /// Changes the dispatch engine.
    pub fn with_engine<E2: Engine>(self) -> Variant<L, E2> {
        let this = ManuallyDrop::new(self);
        unsafe { Variant::from_raw(this.which(), core::ptr::read(&this.storage)) }
    }

    /// Replaces the content of `self` with `value` as the alternative of type `T`.
    ///
    /// The new value is built before the old one is dropped.
    pub fn emplace<'a, T, I>(&'a mut self, value: T) -> &'a mut T
    where
        L: Locate<T, I>,
        StoredOf<L, T, I>: 'a,
    {
        self.emplace_with::<T, I, _>(|| value)
    }
    /// Like [`Self::emplace`], but builds the value with `f`.
    ///
    /// If `f` panics, `self` is left untouched.
    pub fn emplace_with<'a, T, I, F: FnOnce() -> T>(&'a mut self, f: F) -> &'a mut T
    where
        L: Locate<T, I>,
        StoredOf<L, T, I>: 'a,
    {
        let new = Self::in_place::<T, I>(f());
        drop(core::mem::replace(self, new));
        unsafe { <SlotOf<L, T, I> as Slot>::view_mut(self.storage.get_mut::<StoredOf<L, T, I>>()) }
    }
    /// Replaces the content of `self` with `value` as the `I`th alternative.
    pub fn emplace_at<const I: usize>(&mut self, value: Nth<L, I>) -> &mut Nth<L, I>
    where
        L: TypeAt<I>,
    {
        let new = Self::at::<I>(value);
        drop(core::mem::replace(self, new));
        unsafe {
            <<L as TypeAt<I>>::Slot as Slot>::view_mut(self.storage.reinterpret_as_mut::<I>())
        }
    }
    /// Assigns `value` through the same selection as [`Self::new`].
    ///
    /// If the selected alternative is already active, `value` is assigned onto it, reusing a
    /// recursive alternative's allocation. Otherwise the old value is dropped once the new one
    /// is built. If selection panics, `self` is left untouched.
    pub fn set<S: Alternative>(&mut self, value: S)
    where
        L: Select<S>,
    {
        let () = Selectable::<L, S>::CHECKED;
        let mut storage = Storage::uninit();
        let which = unsafe {
            L::select_onto(
                value,
                self.storage.address_mut(),
                self.which(),
                storage.address_mut(),
                0,
            )
        };
        if which == self.which() {
            crate::trace!("assigned a `{}` in place", core::any::type_name::<S>());
        } else {
            crate::trace!("replacing alternative {} with {which}", self.which);
            drop(core::mem::replace(self, unsafe { Self::from_raw(which, storage) }))
        }
    }
    /// Moves `source` into `self`.
    ///
    /// If both hold the same alternative, `source`'s value is move-assigned onto `self`'s,
    /// reusing a recursive alternative's allocation; otherwise `self`'s value is dropped after
    /// `source`'s has been moved in.
    pub fn assign(&mut self, source: Self)
    where
        L: Dispatch<RawMut, MoveAssign, Output = ()>,
    {
        if self.which == source.which {
            crate::trace!("assigning alternative {} in place", self.which);
            let source = ManuallyDrop::new(source);
            unsafe {
                E::dispatch::<RawMut, _, L>(
                    self.which(),
                    self.storage.address_mut(),
                    MoveAssign {
                        src: source.storage.address(),
                    },
                )
            }
        } else {
            crate::trace!("replacing alternative {} with {}", self.which, source.which);
            drop(core::mem::replace(self, source))
        }
    }
    /// Exchanges the contents of `self` and `other`.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other)
    }

    /// Returns `true` if the active alternative is the one of type `T`.
    pub fn is<T, I>(&self) -> bool
    where
        L: Locate<T, I>,
    {
        self.which() == <L as Locate<T, I>>::INDEX
    }
    pub fn get<'a, T, I>(&'a self) -> Option<&'a T>
    where
        L: Locate<T, I>,
        StoredOf<L, T, I>: 'a,
    {
        self.is::<T, I>().then(|| unsafe {
            <SlotOf<L, T, I> as Slot>::view(self.storage.get::<StoredOf<L, T, I>>())
        })
    }
    pub fn get_mut<'a, T, I>(&'a mut self) -> Option<&'a mut T>
    where
        L: Locate<T, I>,
        StoredOf<L, T, I>: 'a,
    {
        if self.is::<T, I>() {
            Some(unsafe {
                <SlotOf<L, T, I> as Slot>::view_mut(self.storage.get_mut::<StoredOf<L, T, I>>())
            })
        } else {
            None
        }
    }
    /// Like [`Self::get`], but reports which alternative was active instead.
    pub fn try_get<'a, T, I>(&'a self) -> Result<&'a T, WrongAlternative>
    where
        L: Locate<T, I>,
        StoredOf<L, T, I>: 'a,
    {
        self.get::<T, I>().ok_or(WrongAlternative {
            expected: <L as Locate<T, I>>::INDEX,
            active: self.which(),
            expected_type: core::any::type_name::<T>(),
        })
    }
    pub fn get_at<const I: usize>(&self) -> Option<&Nth<L, I>>
    where
        L: TypeAt<I>,
    {
        (self.which() == I).then(|| unsafe {
            <<L as TypeAt<I>>::Slot as Slot>::view(self.storage.reinterpret_as::<I>())
        })
    }
    pub fn get_at_mut<const I: usize>(&mut self) -> Option<&mut Nth<L, I>>
    where
        L: TypeAt<I>,
    {
        if self.which() == I {
            Some(unsafe {
                <<L as TypeAt<I>>::Slot as Slot>::view_mut(self.storage.reinterpret_as_mut::<I>())
            })
        } else {
            None
        }
    }
    /// Moves the `T` out of `self`, or gives `self` back if another alternative is active.
    pub fn take<T, I>(self) -> Result<T, Self>
    where
        L: Locate<T, I>,
    {
        if self.is::<T, I>() {
            let this = ManuallyDrop::new(self);
            Ok(<SlotOf<L, T, I> as Slot>::unwrap(unsafe {
                this.storage.read::<StoredOf<L, T, I>>()
            }))
        } else {
            Err(self)
        }
    }
    /// Moves the `I`th alternative out of `self`, or gives `self` back if it isn't active.
    pub fn take_at<const I: usize>(self) -> Result<Nth<L, I>, Self>
    where
        L: TypeAt<I>,
    {
        if self.which() == I {
            let this = ManuallyDrop::new(self);
            Ok(<<L as TypeAt<I>>::Slot as Slot>::unwrap(unsafe {
                this.storage.read::<NthStored<L, I>>()
            }))
        } else {
            Err(self)
        }
    }

    /// Calls `visitor` with a reference to the active alternative.
    pub fn visit<'a, V>(&'a self, visitor: V) -> <L as Dispatch<Ref<'a>, V>>::Output
    where
        L: Dispatch<Ref<'a>, V>,
    {
        unsafe { E::dispatch::<Ref<'a>, V, L>(self.which(), self.storage.address(), visitor) }
    }
    /// Calls `visitor` with a mutable reference to the active alternative.
    pub fn visit_mut<'a, V>(&'a mut self, visitor: V) -> <L as Dispatch<Mut<'a>, V>>::Output
    where
        L: Dispatch<Mut<'a>, V>,
    {
        unsafe { E::dispatch::<Mut<'a>, V, L>(self.which(), self.storage.address_mut(), visitor) }
    }
    /// Calls `visitor` with the active alternative, by value.
    pub fn into_visit<V>(self, visitor: V) -> <L as Dispatch<Own, V>>::Output
    where
        L: Dispatch<Own, V>,
    {
        let mut this = ManuallyDrop::new(self);
        unsafe { E::dispatch::<Own, V, L>(this.which(), this.storage.address_mut(), visitor) }
    }
    /// Calls `visitor` with `(&alternative, args)`.
    pub fn visit_with<'a, V, A>(
        &'a self,
        visitor: V,
        args: A,
    ) -> <L as Dispatch<Ref<'a>, WithArgs<V, A>>>::Output
    where
        L: Dispatch<Ref<'a>, WithArgs<V, A>>,
    {
        self.visit(WithArgs::new(visitor, args))
    }

    /// Calls the closure of `handlers` matching the active alternative.
    ///
    /// `handlers` is a tuple holding one closure per alternative, in declaration order.
    /// ```
    /// # use variants_core::*;
    /// let v = <Variant![u8, &'static str]>::new("hi");
    /// let len = v.match_ref((|n: &u8| *n as usize, |s: &&str| s.len()));
    /// assert_eq!(len, 2);
    /// ```
    pub fn match_ref<'a, H: Handlers<Ref<'a>, L>>(&'a self, handlers: H) -> H::Output {
        unsafe { handlers.run(self.which(), self.storage.address()) }
    }
    pub fn match_mut<'a, H: Handlers<Mut<'a>, L>>(&'a mut self, handlers: H) -> H::Output {
        unsafe { handlers.run(self.which(), self.storage.address_mut()) }
    }
    pub fn match_owned<H: Handlers<Own, L>>(self, handlers: H) -> H::Output {
        let mut this = ManuallyDrop::new(self);
        unsafe { handlers.run(this.which(), this.storage.address_mut()) }
    }

    /// Calls `visitor` with a pointer to the active alternative's stored representation.
    pub fn visit_raw<V>(&self, visitor: V) -> <L as Dispatch<RawRef, V>>::Output
    where
        L: Dispatch<RawRef, V>,
    {
        unsafe { E::dispatch::<RawRef, V, L>(self.which(), self.storage.address(), visitor) }
    }
}

impl<L: TypeList, E: Engine> Drop for Variant<L, E> {
    fn drop(&mut self) {
        unsafe { self.storage.destroy(self.which()) }
    }
}

impl<L: TypeList, E: Engine> Clone for Variant<L, E>
where
    L: Dispatch<RawRef, Cloner, Output = ()> + Dispatch<RawRef, CloneInto, Output = ()>,
{
    fn clone(&self) -> Self {
        let mut storage = Storage::uninit();
        unsafe {
            E::dispatch::<RawRef, _, L>(
                self.which(),
                self.storage.address(),
                Cloner {
                    dst: storage.address_mut(),
                },
            );
            Self::from_raw(self.which(), storage)
        }
    }
    fn clone_from(&mut self, source: &Self) {
        if self.which == source.which {
            unsafe {
                E::dispatch::<RawRef, _, L>(
                    source.which(),
                    source.storage.address(),
                    CloneInto {
                        dst: self.storage.address_mut(),
                    },
                )
            }
        } else {
            let copy = source.clone();
            drop(core::mem::replace(self, copy))
        }
    }
}

impl<L: TypeList, E: Engine> PartialEq for Variant<L, E>
where
    L: Dispatch<RawRef, Equals, Output = bool>,
{
    fn eq(&self, other: &Self) -> bool {
        self.which == other.which
            && self.visit_raw(Equals {
                other: other.storage.address(),
            })
    }
}
impl<L: TypeList, E: Engine> Eq for Variant<L, E> where
    L: Dispatch<RawRef, Equals, Output = bool> + Dispatch<RawRef, AssertEq, Output = ()>
{
}
impl<L: TypeList, E: Engine> PartialOrd for Variant<L, E>
where
    L: Dispatch<RawRef, Equals, Output = bool>
        + Dispatch<RawRef, Compare, Output = Option<core::cmp::Ordering>>,
{
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        match self.which.cmp(&other.which) {
            core::cmp::Ordering::Equal => self.visit_raw(Compare {
                other: other.storage.address(),
            }),
            ordering => Some(ordering),
        }
    }
}
impl<L: TypeList, E: Engine> Ord for Variant<L, E>
where
    L: Dispatch<RawRef, Equals, Output = bool>
        + Dispatch<RawRef, AssertEq, Output = ()>
        + Dispatch<RawRef, Compare, Output = Option<core::cmp::Ordering>>
        + Dispatch<RawRef, Order, Output = core::cmp::Ordering>,
{
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.which.cmp(&other.which).then_with(|| {
            self.visit_raw(Order {
                other: other.storage.address(),
            })
        })
    }
}
impl<L: TypeList, E: Engine> core::hash::Hash for Variant<L, E>
where
    L: Dispatch<RawRef, HashWith, Output = HashThunk>,
{
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::hash::Hash::hash(&self.which, state);
        let thunk = self.visit_raw(HashWith);
        unsafe { thunk(self.storage.address(), state) }
    }
}
impl<L: TypeList, E: Engine> core::fmt::Debug for Variant<L, E>
where
    L: Dispatch<RawRef, FmtWith, Output = FmtThunk>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let thunk = self.visit_raw(FmtWith);
        unsafe { thunk(self.storage.address(), f) }
    }
}
impl<L: TypeList, E: Engine> Default for Variant<L, E>
where
    L: TypeAt<0>,
    Nth<L, 0>: Default,
{
    fn default() -> Self {
        Self::at::<0>(Default::default())
    }
}
impl<L: TypeList + 'static, E: Engine + 'static> Alternative for Variant<L, E> {}

/// Names a [`Variant`] type over the listed alternatives, with the default engine.
///
/// See [`Alternatives!`](crate::Alternatives!) for the list syntax.
#[macro_export]
macro_rules! Variant {
    ($($alternatives: tt)*) => {
        $crate::Variant<$crate::Alternatives![$($alternatives)*]>
    };
}

