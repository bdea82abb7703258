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

//! Positional matching: one closure per alternative, the closure-based twin of a native `match`.

use crate::dispatch::{Mode, Project};
use crate::list::{Cons, End, Slot, TypeList};

/// A tuple of handlers, one per alternative of `L`, all returning the same type.
pub trait Handlers<M: Mode, L: TypeList> {
    type Output;
    /// Calls the `which`th handler.
    /// # Safety
    /// `ptr` must point to a storage cell of `L` holding a live `which`th alternative.
    unsafe fn run(self, which: usize, ptr: M::Ptr) -> Self::Output;
}

macro_rules! handlers {
    (@list) => { End };
    (@list $s: ident $(, $rest: ident)*) => { Cons<$s, handlers!(@list $($rest),*)> };
    ($(($($f: ident $s: ident $i: tt),+))*) => {$(
        impl<M: Mode, O, $($s: Slot, $f,)+> Handlers<M, handlers!(@list $($s),+)> for ($($f,)+)
        where
            $(M: Project<$s>, $f: FnOnce(<M as Project<$s>>::Item) -> O,)+
        {
            type Output = O;
            #[inline(always)]
            unsafe fn run(self, which: usize, ptr: M::Ptr) -> O {
                match which {
                    $($i => (self.$i)(<M as Project<$s>>::project(ptr)),)+
                    _ => unreachable_unchecked!(),
                }
            }
        }
    )*};
}
handlers! {
    (F0 S0 0)
    (F0 S0 0, F1 S1 1)
    (F0 S0 0, F1 S1 1, F2 S2 2)
    (F0 S0 0, F1 S1 1, F2 S2 2, F3 S3 3)
    (F0 S0 0, F1 S1 1, F2 S2 2, F3 S3 3, F4 S4 4)
    (F0 S0 0, F1 S1 1, F2 S2 2, F3 S3 3, F4 S4 4, F5 S5 5)
    (F0 S0 0, F1 S1 1, F2 S2 2, F3 S3 3, F4 S4 4, F5 S5 5, F6 S6 6)
    (F0 S0 0, F1 S1 1, F2 S2 2, F3 S3 3, F4 S4 4, F5 S5 5, F6 S6 6, F7 S7 7)
    (F0 S0 0, F1 S1 1, F2 S2 2, F3 S3 3, F4 S4 4, F5 S5 5, F6 S6 6, F7 S7 7, F8 S8 8)
    (F0 S0 0, F1 S1 1, F2 S2 2, F3 S3 3, F4 S4 4, F5 S5 5, F6 S6 6, F7 S7 7, F8 S8 8, F9 S9 9)
    (F0 S0 0, F1 S1 1, F2 S2 2, F3 S3 3, F4 S4 4, F5 S5 5, F6 S6 6, F7 S7 7, F8 S8 8, F9 S9 9, F10 S10 10)
    (F0 S0 0, F1 S1 1, F2 S2 2, F3 S3 3, F4 S4 4, F5 S5 5, F6 S6 6, F7 S7 7, F8 S8 8, F9 S9 9, F10 S10 10, F11 S11 11)
}
