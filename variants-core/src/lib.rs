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

//! The engine behind [`variants`](https://docs.rs/variants): tagged unions over type-level lists
//! of alternatives.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}

/// Marks a path as unreachable: a panic in debug builds, undefined behaviour in release.
#[doc(hidden)]
#[macro_export]
macro_rules! unreachable_unchecked {
    () => {
        if cfg!(debug_assertions) {
            unreachable!()
        } else {
            core::hint::unreachable_unchecked()
        }
    };
}

pub mod classify;
pub mod dispatch;
pub mod error;
pub mod list;
pub mod matching;
pub mod multivisit;
pub mod nat;
#[cfg(feature = "alloc")]
pub mod recursive;
pub mod select;
pub mod storage;
pub mod variant;

pub use classify::{safely_constructible, Alternative, Class, Scalar, Verdict};
pub use dispatch::{
    Adaptive, BinarySearch, Dispatch, Engine, JumpTable, Visit, WithArgs, ADAPTIVE_THRESHOLD,
};
pub use error::WrongAlternative;
pub use list::{Cons, End, Inline, Nth, TypeAt, TypeList};
#[cfg(feature = "alloc")]
pub use list::Boxed;
pub use multivisit::Accept;
#[cfg(feature = "alloc")]
pub use recursive::Recursive;
pub use variant::Variant;
pub use variants_macros::Alternative;
