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

//! Tagged unions over type-level lists of alternatives.
//!
//! ```
//! use variants::{Variant, Visit};
//!
//! type Number = Variant![f64, f32, i32];
//! // `5` can't safely become a float, so it lands in the `i32` slot...
//! assert_eq!(Number::new(5).which(), 2);
//! // ...while an `f32` widens into the first slot that fits.
//! assert_eq!(Number::new(10.0f32).which(), 0);
//!
//! struct Double;
//! impl<T: Copy + Into<f64>> Visit<&T> for Double {
//!     type Output = f64;
//!     fn visit(self, value: &T) -> f64 {
//!         2.0 * (*value).into()
//!     }
//! }
//! assert_eq!(Number::new(4).visit(Double), 8.0);
//! ```
//!
//! The dispatch strategy is a type parameter: [`BinarySearch`], [`JumpTable`], or the default
//! [`Adaptive`], which picks between the two depending on the number of alternatives.

#![cfg_attr(not(feature = "std"), no_std)]

pub use variants_core::*;
