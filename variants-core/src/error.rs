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

use core::fmt;

/// A typed access targeted an alternative that wasn't active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WrongAlternative {
    /// The index of the requested alternative.
    pub expected: usize,
    /// The index of the active alternative.
    pub active: usize,
    /// The name of the requested alternative's type.
    pub expected_type: &'static str,
}

impl fmt::Display for WrongAlternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected alternative {} (`{}`), but alternative {} is active",
            self.expected, self.expected_type, self.active
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WrongAlternative {}
