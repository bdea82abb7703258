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

//! Type-level naturals, used to index alternative lists and to split them in halves.

/// The natural `0`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Zero;
/// The natural `N + 1`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Succ<N>(N);

pub trait Nat {
    const USIZE: usize;
}
impl Nat for Zero {
    const USIZE: usize = 0;
}
impl<N: Nat> Nat for Succ<N> {
    const USIZE: usize = N::USIZE + 1;
}

/// Floor division by 2.
pub trait Halve: Nat {
    type Half: Nat;
}
impl Halve for Zero {
    type Half = Zero;
}
impl Halve for Succ<Zero> {
    type Half = Zero;
}
impl<N: Halve> Halve for Succ<Succ<N>> {
    type Half = Succ<N::Half>;
}

#[cfg(test)]
mod tests {
    use super::*;
    type N5 = Succ<Succ<Succ<Succ<Succ<Zero>>>>>;
    #[test]
    fn halving() {
        assert_eq!(N5::USIZE, 5);
        assert_eq!(<<N5 as Halve>::Half as Nat>::USIZE, 2);
        assert_eq!(<<Succ<N5> as Halve>::Half as Nat>::USIZE, 3);
        assert_eq!(<<Zero as Halve>::Half as Nat>::USIZE, 0);
    }
}
