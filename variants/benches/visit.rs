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

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use variants::{Adaptive, Alternatives, BinarySearch, Engine, JumpTable, Variant, Visit};

#[derive(Clone, Copy)]
pub struct Params {
    value: u32,
    repeats: u8,
}
#[derive(Clone, Copy)]
pub struct Add(Params);
#[derive(Clone, Copy)]
pub struct Sub(Params);
#[derive(Clone, Copy)]
pub struct Mul(Params);
#[derive(Clone, Copy)]
pub struct Xor(Params);
impl variants::Alternative for Add {}
impl variants::Alternative for Sub {}
impl variants::Alternative for Mul {}
impl variants::Alternative for Xor {}

pub enum StdOp {
    Add(Params),
    Sub(Params),
    Mul(Params),
    Xor(Params),
}

type Ops = Alternatives![Add, Sub, Mul, Xor];

struct Apply<'a>(&'a mut u32);
impl Visit<&Add> for Apply<'_> {
    type Output = ();
    fn visit(self, Add(Params { value, repeats }): &Add) {
        for _ in 0..*repeats {
            *self.0 = self.0.wrapping_add(*value)
        }
    }
}
impl Visit<&Sub> for Apply<'_> {
    type Output = ();
    fn visit(self, Sub(Params { value, repeats }): &Sub) {
        for _ in 0..*repeats {
            *self.0 = self.0.wrapping_sub(*value)
        }
    }
}
impl Visit<&Mul> for Apply<'_> {
    type Output = ();
    fn visit(self, Mul(Params { value, repeats }): &Mul) {
        for _ in 0..*repeats {
            *self.0 = self.0.wrapping_mul(*value)
        }
    }
}
impl Visit<&Xor> for Apply<'_> {
    type Output = ();
    fn visit(self, Xor(Params { value, repeats }): &Xor) {
        for _ in 0..*repeats {
            *self.0 ^= *value
        }
    }
}

const N: usize = 100000;

fn build<E: Engine>(ops: &[(u8, u8, u32)]) -> Vec<Variant<Ops, E>> {
    ops.iter()
        .map(|&(op, repeats, value)| {
            let params = Params { value, repeats };
            match op {
                0 => Variant::new(Add(params)),
                1 => Variant::new(Sub(params)),
                2 => Variant::new(Mul(params)),
                _ => Variant::new(Xor(params)),
            }
        })
        .collect()
}

fn run<E: Engine>(ops: &[Variant<Ops, E>]) -> u32 {
    let mut result = 0;
    for op in ops {
        op.visit(Apply(&mut result))
    }
    result
}

fn bench_visit(c: &mut Criterion) {
    let rng = rand::rngs::StdRng::seed_from_u64(0);
    let ops = (0..N)
        .map({
            let mut rng = rng.clone();
            move |_| {
                (
                    rng.gen_range(0..=3u8),
                    rng.gen_range(1..=5u8),
                    rng.gen_range(0..=100u32),
                )
            }
        })
        .collect::<Vec<_>>();
    let std_op = ops
        .iter()
        .map(|&(op, repeats, value)| {
            let params = Params { value, repeats };
            match op {
                0 => StdOp::Add(params),
                1 => StdOp::Sub(params),
                2 => StdOp::Mul(params),
                _ => StdOp::Xor(params),
            }
        })
        .collect::<Vec<_>>();
    let tree_op = build::<BinarySearch>(&ops);
    let table_op = build::<JumpTable>(&ops);
    let adaptive_op = build::<Adaptive>(&ops);

    c.bench_function("std_new", |b| {
        b.iter(|| {
            black_box(
                ops.iter()
                    .map(|&(op, repeats, value)| {
                        let params = Params { value, repeats };
                        match op {
                            0 => StdOp::Add(params),
                            1 => StdOp::Sub(params),
                            2 => StdOp::Mul(params),
                            _ => StdOp::Xor(params),
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        });
    });
    c.bench_function("variant_new", |b| {
        b.iter(|| black_box(build::<Adaptive>(&ops)));
    });

    // Baseline for executing 100K operations.
    c.bench_function("std_run", |b| {
        b.iter(|| {
            let mut result = 0u32;
            for op in &std_op {
                match op {
                    StdOp::Add(Params { value, repeats }) => {
                        for _ in 0..*repeats {
                            result = result.wrapping_add(*value)
                        }
                    }
                    StdOp::Sub(Params { value, repeats }) => {
                        for _ in 0..*repeats {
                            result = result.wrapping_sub(*value)
                        }
                    }
                    StdOp::Mul(Params { value, repeats }) => {
                        for _ in 0..*repeats {
                            result = result.wrapping_mul(*value)
                        }
                    }
                    StdOp::Xor(Params { value, repeats }) => {
                        for _ in 0..*repeats {
                            result ^= *value
                        }
                    }
                }
            }
            black_box(result)
        });
    });
    c.bench_function("binary_search_run", |b| {
        b.iter(|| black_box(run(&tree_op)));
    });
    c.bench_function("jump_table_run", |b| {
        b.iter(|| black_box(run(&table_op)));
    });
    c.bench_function("adaptive_run", |b| {
        b.iter(|| black_box(run(&adaptive_op)));
    });
    c.bench_function("match_ref_run", |b| {
        b.iter(|| {
            let mut result = 0u32;
            for op in &adaptive_op {
                let (value, repeats, apply): (u32, u8, fn(u32, u32) -> u32) = op.match_ref((
                    |Add(p): &Add| (p.value, p.repeats, u32::wrapping_add as fn(u32, u32) -> u32),
                    |Sub(p): &Sub| (p.value, p.repeats, u32::wrapping_sub as fn(u32, u32) -> u32),
                    |Mul(p): &Mul| (p.value, p.repeats, u32::wrapping_mul as fn(u32, u32) -> u32),
                    |Xor(p): &Xor| (p.value, p.repeats, (|a: u32, b: u32| a ^ b) as fn(u32, u32) -> u32),
                ));
                for _ in 0..repeats {
                    result = apply(result, value)
                }
            }
            black_box(result)
        });
    });
}

criterion_group!(benches, bench_visit);
criterion_main!(benches);
