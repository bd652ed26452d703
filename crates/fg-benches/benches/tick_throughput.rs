// SPDX-License-Identifier: Apache-2.0
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use fg_core::character::get_default;
use fg_core::{step, GameState, InputFrame, MapData, ValidationMode};
use fg_harness::SeededInputGenerator;

fn bench_step_strict(c: &mut Criterion) {
    let cfg = get_default(0).unwrap();
    let configs = [cfg, cfg];
    let actions = fg_core::default_moveset();
    let map = MapData::standard_stage();

    c.bench_function("step/strict/1000_ticks", |b| {
        b.iter_batched(
            || {
                let state = GameState::new((0, 0), (5 * fg_core::fixed::SCALE, 0), 1000);
                let gen = SeededInputGenerator::new(1);
                (state, gen)
            },
            |(mut state, mut gen)| {
                for _ in 0..1000 {
                    let input: InputFrame = gen.next_frame();
                    step(
                        &mut state,
                        black_box(&input),
                        &map,
                        &configs,
                        &actions,
                        ValidationMode::Strict,
                        None,
                    )
                    .unwrap();
                }
                black_box(state)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_step_production(c: &mut Criterion) {
    let cfg = get_default(0).unwrap();
    let configs = [cfg, cfg];
    let actions = fg_core::default_moveset();
    let map = MapData::standard_stage();

    c.bench_function("step/production/1000_ticks", |b| {
        b.iter_batched(
            || {
                let state = GameState::new((0, 0), (5 * fg_core::fixed::SCALE, 0), 1000);
                let gen = SeededInputGenerator::new(1);
                (state, gen)
            },
            |(mut state, mut gen)| {
                for _ in 0..1000 {
                    let input: InputFrame = gen.next_frame();
                    step(
                        &mut state,
                        black_box(&input),
                        &map,
                        &configs,
                        &actions,
                        ValidationMode::Production,
                        None,
                    )
                    .unwrap();
                }
                black_box(state)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_step_strict, bench_step_production);
criterion_main!(benches);
