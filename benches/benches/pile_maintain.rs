// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Point, Rect};
use understory_pile::{EntityFrame, EntityKind, EntitySnapshot, PileSet};
use understory_pile_hud::{NoSelection, PointerState, Selector, SelectorConfig};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// `clusters` groups of `per_cluster` 20x40 boxes, scattered within `spread` of a centre.
fn gen_crowds(clusters: usize, per_cluster: usize, spread: f64) -> Vec<EntitySnapshot<u32>> {
    let mut out = Vec::with_capacity(clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut id = 0_u32;
    for c in 0..clusters {
        let (cx, cy) = (rng.next_f64() * 1600.0, rng.next_f64() * 900.0);
        for _ in 0..per_cluster {
            let x = cx + (rng.next_f64() - 0.5) * spread;
            let y = cy + (rng.next_f64() - 0.5) * spread;
            let priority = if rng.next_f64() < 0.2 { rng.next_f64() } else { 1.0 };
            out.push(
                EntitySnapshot::new(id, Rect::new(x, y, x + 20.0, y + 40.0))
                    .with_priority(priority)
                    .with_kind(EntityKind((c % 4) as u32)),
            );
            id += 1;
        }
    }
    out
}

/// The same crowds, each box nudged by up to `step` in both axes.
fn jitter(entities: &[EntitySnapshot<u32>], step: f64, seed: u64) -> Vec<EntitySnapshot<u32>> {
    let mut rng = Rng::new(seed);
    entities
        .iter()
        .map(|e| {
            let dx = (rng.next_f64() - 0.5) * step;
            let dy = (rng.next_f64() - 0.5) * step;
            EntitySnapshot {
                bounds: e.bounds + kurbo::Vec2::new(dx, dy),
                anchor: e.anchor + kurbo::Vec2::new(dx, dy),
                ..*e
            }
        })
        .collect()
}

fn bench_maintain(c: &mut Criterion) {
    let mut group = c.benchmark_group("maintain");
    for &(clusters, per_cluster) in &[(4usize, 4usize), (8, 6), (16, 8)] {
        let entities = gen_crowds(clusters, per_cluster, 40.0);
        group.throughput(Throughput::Elements(entities.len() as u64));

        group.bench_function(format!("cold_n{}", entities.len()), |b| {
            b.iter_batched(
                PileSet::<u32>::new,
                |mut piles| {
                    let stats = piles.maintain(&EntityFrame::new(&entities));
                    black_box(stats);
                },
                BatchSize::SmallInput,
            )
        });

        let mut settled = PileSet::new();
        settled.maintain(&EntityFrame::new(&entities));
        group.bench_function(format!("static_n{}", entities.len()), |b| {
            b.iter_batched(
                || settled.clone(),
                |mut piles| {
                    let stats = piles.maintain(&EntityFrame::new(&entities));
                    black_box(stats);
                },
                BatchSize::SmallInput,
            )
        });

        let frames: Vec<_> = (0..8).map(|i| jitter(&entities, 6.0, 0xBADC_F00D + i)).collect();
        group.bench_function(format!("moving_n{}", entities.len()), |b| {
            b.iter_batched(
                || settled.clone(),
                |mut piles| {
                    for frame in &frames {
                        let stats = piles.maintain(&EntityFrame::new(frame));
                        black_box(stats);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_selector(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector");
    let entities = gen_crowds(8, 6, 40.0);
    let frames: Vec<_> = (0..8).map(|i| jitter(&entities, 6.0, 0xFACE_FEED + i)).collect();
    group.throughput(Throughput::Elements((entities.len() * frames.len()) as u64));
    group.bench_function("update_8_frames", |b| {
        b.iter_batched(
            || {
                let mut s = Selector::new(SelectorConfig::default());
                s.set_position(Point::new(0.0, 1000.0), Point::new(1600.0, 1000.0), 1.0);
                s
            },
            |mut selector| {
                let pointer = PointerState::at(Point::new(800.0, 450.0));
                for frame in &frames {
                    selector.update(1.0 / 60.0, frame, &Affine::IDENTITY, &pointer, &NoSelection);
                }
                black_box(selector.hover_tooltip_source());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_maintain, bench_selector);
criterion_main!(benches);
