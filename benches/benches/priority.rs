// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_collections::{Counter, PriorityQueue};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }
}

fn random_priorities(n: usize, seed: u64) -> Vec<i64> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| i64::from(rng.next_u32())).collect()
}

fn bench_priority(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_collections_priority");
    group.sample_size(50);
    for &n in &[256_usize, 4_096, 65_536] {
        let priorities = random_priorities(n, 0x9E37_79B9_0000_0001);

        group.bench_function(format!("push_then_pop(n={n})"), |b| {
            b.iter(|| {
                let mut queue = PriorityQueue::with_capacity(n);
                for &p in &priorities {
                    queue.push(p, p);
                }
                let mut last = i64::MAX;
                while let Ok(p) = queue.pop() {
                    last = last.min(p);
                }
                black_box(last);
            });
        });

        group.bench_function(format!("heapify_then_pop(n={n})"), |b| {
            b.iter_batched(
                || priorities.clone(),
                |items| {
                    let mut queue = PriorityQueue::from_fn(items, |&p| p);
                    let mut last = i64::MAX;
                    while let Ok(p) = queue.pop() {
                        last = last.min(p);
                    }
                    black_box(last);
                },
                BatchSize::LargeInput,
            );
        });

        // Skewed keys so the top of the distribution is meaningful.
        let counter: Counter<u32> = priorities
            .iter()
            .map(|&p| (p as u32).leading_zeros())
            .chain(priorities.iter().map(|&p| (p as u32) % 512))
            .collect();
        group.bench_function(format!("counter_most_common_10(n={n})"), |b| {
            b.iter(|| black_box(counter.most_common_n(10)));
        });
        group.bench_function(format!("counter_descending(n={n})"), |b| {
            b.iter(|| black_box(counter.descending()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_priority);
criterion_main!(benches);
