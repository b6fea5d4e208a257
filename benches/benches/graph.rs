// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use understory_collections::Graph;

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

    fn gen_range_usize(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }
}

fn build_dag(n: u32, edges_per_vertex: u32, seed: u64) -> Graph<u32, u64> {
    let mut graph = Graph::with_capacity(n as usize);
    let mut rng = Lcg::new(seed);

    for id in 0..n {
        graph.add_vertex(id, u64::from(id)).unwrap();
    }
    // Ensure a DAG by only adding edges `from -> to` where `from < to`.
    for to in 1..n {
        let incoming = edges_per_vertex.min(to);
        for _ in 0..incoming {
            let from = rng.gen_range_usize(to as usize) as u32;
            graph.add_edge(from, to).unwrap();
        }
    }

    graph
}

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_collections_graph");
    group.sample_size(50);
    for &(n, edges_per_vertex) in &[
        (256_u32, 1_u32),
        (256_u32, 4_u32),
        (4_096_u32, 1_u32),
        (4_096_u32, 4_u32),
    ] {
        group.bench_function(format!("build(n={n},e={edges_per_vertex})"), |b| {
            b.iter(|| black_box(build_dag(n, edges_per_vertex, 0xDA6_0000_0000_0001)));
        });

        let graph = build_dag(n, edges_per_vertex, 0xDA6_0000_0000_0002);
        group.bench_function(format!("sort(n={n},e={edges_per_vertex})"), |b| {
            b.iter(|| {
                let sum: u64 = graph
                    .sort()
                    .unwrap()
                    .into_iter()
                    .fold(0_u64, |acc, payload| acc.wrapping_mul(31).wrapping_add(*payload));
                black_box(sum);
            });
        });

        group.bench_function(format!("into_sorted(n={n},e={edges_per_vertex})"), |b| {
            b.iter_batched(
                || build_dag(n, edges_per_vertex, 0xDA6_0000_0000_0003),
                |graph| black_box(graph.into_sorted().unwrap()),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_graph);
criterion_main!(benches);
