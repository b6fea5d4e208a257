// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `Graph` construction and topological sorting.
//!
//! These exercise the public API end to end: error reporting while building,
//! ordering guarantees of `sort`/`into_sorted`, and cycle detection on graphs
//! large enough that a bug in the frontier bookkeeping would show up.

use understory_collections::{Graph, GraphError};

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

/// Builds a random DAG over `0..n` whose edges always point from a lower to a
/// higher position in a shuffled order, returning the edge list alongside.
fn random_dag(n: usize, edges_per_vertex: usize, seed: u64) -> (Graph<usize, usize>, Vec<(usize, usize)>) {
    let mut rng = Lcg::new(seed);

    // Shuffle so that vertex ids do not coincide with a valid order.
    let mut rank: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.gen_range_usize(i + 1);
        rank.swap(i, j);
    }

    let mut graph = Graph::with_capacity(n);
    for id in 0..n {
        graph.add_vertex(id, id).unwrap();
    }

    let mut edges = Vec::new();
    for a in 0..n {
        for _ in 0..edges_per_vertex {
            let b = rng.gen_range_usize(n);
            if rank[a] < rank[b] {
                graph.add_edge(a, b).unwrap();
                edges.push((a, b));
            }
        }
    }
    (graph, edges)
}

fn assert_topological(sorted: &[usize], edges: &[(usize, usize)]) {
    let mut position = vec![usize::MAX; sorted.len()];
    for (index, &vertex) in sorted.iter().enumerate() {
        assert_eq!(position[vertex], usize::MAX, "vertex {vertex} emitted twice");
        position[vertex] = index;
    }
    for &(from, to) in edges {
        assert!(
            position[from] < position[to],
            "edge {from} -> {to} violated: {} >= {}",
            position[from],
            position[to]
        );
    }
}

#[test]
fn build_errors_leave_graph_untouched() {
    let mut graph = Graph::new();
    graph.add_vertex("v1", "payload").unwrap();

    assert_eq!(
        graph.add_vertex("v1", "other"),
        Err(GraphError::DuplicateVertex { id: "v1" })
    );
    assert_eq!(
        graph.add_edge("missing", "v1"),
        Err(GraphError::ParentNotFound { id: "missing" })
    );
    assert_eq!(
        graph.add_edge("v1", "missing"),
        Err(GraphError::ChildNotFound { id: "missing" })
    );

    assert_eq!(graph.order(), 1);
    assert_eq!(graph.size(), 0);
    assert_eq!(graph.get_vertex(&"v1"), Ok(&"payload"));
}

#[test]
fn error_messages_name_the_offending_id() {
    let mut graph = Graph::<u32, ()>::new();
    graph.add_vertex(7, ()).unwrap();

    let duplicate = graph.add_vertex(7, ()).unwrap_err();
    assert_eq!(duplicate.to_string(), "vertex with id 7 already exists");

    let parent = graph.add_edge(1, 7).unwrap_err();
    assert_eq!(parent.to_string(), "parent vertex with id 1 not in graph");

    let child = graph.add_edge(7, 2).unwrap_err();
    assert_eq!(child.to_string(), "child vertex with id 2 not in graph");

    let missing = graph.get_vertex(&3).unwrap_err();
    assert_eq!(missing.to_string(), "vertex with id 3 not in graph");
}

#[test]
fn errors_are_std_errors() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&GraphError::<u32>::CycleDetected { remaining: 1 });
}

#[test]
fn random_dags_sort_topologically() {
    for seed in 0..20 {
        let (graph, edges) = random_dag(200, 3, seed);
        assert_eq!(graph.size(), edges.len());

        let sorted: Vec<usize> = graph.sort().unwrap().into_iter().copied().collect();
        assert_eq!(sorted.len(), 200);
        assert_topological(&sorted, &edges);

        let owned = graph.into_sorted().unwrap();
        assert_eq!(owned, sorted, "seed {seed}: into_sorted disagrees with sort");
    }
}

#[test]
fn closing_any_path_creates_a_cycle() {
    let (mut graph, edges) = random_dag(50, 2, 42);
    let &(from, to) = edges.first().expect("seed 42 produces edges");

    // Reverse an existing edge to close a two-vertex loop.
    graph.add_edge(to, from).unwrap();

    match graph.sort() {
        Err(GraphError::CycleDetected { remaining }) => {
            assert!(remaining >= 2, "at least the two looped vertices remain");
            assert!(remaining <= 50);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn sorting_does_not_consume_the_graph() {
    let mut graph = Graph::new();
    for (id, payload) in [("one", 1), ("two", 2), ("three", 3), ("four", 4), ("five", 5)] {
        graph.add_vertex(id, payload).unwrap();
    }
    graph.add_edge("one", "two").unwrap();
    graph.add_edge("three", "four").unwrap();

    let first = graph.sort().unwrap();
    let second = graph.sort().unwrap();
    assert_eq!(first, second);

    // The graph can still grow after a sort.
    graph.add_edge("four", "five").unwrap();
    let third = graph.sort().unwrap();
    let four = third.iter().position(|&&p| p == 4).unwrap();
    let five = third.iter().position(|&&p| p == 5).unwrap();
    assert!(four < five);
    assert_eq!(graph.order(), 5);
    assert_eq!(graph.size(), 3);
}

#[test]
fn string_keys_and_payloads() {
    let mut graph: Graph<String, Vec<&str>> = Graph::new();
    graph.add_vertex("fetch".to_string(), vec!["git", "fetch"]).unwrap();
    graph.add_vertex("build".to_string(), vec!["cargo", "build"]).unwrap();
    graph
        .add_edge("fetch".to_string(), "build".to_string())
        .unwrap();

    graph
        .get_vertex_mut(&"build".to_string())
        .unwrap()
        .push("--release");

    let steps = graph.into_sorted().unwrap();
    assert_eq!(steps, vec![vec!["git", "fetch"], vec!["cargo", "build", "--release"]]);
}
