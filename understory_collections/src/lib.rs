// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Collections: generic in-memory collection types.
//!
//! The centrepiece is a dependency graph with topological sort, supported by a
//! binary-heap priority queue and a handful of small containers:
//!
//! - **Dependency graph** ([`Graph`]): Directed acyclic graph of uniquely
//!   identified vertices, sorted with Kahn's algorithm. Cycles are reported as
//!   [`GraphError::CycleDetected`] rather than producing a partial order.
//! - **Priority queue** ([`PriorityQueue`]): Max-heap keyed by an `i64`
//!   priority, with O(n) construction from a batch of items.
//! - **Set algebra** ([`Set`]): Hash set with union, intersection, difference
//!   and subset checks. The graph stores its adjacency in these.
//! - **FIFO and LIFO** ([`Queue`], [`Stack`]): The queue is the frontier of
//!   the topological sort.
//! - **Linked list** ([`List`]): Doubly linked list in a slot arena, addressed
//!   by generational [`NodeId`] handles.
//! - **Insertion-ordered map** ([`OrderedMap`]): Hash map that iterates oldest
//!   to newest.
//! - **Layered map** ([`Chain`]): Ordered stack of hash maps searched front to
//!   back.
//! - **Multiset** ([`Counter`]): Occurrence counts with top-N queries backed
//!   by the priority queue.
//!
//! ## Quick Start
//!
//! ```rust
//! use understory_collections::{Graph, GraphError};
//!
//! let mut graph = Graph::new();
//! graph.add_vertex("compile", "cc main.c").unwrap();
//! graph.add_vertex("link", "ld main.o").unwrap();
//! graph.add_vertex("package", "tar czf app.tgz app").unwrap();
//!
//! // link depends on compile, package depends on link
//! graph.add_edge("compile", "link").unwrap();
//! graph.add_edge("link", "package").unwrap();
//!
//! let steps = graph.sort().unwrap();
//! assert_eq!(steps, [&"cc main.c", &"ld main.o", &"tar czf app.tgz app"]);
//!
//! // Closing the loop makes the graph unsortable.
//! graph.add_edge("package", "compile").unwrap();
//! assert!(matches!(graph.sort(), Err(GraphError::CycleDetected { .. })));
//! ```
//!
//! ```rust
//! use understory_collections::{PriorityQueue, QueueError};
//!
//! let mut queue = PriorityQueue::from_fn(["low", "urgent", "normal"], |task| match *task {
//!     "urgent" => 10,
//!     "normal" => 5,
//!     _ => 1,
//! });
//!
//! assert_eq!(queue.pop(), Ok("urgent"));
//! assert_eq!(queue.pop(), Ok("normal"));
//! assert_eq!(queue.pop(), Ok("low"));
//! assert_eq!(queue.pop(), Err(QueueError::Empty));
//! ```
//!
//! ## Errors
//!
//! Fallible operations return a typed error ([`GraphError`], [`QueueError`]).
//! Match on the variant; the `Display` text is meant for humans and may change.
//! Lookups on the simpler containers return `Option` instead.
//!
//! ## Logging
//!
//! Sorting emits [`tracing`] events: `debug` when a sort starts and when it
//! finishes, `warn` when it hits a cycle. The crate never installs a
//! subscriber.
//!
//! ## Concurrency
//!
//! Nothing here locks. Every container is `Send` and `Sync` exactly when its
//! contents are; wrap shared instances in your own mutex.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.
//!
//! ## Features
//!
//! This crate currently has no optional features. All functionality is always
//! available.

#![no_std]

extern crate alloc;

mod chain;
mod counter;
mod graph;
mod list;
mod ordered_map;
mod priority;
mod queue;
mod set;
mod stack;

pub use chain::Chain;
pub use counter::Counter;
pub use graph::{Graph, GraphError};
pub use list::{List, ListIter, NodeId};
pub use ordered_map::OrderedMap;
pub use priority::{Element, PriorityQueue, QueueError};
pub use queue::Queue;
pub use set::Set;
pub use stack::Stack;
