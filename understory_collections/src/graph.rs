// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directed acyclic graph with Kahn's-algorithm topological sort.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::queue::Queue;
use crate::set::Set;

/// Errors returned by [`Graph`] operations.
///
/// Callers should branch on the variant; the `Display` text is a debugging
/// aid and may change.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError<K> {
    /// [`Graph::add_vertex`] was called with an id that is already present.
    #[error("vertex with id {id:?} already exists")]
    DuplicateVertex {
        /// The rejected id.
        id: K,
    },
    /// A lookup named an id that is not in the graph.
    #[error("vertex with id {id:?} not in graph")]
    VertexNotFound {
        /// The missing id.
        id: K,
    },
    /// [`Graph::add_edge`] named a parent (`from`) that is not in the graph.
    #[error("parent vertex with id {id:?} not in graph")]
    ParentNotFound {
        /// The missing parent id.
        id: K,
    },
    /// [`Graph::add_edge`] named a child (`to`) that is not in the graph.
    #[error("child vertex with id {id:?} not in graph")]
    ChildNotFound {
        /// The missing child id.
        id: K,
    },
    /// The graph contains a cycle and has no topological order.
    #[error("graph contains a cycle and cannot be sorted ({remaining} vertices unsorted)")]
    CycleDetected {
        /// Number of vertices that never reached in-degree zero.
        remaining: usize,
    },
}

/// Dense index of a vertex in the graph's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct VertexId(usize);

#[derive(Clone, Debug)]
struct Vertex<K, T> {
    id: K,
    payload: T,
    /// Vertices with an edge pointing into this one.
    parents: Set<VertexId>,
    /// Vertices this one has an edge pointing to.
    children: Set<VertexId>,
}

/// A directed acyclic graph of uniquely identified vertices.
///
/// Each vertex has a caller-chosen id (`K`) and a payload (`T`). An edge
/// `from -> to` means "`to` depends on `from`": `from` is the parent and must
/// come first in a topological order.
///
/// Vertices live in a dense arena owned by the graph; parent and child sets
/// hold arena indices, never references, so there are no ownership cycles.
/// Vertices cannot be removed.
///
/// # Cycles
///
/// [`add_edge`](Self::add_edge) does not check for cycles, self-loops
/// included. Cycles are reported by [`sort`](Self::sort) and
/// [`into_sorted`](Self::into_sorted) as [`GraphError::CycleDetected`].
///
/// # Ordering
///
/// A DAG usually has more than one valid topological order. The sort seeds its
/// frontier in vertex insertion order and processes it first-in, first-out, so
/// the result is reproducible for a given construction sequence, but callers
/// should only rely on it being *a* valid order.
///
/// # Example
///
/// ```
/// use understory_collections::Graph;
///
/// let mut graph = Graph::new();
/// graph.add_vertex("fetch", 1).unwrap();
/// graph.add_vertex("build", 2).unwrap();
/// graph.add_vertex("test", 3).unwrap();
///
/// // build depends on fetch, test depends on build
/// graph.add_edge("fetch", "build").unwrap();
/// graph.add_edge("build", "test").unwrap();
///
/// assert_eq!(graph.order(), 3);
/// assert_eq!(graph.size(), 2);
/// assert_eq!(graph.sort().unwrap(), vec![&1, &2, &3]);
/// ```
///
/// # See Also
///
/// - [`Set`]: Per-vertex adjacency storage.
/// - [`Queue`]: Frontier of vertices ready to be emitted during a sort.
#[derive(Clone)]
pub struct Graph<K, T>
where
    K: Eq + Hash,
{
    vertices: Vec<Vertex<K, T>>,
    index: HashMap<K, VertexId>,
    /// Number of successful `add_edge` calls.
    edges: usize,
}

impl<K, T> Default for Graph<K, T>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Graph<K, T>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            edges: 0,
        }
    }

    /// Creates an empty graph with room for at least `capacity` vertices.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            edges: 0,
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges, counting every successful
    /// [`add_edge`](Self::add_edge) call.
    #[must_use]
    pub fn size(&self) -> usize {
        self.edges
    }

    /// Returns `true` if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex with the given id and payload.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if `id` is already present. The
    /// existing vertex and its payload are left untouched.
    pub fn add_vertex(&mut self, id: K, payload: T) -> Result<(), GraphError<K>> {
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateVertex { id });
        }
        let vid = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            id: id.clone(),
            payload,
            parents: Set::new(),
            children: Set::new(),
        });
        self.index.insert(id, vid);
        Ok(())
    }

    /// Returns the payload stored for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `id` is absent.
    pub fn get_vertex(&self, id: &K) -> Result<&T, GraphError<K>> {
        match self.index.get(id) {
            Some(vid) => Ok(&self.vertices[vid.0].payload),
            None => Err(GraphError::VertexNotFound { id: id.clone() }),
        }
    }

    /// Returns a mutable reference to the payload stored for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `id` is absent.
    pub fn get_vertex_mut(&mut self, id: &K) -> Result<&mut T, GraphError<K>> {
        match self.index.get(id) {
            Some(vid) => Ok(&mut self.vertices[vid.0].payload),
            None => Err(GraphError::VertexNotFound { id: id.clone() }),
        }
    }

    /// Returns `true` if a vertex with `id` exists.
    #[must_use]
    pub fn contains_vertex(&self, id: &K) -> bool {
        self.index.contains_key(id)
    }

    /// Adds an edge meaning "`to` depends on `from`".
    ///
    /// `from` becomes a parent of `to`. Adding the same edge twice leaves the
    /// adjacency unchanged but still counts towards [`size`](Self::size).
    /// Self-loops are accepted here and make every later sort fail.
    ///
    /// # Errors
    ///
    /// - [`GraphError::ParentNotFound`] if `from` is absent (checked first).
    /// - [`GraphError::ChildNotFound`] if `to` is absent.
    pub fn add_edge(&mut self, from: K, to: K) -> Result<(), GraphError<K>> {
        let Some(&parent) = self.index.get(&from) else {
            return Err(GraphError::ParentNotFound { id: from });
        };
        let Some(&child) = self.index.get(&to) else {
            return Err(GraphError::ChildNotFound { id: to });
        };

        self.vertices[parent.0].children.insert(child);
        self.vertices[child.0].parents.insert(parent);
        self.edges += 1;
        Ok(())
    }

    /// Returns the number of direct parents of `id`, or 0 if `id` is absent.
    #[must_use]
    pub fn in_degree(&self, id: &K) -> usize {
        self.index
            .get(id)
            .map_or(0, |vid| self.vertices[vid.0].parents.len())
    }

    /// Returns the number of direct children of `id`, or 0 if `id` is absent.
    #[must_use]
    pub fn out_degree(&self, id: &K) -> usize {
        self.index
            .get(id)
            .map_or(0, |vid| self.vertices[vid.0].children.len())
    }

    /// Returns the ids of the direct parents of `id`.
    ///
    /// Yields nothing if `id` is absent. The order is not specified.
    pub fn parents(&self, id: &K) -> impl Iterator<Item = &K> + '_ {
        self.neighbours(id, |vertex| &vertex.parents)
    }

    /// Returns the ids of the direct children of `id`.
    ///
    /// Yields nothing if `id` is absent. The order is not specified.
    pub fn children(&self, id: &K) -> impl Iterator<Item = &K> + '_ {
        self.neighbours(id, |vertex| &vertex.children)
    }

    /// Returns every vertex id in insertion order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.vertices.iter().map(|vertex| &vertex.id)
    }

    /// Returns every `(id, payload)` pair in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &T)> + '_ {
        self.vertices.iter().map(|vertex| (&vertex.id, &vertex.payload))
    }

    /// Returns the payloads in a topological order.
    ///
    /// Every parent's payload appears before the payloads of its children.
    /// The graph is not modified, so sorting again yields the same result.
    ///
    /// Runs in O(V + E).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CycleDetected`] if the graph contains a cycle. No
    /// partial order is returned.
    pub fn sort(&self) -> Result<Vec<&T>, GraphError<K>> {
        let order = self.topological_order()?;
        Ok(order
            .into_iter()
            .map(|vid| &self.vertices[vid.0].payload)
            .collect())
    }

    /// Consumes the graph and returns the owned payloads in a topological order.
    ///
    /// This is [`sort`](Self::sort) for callers that build a graph once, sort
    /// it once, and want the payloads back by value.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CycleDetected`] if the graph contains a cycle. The
    /// graph is dropped in that case.
    pub fn into_sorted(self) -> Result<Vec<T>, GraphError<K>> {
        let order = self.topological_order()?;
        let mut payloads: Vec<Option<T>> = self
            .vertices
            .into_iter()
            .map(|vertex| Some(vertex.payload))
            .collect();
        // Every vertex appears exactly once in `order`.
        Ok(order
            .into_iter()
            .filter_map(|vid| payloads[vid.0].take())
            .collect())
    }

    fn neighbours<'a>(
        &'a self,
        id: &K,
        select: impl Fn(&'a Vertex<K, T>) -> &'a Set<VertexId>,
    ) -> impl Iterator<Item = &'a K> + 'a {
        self.index
            .get(id)
            .map(|vid| select(&self.vertices[vid.0]))
            .into_iter()
            .flat_map(Set::iter)
            .map(|vid| &self.vertices[vid.0].id)
    }

    /// Kahn's algorithm over a snapshot of in-degrees.
    fn topological_order(&self) -> Result<Vec<VertexId>, GraphError<K>> {
        tracing::debug!(
            vertices = self.vertices.len(),
            edges = self.edges,
            "topological sort"
        );

        let mut in_degree: Vec<usize> = self
            .vertices
            .iter()
            .map(|vertex| vertex.parents.len())
            .collect();

        let mut frontier = Queue::with_capacity(self.vertices.len());
        frontier.extend(
            in_degree
                .iter()
                .enumerate()
                .filter(|(_, degree)| **degree == 0)
                .map(|(index, _)| VertexId(index)),
        );

        if frontier.is_empty() && !self.vertices.is_empty() {
            tracing::warn!(
                remaining = self.vertices.len(),
                "no vertex with in-degree zero, graph contains a cycle"
            );
            return Err(GraphError::CycleDetected {
                remaining: self.vertices.len(),
            });
        }

        let mut order = Vec::with_capacity(self.vertices.len());
        while let Some(vid) = frontier.pop() {
            order.push(vid);
            for &child in self.vertices[vid.0].children.iter() {
                let degree = &mut in_degree[child.0];
                *degree -= 1;
                if *degree == 0 {
                    frontier.push(child);
                }
            }
        }

        // Vertices on or behind a cycle never reach in-degree zero.
        let remaining = self.vertices.len() - order.len();
        if remaining > 0 {
            tracing::warn!(remaining, "topological sort stalled, graph contains a cycle");
            return Err(GraphError::CycleDetected { remaining });
        }

        tracing::debug!(emitted = order.len(), "topological sort complete");
        Ok(order)
    }
}

impl<K, T> fmt::Debug for Graph<K, T>
where
    K: Eq + Hash + fmt::Debug,
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("order", &self.vertices.len())
            .field("size", &self.edges)
            .field("vertices", &self.vertices)
            .finish_non_exhaustive()
    }
}
