// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binary-heap priority queue.

use alloc::vec::Vec;

/// Error returned by [`PriorityQueue::pop`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum QueueError {
    /// The queue held no elements.
    #[error("pop from empty priority queue")]
    Empty,
}

/// An item paired with its priority.
///
/// Larger priorities are popped first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Element<T> {
    /// The stored item.
    pub item: T,
    /// The priority of the item.
    pub priority: i64,
}

impl<T> Element<T> {
    /// Pairs `item` with `priority`.
    #[must_use]
    pub const fn new(item: T, priority: i64) -> Self {
        Self { item, priority }
    }
}

/// A max-priority queue backed by a binary heap.
///
/// Items are stored alongside an explicit `i64` priority rather than being
/// compared themselves, so `T` carries no trait bounds.
///
/// # Ordering
///
/// [`pop`](Self::pop) always returns an item with the highest priority
/// currently queued. Among items with *equal* priority the order is decided
/// by the heap layout, not by insertion order: the queue is not stable. The
/// result is deterministic for a given sequence of operations, but callers
/// must not rely on it being FIFO.
///
/// # Performance
///
/// - [`push`](Self::push) and [`pop`](Self::pop): O(log n).
/// - [`from_elements`](Self::from_elements) and [`from_fn`](Self::from_fn):
///   O(n), using a bottom-up heapify instead of n pushes.
///
/// # Example
///
/// ```
/// use understory_collections::{PriorityQueue, QueueError};
///
/// let mut queue = PriorityQueue::new();
/// queue.push("low", 1);
/// queue.push("high", 10);
/// queue.push("mid", 5);
///
/// assert_eq!(queue.pop(), Ok("high"));
/// assert_eq!(queue.pop(), Ok("mid"));
/// assert_eq!(queue.pop(), Ok("low"));
/// assert_eq!(queue.pop(), Err(QueueError::Empty));
/// ```
///
/// # See Also
///
/// - [`Counter::most_common_n`](crate::Counter::most_common_n): Top-K extraction built on this queue.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T> {
    /// Max-heap: `heap[(i - 1) / 2].priority >= heap[i].priority` for all `i > 0`.
    heap: Vec<Element<T>>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    /// Creates an empty queue with room for at least `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Builds a queue from pre-paired elements in O(n).
    #[must_use]
    pub fn from_elements(elements: Vec<Element<T>>) -> Self {
        let mut queue = Self { heap: elements };
        queue.heapify();
        queue
    }

    /// Builds a queue from `items`, calling `priority` exactly once per item.
    pub fn from_fn<I, F>(items: I, mut priority: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T) -> i64,
    {
        let heap = items
            .into_iter()
            .map(|item| {
                let p = priority(&item);
                Element::new(item, p)
            })
            .collect();
        Self::from_elements(heap)
    }

    /// Adds `item` with the given `priority`.
    pub fn push(&mut self, item: T, priority: i64) {
        self.heap.push(Element::new(item, priority));
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the item with the highest priority.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] if the queue holds no elements.
    pub fn pop(&mut self) -> Result<T, QueueError> {
        self.pop_element().map(|element| element.item)
    }

    /// Like [`pop`](Self::pop), but also returns the popped priority.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Empty`] if the queue holds no elements.
    pub fn pop_element(&mut self) -> Result<Element<T>, QueueError> {
        if self.heap.is_empty() {
            return Err(QueueError::Empty);
        }
        // Moves the last element into the root slot and shrinks the heap by one.
        let top = self.heap.swap_remove(0);
        let len = self.heap.len();
        self.sift_down(0, len);
        Ok(top)
    }

    /// Returns the highest-priority item without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|element| &element.item)
    }

    /// Returns the highest priority currently queued.
    #[must_use]
    pub fn peek_priority(&self) -> Option<i64> {
        self.heap.first().map(|element| element.priority)
    }

    /// Returns the number of queued elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if the queue holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Returns the backing storage in heap order.
    ///
    /// Only the first element is guaranteed to carry the highest priority;
    /// the rest follow the binary-heap layout.
    #[must_use]
    pub fn as_slice(&self) -> &[Element<T>] {
        &self.heap
    }

    fn heapify(&mut self) {
        let len = self.heap.len();
        for index in (0..len / 2).rev() {
            self.sift_down(index, len);
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].priority <= self.heap[parent].priority {
                break;
            }
            self.heap.swap(parent, index);
            index = parent;
        }
    }

    /// Sifts the element at `index` down within `heap[..len]`.
    fn sift_down(&mut self, mut index: usize, len: usize) {
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            // The right child only wins when strictly greater.
            let right = left + 1;
            let child = if right < len && self.heap[right].priority > self.heap[left].priority {
                right
            } else {
                left
            };
            if self.heap[child].priority <= self.heap[index].priority {
                break;
            }
            self.heap.swap(index, child);
            index = child;
        }
    }
}

impl<T> From<Vec<Element<T>>> for PriorityQueue<T> {
    fn from(elements: Vec<Element<T>>) -> Self {
        Self::from_elements(elements)
    }
}

impl<T> FromIterator<Element<T>> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = Element<T>>>(iter: I) -> Self {
        Self::from_elements(iter.into_iter().collect())
    }
}

impl<T> Extend<Element<T>> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = Element<T>>>(&mut self, iter: I) {
        for element in iter {
            self.push(element.item, element.priority);
        }
    }
}
