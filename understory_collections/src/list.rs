// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Doubly linked list stored in a slot arena.

use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

/// Handle to a node in a [`List`].
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed and every `NodeId` pointing at it becomes stale.
/// - On reuse of a freed slot its generation is incremented, producing a new,
///   distinct `NodeId`.
///
/// Stale handles never alias a different live node: [`List::get`] and
/// [`List::remove`] return `None` for them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    slot: usize,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// A doubly linked list.
///
/// Nodes live in a contiguous arena and link to each other by slot index, so
/// the list owns every node outright. Inserting returns a [`NodeId`] that can
/// later be used for O(1) [`remove`](Self::remove),
/// [`insert_after`](Self::insert_after) and [`insert_before`](Self::insert_before).
/// Freed slots are recycled by later inserts.
///
/// # Example
///
/// ```
/// use understory_collections::List;
///
/// let mut list = List::new();
/// list.push_back("b");
/// let c = list.push_back("c");
/// list.push_front("a");
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
/// assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), ["c", "b", "a"]);
///
/// assert_eq!(list.remove(c), Some("c"));
/// // The handle is stale now.
/// assert_eq!(list.remove(c), None);
/// ```
#[derive(Clone)]
pub struct List<T> {
    slots: Vec<Slot<T>>,
    /// Stack of vacant slot indices.
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> List<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list with room for at least `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` to the back of the list.
    pub fn push_back(&mut self, value: T) -> NodeId {
        self.link(self.tail, None, value)
    }

    /// Prepends `value` to the front of the list.
    pub fn push_front(&mut self, value: T) -> NodeId {
        self.link(None, self.head, value)
    }

    /// Inserts `value` directly after the node `at`.
    ///
    /// Returns `None`, and drops nothing, if `at` is stale.
    pub fn insert_after(&mut self, at: NodeId, value: T) -> Option<NodeId> {
        let slot = self.resolve(at)?;
        let next = self.node(slot)?.next;
        Some(self.link(Some(slot), next, value))
    }

    /// Inserts `value` directly before the node `at`.
    ///
    /// Returns `None` if `at` is stale.
    pub fn insert_before(&mut self, at: NodeId, value: T) -> Option<NodeId> {
        let slot = self.resolve(at)?;
        let prev = self.node(slot)?.prev;
        Some(self.link(prev, Some(slot), value))
    }

    /// Returns the first value.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.node(self.head?).map(|node| &node.value)
    }

    /// Returns the last value.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.node(self.tail?).map(|node| &node.value)
    }

    /// Returns the handle of the first node.
    #[must_use]
    pub fn front_id(&self) -> Option<NodeId> {
        self.head.map(|slot| self.id(slot))
    }

    /// Returns the handle of the last node.
    #[must_use]
    pub fn back_id(&self) -> Option<NodeId> {
        self.tail.map(|slot| self.id(slot))
    }

    /// Removes and returns the first value.
    pub fn pop_front(&mut self) -> Option<T> {
        self.unlink(self.head?)
    }

    /// Removes and returns the last value.
    pub fn pop_back(&mut self) -> Option<T> {
        self.unlink(self.tail?)
    }

    /// Removes the node `id` and returns its value.
    ///
    /// Returns `None` if `id` is stale.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        let slot = self.resolve(id)?;
        self.unlink(slot)
    }

    /// Returns `true` if `id` refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.resolve(id).is_some()
    }

    /// Returns the value of node `id`, or `None` if `id` is stale.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(self.resolve(id)?).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value of node `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let slot = self.resolve(id)?;
        self.slots[slot].node.as_mut().map(|node| &mut node.value)
    }

    /// Returns an iterator from front to back. Call `rev()` to walk backwards.
    pub fn iter(&self) -> ListIter<'_, T> {
        ListIter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Removes every node.
    ///
    /// Handles issued before the call are invalidated, including for slots
    /// that get reused later.
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.node = None;
            self.free.push(index);
        }
        // Hand out the low slots first.
        self.free.reverse();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    fn id(&self, slot: usize) -> NodeId {
        NodeId {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    fn resolve(&self, id: NodeId) -> Option<usize> {
        let slot = self.slots.get(id.slot)?;
        (slot.generation == id.generation && slot.node.is_some()).then_some(id.slot)
    }

    fn node(&self, slot: usize) -> Option<&Node<T>> {
        self.slots.get(slot)?.node.as_ref()
    }

    fn set_next(&mut self, slot: Option<usize>, next: Option<usize>) {
        match slot {
            Some(slot) => {
                if let Some(node) = self.slots[slot].node.as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
    }

    fn set_prev(&mut self, slot: Option<usize>, prev: Option<usize>) {
        match slot {
            Some(slot) => {
                if let Some(node) = self.slots[slot].node.as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Allocates a node between `prev` and `next`, which must be adjacent.
    fn link(&mut self, prev: Option<usize>, next: Option<usize>, value: T) -> NodeId {
        let node = Node { value, prev, next };
        let slot = match self.free.pop() {
            Some(slot) => {
                let entry = &mut self.slots[slot];
                entry.generation = entry.generation.wrapping_add(1);
                entry.node = Some(node);
                slot
            }
            None => {
                self.slots.push(Slot {
                    generation: 1,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };
        self.set_next(prev, Some(slot));
        self.set_prev(next, Some(slot));
        self.len += 1;
        self.id(slot)
    }

    fn unlink(&mut self, slot: usize) -> Option<T> {
        let node = self.slots.get_mut(slot)?.node.take()?;
        self.set_next(node.prev, node.next);
        self.set_prev(node.next, node.prev);
        self.free.push(slot);
        self.len -= 1;
        Some(node.value)
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = ListIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over the values of a [`List`], created by [`List::iter`].
#[derive(Clone, Debug)]
pub struct ListIter<'a, T> {
    list: &'a List<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for ListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for ListIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for ListIter<'_, T> {}

impl<T> FusedIterator for ListIter<'_, T> {}
