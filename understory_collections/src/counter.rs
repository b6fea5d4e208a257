// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiset that counts occurrences of hashable items.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::priority::PriorityQueue;

/// Counts how many times each distinct item has been seen.
///
/// Items with a count of zero are never stored: [`sub`](Self::sub) drops an
/// item when its count reaches zero, and [`get`](Self::get) reports zero for
/// anything absent.
///
/// # Example
///
/// ```
/// use understory_collections::Counter;
///
/// let counter: Counter<char> = "mississippi".chars().collect();
///
/// assert_eq!(counter.get(&'s'), 4);
/// assert_eq!(counter.get(&'z'), 0);
/// assert_eq!(counter.len(), 4);
/// assert_eq!(counter.sum(), 11);
/// // 'i' and 's' tie on four; 'p' is clearly third.
/// assert_eq!(counter.most_common_n(3)[2], (&'p', 2));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Counter<T>
where
    T: Eq + Hash,
{
    counts: HashMap<T, usize>,
}

impl<T> Default for Counter<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Counter<T>
where
    T: Eq + Hash,
{
    /// Creates an empty counter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Creates an empty counter with room for at least `capacity` distinct items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::with_capacity(capacity),
        }
    }

    /// Creates a counter holding the occurrences of `items`.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        items.into_iter().collect()
    }

    /// Returns the number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing has been counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Counts one more occurrence of `item` and returns its new count.
    pub fn add(&mut self, item: T) -> usize {
        let count = self.counts.entry(item).or_insert(0);
        *count += 1;
        *count
    }

    /// Counts one fewer occurrence of `item` and returns its new count.
    ///
    /// An item whose count reaches zero is removed. Absent items are left
    /// alone and report zero.
    pub fn sub(&mut self, item: &T) -> usize {
        let Some(count) = self.counts.get_mut(item) else {
            return 0;
        };
        *count -= 1;
        let remaining = *count;
        if remaining == 0 {
            self.counts.remove(item);
        }
        remaining
    }

    /// Forgets `item` entirely and returns the count it had, or zero.
    pub fn remove(&mut self, item: &T) -> usize {
        self.counts.remove(item).unwrap_or(0)
    }

    /// Returns the count of `item`, or zero if it has not been seen.
    #[must_use]
    pub fn get(&self, item: &T) -> usize {
        self.counts.get(item).copied().unwrap_or(0)
    }

    /// Returns the total number of occurrences, duplicates included.
    #[must_use]
    pub fn sum(&self) -> usize {
        self.counts.values().sum()
    }

    /// Forgets every item.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Returns the item with the highest count.
    ///
    /// Ties are broken arbitrarily. Returns `None` if the counter is empty.
    #[must_use]
    pub fn most_common(&self) -> Option<(&T, usize)> {
        self.iter().max_by_key(|&(_, count)| count)
    }

    /// Returns up to `n` items with the highest counts, highest first.
    ///
    /// Runs in O(len + n log len) by heapifying every pair and popping `n`
    /// times. Ties are broken arbitrarily.
    #[must_use]
    pub fn most_common_n(&self, n: usize) -> Vec<(&T, usize)> {
        let mut queue = PriorityQueue::from_fn(self.iter(), |&(_, count)| {
            i64::try_from(count).unwrap_or(i64::MAX)
        });
        (0..n.min(self.len()))
            .map_while(|_| queue.pop().ok())
            .collect()
    }

    /// Returns every `(item, count)` pair, highest count first.
    ///
    /// Items with equal counts come out in unspecified order.
    #[must_use]
    pub fn descending(&self) -> Vec<(&T, usize)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }

    /// Returns every `(item, count)` pair in unspecified order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&T, usize)> + '_ {
        self.counts.iter().map(|(item, &count)| (item, count))
    }

    /// Returns every distinct item in unspecified order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.counts.keys()
    }
}

impl<T> FromIterator<T> for Counter<T>
where
    T: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut counter = Self::new();
        counter.extend(iter);
        counter
    }
}

impl<T> Extend<T> for Counter<T>
where
    T: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> fmt::Debug for Counter<T>
where
    T: Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.counts.iter()).finish()
    }
}
