// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hash set with set algebra.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashSet;

/// An unordered collection of unique items.
///
/// `Set` is a thin layer over a hash table that adds the set-algebra
/// operations expected from a mathematical set: [`union`](Self::union),
/// [`intersection`](Self::intersection), [`difference`](Self::difference) and
/// [`symmetric_difference`](Self::symmetric_difference), plus subset checks.
/// The algebra operations never mutate their operands; they return a new set.
///
/// Iteration order is not specified and may vary across runs or platforms.
/// Sort the output of [`to_vec`](Self::to_vec) if a stable order is needed.
///
/// # Example
///
/// ```
/// use understory_collections::Set;
///
/// let a: Set<u32> = [1, 2, 3].into_iter().collect();
/// let b: Set<u32> = [3, 4].into_iter().collect();
///
/// let mut union = a.union(&b).to_vec();
/// union.sort_unstable();
/// assert_eq!(union, vec![1, 2, 3, 4]);
///
/// assert_eq!(a.intersection(&b).to_vec(), vec![3]);
/// assert!(!a.is_subset(&b));
/// ```
///
/// # See Also
///
/// - [`Graph`](crate::Graph): Stores each vertex's parents and children in a `Set`.
#[derive(Clone)]
pub struct Set<T>
where
    T: Eq + Hash,
{
    items: HashSet<T>,
}

impl<T> Default for Set<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Set<T>
where
    T: Eq + Hash,
{
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: HashSet::new(),
        }
    }

    /// Creates an empty set with room for at least `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: HashSet::with_capacity(capacity),
        }
    }

    /// Adds an item to the set.
    ///
    /// Returns `true` if the item was newly inserted, `false` if it was
    /// already present (in which case the set is unchanged).
    pub fn insert(&mut self, item: T) -> bool {
        self.items.insert(item)
    }

    /// Removes an item from the set.
    ///
    /// Returns `true` if the item was present. Removing an absent item is a
    /// no-op.
    pub fn remove(&mut self, item: &T) -> bool {
        self.items.remove(item)
    }

    /// Returns `true` if the set contains `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Returns the number of items in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over the items in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }

    /// Removes and returns every item, leaving the set empty.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.items.drain()
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns `true` if every item of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.items.is_subset(&other.items)
    }

    /// Returns `true` if every item of `other` is also in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` and `other` share no items.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.items.is_disjoint(&other.items)
    }
}

impl<T> Set<T>
where
    T: Eq + Hash + Clone,
{
    /// Returns the items as a `Vec`, in unspecified order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }

    /// Returns a new set holding the items present in either set.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = Self::with_capacity(self.len().max(other.len()));
        out.extend(self.items.iter().cloned());
        out.extend(other.items.iter().cloned());
        out
    }

    /// Returns a new set holding the items present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        // Probe the larger table with the smaller one.
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .items
            .iter()
            .filter(|item| large.contains(item))
            .cloned()
            .collect()
    }

    /// Returns a new set holding the items of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        self.items
            .iter()
            .filter(|item| !other.contains(item))
            .cloned()
            .collect()
    }

    /// Returns a new set holding the items present in exactly one of the sets.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut out = self.difference(other);
        out.extend(other.items.iter().filter(|item| !self.contains(item)).cloned());
        out
    }
}

impl<T> PartialEq for Set<T>
where
    T: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T> Eq for Set<T> where T: Eq + Hash {}

impl<T> FromIterator<T> for Set<T>
where
    T: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Set<T>
where
    T: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for Set<T>
where
    T: Eq + Hash,
{
    type Item = T;
    type IntoIter = hashbrown::hash_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T> fmt::Debug for Set<T>
where
    T: Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T> fmt::Display for Set<T>
where
    T: Eq + Hash + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("}")
    }
}
