// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hash map that remembers insertion order.

use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry as MapEntry;

use crate::list::{List, NodeId};

#[derive(Clone, Debug)]
struct Entry<V> {
    value: V,
    /// Position of this entry's key in the insertion-order list.
    node: NodeId,
}

/// A hash map that iterates in insertion order.
///
/// Lookups go through a hash table; a [`List`] of keys records the order in
/// which keys were first inserted. Updating an existing key keeps its original
/// position. Removing a key and inserting it again moves it to the newest end.
///
/// # Example
///
/// ```
/// use understory_collections::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("b", 2);
/// map.insert("a", 1);
/// assert_eq!(map.insert("b", 20), Some(2));
///
/// let pairs: Vec<_> = map.iter().collect();
/// assert_eq!(pairs, [(&"b", &20), (&"a", &1)]);
/// assert_eq!(map.oldest(), Some((&"b", &20)));
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V>
where
    K: Eq + Hash,
{
    entries: HashMap<K, Entry<V>>,
    order: List<K>,
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: List::new(),
        }
    }

    /// Creates an empty map with room for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            order: List::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key).map(|entry| &mut entry.value)
    }

    /// Returns `true` if the map holds `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts `value` under `key`.
    ///
    /// If `key` was already present its value is replaced, the key keeps its
    /// position, and the previous value is returned. Otherwise the entry is
    /// appended as the newest and `None` is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.entries.entry(key) {
            MapEntry::Occupied(mut slot) => {
                Some(core::mem::replace(&mut slot.get_mut().value, value))
            }
            MapEntry::Vacant(slot) => {
                let node = self.order.push_back(slot.key().clone());
                slot.insert(Entry { value, node });
                None
            }
        }
    }

    /// Returns the value for `key`, inserting the result of `default` first if
    /// the key is absent.
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce() -> V) -> &mut V {
        match self.entries.entry(key) {
            MapEntry::Occupied(slot) => &mut slot.into_mut().value,
            MapEntry::Vacant(slot) => {
                let node = self.order.push_back(slot.key().clone());
                &mut slot
                    .insert(Entry {
                        value: default(),
                        node,
                    })
                    .value
            }
        }
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.remove(key)?;
        self.order.remove(entry.node);
        Some(entry.value)
    }

    /// Returns the entry that has been in the map the longest.
    #[must_use]
    pub fn oldest(&self) -> Option<(&K, &V)> {
        self.pair(self.order.front()?)
    }

    /// Returns the most recently inserted entry.
    #[must_use]
    pub fn newest(&self) -> Option<(&K, &V)> {
        self.pair(self.order.back()?)
    }

    /// Returns the entries from oldest to newest. Call `rev()` for newest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + '_ {
        self.order.iter().filter_map(|key| self.pair(key))
    }

    /// Returns the keys from oldest to newest.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.order.iter()
    }

    /// Returns the values from oldest to newest.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn pair<'a>(&'a self, key: &'a K) -> Option<(&'a K, &'a V)> {
        self.entries.get(key).map(|entry| (key, &entry.value))
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
