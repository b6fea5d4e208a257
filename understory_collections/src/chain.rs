// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered lookup over several hash maps.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;

/// An ordered stack of hash maps searched front to back.
///
/// The front layer has the highest priority: a key present in several layers
/// resolves to the value in the first layer that holds it. This is the shape
/// of scoped configuration (command line over environment over defaults) and
/// of nested variable scopes.
///
/// Writes touch at most one layer. [`insert`](Self::insert) updates the first
/// layer that already holds the key and otherwise writes to the front layer;
/// [`remove`](Self::remove) drops only the first occurrence, which can expose
/// a shadowed value further back.
///
/// # Example
///
/// ```
/// use understory_collections::Chain;
///
/// let mut chain = Chain::new();
/// chain.push_back([("colour", "blue"), ("size", "small")]);
/// chain.push_front([("colour", "red")]);
///
/// assert_eq!(chain.get(&"colour"), Some(&"red"));
/// assert_eq!(chain.get(&"size"), Some(&"small"));
///
/// assert_eq!(chain.remove(&"colour"), Some("red"));
/// assert_eq!(chain.get(&"colour"), Some(&"blue"));
/// ```
#[derive(Clone)]
pub struct Chain<K, V>
where
    K: Eq + Hash,
{
    layers: Vec<HashMap<K, V>>,
}

impl<K, V> Default for Chain<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Chain<K, V>
where
    K: Eq + Hash,
{
    /// Creates a chain with no layers.
    #[must_use]
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Creates a chain from layers given highest priority first.
    pub fn from_layers<I, L>(layers: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = (K, V)>,
    {
        layers.into_iter().collect()
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn layers(&self) -> usize {
        self.layers.len()
    }

    /// Adds a layer with the lowest priority.
    pub fn push_back(&mut self, layer: impl IntoIterator<Item = (K, V)>) {
        self.layers.push(layer.into_iter().collect());
    }

    /// Adds a layer with the highest priority.
    pub fn push_front(&mut self, layer: impl IntoIterator<Item = (K, V)>) {
        self.layers.insert(0, layer.into_iter().collect());
    }

    /// Returns the value for `key` from the first layer that holds it.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }

    /// Returns a mutable reference to the value for `key` in the first layer
    /// that holds it.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.layers.iter_mut().find_map(|layer| layer.get_mut(key))
    }

    /// Returns `true` if any layer holds `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.layers.iter().any(|layer| layer.contains_key(key))
    }

    /// Inserts `value` under `key`.
    ///
    /// If some layer already holds `key`, the first such layer is updated and
    /// the previous value returned. Otherwise the pair goes into the front
    /// layer (created if the chain has none) and `None` is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(current) = self.get_mut(&key) {
            return Some(core::mem::replace(current, value));
        }
        if self.layers.is_empty() {
            self.layers.push(HashMap::new());
        }
        self.layers[0].insert(key, value);
        None
    }

    /// Removes `key` from the first layer that holds it and returns the value.
    ///
    /// Layers further back are left alone.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.layers.iter_mut().find_map(|layer| layer.remove(key))
    }

    /// Returns every visible `(key, value)` pair: each key once, with the
    /// value from the first layer that holds it. The order is not specified.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.layers.iter().enumerate().flat_map(move |(depth, layer)| {
            layer.iter().filter(move |(key, _)| {
                !self.layers[..depth]
                    .iter()
                    .any(|shadowing| shadowing.contains_key(*key))
            })
        })
    }
}

impl<K, V, L> FromIterator<L> for Chain<K, V>
where
    K: Eq + Hash,
    L: IntoIterator<Item = (K, V)>,
{
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self {
            layers: iter
                .into_iter()
                .map(|layer| layer.into_iter().collect())
                .collect(),
        }
    }
}

impl<K, V> fmt::Debug for Chain<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("layers", &self.layers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn defaults() -> Chain<&'static str, u32> {
        Chain::from_layers([
            vec![("port", 8080)],
            vec![("port", 80), ("workers", 4)],
        ])
    }

    #[test]
    fn front_layer_wins() {
        let chain = defaults();
        assert_eq!(chain.layers(), 2);
        assert_eq!(chain.get(&"port"), Some(&8080));
        assert_eq!(chain.get(&"workers"), Some(&4));
        assert_eq!(chain.get(&"missing"), None);
        assert!(chain.contains_key(&"workers"));
    }

    #[test]
    fn push_front_shadows_and_push_back_does_not() {
        let mut chain = defaults();
        chain.push_back([("port", 1), ("timeout", 30)]);
        assert_eq!(chain.get(&"port"), Some(&8080));
        assert_eq!(chain.get(&"timeout"), Some(&30));

        chain.push_front([("port", 9000)]);
        assert_eq!(chain.layers(), 4);
        assert_eq!(chain.get(&"port"), Some(&9000));
    }

    #[test]
    fn insert_updates_first_holder() {
        let mut chain = defaults();
        // "workers" lives in the second layer only.
        assert_eq!(chain.insert("workers", 8), Some(4));
        assert_eq!(chain.get(&"workers"), Some(&8));
        assert_eq!(chain.layers, vec![
            [("port", 8080)].into_iter().collect(),
            [("port", 80), ("workers", 8)].into_iter().collect(),
        ]);
    }

    #[test]
    fn insert_new_key_goes_to_front() {
        let mut chain = defaults();
        assert_eq!(chain.insert("debug", 1), None);
        assert_eq!(chain.layers[0].get(&"debug"), Some(&1));
        assert!(!chain.layers[1].contains_key(&"debug"));
    }

    #[test]
    fn insert_into_empty_chain_creates_a_layer() {
        let mut chain = Chain::new();
        assert_eq!(chain.layers(), 0);
        assert_eq!(chain.insert('k', 1), None);
        assert_eq!(chain.layers(), 1);
        assert_eq!(chain.get(&'k'), Some(&1));
    }

    #[test]
    fn remove_only_first_occurrence() {
        let mut chain = defaults();
        assert_eq!(chain.remove(&"port"), Some(8080));
        assert_eq!(chain.get(&"port"), Some(&80));
        assert_eq!(chain.remove(&"port"), Some(80));
        assert_eq!(chain.remove(&"port"), None);
        assert_eq!(chain.layers(), 2);
    }

    #[test]
    fn get_mut_edits_visible_value() {
        let mut chain = defaults();
        if let Some(port) = chain.get_mut(&"port") {
            *port += 1;
        }
        assert_eq!(chain.get(&"port"), Some(&8081));
        assert_eq!(chain.layers[1].get(&"port"), Some(&80));
    }

    #[test]
    fn iter_skips_shadowed_pairs() {
        let chain = defaults();
        let mut pairs: Vec<_> = chain.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![("port", 8080), ("workers", 4)]);
    }
}
