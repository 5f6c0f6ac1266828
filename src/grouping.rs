//! Insertion-ordered grouping.
//!
//! Chart categories must come out in first-occurrence order of their key, so
//! grouping never goes through a plain `HashMap` iteration. `OrderedGroups`
//! keeps the entries in a `Vec` and uses a `HashMap` only as an index.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for OrderedGroups<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone, V> OrderedGroups<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable slot for `key`, inserting `init()` on first sight.
    pub fn entry_or_insert_with(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
        let idx = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(key.clone(), i);
                self.entries.push((key, init()));
                i
            }
        };
        &mut self.entries[idx].1
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Fold `items` into groups keyed by `key_fn`.
    pub fn group_by<T>(
        items: impl IntoIterator<Item = T>,
        key_fn: impl Fn(&T) -> K,
        init: impl Fn() -> V,
        mut fold: impl FnMut(&mut V, T),
    ) -> Self {
        let mut groups = Self::new();
        for item in items {
            let slot = groups.entry_or_insert_with(key_fn(&item), &init);
            fold(slot, item);
        }
        groups
    }
}

impl<K, V> IntoIterator for OrderedGroups<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
