use std::fmt;
use std::marker::PhantomData;

use super::{SparseIndex, SparseIndexed, SparseIter, SparseIterMut};

/// A map from sparse indices to values, backed by one slot per index.
///
/// Keys aren't stored: a key's slot is its [`SparseIndex`]. Lookups are a
/// bounds check and a branch. Memory grows with the largest key inserted, so
/// keys are expected to stay small and dense-ish (recycled entity ids,
/// component ids).
#[derive(Clone)]
pub struct SparseMap<K: SparseIndex, V> {
    slots: Vec<Option<V>>,
    /// Count of `Some` slots.
    len: usize,
    _key: PhantomData<fn(&K)>,
}

impl<K: SparseIndex, V> SparseMap<K, V> {
    pub const fn new() -> Self {
        Self { slots: Vec::new(), len: 0, _key: PhantomData }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over the values in ascending key order.
    pub fn iter(&self) -> SparseIter<'_, V> {
        SparseIter { inner: self.slots.iter(), len: self.len }
    }

    pub fn iter_mut(&mut self) -> SparseIterMut<'_, V> {
        SparseIterMut { inner: self.slots.iter_mut(), len: self.len }
    }

    /// Iterate over the filled slots as `(sparse index, value)`.
    pub fn indexed(&self) -> SparseIndexed<'_, V> {
        SparseIndexed { inner: self.slots.iter().enumerate(), len: self.len }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.contains_raw(key.sparse_index())
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.slots.get(key.sparse_index())?.as_ref()
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.slots.get_mut(key.sparse_index())?.as_mut()
    }

    /// Stores a value for a key, growing the slots if needed.
    ///
    /// Returns the value it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_raw(key.sparse_index(), value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.slots.get_mut(key.sparse_index())?.take()?;

        self.len -= 1;

        Some(value)
    }

    /// Empties the map and releases its slots.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.len = 0;
    }

    pub(super) fn contains_raw(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    pub(super) fn insert_raw(&mut self, slot: usize, value: V) -> Option<V> {
        if slot >= self.slots.len() {
            self.slots.resize_with(slot + 1, || None);
        }

        let replaced = self.slots[slot].replace(value);

        if replaced.is_none() {
            self.len += 1;
        }

        replaced
    }
}

impl<K: SparseIndex, V: fmt::Debug> fmt::Debug for SparseMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.indexed()).finish()
    }
}

impl<K: SparseIndex, V> Default for SparseMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K: SparseIndex, V> IntoIterator for &'a SparseMap<K, V> {
    type IntoIter = SparseIter<'a, V>;
    type Item = &'a V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K: SparseIndex, V> IntoIterator for &'a mut SparseMap<K, V> {
    type IntoIter = SparseIterMut<'a, V>;
    type Item = &'a mut V;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replace_remove() {
        let mut map = SparseMap::new();

        assert_eq!(map.insert(4usize, 'a'), None);
        assert_eq!(map.insert(4, 'b'), Some('a'));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&4), Some(&'b'));
        assert_eq!(map.get(&3), None);
        assert_eq!(map.get(&400), None);

        assert_eq!(map.remove(&4), Some('b'));
        assert_eq!(map.remove(&4), None);
        assert_eq!(map.remove(&400), None);
        assert!(map.is_empty());
    }

    #[test]
    fn values_mutate_in_place() {
        let mut map = SparseMap::new();

        map.insert(1usize, 10);
        map.insert(6, 60);

        for value in &mut map {
            *value += 1;
        }

        assert!(map.indexed().eq([(1, &11), (6, &61)]));
    }
}
