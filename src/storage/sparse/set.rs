use std::fmt;

use super::{SparseIndex, SparseIter, SparseMap};

/// Membership over sparse indices, with O(1) insert, remove and lookup.
///
/// Each index is stored in its own slot, so iteration yields the indices
/// themselves in ascending order.
#[derive(Clone)]
pub struct SparseSet<I: SparseIndex> {
    slots: SparseMap<I, I>,
}

impl<I: SparseIndex> SparseSet<I> {
    pub const fn new() -> Self {
        Self { slots: SparseMap::new() }
    }

    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over the members in ascending index order.
    pub fn iter(&self) -> SparseIter<'_, I> {
        self.slots.iter()
    }

    pub fn contains(&self, index: &I) -> bool {
        self.slots.contains(index)
    }

    /// Adds an index. Returns `false` if it was already a member.
    pub fn insert(&mut self, index: I) -> bool {
        self.slots.insert_raw(index.sparse_index(), index).is_none()
    }

    /// Removes an index. Returns `false` if it wasn't a member.
    pub fn remove(&mut self, index: &I) -> bool {
        self.slots.remove(index).is_some()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<I: SparseIndex + fmt::Debug> fmt::Debug for SparseSet<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<I: SparseIndex> Default for SparseSet<I> {
    fn default() -> Self {
        Self::new()
    }
}

// two sets with the same members are equal even if one has grown more slots
impl<I: SparseIndex + PartialEq> PartialEq for SparseSet<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<I: SparseIndex + Eq> Eq for SparseSet<I> {}

impl<'a, I: SparseIndex> IntoIterator for &'a SparseSet<I> {
    type IntoIter = SparseIter<'a, I>;
    type Item = &'a I;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove() {
        let mut set = SparseSet::new();

        assert!(set.is_empty());
        assert!(set.insert(0usize));
        assert!(set.insert(1));
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert_eq!(set.len(), 3);

        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert_eq!(set.len(), 2);
        assert!(!set.contains(&1));
        assert!(set.contains(&3));

        set.clear();

        assert!(set.is_empty());
        assert!(!set.contains(&3));
    }

    #[test]
    fn iterates_in_index_order() {
        let mut set = SparseSet::new();

        for index in [7usize, 2, 9, 0] {
            set.insert(index);
        }

        assert!(set.iter().copied().eq([0, 2, 7, 9]));
    }

    #[test]
    fn equality_ignores_trailing_slots() {
        let mut a = SparseSet::new();
        let mut b = SparseSet::new();

        a.insert(1usize);
        b.insert(1usize);
        b.insert(50);
        b.remove(&50);

        assert_eq!(a, b);

        b.insert(2);

        assert_ne!(a, b);
    }
}
