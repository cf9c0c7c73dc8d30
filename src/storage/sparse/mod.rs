use std::iter::Enumerate;
use std::slice;

pub use self::map::*;
pub use self::set::*;

mod map;
mod set;

/// A key that maps to a slot in a [`SparseMap`] or [`SparseSet`].
pub trait SparseIndex {
    /// The slot of this key. Two keys with the same slot are the same key.
    fn sparse_index(&self) -> usize;
}

/// Iterator over the values of a [`SparseMap`], skipping empty slots.
pub struct SparseIter<'a, T> {
    inner: slice::Iter<'a, Option<T>>,
    /// Filled slots not yet yielded.
    len: usize,
}

/// Mutable counterpart of [`SparseIter`].
pub struct SparseIterMut<'a, T> {
    inner: slice::IterMut<'a, Option<T>>,
    /// Filled slots not yet yielded.
    len: usize,
}

/// Iterator over `(slot, value)` pairs of a [`SparseMap`].
pub struct SparseIndexed<'a, T> {
    inner: Enumerate<slice::Iter<'a, Option<T>>>,
    /// Filled slots not yet yielded.
    len: usize,
}

impl SparseIndex for usize {
    fn sparse_index(&self) -> usize {
        *self
    }
}

impl<'a, T> Iterator for SparseIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.inner.find_map(Option::as_ref)?;

        self.len -= 1;

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for SparseIter<'_, T> {}

impl<T> Clone for SparseIter<'_, T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), len: self.len }
    }
}

impl<'a, T> Iterator for SparseIterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.inner.find_map(Option::as_mut)?;

        self.len -= 1;

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for SparseIterMut<'_, T> {}

impl<'a, T> Iterator for SparseIndexed<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self
            .inner
            .by_ref()
            .find_map(|(index, slot)| slot.as_ref().map(|value| (index, value)))?;

        self.len -= 1;

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> ExactSizeIterator for SparseIndexed<'_, T> {}

impl<T> Clone for SparseIndexed<'_, T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), len: self.len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// [`SparseIter`] and [`SparseIterMut`] needs to yield values regardless of
    /// if there is a `None` between filled slots.
    #[test]
    fn sparse_iter() {
        let mut map = SparseMap::new();

        map.insert(0, 0);
        map.insert(1, 1);
        map.insert(3, 3);

        fn iter_asserts(mut iter: impl ExactSizeIterator<Item = usize>) {
            assert_eq!(iter.len(), 3);
            assert_eq!(iter.next(), Some(0));

            assert_eq!(iter.len(), 2);
            assert_eq!(iter.next(), Some(1));

            assert_eq!(iter.len(), 1);
            assert_eq!(iter.next(), Some(3));
            assert!(iter.next().is_none());
        }

        iter_asserts(map.iter().copied());
        iter_asserts(map.iter_mut().map(|value| *value));
        iter_asserts(map.indexed().map(|(index, _)| index));
    }

    /// Long runs of empty slots must not grow the stack.
    #[test]
    fn sparse_iter_skips_wide_gaps() {
        let mut map = SparseMap::new();

        map.insert(100_000usize, "far");

        assert_eq!(map.iter().collect::<Vec<_>>(), [&"far"]);
        assert_eq!(map.indexed().next(), Some((100_000, &"far")));
    }
}
