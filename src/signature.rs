//! Fixed-width bitsets describing sets of component types.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

use crate::component::ComponentId;

const WORDS: usize = 4;

/// A set of component types, one bit per [`ComponentId`].
///
/// Entities carry the signature of the components they hold. Systems carry
/// the signature of the components they require. An entity matches a system
/// when its signature [contains](Signature::contains) the system's.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    words: [u64; WORDS],
}

/// Iterator over the [`ComponentId`]s in a [`Signature`].
#[derive(Clone)]
pub struct SignatureIter {
    words: [u64; WORDS],
    word: usize,
}

impl Signature {
    /// The amount of component types a signature can describe.
    pub const BITS: usize = WORDS * u64::BITS as usize;

    /// The empty signature.
    pub const EMPTY: Self = Self { words: [0; WORDS] };

    /// Creates a new empty signature.
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the signature with the component bit set.
    pub fn with(mut self, component: ComponentId) -> Self {
        self.insert(component);

        self
    }

    /// Sets the bit of a component.
    ///
    /// Returns `true` if the bit was not set before.
    pub fn insert(&mut self, component: ComponentId) -> bool {
        let (word, mask) = Self::locate(component);
        let inserted = self.words[word] & mask == 0;

        self.words[word] |= mask;

        inserted
    }

    /// Clears the bit of a component.
    ///
    /// Returns `true` if the bit was set before.
    pub fn remove(&mut self, component: ComponentId) -> bool {
        let (word, mask) = Self::locate(component);
        let removed = self.words[word] & mask != 0;

        self.words[word] &= !mask;

        removed
    }

    /// Returns `true` if the bit of a component is set.
    pub fn has(&self, component: ComponentId) -> bool {
        let (word, mask) = Self::locate(component);

        self.words[word] & mask != 0
    }

    /// Returns `true` if every bit set in `other` is also set in `self`.
    pub fn contains(&self, other: &Signature) -> bool {
        (*self & *other) == *other
    }

    /// Returns the amount of set bits.
    pub fn len(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns `true` if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&word| word == 0)
    }

    /// Clears all bits.
    pub fn clear(&mut self) {
        *self = Self::EMPTY;
    }

    /// Returns an iterator over the set components in ascending order.
    pub fn iter(&self) -> SignatureIter {
        SignatureIter { words: self.words, word: 0 }
    }

    /// `ComponentId`s are bounded by the component capacity, which a
    /// `WorldConfig` keeps within `BITS`.
    fn locate(component: ComponentId) -> (usize, u64) {
        let index = component.index();

        debug_assert!(index < Self::BITS, "component id out of signature range");

        (index / 64, 1 << (index % 64))
    }
}

impl BitAnd for Signature {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self::Output {
        self &= rhs;

        self
    }
}

impl BitAndAssign for Signature {
    fn bitand_assign(&mut self, rhs: Self) {
        for (word, rhs) in self.words.iter_mut().zip(rhs.words) {
            *word &= rhs;
        }
    }
}

impl BitOr for Signature {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self::Output {
        self |= rhs;

        self
    }
}

impl BitOrAssign for Signature {
    fn bitor_assign(&mut self, rhs: Self) {
        for (word, rhs) in self.words.iter_mut().zip(rhs.words) {
            *word |= rhs;
        }
    }
}

impl FromIterator<ComponentId> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentId>>(iter: I) -> Self {
        let mut signature = Self::new();

        for component in iter {
            signature.insert(component);
        }

        signature
    }
}

impl IntoIterator for Signature {
    type IntoIter = SignatureIter;
    type Item = ComponentId;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &Signature {
    type IntoIter = SignatureIter;
    type Item = ComponentId;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(ComponentId::index)).finish()
    }
}

impl Iterator for SignatureIter {
    type Item = ComponentId;

    fn next(&mut self) -> Option<Self::Item> {
        while self.word < WORDS {
            let bits = &mut self.words[self.word];

            if *bits != 0 {
                let bit = bits.trailing_zeros() as usize;

                // clear the lowest set bit
                *bits &= *bits - 1;

                return Some(ComponentId::new(self.word * 64 + bit));
            }

            self.word += 1;
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.words[self.word.min(WORDS)..]
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum();

        (len, Some(len))
    }
}

impl ExactSizeIterator for SignatureIter {}
