use std::hash::{BuildHasher, Hasher};

/// A hasher that specializes in hashing [`TypeId`](std::any::TypeId)s.
///
/// A `TypeId` is already a hash, so its bits are used as-is.
#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeIdHasher {
    inner: u64,
}

impl Hasher for TypeIdHasher {
    #[inline(always)]
    fn finish(&self) -> u64 {
        self.inner
    }

    fn write(&mut self, bytes: &[u8]) {
        // only reached if `TypeId` stops hashing through `write_u64`
        for &byte in bytes {
            self.inner = self.inner.rotate_left(8) ^ u64::from(byte);
        }
    }

    #[inline(always)]
    fn write_u64(&mut self, i: u64) {
        self.inner = i;
    }
}

impl BuildHasher for TypeIdHasher {
    type Hasher = Self;

    fn build_hasher(&self) -> Self::Hasher {
        *self
    }
}
