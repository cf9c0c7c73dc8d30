//! Defines entities, the individual objects in an ECS.

use std::fmt;
use std::num::NonZeroU32;

use thiserror::Error;

pub use self::allocator::EntityIter;
pub(crate) use self::allocator::Entities;
use crate::storage::SparseIndex;

mod allocator;

/// An identifier for an entity in the ECS.
///
/// Entities carry no data of their own. The value `0` is never a valid
/// entity, which lets `Option<Entity>` stand in for "no entity" at no cost.
///
/// Identifiers are recycled: once an entity is destroyed, a later call to
/// [`World::new_entity`](crate::world::World::new_entity) may return the same
/// value.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(NonZeroU32);

/// An error for when a requested entity was not found in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("entity not found: {0}")]
pub struct EntityNotFound(pub Entity);

/// An error for when every entity identifier is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("entity identifiers exhausted: all {max} ids are live")]
pub struct EntitiesExhausted {
    /// The largest identifier the world may issue.
    pub max: u32,
}

impl Entity {
    /// Creates an entity from its raw value.
    ///
    /// Returns `None` for `0`.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// The raw value of this entity.
    pub const fn to_raw(self) -> u32 {
        self.0.get()
    }

    pub(crate) fn from_sparse_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().and_then(Self::from_raw)
    }
}

impl SparseIndex for Entity {
    fn sparse_index(&self) -> usize {
        self.to_raw() as _
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
