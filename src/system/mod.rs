//! Systems, the logic run over entities matching a [`Signature`].

use thiserror::Error;
pub use signet_macros::System;

pub(crate) use self::registry::*;
use crate::component::ComponentError;
use crate::entity::Entity;
use crate::storage::{SparseIter, SparseSet};
use crate::world::World;

mod registry;

/// A unit of logic run over the entities that hold a set of components.
///
/// The world owns one instance per registered system type and keeps its
/// [`Members`] in sync with its required [`Signature`](crate::signature::Signature).
/// Systems that only need the membership set can use `#[derive(System)]`.
///
/// ```
/// # use signet::prelude::*;
/// #
/// #[derive(Component)]
/// struct Health(u32);
///
/// #[derive(Default)]
/// struct Regenerate;
///
/// impl System for Regenerate {
///     fn update(&mut self, world: &mut World, entities: &[Entity]) {
///         for &entity in entities {
///             if let Ok(health) = world.get_component_mut::<Health>(entity) {
///                 health.0 += 1;
///             }
///         }
///     }
/// }
///
/// let mut world = World::new();
///
/// world.register_system_with::<Regenerate, Health>()?;
///
/// let entity = world.new_entity()?;
///
/// world.add_component(entity, Health(9))?;
/// world.run_system::<Regenerate>()?;
///
/// assert_eq!(world.get_component::<Health>(entity)?.0, 10);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub trait System: 'static {
    /// Runs this system over a snapshot of its members.
    ///
    /// The world may be freely mutated, including destroying the entities
    /// being iterated.
    #[expect(unused)]
    fn update(&mut self, world: &mut World, entities: &[Entity]) {}
}

/// The entities currently matching a system.
///
/// Iterates in ascending entity order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Members {
    inner: SparseSet<Entity>,
}

/// An iterator over the [`Members`] of a system, in ascending entity order.
#[derive(Clone)]
pub struct MembersIter<'s> {
    inner: SparseIter<'s, Entity>,
}

/// An error for system registration and access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SystemError {
    #[error("system not registered: {0}")]
    NotRegistered(&'static str),
    #[error("system is currently running: {0}")]
    Running(&'static str),
    #[error(transparent)]
    Component(#[from] ComponentError),
}

impl Members {
    /// The amount of member entities.
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no entity matches.
    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if the entity is a member.
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(&entity)
    }

    /// Iterate over the members.
    pub fn iter(&self) -> MembersIter<'_> {
        MembersIter { inner: self.inner.iter() }
    }

    /// Copies the members out, for iterating while mutating the world.
    pub fn to_vec(&self) -> Vec<Entity> {
        self.iter().collect()
    }

    pub(crate) fn insert(&mut self, entity: Entity) {
        self.inner.insert(entity);
    }

    pub(crate) fn remove(&mut self, entity: Entity) {
        self.inner.remove(&entity);
    }

    pub(crate) fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<'a> IntoIterator for &'a Members {
    type IntoIter = MembersIter<'a>;
    type Item = Entity;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Iterator for MembersIter<'_> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for MembersIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(raw: u32) -> Entity {
        Entity::from_raw(raw).unwrap()
    }

    #[test]
    fn members_iter_is_ordered_and_sized() {
        let mut members = Members::default();

        for raw in [9, 2, 5] {
            members.insert(entity(raw));
        }

        members.remove(entity(5));

        let mut iter: MembersIter<'_> = members.iter();

        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(entity(2)));
        assert_eq!(iter.len(), 1);
        assert!(iter.clone().eq([entity(9)]));
        assert_eq!(iter.next(), Some(entity(9)));
        assert_eq!(iter.next(), None);
        assert_eq!(members.to_vec(), [entity(2), entity(9)]);
    }
}
