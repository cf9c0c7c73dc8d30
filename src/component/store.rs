use std::any::{type_name, Any};
use std::fmt;
use std::iter::Zip;
use std::slice;

use super::Component;
use crate::entity::Entity;
use crate::storage::SparseMap;

/// Packed storage for every value of one component type.
///
/// Values live contiguously in insertion order, with no gaps. Removal moves
/// the last value into the freed slot, so the slot of a value may change
/// whenever another value of the same type is removed.
pub struct ComponentStore<C: Component> {
    dense: Vec<C>,
    /// The entity owning each slot of `dense`.
    entities: Vec<Entity>,
    /// The slot of each entity in `dense`.
    slots: SparseMap<Entity, usize>,
}

/// An iterator over the entities and values of a [`ComponentStore`].
pub struct StoreIter<'s, C> {
    inner: Zip<slice::Iter<'s, Entity>, slice::Iter<'s, C>>,
}

/// An iterator over the entities and values of a [`ComponentStore`].
pub struct StoreIterMut<'s, C> {
    inner: Zip<slice::Iter<'s, Entity>, slice::IterMut<'s, C>>,
}

/// Type-erased access to a [`ComponentStore`].
pub(crate) trait AnyStore: Any {
    fn contains(&self, entity: Entity) -> bool;

    /// Removes and drops the value of an entity.
    ///
    /// Returns `true` if the entity had one.
    fn remove_entity(&mut self, entity: Entity) -> bool;

    fn len(&self) -> usize;

    fn clear(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> ComponentStore<C> {
    /// Creates a new empty store.
    pub const fn new() -> Self {
        let dense = Vec::new();
        let entities = Vec::new();
        let slots = SparseMap::new();

        Self { dense, entities, slots }
    }

    /// Returns the amount of stored values.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns `true` if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Returns `true` if the entity has a value in this store.
    pub fn contains(&self, entity: Entity) -> bool {
        self.slots.contains(&entity)
    }

    /// Returns the current slot of an entity's value.
    ///
    /// Only valid until the next removal from this store.
    pub fn slot(&self, entity: Entity) -> Option<usize> {
        self.slots.get(&entity).copied()
    }

    /// Borrows the value of an entity.
    pub fn get(&self, entity: Entity) -> Option<&C> {
        self.slot(entity).and_then(|slot| self.dense.get(slot))
    }

    /// Mutably borrows the value of an entity.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        self.slot(entity).and_then(|slot| self.dense.get_mut(slot))
    }

    /// The stored values, packed.
    pub fn values(&self) -> &[C] {
        &self.dense
    }

    /// The stored values, packed.
    pub fn values_mut(&mut self) -> &mut [C] {
        &mut self.dense
    }

    /// The owner of each value in [`ComponentStore::values`].
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate over each owning entity and its value.
    pub fn iter(&self) -> StoreIter<'_, C> {
        StoreIter { inner: self.entities.iter().zip(self.dense.iter()) }
    }

    /// Iterate over each owning entity and its value.
    pub fn iter_mut(&mut self) -> StoreIterMut<'_, C> {
        StoreIterMut { inner: self.entities.iter().zip(self.dense.iter_mut()) }
    }

    /// Appends a value for an entity.
    ///
    /// The entity must not already have a value in this store.
    pub(crate) fn insert(&mut self, entity: Entity, value: C) -> &mut C {
        debug_assert!(!self.contains(entity), "entity {entity} already has a value");

        let slot = self.dense.len();

        self.slots.insert(entity, slot);
        self.entities.push(entity);
        self.dense.push(value);

        &mut self.dense[slot]
    }

    /// Removes the value of an entity.
    ///
    /// The last value is moved into the freed slot.
    pub(crate) fn remove(&mut self, entity: Entity) -> Option<C> {
        let slot = self.slots.remove(&entity)?;
        let value = self.dense.swap_remove(slot);

        self.entities.swap_remove(slot);

        // the removed value wasn't last, so the old last value moved here
        if let Some(&moved) = self.entities.get(slot) {
            self.slots.insert(moved, slot);
        }

        Some(value)
    }

    /// Removes all values.
    pub(crate) fn clear(&mut self) {
        self.dense.clear();
        self.entities.clear();
        self.slots.clear();
    }
}

impl<C: Component> AnyStore for ComponentStore<C> {
    fn contains(&self, entity: Entity) -> bool {
        ComponentStore::contains(self, entity)
    }

    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn len(&self) -> usize {
        ComponentStore::len(self)
    }

    fn clear(&mut self) {
        ComponentStore::clear(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<C: Component> Default for ComponentStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Component> fmt::Debug for ComponentStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentStore")
            .field("component", &type_name::<C>())
            .field("entities", &self.entities)
            .finish_non_exhaustive()
    }
}

impl<'s, C: Component> IntoIterator for &'s ComponentStore<C> {
    type IntoIter = StoreIter<'s, C>;
    type Item = (Entity, &'s C);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'s, C: Component> IntoIterator for &'s mut ComponentStore<C> {
    type IntoIter = StoreIterMut<'s, C>;
    type Item = (Entity, &'s mut C);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'s, C> Iterator for StoreIter<'s, C> {
    type Item = (Entity, &'s C);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&entity, value)| (entity, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<C> ExactSizeIterator for StoreIter<'_, C> {}

impl<'s, C> Iterator for StoreIterMut<'s, C> {
    type Item = (Entity, &'s mut C);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&entity, value)| (entity, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<C> ExactSizeIterator for StoreIterMut<'_, C> {}
