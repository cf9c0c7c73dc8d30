use std::any::{type_name, TypeId};
use std::fmt;

use indexmap::IndexMap;

use super::{AnyStore, Component, ComponentError, ComponentId, ComponentInfo, ComponentStore};
use crate::entity::Entity;
use crate::storage::TypeIdHasher;

/// The component registry of a [`World`](crate::world::World).
///
/// Maps each registered type to its [`ComponentId`] and its store. Ids are
/// assigned in registration order and double as the index into `stores`.
pub struct Components {
    infos: IndexMap<TypeId, ComponentInfo, TypeIdHasher>,
    stores: Vec<Box<dyn AnyStore>>,
    capacity: usize,
}

impl Components {
    pub fn new(capacity: usize) -> Self {
        let infos = IndexMap::default();
        let stores = Vec::new();

        Self { infos, stores, capacity }
    }

    /// The amount of registered component types.
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// Registers a component type, returning its new id.
    ///
    /// Returns the existing id if already registered.
    pub fn register<C: Component>(&mut self) -> Result<ComponentId, ComponentError> {
        if let Some(info) = self.infos.get(&TypeId::of::<C>()) {
            return Ok(info.id());
        }

        if self.len() >= self.capacity {
            return Err(ComponentError::CapacityExceeded {
                name: type_name::<C>(),
                capacity: self.capacity,
            });
        }

        let id = ComponentId::new(self.len());

        self.infos.insert(TypeId::of::<C>(), ComponentInfo::of::<C>(id));
        self.stores.push(Box::new(ComponentStore::<C>::new()));

        tracing::debug!(component = type_name::<C>(), id = id.index(), "registered component");

        Ok(id)
    }

    pub fn id<C: Component>(&self) -> Result<ComponentId, ComponentError> {
        self.infos
            .get(&TypeId::of::<C>())
            .map(ComponentInfo::id)
            .ok_or(ComponentError::NotRegistered(type_name::<C>()))
    }

    pub fn info(&self, id: ComponentId) -> Option<ComponentInfo> {
        self.infos.get_index(id.index()).map(|(_, info)| *info)
    }

    /// Iterate over the registered components in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = ComponentInfo> + '_ {
        self.infos.values().copied()
    }

    pub fn store<C: Component>(&self) -> Result<&ComponentStore<C>, ComponentError> {
        let id = self.id::<C>()?;

        self.stores
            .get(id.index())
            .and_then(|store| store.as_any().downcast_ref())
            .ok_or(ComponentError::NotRegistered(type_name::<C>()))
    }

    pub fn store_mut<C: Component>(
        &mut self,
    ) -> Result<&mut ComponentStore<C>, ComponentError> {
        let id = self.id::<C>()?;

        self.stores
            .get_mut(id.index())
            .and_then(|store| store.as_any_mut().downcast_mut())
            .ok_or(ComponentError::NotRegistered(type_name::<C>()))
    }

    /// Removes an entity's value from the store of a component.
    ///
    /// Returns `true` if the entity had one.
    pub fn remove_erased(&mut self, id: ComponentId, entity: Entity) -> bool {
        self.stores
            .get_mut(id.index())
            .is_some_and(|store| store.remove_entity(entity))
    }

    /// Returns `true` if the entity has a value of the component.
    pub fn contains_erased(&self, id: ComponentId, entity: Entity) -> bool {
        self.stores.get(id.index()).is_some_and(|store| store.contains(entity))
    }

    /// Removes the values of every entity, keeping the registrations.
    pub fn clear(&mut self) {
        for store in &mut self.stores {
            store.clear();
        }
    }
}

impl fmt::Debug for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Registered<'a>(&'a Components);

        impl fmt::Debug for Registered<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(
                        self.0
                            .infos
                            .values()
                            .zip(&self.0.stores)
                            .map(|(info, store)| (info.type_name(), store.len())),
                    )
                    .finish()
            }
        }

        f.debug_struct("Components")
            .field("capacity", &self.capacity)
            .field("registered", &Registered(self))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[derive(Component)]
    struct A;

    #[derive(Component)]
    struct B;

    #[derive(Component)]
    struct C;

    #[test]
    fn ids_follow_registration_order() {
        let mut components = Components::new(8);

        assert_eq!(components.register::<B>().unwrap().index(), 0);
        assert_eq!(components.register::<A>().unwrap().index(), 1);
        // idempotent
        assert_eq!(components.register::<B>().unwrap().index(), 0);
        assert_eq!(components.len(), 2);

        assert_eq!(components.id::<A>().unwrap().index(), 1);
        assert_eq!(
            components.id::<C>(),
            Err(ComponentError::NotRegistered(type_name::<C>())),
        );

        let names: Vec<_> = components.iter().map(|info| info.id().index()).collect();

        assert_eq!(names, [0, 1]);
        assert_eq!(
            components.info(ComponentId::new(1)).map(|info| info.type_id()),
            Some(TypeId::of::<A>()),
        );
    }

    #[test]
    fn capacity_is_enforced() {
        let mut components = Components::new(2);

        components.register::<A>().unwrap();
        components.register::<B>().unwrap();

        assert_eq!(
            components.register::<C>(),
            Err(ComponentError::CapacityExceeded { name: type_name::<C>(), capacity: 2 }),
        );
        // re-registering at capacity is still fine
        assert!(components.register::<A>().is_ok());
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn typed_and_erased_store_access() {
        let mut components = Components::new(4);
        let id = components.register::<A>().unwrap();
        let entity = Entity::from_raw(1).unwrap();

        components.store_mut::<A>().unwrap().insert(entity, A);

        assert!(components.contains_erased(id, entity));
        assert_eq!(components.store::<A>().unwrap().len(), 1);
        assert!(components.remove_erased(id, entity));
        assert!(!components.remove_erased(id, entity));
        assert!(components.store::<B>().is_err());
    }
}
