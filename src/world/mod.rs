//! Defines the [`World`], the center of an ECS.

use std::any::type_name;

use crate::prelude::*;


/// Stores all ECS data.
///
/// Every structural change (creating or destroying an entity, adding or
/// removing a component) re-evaluates the entity against every registered
/// system before returning, so [`World::members`] is always up to date.
///
/// - [Entity methods](#entity-methods)
/// - [Component methods](#component-methods)
/// - [System methods](#system-methods)
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    pub(crate) entities: Entities,
    pub(crate) components: Components,
    pub(crate) systems: Systems,
}

impl World {
    /// Creates a new empty world with the default [`WorldConfig`].
    pub fn new() -> Self {
        Self::from_valid_config(WorldConfig::default())
    }

    /// Creates a new empty world.
    ///
    /// Returns an error if the config is invalid.
    pub fn with_config(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: WorldConfig) -> Self {
        let entities = Entities::new(&config);
        let components = Components::new(config.component_capacity);
        let systems = Systems::new();

        Self { config, entities, components, systems }
    }

    /// The config this world was created with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }
}

/// # Entity methods
impl World {
    /// Returns the count of live entities in this world.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if this world contains no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Returns an iterator over the live entities in this world.
    pub fn entities(&self) -> EntityIter<'_> {
        self.entities.iter()
    }

    /// Returns `true` if the entity is alive in this world.
    pub fn entity_exists(&self, entity: Entity) -> bool {
        self.entities.contains(entity)
    }

    /// Returns the signature of a live entity.
    pub fn signature(&self, entity: Entity) -> Result<Signature, EntityNotFound> {
        self.entities.signature(entity).copied().ok_or(EntityNotFound(entity))
    }

    /// Creates a new entity without components.
    ///
    /// Returns an error if every entity id is in use.
    pub fn new_entity(&mut self) -> Result<Entity, EntitiesExhausted> {
        let entity = self.entities.alloc()?;

        // systems without requirements match empty entities
        self.systems.refresh(entity, &Signature::EMPTY);

        tracing::trace!(%entity, "created entity");

        Ok(entity)
    }

    /// Destroys an entity and all of its components, freeing its id for
    /// reuse.
    ///
    /// Destroying an entity that isn't alive only logs a warning. Returns
    /// `true` if the entity was destroyed.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        let Some(signature) = self.entities.signature_mut(entity) else {
            tracing::warn!(%entity, "attempted to destroy an entity that does not exist");

            return false;
        };

        for component in signature.iter() {
            self.components.remove_erased(component, entity);
        }

        signature.clear();
        self.systems.evict(entity);
        self.entities.free(entity);

        tracing::trace!(%entity, "destroyed entity");

        true
    }

    /// Destroys every entity, keeping component and system registrations.
    pub fn clear_entities(&mut self) {
        self.components.clear();
        self.systems.evict_all();
        self.entities.free_all();
    }
}

/// # Component methods
impl World {
    /// Registers a component type, assigning it the next [`ComponentId`].
    ///
    /// Registering a type twice logs a warning and returns the existing id.
    /// Returns an error if the world already holds
    /// [`WorldConfig::component_capacity`] component types.
    pub fn register_component<C: Component>(
        &mut self,
    ) -> Result<ComponentId, ComponentError> {
        if let Ok(id) = self.components.id::<C>() {
            tracing::warn!(
                component = type_name::<C>(),
                "component already registered",
            );

            return Ok(id);
        }

        self.components.register::<C>()
    }

    /// Returns the id of a registered component.
    pub fn component_id<C: Component>(&self) -> Result<ComponentId, ComponentError> {
        self.components.id::<C>()
    }

    /// Returns the info of a registered component.
    pub fn component_info(&self, id: ComponentId) -> Option<ComponentInfo> {
        self.components.info(id)
    }

    /// Returns an iterator over the registered components, in registration
    /// order.
    pub fn component_infos(&self) -> impl ExactSizeIterator<Item = ComponentInfo> + '_ {
        self.components.iter()
    }

    /// Returns `true` if the entity has the component.
    ///
    /// Returns `false` for unregistered components and dead entities.
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.components.store::<C>().is_ok_and(|store| store.contains(entity))
    }

    /// Returns `true` if the entity has the component with the given id.
    pub fn has_component_id(&self, entity: Entity, id: ComponentId) -> bool {
        self.components.contains_erased(id, entity)
    }

    /// Adds a component to an entity, returning a reference to the stored
    /// value.
    ///
    /// If the entity already has the component, logs a warning, drops
    /// `component` and returns the existing value.
    pub fn add_component<C: Component>(
        &mut self,
        entity: Entity,
        component: C,
    ) -> Result<&mut C, ComponentError> {
        let signature =
            self.entities.signature_mut(entity).ok_or(EntityNotFound(entity))?;
        let id = self.components.id::<C>()?;
        let store = self.components.store_mut::<C>()?;

        if store.contains(entity) {
            tracing::warn!(
                %entity,
                component = type_name::<C>(),
                "entity already has component, keeping the existing value",
            );

            return store.get_mut(entity).ok_or_else(|| missing::<C>(entity));
        }

        let value = store.insert(entity, component);

        signature.insert(id);
        self.systems.refresh(entity, signature);

        Ok(value)
    }

    /// Borrows a component of an entity.
    ///
    /// The borrow must end before the next structural change to the world, as
    /// removals may move values around in storage.
    pub fn get_component<C: Component>(&self, entity: Entity) -> Result<&C, ComponentError> {
        if !self.entities.contains(entity) {
            return Err(EntityNotFound(entity).into());
        }

        self.components.store::<C>()?.get(entity).ok_or_else(|| missing::<C>(entity))
    }

    /// Mutably borrows a component of an entity.
    pub fn get_component_mut<C: Component>(
        &mut self,
        entity: Entity,
    ) -> Result<&mut C, ComponentError> {
        if !self.entities.contains(entity) {
            return Err(EntityNotFound(entity).into());
        }

        self.components.store_mut::<C>()?.get_mut(entity).ok_or_else(|| missing::<C>(entity))
    }

    /// Removes a component from an entity, returning it.
    ///
    /// If the entity doesn't have the component, logs a warning and returns
    /// `None` without changing anything.
    pub fn remove_component<C: Component>(
        &mut self,
        entity: Entity,
    ) -> Result<Option<C>, ComponentError> {
        let signature =
            self.entities.signature_mut(entity).ok_or(EntityNotFound(entity))?;
        let id = self.components.id::<C>()?;

        let Some(component) = self.components.store_mut::<C>()?.remove(entity) else {
            tracing::warn!(
                %entity,
                component = type_name::<C>(),
                "attempted to remove a component the entity does not have",
            );

            return Ok(None);
        };

        signature.remove(id);
        self.systems.refresh(entity, signature);

        Ok(Some(component))
    }

    /// Borrows the packed storage of a component.
    pub fn store<C: Component>(&self) -> Result<&ComponentStore<C>, ComponentError> {
        self.components.store()
    }

    /// Mutably borrows the packed storage of a component.
    ///
    /// Values can be changed in place, but not added or removed.
    pub fn store_mut<C: Component>(
        &mut self,
    ) -> Result<&mut ComponentStore<C>, ComponentError> {
        self.components.store_mut()
    }

    /// Builds the signature of a set of registered components.
    pub fn signature_of<S: ComponentSet>(&self) -> Result<Signature, ComponentError> {
        let mut builder = SignatureBuilder::lookup(&self.components);

        S::insert(&mut builder)?;

        Ok(builder.build())
    }

    /// Builds the signature of a set of components, registering those that
    /// aren't yet.
    pub fn register_signature<S: ComponentSet>(
        &mut self,
    ) -> Result<Signature, ComponentError> {
        let mut builder = SignatureBuilder::register(&mut self.components);

        S::insert(&mut builder)?;

        Ok(builder.build())
    }
}

/// # System methods
impl World {
    /// Registers a system, creating its instance with [`Default`].
    ///
    /// Registering a system twice logs a warning and returns the existing
    /// instance.
    pub fn register_system<S: System + Default>(&mut self) -> Result<&mut S, SystemError> {
        self.insert_system_with(S::default)
    }

    /// Registers a system with the given instance.
    ///
    /// Registering a system twice logs a warning, drops `system` and returns
    /// the existing instance.
    pub fn insert_system<S: System>(&mut self, system: S) -> Result<&mut S, SystemError> {
        self.insert_system_with(|| system)
    }

    fn insert_system_with<S: System>(
        &mut self,
        system: impl FnOnce() -> S,
    ) -> Result<&mut S, SystemError> {
        if self.systems.contains::<S>() {
            tracing::warn!(system = type_name::<S>(), "system already registered");
        } else {
            self.systems.register(system(), &self.entities);

            tracing::debug!(system = type_name::<S>(), "registered system");
        }

        self.systems.get_mut()
    }

    /// Registers a system and binds its signature to a set of components,
    /// registering those that aren't yet.
    pub fn register_system_with<S: System + Default, C: ComponentSet>(
        &mut self,
    ) -> Result<&mut S, SystemError> {
        let signature = self.register_signature::<C>()?;

        self.register_system::<S>()?;
        self.set_system_signature::<S>(signature)?;

        self.systems.get_mut()
    }

    /// Binds the components a system requires.
    ///
    /// The signature can only be set once: later calls log a warning and keep
    /// the first signature. Membership is recomputed over all live entities.
    pub fn set_system_signature<S: System>(
        &mut self,
        signature: Signature,
    ) -> Result<(), SystemError> {
        if self.systems.bind::<S>(signature, &self.entities)? {
            tracing::debug!(system = type_name::<S>(), ?signature, "set system signature");
        } else {
            tracing::warn!(
                system = type_name::<S>(),
                "system signature already set, keeping the first",
            );
        }

        Ok(())
    }

    /// Returns the signature a system requires.
    pub fn system_signature<S: System>(&self) -> Result<Signature, SystemError> {
        self.systems.signature::<S>()
    }

    /// Borrows a registered system.
    pub fn system<S: System>(&self) -> Result<&S, SystemError> {
        self.systems.get()
    }

    /// Mutably borrows a registered system.
    pub fn system_mut<S: System>(&mut self) -> Result<&mut S, SystemError> {
        self.systems.get_mut()
    }

    /// Returns the entities matching a system.
    pub fn members<S: System>(&self) -> Result<&Members, SystemError> {
        self.systems.members::<S>()
    }

    /// Runs [`System::update`] over a snapshot of the system's members.
    ///
    /// Returns an error if the system isn't registered or is already running.
    pub fn run_system<S: System>(&mut self) -> Result<(), SystemError> {
        let entities = self.systems.members::<S>()?.to_vec();
        let mut system = self.systems.take::<S>()?;

        system.update(self, &entities);
        self.systems.restore(system);

        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn missing<C: Component>(entity: Entity) -> ComponentError {
    ComponentError::Missing { entity, name: type_name::<C>() }
}
