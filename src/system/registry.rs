use std::any::{type_name, Any, TypeId};
use std::fmt;

use indexmap::IndexMap;

use super::{Members, System, SystemError};
use crate::entity::{Entities, Entity};
use crate::signature::Signature;
use crate::storage::TypeIdHasher;

/// The system registry of a [`World`](crate::world::World).
#[derive(Default)]
pub struct Systems {
    entries: IndexMap<TypeId, SystemEntry, TypeIdHasher>,
}

struct SystemEntry {
    name: &'static str,
    /// The required signature. Empty until bound.
    signature: Signature,
    bound: bool,
    members: Members,
    /// `None` while the system is running.
    instance: Option<Box<dyn Any>>,
}

impl Systems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains<S: System>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<S>())
    }

    /// Registers a system with an unbound signature.
    ///
    /// An unbound system requires nothing, so it starts out with every live
    /// entity as a member. Does nothing if already registered.
    pub fn register<S: System>(&mut self, system: S, entities: &Entities) {
        self.entries.entry(TypeId::of::<S>()).or_insert_with(|| {
            let mut entry = SystemEntry {
                name: type_name::<S>(),
                signature: Signature::EMPTY,
                bound: false,
                members: Members::default(),
                instance: Some(Box::new(system)),
            };

            entry.rebuild(entities);

            entry
        });
    }

    /// Binds the required signature of a system and recomputes its members.
    ///
    /// Returns `false` and keeps the first signature if already bound.
    pub fn bind<S: System>(
        &mut self,
        signature: Signature,
        entities: &Entities,
    ) -> Result<bool, SystemError> {
        let entry = self.entry_mut::<S>()?;

        if entry.bound {
            return Ok(false);
        }

        entry.signature = signature;
        entry.bound = true;
        entry.rebuild(entities);

        Ok(true)
    }

    pub fn signature<S: System>(&self) -> Result<Signature, SystemError> {
        self.entry::<S>().map(|entry| entry.signature)
    }

    pub fn members<S: System>(&self) -> Result<&Members, SystemError> {
        self.entry::<S>().map(|entry| &entry.members)
    }

    pub fn get<S: System>(&self) -> Result<&S, SystemError> {
        let entry = self.entry::<S>()?;

        entry
            .instance
            .as_ref()
            .ok_or(SystemError::Running(entry.name))?
            .downcast_ref()
            .ok_or(SystemError::NotRegistered(entry.name))
    }

    pub fn get_mut<S: System>(&mut self) -> Result<&mut S, SystemError> {
        let entry = self.entry_mut::<S>()?;
        let name = entry.name;

        entry
            .instance
            .as_mut()
            .ok_or(SystemError::Running(name))?
            .downcast_mut()
            .ok_or(SystemError::NotRegistered(name))
    }

    /// Takes the instance of a system out to run it.
    ///
    /// Membership keeps being tracked while it is out.
    pub fn take<S: System>(&mut self) -> Result<Box<S>, SystemError> {
        let entry = self.entry_mut::<S>()?;
        let instance = entry.instance.take().ok_or(SystemError::Running(entry.name))?;

        instance.downcast().map_err(|instance| {
            entry.instance = Some(instance);

            SystemError::NotRegistered(entry.name)
        })
    }

    /// Puts back an instance taken with [`Systems::take`].
    pub fn restore<S: System>(&mut self, system: Box<S>) {
        if let Some(entry) = self.entries.get_mut(&TypeId::of::<S>()) {
            entry.instance = Some(system);
        }
    }

    /// Re-evaluates the membership of an entity in every system.
    pub fn refresh(&mut self, entity: Entity, signature: &Signature) {
        for entry in self.entries.values_mut() {
            if signature.contains(&entry.signature) {
                entry.members.insert(entity);
            } else {
                entry.members.remove(entity);
            }
        }
    }

    /// Removes a destroyed entity from every system.
    pub fn evict(&mut self, entity: Entity) {
        for entry in self.entries.values_mut() {
            entry.members.remove(entity);
        }
    }

    /// Removes every entity from every system.
    pub fn evict_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.members.clear();
        }
    }

    fn entry<S: System>(&self) -> Result<&SystemEntry, SystemError> {
        self.entries
            .get(&TypeId::of::<S>())
            .ok_or(SystemError::NotRegistered(type_name::<S>()))
    }

    fn entry_mut<S: System>(&mut self) -> Result<&mut SystemEntry, SystemError> {
        self.entries
            .get_mut(&TypeId::of::<S>())
            .ok_or(SystemError::NotRegistered(type_name::<S>()))
    }
}

impl SystemEntry {
    fn rebuild(&mut self, entities: &Entities) {
        self.members.clear();

        for (entity, signature) in entities.signatures() {
            if signature.contains(&self.signature) {
                self.members.insert(entity);
            }
        }
    }
}

impl fmt::Debug for Systems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.values().map(|entry| (entry.name, entry)))
            .finish()
    }
}

impl fmt::Debug for SystemEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemEntry")
            .field("signature", &self.signature)
            .field("bound", &self.bound)
            .field("members", &self.members.len())
            .field("running", &self.instance.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentId;
    use crate::config::WorldConfig;

    #[derive(Default)]
    struct Movement;

    impl System for Movement {}

    #[derive(Default)]
    struct Render(u32);

    impl System for Render {}

    fn sig(ids: &[usize]) -> Signature {
        ids.iter().copied().map(ComponentId::new).collect()
    }

    #[test]
    fn unbound_system_matches_everything() {
        let mut entities = Entities::new(&WorldConfig::default());
        let e0 = entities.alloc().unwrap();
        let mut systems = Systems::new();

        systems.register(Movement, &entities);

        assert!(systems.members::<Movement>().unwrap().contains(e0));
        assert_eq!(systems.signature::<Movement>(), Ok(Signature::EMPTY));
    }

    #[test]
    fn bind_once_and_rebuild() {
        let mut entities = Entities::new(&WorldConfig::default());
        let e0 = entities.alloc().unwrap();
        let mut systems = Systems::new();

        systems.register(Movement, &entities);

        assert_eq!(systems.bind::<Movement>(sig(&[0]), &entities), Ok(true));
        assert!(systems.members::<Movement>().unwrap().is_empty());

        // first write wins
        assert_eq!(systems.bind::<Movement>(Signature::EMPTY, &entities), Ok(false));
        assert_eq!(systems.signature::<Movement>(), Ok(sig(&[0])));

        systems.refresh(e0, &sig(&[0, 1]));

        assert!(systems.members::<Movement>().unwrap().contains(e0));

        systems.refresh(e0, &sig(&[1]));

        assert!(!systems.members::<Movement>().unwrap().contains(e0));
    }

    #[test]
    fn refresh_checks_every_system() {
        let entities = Entities::new(&WorldConfig::default());
        let e0 = Entity::from_raw(1).unwrap();
        let mut systems = Systems::new();

        systems.register(Movement, &entities);
        systems.register(Render::default(), &entities);
        systems.bind::<Movement>(sig(&[0, 1]), &entities).unwrap();
        systems.bind::<Render>(sig(&[1]), &entities).unwrap();

        systems.refresh(e0, &sig(&[1]));

        assert!(!systems.members::<Movement>().unwrap().contains(e0));
        assert!(systems.members::<Render>().unwrap().contains(e0));

        systems.evict(e0);

        assert!(systems.members::<Render>().unwrap().is_empty());
    }

    #[test]
    fn take_and_restore() {
        let entities = Entities::new(&WorldConfig::default());
        let mut systems = Systems::new();

        systems.register(Render(7), &entities);

        let mut render = systems.take::<Render>().unwrap();

        assert_eq!(
            systems.take::<Render>().err(),
            Some(SystemError::Running(type_name::<Render>())),
        );
        assert!(systems.get::<Render>().is_err());

        render.0 += 1;
        systems.restore(render);

        assert_eq!(systems.get::<Render>().map(|render| render.0), Ok(8));
        assert!(matches!(
            systems.get::<Movement>(),
            Err(SystemError::NotRegistered(_)),
        ));
    }
}
