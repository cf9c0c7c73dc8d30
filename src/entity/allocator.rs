use crate::config::WorldConfig;
use crate::entity::{EntitiesExhausted, Entity};
use crate::signature::Signature;
use crate::storage::{SparseIndexed, SparseMap};

/// Manages and allocates the entities in a [`World`](crate::world::World).
///
/// Live entities are exactly the keys of the signature table. Free ids are
/// kept on a stack that is refilled in batches of never-issued ids.
#[derive(Debug)]
pub struct Entities {
    signatures: SparseMap<Entity, Signature>,
    /// Ids ready to be handed out, popped from the back.
    available: Vec<Entity>,
    /// The largest id ever moved into `available`.
    issued: u32,
    batch: u32,
    max: u32,
}

/// An iterator over the live entities of a [`World`](crate::world::World).
#[derive(Clone)]
pub struct EntityIter<'w> {
    inner: SparseIndexed<'w, Signature>,
}

impl Entities {
    pub fn new(config: &WorldConfig) -> Self {
        let signatures = SparseMap::new();
        let available = Vec::new();
        let issued = 0;
        let batch = config.entity_batch;
        let max = config.max_entities;

        Self { signatures, available, issued, batch, max }
    }

    /// Amount of live entities.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether there are any live entities.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the entity is currently alive.
    pub fn contains(&self, entity: Entity) -> bool {
        self.signatures.contains(&entity)
    }

    /// The signature of a live entity.
    pub fn signature(&self, entity: Entity) -> Option<&Signature> {
        self.signatures.get(&entity)
    }

    /// The signature of a live entity.
    pub fn signature_mut(&mut self, entity: Entity) -> Option<&mut Signature> {
        self.signatures.get_mut(&entity)
    }

    /// Iterate over the live entities in ascending id order.
    pub fn iter(&self) -> EntityIter<'_> {
        EntityIter { inner: self.signatures.indexed() }
    }

    /// Iterate over the live entities and their signatures.
    pub fn signatures(&self) -> impl Iterator<Item = (Entity, &Signature)> {
        self.signatures.indexed().filter_map(|(index, signature)| {
            Entity::from_sparse_index(index).map(|entity| (entity, signature))
        })
    }

    /// Allocate a new entity with an empty signature.
    ///
    /// Recently freed ids are reused first.
    pub fn alloc(&mut self) -> Result<Entity, EntitiesExhausted> {
        if self.available.is_empty() {
            self.replenish();
        }

        let entity =
            self.available.pop().ok_or(EntitiesExhausted { max: self.max })?;

        self.signatures.insert(entity, Signature::EMPTY);

        Ok(entity)
    }

    /// Free an entity, allowing its id to be reused.
    ///
    /// Returns the signature it had if the entity was alive.
    pub fn free(&mut self, entity: Entity) -> Option<Signature> {
        let signature = self.signatures.remove(&entity)?;

        self.available.push(entity);

        Some(signature)
    }

    /// Frees every entity and forgets every issued id, so allocation starts
    /// over from the first id.
    pub fn free_all(&mut self) {
        self.signatures.clear();
        self.available.clear();
        self.issued = 0;
    }

    /// Moves the next batch of never-issued ids into the pool.
    ///
    /// Ids are pushed in descending order so they are popped ascending.
    fn replenish(&mut self) {
        if self.issued >= self.max {
            return;
        }

        let start = self.issued + 1;
        let end = self.issued.saturating_add(self.batch.max(1)).min(self.max);

        self.available.reserve((end - start + 1) as usize);
        self.available.extend((start..=end).rev().filter_map(Entity::from_raw));
        self.issued = end;
    }
}

impl<'a> IntoIterator for &'a Entities {
    type IntoIter = EntityIter<'a>;
    type Item = Entity;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Iterator for EntityIter<'_> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .find_map(|(index, _)| Entity::from_sparse_index(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for EntityIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities() -> Entities {
        Entities::new(&WorldConfig::default())
    }

    #[test]
    fn alloc_and_free() {
        let mut entities = entities();

        assert!(entities.is_empty());

        let e0 = entities.alloc().unwrap();
        let e1 = entities.alloc().unwrap();

        assert_eq!(e0.to_raw(), 1);
        assert_eq!(e1.to_raw(), 2);
        assert!(entities.contains(e0));
        assert!(entities.contains(e1));
        assert_eq!(entities.len(), 2);
        assert_eq!(entities.signature(e0), Some(&Signature::EMPTY));

        assert_eq!(entities.free(e0), Some(Signature::EMPTY));
        assert!(!entities.contains(e0));
        assert_eq!(entities.len(), 1);

        // double free is a no-op
        assert_eq!(entities.free(e0), None);
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn reuses_most_recently_freed() {
        let mut entities = entities();
        let [e0, e1, _] = [(); 3].map(|_| entities.alloc().unwrap());

        entities.free(e0);
        entities.free(e1);

        assert_eq!(entities.alloc().unwrap(), e1);
        assert_eq!(entities.alloc().unwrap(), e0);
    }

    #[test]
    fn replenishes_in_batches() {
        let mut entities = Entities::new(&WorldConfig::default().with_entity_batch(4));

        assert!(entities.available.is_empty());

        entities.alloc().unwrap();

        assert_eq!(entities.issued, 4);
        assert_eq!(entities.available.len(), 3);

        for _ in 0..3 {
            entities.alloc().unwrap();
        }

        assert!(entities.available.is_empty());

        let e4 = entities.alloc().unwrap();

        assert_eq!(e4.to_raw(), 5);
        assert_eq!(entities.issued, 8);
    }

    #[test]
    fn exhaustion() {
        let config = WorldConfig::default().with_entity_batch(2).with_max_entities(3);
        let mut entities = Entities::new(&config);
        let [e0, _, _] = [(); 3].map(|_| entities.alloc().unwrap());

        assert_eq!(entities.issued, 3);
        assert_eq!(entities.alloc(), Err(EntitiesExhausted { max: 3 }));

        // freeing makes room again
        entities.free(e0);

        assert_eq!(entities.alloc(), Ok(e0));
    }

    #[test]
    fn iter() {
        let mut entities = entities();

        assert!(entities.iter().next().is_none());

        let [e0, e1, e2, e3] = [(); 4].map(|_| entities.alloc().unwrap());

        assert!(entities.iter().eq([e0, e1, e2, e3]));

        entities.free(e1);

        assert!(entities.iter().eq([e0, e2, e3]));

        entities.free(e0);
        entities.free(e3);

        assert!(entities.iter().eq([e2]));
        assert_eq!(entities.iter().len(), 1);
    }

    #[test]
    fn free_all_starts_over() {
        let mut entities = entities();
        let [e0, _, _] = [(); 3].map(|_| entities.alloc().unwrap());

        entities.free_all();

        assert!(entities.is_empty());
        assert!(!entities.contains(e0));
        assert_eq!(entities.alloc(), Ok(e0));
    }
}
