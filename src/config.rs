//! Construction-time configuration of a [`World`](crate::world::World).

use thiserror::Error;

use crate::signature::Signature;

/// Limits fixed when a [`World`](crate::world::World) is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldConfig {
    /// The maximum amount of distinct component types.
    ///
    /// Must be in `1..=Signature::BITS`.
    pub component_capacity: usize,
    /// How many fresh entity ids are reserved whenever the free pool runs dry.
    pub entity_batch: u32,
    /// The largest entity id that may ever be issued.
    pub max_entities: u32,
}

/// An error for an invalid [`WorldConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "component capacity must be between 1 and {max}, got {capacity}",
        max = Signature::BITS
    )]
    InvalidCapacity { capacity: usize },
    #[error("entity batch size must be non-zero")]
    ZeroBatch,
    #[error("max entities must be non-zero")]
    ZeroMaxEntities,
}

impl WorldConfig {
    /// The default component capacity.
    pub const DEFAULT_COMPONENT_CAPACITY: usize = 100;
    /// The default entity batch size.
    pub const DEFAULT_ENTITY_BATCH: u32 = 100;

    /// Creates the default config.
    pub const fn new() -> Self {
        Self {
            component_capacity: Self::DEFAULT_COMPONENT_CAPACITY,
            entity_batch: Self::DEFAULT_ENTITY_BATCH,
            max_entities: u32::MAX,
        }
    }

    /// Sets [`WorldConfig::component_capacity`].
    pub const fn with_component_capacity(mut self, capacity: usize) -> Self {
        self.component_capacity = capacity;

        self
    }

    /// Sets [`WorldConfig::entity_batch`].
    pub const fn with_entity_batch(mut self, batch: u32) -> Self {
        self.entity_batch = batch;

        self
    }

    /// Sets [`WorldConfig::max_entities`].
    pub const fn with_max_entities(mut self, max: u32) -> Self {
        self.max_entities = max;

        self
    }

    /// Checks that every limit is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacity = self.component_capacity;

        if !(1..=Signature::BITS).contains(&capacity) {
            return Err(ConfigError::InvalidCapacity { capacity });
        }

        if self.entity_batch == 0 {
            return Err(ConfigError::ZeroBatch);
        }

        if self.max_entities == 0 {
            return Err(ConfigError::ZeroMaxEntities);
        }

        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(WorldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_limits() {
        let config = WorldConfig::new();

        assert_eq!(
            config.with_component_capacity(0).validate(),
            Err(ConfigError::InvalidCapacity { capacity: 0 }),
        );
        assert_eq!(
            config.with_component_capacity(Signature::BITS + 1).validate(),
            Err(ConfigError::InvalidCapacity { capacity: Signature::BITS + 1 }),
        );
        assert_eq!(
            config.with_component_capacity(Signature::BITS).validate(),
            Ok(()),
        );
        assert_eq!(
            config.with_entity_batch(0).validate(),
            Err(ConfigError::ZeroBatch),
        );
        assert_eq!(
            config.with_max_entities(0).validate(),
            Err(ConfigError::ZeroMaxEntities),
        );
    }
}
