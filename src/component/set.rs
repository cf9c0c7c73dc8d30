use super::{Component, ComponentError, Components};
use crate::signature::Signature;

/// A set of component types, implemented for every [`Component`] and for
/// tuples of sets.
///
/// Used to build a [`Signature`] from types, e.g. to declare the
/// requirements of a system inline:
///
/// ```
/// # use signet::prelude::*;
/// #
/// #[derive(Component)]
/// struct Position(f32, f32);
///
/// #[derive(Component)]
/// struct Velocity(f32, f32);
///
/// let mut world = World::new();
/// let signature = world.register_signature::<(Position, Velocity)>()?;
///
/// assert_eq!(signature.len(), 2);
/// # Ok::<_, ComponentError>(())
/// ```
pub trait ComponentSet: 'static {
    /// Inserts the components of this set into the builder.
    fn insert(builder: &mut SignatureBuilder<'_>) -> Result<(), ComponentError>;
}

/// Builder for the [`Signature`] of a [`ComponentSet`].
pub struct SignatureBuilder<'w> {
    signature: Signature,
    lookup: Lookup<'w>,
}

enum Lookup<'w> {
    /// Fail on unregistered components.
    Registered(&'w Components),
    /// Register missing components.
    Register(&'w mut Components),
}

impl<C: Component> ComponentSet for C {
    fn insert(builder: &mut SignatureBuilder<'_>) -> Result<(), ComponentError> {
        builder.insert::<C>()
    }
}

impl<'w> SignatureBuilder<'w> {
    /// A builder that fails on unregistered components.
    pub(crate) fn lookup(components: &'w Components) -> Self {
        Self { signature: Signature::new(), lookup: Lookup::Registered(components) }
    }

    /// A builder that registers missing components.
    pub(crate) fn register(components: &'w mut Components) -> Self {
        Self { signature: Signature::new(), lookup: Lookup::Register(components) }
    }

    /// Inserts the bit of the given component into the signature.
    pub fn insert<C: Component>(&mut self) -> Result<(), ComponentError> {
        let id = match &mut self.lookup {
            Lookup::Registered(components) => components.id::<C>()?,
            Lookup::Register(components) => components.register::<C>()?,
        };

        self.signature.insert(id);

        Ok(())
    }

    /// Builds the signature.
    pub(crate) fn build(self) -> Signature {
        self.signature
    }
}
