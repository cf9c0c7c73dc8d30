use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::Component;
use crate::storage::SparseIndex;

/// The sparse index for components, and their bit in a
/// [`Signature`](crate::signature::Signature).
///
/// Ids are handed out per world in registration order and never reused.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(usize);

/// Describes a registered [component](Component).
#[derive(Clone, Copy)]
pub struct ComponentInfo {
    id: ComponentId,
    type_id: TypeId,
    type_name: &'static str,
}

impl ComponentId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The index of this component's bit.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl ComponentInfo {
    pub(crate) fn of<C: Component>(id: ComponentId) -> Self {
        Self { id, type_id: TypeId::of::<C>(), type_name: type_name::<C>() }
    }

    /// Returns the id of the component.
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// Returns the type id of the component.
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the [type name](std::any::type_name) of the component.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl SparseIndex for ComponentId {
    fn sparse_index(&self) -> usize {
        self.0
    }
}

impl SparseIndex for ComponentInfo {
    fn sparse_index(&self) -> usize {
        self.id.sparse_index()
    }
}

impl fmt::Debug for ComponentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInfo")
            .field("type_name", &self.type_name)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ComponentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.type_name.fmt(f)
    }
}

impl PartialEq for ComponentInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.type_id == other.type_id
    }
}

impl Eq for ComponentInfo {}

impl Hash for ComponentInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.type_id.hash(state);
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

    #[test]
    fn info_eq() {
        let a = ComponentInfo::of::<A>(ComponentId::new(0));

        assert_eq!(a, ComponentInfo::of::<A>(ComponentId::new(0)));
        assert_ne!(a, ComponentInfo::of::<B>(ComponentId::new(0)));
        assert_ne!(a, ComponentInfo::of::<A>(ComponentId::new(1)));
    }

    #[test]
    fn display_is_type_name() {
        let info = ComponentInfo::of::<A>(ComponentId::new(3));

        assert!(info.to_string().ends_with("::A"));
        assert_eq!(info.id().index(), 3);
        assert_eq!(info.type_id(), TypeId::of::<A>());
    }
}
