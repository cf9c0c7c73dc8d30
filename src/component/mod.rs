//! Components, the data attached to entities, and their packed storage.

use thiserror::Error;
pub use signet_macros::Component;

pub use self::info::*;
pub use self::set::*;
pub(crate) use self::storage::*;
pub use self::store::*;
use crate::entity::{Entity, EntityNotFound};

mod info;
mod set;
mod storage;
mod store;
mod tuple_impl;

/// A plain value that can be attached to an entity.
///
/// Usually implemented with `#[derive(Component)]`:
///
/// ```
/// # use signet::prelude::*;
/// #
/// #[derive(Component)]
/// struct Position(f32, f32);
/// ```
pub trait Component: 'static {}

/// An error for component registration and access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComponentError {
    #[error("component not registered: {0}")]
    NotRegistered(&'static str),
    #[error("cannot register {name}: component capacity of {capacity} reached")]
    CapacityExceeded { name: &'static str, capacity: usize },
    #[error(transparent)]
    EntityNotFound(#[from] EntityNotFound),
    #[error("entity {entity} has no {name} component")]
    Missing { entity: Entity, name: &'static str },
}
