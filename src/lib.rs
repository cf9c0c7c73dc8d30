//! A signature-matched entity component system.
//!
//! Entities are plain ids. Each component type has its own packed store, and
//! each system keeps the set of entities whose components cover its required
//! [`Signature`](signature::Signature), updated on every structural change.

// allows referencing this crate as `signet` in derives
extern crate self as signet;

pub mod component;
pub mod config;
pub mod entity;
pub mod signature;
mod storage;
pub mod system;
pub mod world;

/// Re-export of all items in this crate.
pub mod prelude {
    pub use crate::component::*;
    pub use crate::config::*;
    pub use crate::entity::*;
    pub use crate::signature::*;
    pub use crate::system::*;
    pub use crate::world::*;
}
