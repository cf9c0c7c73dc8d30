//! Sparse containers and hashers backing the registries.

pub use self::sparse::*;
pub use self::type_id_hasher::*;

mod sparse;
mod type_id_hasher;
