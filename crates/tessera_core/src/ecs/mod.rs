//! # Entity Component System
//!
//! Scene-level object model: entities are generational handles, components
//! are plain-data blobs in per-type pools, and queries select entities by
//! the set of component types they carry.
//!
//! ## Layout
//!
//! - [`EntityId`] / [`EntityRecord`]: handles and per-slot bookkeeping
//! - [`ComponentMask`]: per-entity bitset of attached component types
//! - [`ComponentTypeRegistry`]: key to dense internal id
//! - [`ComponentPool`]: byte storage addressed by entity slot index
//! - [`Scene`]: owns all of the above
//! - [`QueryIter`]: snapshot of the entities matching a mask

mod component;
mod entity;
mod mask;
mod query;
mod registry;
mod scene;
mod storage;

pub use component::{
    hash_bytes, hash_name, Component, ComponentInfo, ComponentKey, ComponentTag,
    MAX_COMPONENT_ALIGN,
};
pub use entity::{EntityId, EntityRecord};
pub use mask::ComponentMask;
pub use query::{QueryFilter, QueryIter};
pub use registry::{ComponentTypeId, ComponentTypeRegistry, Resolved};
pub use scene::Scene;
pub use storage::ComponentPool;
