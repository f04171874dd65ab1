//! # Tessera Core
//!
//! Scene runtime for a real-time engine: entities without inheritance,
//! plain-data components in per-type pools, bitmask queries and ordered
//! per-frame systems.
//!
//! ## Architecture Rules
//!
//! 1. **Fixed capacity** - Entity slots and component pools are sized once
//! 2. **Generational handles** - A destroyed entity's handle never aliases
//!    the entity that reuses its slot
//! 3. **Snapshot queries** - A query sees the scene as it was when built
//! 4. **Explicit context** - System lists and query storage live in a
//!    [`Runtime`], not in globals
//!
//! ## Example
//!
//! ```rust
//! use bytemuck::{Pod, Zeroable};
//! use tessera_core::{Component, ComponentKey, QueryFilter, Runtime, Scene, SystemStage};
//!
//! #[derive(Clone, Copy, Default, Pod, Zeroable)]
//! #[repr(C)]
//! struct Position {
//!     x: f32,
//!     y: f32,
//! }
//!
//! impl Component for Position {}
//!
//! let mut scene = Scene::new();
//! let entity = scene.add_entity();
//! scene.insert(entity, Position { x: 1.0, y: 0.0 });
//!
//! let mut runtime = Runtime::new();
//! runtime.register_system(SystemStage::Update, |ctx| {
//!     let keys = [ComponentKey::of::<Position>()];
//!     let mut moved = Vec::new();
//!     ctx.queries.collect_into(ctx.scene, QueryFilter::With(&keys), &mut moved);
//!     for entity in moved {
//!         if let Some(position) = ctx.scene.get_mut::<Position>(entity) {
//!             position.x += 1.0;
//!         }
//!     }
//! });
//!
//! runtime.run_update_systems(&mut scene);
//! assert_eq!(scene.get::<Position>(entity).map(|p| p.x), Some(2.0));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod ffi;
pub mod memory;
pub mod runtime;
pub mod system;

pub use config::{CapacityPolicy, EcsConfig, RemovalPolicy, MAX_COMPONENT_TYPES, MAX_ENTITIES};
pub use ecs::{
    hash_name, Component, ComponentKey, ComponentMask, ComponentPool, ComponentTag,
    ComponentTypeId, EntityId, QueryFilter, QueryIter, Scene,
};
pub use error::{EcsError, EcsResult};
pub use memory::{QueryHandle, QueryPool};
pub use runtime::Runtime;
pub use system::{SystemContext, SystemScheduler, SystemStage};
