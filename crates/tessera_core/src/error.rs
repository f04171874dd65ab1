//! # Scene Error Types
//!
//! All errors that can be reported by the scene runtime.
//!
//! The C-style surface of the runtime reports failure through sentinel
//! values (`EntityId::NULL`, `None`, silent no-ops). The `try_*` and
//! `register_*` operations report the reason through [`EcsError`] instead.

use thiserror::Error;

use crate::ecs::EntityId;

/// Errors that can occur in the scene runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// Every entity slot of the scene is in use.
    #[error("entity capacity exhausted: {capacity} slots in use")]
    EntityCapacity {
        /// Configured entity capacity.
        capacity: usize,
    },

    /// No internal component type id is left to hand out.
    #[error("component type capacity exhausted: {capacity} types")]
    ComponentTypeCapacity {
        /// Configured component type capacity.
        capacity: usize,
    },

    /// The handle is the null sentinel, out of range, or refers to a
    /// destroyed slot.
    #[error("entity {0:?} is not alive in this scene")]
    DeadEntity(EntityId),

    /// The component key was never registered in this scene.
    #[error("component type not registered: {0}")]
    UnknownComponent(String),

    /// The entity does not carry the requested component.
    #[error("entity {entity:?} has no component {component}")]
    ComponentMissing {
        /// The entity that was queried.
        entity: EntityId,
        /// Name of the missing component.
        component: String,
    },

    /// The component alignment exceeds what the byte pools guarantee.
    #[error("component {name} requires alignment {align}, pools guarantee {max}")]
    UnsupportedAlignment {
        /// Name of the component type.
        name: &'static str,
        /// Alignment the component requires.
        align: usize,
        /// Alignment the pool buffers provide.
        max: usize,
    },

    /// The pool for this component would not fit in the address space.
    #[error("component {name} of {size} bytes is too large for {capacity} slots")]
    ComponentTooLarge {
        /// Name of the component type.
        name: &'static str,
        /// Declared element size.
        size: usize,
        /// Slots the pool would hold.
        capacity: usize,
    },

    /// Invalid configuration value or document.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration {path}: {reason}")]
    ConfigIo {
        /// Path that was read.
        path: String,
        /// Underlying I/O failure.
        reason: String,
    },
}

/// Result type for scene operations.
pub type EcsResult<T> = Result<T, EcsError>;
