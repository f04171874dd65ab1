//! # Component Type Registry
//!
//! Maps component keys to small dense internal ids.
//!
//! Ids are handed out in first-seen order starting at 1 and are never
//! reused (there is no unregistration). The registry only assigns ids; the
//! scene owns the pools the ids index.

use std::collections::HashMap;

use super::component::{ComponentInfo, ComponentKey, MAX_COMPONENT_ALIGN};
use crate::error::{EcsError, EcsResult};

/// Dense internal id of a component type within one scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ComponentTypeId(u16);

impl ComponentTypeId {
    /// Returns the id as an index into masks and pool tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Outcome of [`ComponentTypeRegistry::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolved {
    /// The key was seen before.
    Existing(ComponentTypeId),
    /// The key was just assigned a fresh id; its pool must be created.
    New(ComponentTypeId),
}

impl Resolved {
    /// The id regardless of freshness.
    #[inline]
    #[must_use]
    pub const fn id(self) -> ComponentTypeId {
        match self {
            Self::Existing(id) | Self::New(id) => id,
        }
    }
}

/// Key to internal id mapping for one scene.
#[derive(Debug)]
pub struct ComponentTypeRegistry {
    ids: HashMap<ComponentKey, ComponentTypeId>,
    /// Info recorded at first registration, indexed by id.
    infos: Vec<Option<ComponentInfo>>,
    next_id: u16,
    /// Exclusive upper bound on ids.
    capacity: usize,
}

impl ComponentTypeRegistry {
    /// Creates an empty registry whose ids stay below `capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: HashMap::new(),
            infos: Vec::new(),
            next_id: 1,
            capacity,
        }
    }

    /// Looks up a key without registering it.
    #[inline]
    #[must_use]
    pub fn lookup(&self, key: &ComponentKey) -> Option<ComponentTypeId> {
        self.ids.get(key).copied()
    }

    /// Returns the id for `info.key`, registering it on first sight.
    ///
    /// A key seen before keeps the layout it was first registered with;
    /// the size in `info` is ignored on later calls.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnsupportedAlignment`] if the type needs more alignment
    ///   than the pools provide.
    /// - [`EcsError::ComponentTypeCapacity`] if every id is taken.
    pub fn resolve(&mut self, info: &ComponentInfo) -> EcsResult<Resolved> {
        if let Some(id) = self.lookup(&info.key) {
            return Ok(Resolved::Existing(id));
        }
        if info.align > MAX_COMPONENT_ALIGN {
            return Err(EcsError::UnsupportedAlignment {
                name: info.name,
                align: info.align,
                max: MAX_COMPONENT_ALIGN,
            });
        }
        if usize::from(self.next_id) >= self.capacity {
            return Err(EcsError::ComponentTypeCapacity {
                capacity: self.capacity,
            });
        }

        let id = ComponentTypeId(self.next_id);
        self.next_id += 1;
        self.ids.insert(info.key, id);
        if self.infos.len() <= id.index() {
            self.infos.resize(id.index() + 1, None);
        }
        self.infos[id.index()] = Some(*info);

        tracing::debug!(
            component = info.name,
            key = %info.key,
            id = id.index(),
            size = info.size,
            "registered component type"
        );
        Ok(Resolved::New(id))
    }

    /// Returns the layout recorded for `id`.
    #[inline]
    #[must_use]
    pub fn info(&self, id: ComponentTypeId) -> Option<&ComponentInfo> {
        self.infos.get(id.index())?.as_ref()
    }

    /// Number of registered types.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Checks if no type is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Forgets every registration; ids restart at 1.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.infos.clear();
        self.next_id = 1;
    }
}
