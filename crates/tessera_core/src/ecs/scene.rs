//! # Scene
//!
//! The unit of isolation: one entity registry, one set of component pools
//! and one component type registry. Several scenes may coexist; handles and
//! component type ids from one scene mean nothing in another.

use super::component::{Component, ComponentInfo, ComponentKey, ComponentTag};
use super::entity::{EntityId, EntityRecord};
use super::mask::ComponentMask;
use super::registry::{ComponentTypeId, ComponentTypeRegistry};
use super::storage::ComponentPool;
use crate::config::{CapacityPolicy, EcsConfig, RemovalPolicy};
use crate::error::{EcsError, EcsResult};

/// The scene - container for entities and their components.
///
/// Entity slots and every component pool are sized to the configured entity
/// capacity when they are created, so component slices returned by the
/// scene keep their address until the scene is cleared or dropped.
///
/// # Example
///
/// ```rust
/// use tessera_core::{ComponentTag, Scene};
///
/// let mut scene = Scene::new();
/// let entity = scene.add_entity();
///
/// let health = ComponentTag::from_name("Health", 4);
/// let bytes = scene.assign_raw(entity, health, 4).unwrap();
/// assert_eq!(bytes, &[0, 0, 0, 0]);
/// ```
#[derive(Debug)]
pub struct Scene {
    /// Entity slots in allocation order.
    entities: Vec<EntityRecord>,
    /// Free list of dead slot indices for reuse.
    free_indices: Vec<u32>,
    /// Number of currently alive entities.
    alive_count: usize,
    /// Pools indexed by internal component type id. Id 0 is never used.
    pools: Vec<Option<ComponentPool>>,
    /// Component key to internal id mapping.
    registry: ComponentTypeRegistry,
    config: EcsConfig,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(EcsConfig::default())
    }

    /// Creates a scene with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if the configuration is out of
    /// range.
    pub fn with_config(config: EcsConfig) -> EcsResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EcsConfig) -> Self {
        tracing::debug!(
            max_entities = config.max_entities,
            max_component_types = config.max_component_types,
            "creating scene"
        );
        Self {
            entities: Vec::with_capacity(config.max_entities),
            free_indices: Vec::with_capacity(config.max_entities),
            alive_count: 0,
            pools: Vec::new(),
            registry: ComponentTypeRegistry::new(config.max_component_types),
            config,
        }
    }

    /// Returns the configuration this scene was built with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &EcsConfig {
        &self.config
    }

    /// Returns the maximum number of entity slots.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.config.max_entities
    }

    /// Returns the number of entity slots ever allocated, dead ones
    /// included.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns the number of currently alive entities.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    /// Removes every entity, pool and component type registration.
    ///
    /// Internal component type ids restart at 1 afterwards.
    pub fn clear(&mut self) {
        tracing::debug!(
            slots = self.entities.len(),
            component_types = self.registry.len(),
            "clearing scene"
        );
        self.entities.clear();
        self.free_indices.clear();
        self.alive_count = 0;
        self.pools.clear();
        self.registry.clear();
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Allocates an entity, reusing a dead slot before growing.
    ///
    /// # Returns
    ///
    /// The new entity's ID, or `EntityId::NULL` if capacity is reached.
    pub fn add_entity(&mut self) -> EntityId {
        match self.try_add_entity() {
            Ok(id) => id,
            Err(err) => {
                self.report(&err);
                EntityId::NULL
            }
        }
    }

    /// Allocates an entity, reporting why it failed.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::EntityCapacity`] if every slot is alive.
    pub fn try_add_entity(&mut self) -> EcsResult<EntityId> {
        let id = if let Some(index) = self.free_indices.pop() {
            self.entities[index as usize].revive()
        } else {
            if self.entities.len() >= self.config.max_entities {
                return Err(EcsError::EntityCapacity {
                    capacity: self.config.max_entities,
                });
            }
            #[allow(clippy::cast_possible_truncation)]
            let id = EntityId::new(self.entities.len() as u32, 0);
            self.entities.push(EntityRecord::new(id));
            id
        };

        self.alive_count += 1;
        tracing::trace!(index = id.index(), generation = id.generation(), "entity added");
        Ok(id)
    }

    /// Destroys an entity, freeing its slot for reuse.
    ///
    /// The mask is cleared and the generation bumped. Component bytes are
    /// left in the pools unless the removal policy is
    /// [`RemovalPolicy::Scrub`].
    ///
    /// # Returns
    ///
    /// `true` if the entity was destroyed, `false` if the handle was null,
    /// stale or already dead.
    pub fn destroy_entity(&mut self, entity: EntityId) -> bool {
        let Some(index) = self.live_index(entity) else {
            return false;
        };

        if self.config.removal_policy == RemovalPolicy::Scrub {
            let mask = self.entities[index].mask;
            for id in mask.iter() {
                if let Some(pool) = self.pools.get_mut(id).and_then(Option::as_mut) {
                    pool.zero(index);
                }
            }
        }

        self.entities[index].kill();
        self.free_indices.push(entity.index());
        self.alive_count -= 1;

        tracing::trace!(index, "entity destroyed");
        true
    }

    /// Creates a new entity carrying a byte-for-byte copy of every
    /// component of `source`.
    ///
    /// # Returns
    ///
    /// The clone's ID, or `EntityId::NULL` if `source` is not alive or
    /// capacity is reached.
    pub fn clone_entity(&mut self, source: EntityId) -> EntityId {
        match self.try_clone_entity(source) {
            Ok(id) => id,
            Err(err) => {
                self.report(&err);
                EntityId::NULL
            }
        }
    }

    /// Clones an entity, reporting why it failed.
    ///
    /// # Errors
    ///
    /// - [`EcsError::DeadEntity`] if `source` is not alive.
    /// - [`EcsError::EntityCapacity`] if no slot is free.
    pub fn try_clone_entity(&mut self, source: EntityId) -> EcsResult<EntityId> {
        let src = self
            .live_index(source)
            .ok_or(EcsError::DeadEntity(source))?;
        let clone = self.try_add_entity()?;
        let dst = clone.index() as usize;

        let mask = self.entities[src].mask;
        self.entities[dst].mask = mask;
        for id in mask.iter() {
            if let Some(pool) = self.pools.get_mut(id).and_then(Option::as_mut) {
                pool.copy_slot(src, dst);
            }
        }

        tracing::trace!(source = src, clone = dst, components = mask.count(), "entity cloned");
        Ok(clone)
    }

    /// Checks if `entity` is the live handle of its slot in this scene.
    #[inline]
    #[must_use]
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.live_index(entity).is_some()
    }

    /// Returns the handle stored in slot `index`.
    ///
    /// Returns `EntityId::NULL` for an out-of-range index or a dead slot.
    #[must_use]
    pub fn entity_at(&self, index: usize) -> EntityId {
        match self.entities.get(index) {
            Some(record) if record.alive => record.id,
            _ => EntityId::NULL,
        }
    }

    /// Iterates every slot in allocation order, dead ones included.
    pub fn entities(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entities.iter()
    }

    /// Returns the component mask of a live entity.
    #[must_use]
    pub fn mask(&self, entity: EntityId) -> Option<&ComponentMask> {
        let index = self.live_index(entity)?;
        Some(&self.entities[index].mask)
    }

    #[inline]
    fn live_index(&self, entity: EntityId) -> Option<usize> {
        if entity.is_null() {
            return None;
        }
        let index = entity.index() as usize;
        self.entities
            .get(index)
            .filter(|record| record.matches(entity))
            .map(|_| index)
    }

    // =========================================================================
    // Component types
    // =========================================================================

    /// Registers the Rust component type `C`, or returns its existing id.
    ///
    /// # Errors
    ///
    /// - [`EcsError::ComponentTypeCapacity`] if every id is taken.
    /// - [`EcsError::UnsupportedAlignment`] if `C` needs more than 8-byte
    ///   alignment.
    pub fn register_component<C: Component>(&mut self) -> EcsResult<ComponentTypeId> {
        self.resolve(&ComponentInfo::of::<C>())
    }

    /// Registers a tagged component of `size` bytes, or returns its
    /// existing id. A tag seen before keeps its first size.
    ///
    /// # Errors
    ///
    /// - [`EcsError::ComponentTypeCapacity`] if every id is taken.
    /// - [`EcsError::ComponentTooLarge`] if a pool of `size`-byte slots
    ///   cannot be laid out or allocated.
    pub fn register_tag(&mut self, tag: ComponentTag, size: usize) -> EcsResult<ComponentTypeId> {
        self.resolve(&ComponentInfo::tagged(tag, size))
    }

    /// Looks up the internal id of a key without registering it.
    #[inline]
    #[must_use]
    pub fn component_type(&self, key: &ComponentKey) -> Option<ComponentTypeId> {
        self.registry.lookup(key)
    }

    /// Returns the layout a component type was registered with.
    #[must_use]
    pub fn component_info(&self, id: ComponentTypeId) -> Option<&ComponentInfo> {
        self.registry.info(id)
    }

    /// Returns the pool behind a component type id.
    ///
    /// The pool is indexed by entity slot index and does not consult masks.
    #[must_use]
    pub fn pool(&self, id: ComponentTypeId) -> Option<&ComponentPool> {
        self.pools.get(id.index())?.as_ref()
    }

    fn resolve(&mut self, info: &ComponentInfo) -> EcsResult<ComponentTypeId> {
        if let Some(id) = self.registry.lookup(&info.key) {
            return Ok(id);
        }

        // The pool is built first so a rejected layout never gets an id.
        let pool = ComponentPool::new(info, self.config.max_entities)?;
        let id = self.registry.resolve(info)?.id();
        if self.pools.len() <= id.index() {
            self.pools.resize_with(id.index() + 1, || None);
        }
        self.pools[id.index()] = Some(pool);
        Ok(id)
    }

    /// Builds the query target mask for `keys`.
    ///
    /// Returns None if any key was never registered.
    pub(crate) fn target_mask<I>(&self, keys: I) -> Option<ComponentMask>
    where
        I: IntoIterator<Item = ComponentKey>,
    {
        let mut mask = ComponentMask::EMPTY;
        for key in keys {
            mask.insert(self.registry.lookup(&key)?.index());
        }
        Some(mask)
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Marks `info` as attached to `entity`, zeroing the slot on first
    /// attachment. Returns the type id and slot index.
    fn attach(&mut self, entity: EntityId, info: &ComponentInfo) -> EcsResult<(usize, usize)> {
        let index = self
            .live_index(entity)
            .ok_or(EcsError::DeadEntity(entity))?;
        let id = self.resolve(info)?.index();

        let record = &mut self.entities[index];
        if !record.mask.contains(id) {
            record.mask.insert(id);
            if let Some(pool) = self.pools[id].as_mut() {
                pool.zero(index);
            }
        }
        Ok((id, index))
    }

    /// Slot index and type id of an attached component.
    fn attached(&self, entity: EntityId, key: &ComponentKey) -> Option<(usize, usize)> {
        let index = self.live_index(entity)?;
        let id = self.registry.lookup(key)?.index();
        self.entities[index].mask.contains(id).then_some((id, index))
    }

    fn detach(&mut self, entity: EntityId, key: &ComponentKey) -> bool {
        let Some((id, index)) = self.attached(entity, key) else {
            return false;
        };
        self.entities[index].mask.remove(id);
        if self.config.removal_policy == RemovalPolicy::Scrub {
            if let Some(pool) = self.pools[id].as_mut() {
                pool.zero(index);
            }
        }
        true
    }

    /// Attaches a tagged component and returns its bytes.
    ///
    /// The first assignment zeroes the slot. Assigning a component the
    /// entity already carries returns the existing bytes untouched.
    ///
    /// Returns None if the entity is not alive, no component type id is
    /// left, or a pool of `size`-byte slots cannot be allocated.
    pub fn assign_raw(&mut self, entity: EntityId, tag: ComponentTag, size: usize) -> Option<&mut [u8]> {
        match self.attach(entity, &ComponentInfo::tagged(tag, size)) {
            Ok((id, index)) => self.pools[id].as_mut()?.get_mut(index),
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Returns the bytes of a tagged component.
    ///
    /// Returns None if the entity is not alive, the tag is unknown, or the
    /// entity does not carry it.
    #[must_use]
    pub fn get_raw(&self, entity: EntityId, tag: ComponentTag) -> Option<&[u8]> {
        let (id, index) = self.attached(entity, &ComponentKey::Tag(tag))?;
        self.pools[id].as_ref()?.get(index)
    }

    /// Returns the mutable bytes of a tagged component.
    pub fn get_raw_mut(&mut self, entity: EntityId, tag: ComponentTag) -> Option<&mut [u8]> {
        let (id, index) = self.attached(entity, &ComponentKey::Tag(tag))?;
        self.pools[id].as_mut()?.get_mut(index)
    }

    /// Detaches a tagged component. Only the mask bit is cleared unless the
    /// removal policy is [`RemovalPolicy::Scrub`].
    pub fn remove_raw(&mut self, entity: EntityId, tag: ComponentTag) {
        self.detach(entity, &ComponentKey::Tag(tag));
    }

    /// Attaches component `C` and returns it, zeroed on first attachment.
    pub fn assign<C: Component>(&mut self, entity: EntityId) -> Option<&mut C> {
        match self.attach(entity, &ComponentInfo::of::<C>()) {
            Ok((id, index)) => self.pools[id].as_mut()?.get_as_mut(index),
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Attaches component `C` and overwrites it with `value`.
    ///
    /// Returns `false` if the entity is not alive or no type id is left.
    pub fn insert<C: Component>(&mut self, entity: EntityId, value: C) -> bool {
        match self.assign::<C>(entity) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Returns component `C` of `entity`.
    #[must_use]
    pub fn get<C: Component>(&self, entity: EntityId) -> Option<&C> {
        let (id, index) = self.attached(entity, &ComponentKey::of::<C>())?;
        self.pools[id].as_ref()?.get_as(index)
    }

    /// Returns component `C` of `entity` mutably.
    pub fn get_mut<C: Component>(&mut self, entity: EntityId) -> Option<&mut C> {
        let (id, index) = self.attached(entity, &ComponentKey::of::<C>())?;
        self.pools[id].as_mut()?.get_as_mut(index)
    }

    /// Checks if `entity` carries component `C`.
    #[must_use]
    pub fn has<C: Component>(&self, entity: EntityId) -> bool {
        self.attached(entity, &ComponentKey::of::<C>()).is_some()
    }

    /// Detaches component `C`.
    ///
    /// # Returns
    ///
    /// `true` if the component was attached.
    pub fn remove<C: Component>(&mut self, entity: EntityId) -> bool {
        self.detach(entity, &ComponentKey::of::<C>())
    }

    // =========================================================================
    // Fallible counterparts
    // =========================================================================

    /// Destroys an entity, reporting why it could not be.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::DeadEntity`] if the handle is null, stale or
    /// already destroyed.
    pub fn try_destroy_entity(&mut self, entity: EntityId) -> EcsResult<()> {
        if self.destroy_entity(entity) {
            Ok(())
        } else {
            Err(EcsError::DeadEntity(entity))
        }
    }

    fn locate(&self, entity: EntityId, key: &ComponentKey, name: &str) -> EcsResult<(usize, usize)> {
        let index = self
            .live_index(entity)
            .ok_or(EcsError::DeadEntity(entity))?;
        let id = self
            .registry
            .lookup(key)
            .ok_or_else(|| EcsError::UnknownComponent(name.to_string()))?
            .index();
        if !self.entities[index].mask.contains(id) {
            return Err(EcsError::ComponentMissing {
                entity,
                component: name.to_string(),
            });
        }
        Ok((id, index))
    }

    /// Attaches component `C`, reporting why it could not be.
    ///
    /// # Errors
    ///
    /// - [`EcsError::DeadEntity`] if the entity is not alive.
    /// - [`EcsError::ComponentTypeCapacity`] if `C` is new and every id is
    ///   taken.
    /// - [`EcsError::UnsupportedAlignment`] if `C` needs more than 8-byte
    ///   alignment.
    pub fn try_assign<C: Component>(&mut self, entity: EntityId) -> EcsResult<&mut C> {
        let info = ComponentInfo::of::<C>();
        let (id, index) = self.attach(entity, &info)?;
        self.pools[id]
            .as_mut()
            .and_then(|pool| pool.get_as_mut(index))
            .ok_or_else(|| EcsError::ComponentMissing {
                entity,
                component: info.name.to_string(),
            })
    }

    /// Returns component `C` of `entity`, reporting why it is absent.
    ///
    /// # Errors
    ///
    /// - [`EcsError::DeadEntity`] if the entity is not alive.
    /// - [`EcsError::UnknownComponent`] if `C` was never registered here.
    /// - [`EcsError::ComponentMissing`] if the entity does not carry `C`.
    pub fn try_get<C: Component>(&self, entity: EntityId) -> EcsResult<&C> {
        let name = std::any::type_name::<C>();
        let (id, index) = self.locate(entity, &ComponentKey::of::<C>(), name)?;
        self.pools[id]
            .as_ref()
            .and_then(|pool| pool.get_as(index))
            .ok_or_else(|| EcsError::ComponentMissing {
                entity,
                component: name.to_string(),
            })
    }

    /// Returns the bytes of a tagged component, reporting why they are
    /// absent.
    ///
    /// # Errors
    ///
    /// Same as [`Scene::try_get`].
    pub fn try_get_raw(&self, entity: EntityId, tag: ComponentTag) -> EcsResult<&[u8]> {
        let key = ComponentKey::Tag(tag);
        let name = key.to_string();
        let (id, index) = self.locate(entity, &key, &name)?;
        self.pools[id]
            .as_ref()
            .and_then(|pool| pool.get(index))
            .ok_or(EcsError::ComponentMissing {
                entity,
                component: name,
            })
    }

    /// Applies the capacity policy to a failed operation.
    fn report(&self, err: &EcsError) {
        match err {
            EcsError::EntityCapacity { .. } | EcsError::ComponentTypeCapacity { .. } => {
                match self.config.capacity_policy {
                    CapacityPolicy::Silent => tracing::trace!(%err, "capacity exceeded"),
                    CapacityPolicy::Warn => tracing::warn!(%err, "capacity exceeded"),
                    CapacityPolicy::Panic => panic!("{err}"),
                }
            }
            _ => tracing::trace!(%err, "scene operation rejected"),
        }
    }
}
