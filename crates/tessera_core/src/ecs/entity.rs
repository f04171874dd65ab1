//! # Entity Management
//!
//! Entities are lightweight identifiers consisting of:
//! - An index into the scene's slot array and every component pool
//! - A generation counter for safe reuse

use super::mask::ComponentMask;

/// Unique identifier for an entity.
///
/// The ID is split into two parts:
/// - Lower 32 bits: Slot index
/// - Upper 32 bits: Generation counter for detecting stale references
///
/// Validity ([`EntityId::is_valid`]) is a structural check against the
/// [`EntityId::NULL`] sentinel only. Whether the handle still refers to a
/// live slot is a question for a particular scene (`Scene::is_alive`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Null/invalid entity ID (all bits set).
    pub const NULL: Self = Self(u64::MAX);

    /// Creates a new entity ID from index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Reinterprets a raw 64-bit handle.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw 64-bit handle.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Returns the index portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Checks if this entity ID is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }

    /// Structural validity: `true` for every handle except the sentinel.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !self.is_null()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

/// Per-slot state inside a scene.
///
/// The slot index in `id` is fixed for the slot's lifetime; the generation
/// is bumped every time the slot is destroyed.
#[derive(Clone, Copy, Debug)]
pub struct EntityRecord {
    /// Current handle for this slot.
    pub id: EntityId,
    /// Component types currently attached.
    pub mask: ComponentMask,
    /// Whether this slot is currently alive.
    pub alive: bool,
}

impl EntityRecord {
    /// Creates a live record with an empty mask.
    #[inline]
    #[must_use]
    pub const fn new(id: EntityId) -> Self {
        Self {
            id,
            mask: ComponentMask::EMPTY,
            alive: true,
        }
    }

    /// Kills the slot: clears the mask and bumps the generation so that
    /// handles issued before this call no longer match.
    #[inline]
    pub fn kill(&mut self) {
        self.alive = false;
        self.mask = ComponentMask::EMPTY;
        self.id = EntityId::new(self.id.index(), self.id.generation().wrapping_add(1));
    }

    /// Revives a dead slot under its current generation.
    #[inline]
    pub fn revive(&mut self) -> EntityId {
        self.alive = true;
        self.mask = ComponentMask::EMPTY;
        self.id
    }

    /// Checks whether `id` is the live handle of this slot.
    #[inline]
    #[must_use]
    pub fn matches(&self, id: EntityId) -> bool {
        self.alive && self.id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_roundtrip() {
        let id = EntityId::new(12345, 67890);
        assert_eq!(id.index(), 12345);
        assert_eq!(id.generation(), 67890);
        assert_eq!(EntityId::from_bits(id.to_bits()), id);
    }

    #[test]
    fn test_null_is_all_ones() {
        assert_eq!(EntityId::NULL.to_bits(), u64::MAX);
        assert!(!EntityId::NULL.is_valid());
        assert!(EntityId::new(0, 0).is_valid());
        assert_eq!(EntityId::default(), EntityId::NULL);
    }

    #[test]
    fn test_kill_bumps_generation() {
        let mut record = EntityRecord::new(EntityId::new(7, 0));
        record.mask.insert(3);
        let old = record.id;

        record.kill();
        assert!(!record.alive);
        assert!(record.mask.is_empty());
        assert!(!record.matches(old));

        let new = record.revive();
        assert_eq!(new.index(), 7);
        assert_eq!(new.generation(), 1);
        assert_ne!(new, old);
        assert!(record.matches(new));
    }
}
