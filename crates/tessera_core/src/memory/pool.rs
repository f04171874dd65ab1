//! # Query Pool
//!
//! Recycling allocator for query snapshots.
//!
//! Building a query fills a match buffer. Instead of allocating a fresh
//! buffer per query, the pool keeps released queries (buffers cleared but
//! still allocated) on a free list and hands them out again.

use crate::ecs::{ComponentKey, EntityId, QueryFilter, QueryIter, Scene};

/// Handle to a query slot in a [`QueryPool`].
///
/// The generation makes a released handle useless: once the slot is handed
/// out again the old handle no longer matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryHandle {
    /// Index into the pool.
    index: u32,
    /// Generation of the slot when this handle was issued.
    generation: u32,
}

impl QueryHandle {
    /// Packs the handle into one word: generation high, index low.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | (self.index as u64)
    }

    /// Unpacks a word produced by [`QueryHandle::to_bits`].
    ///
    /// Any other value yields a handle the pool rejects.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

struct QuerySlot {
    iter: QueryIter,
    generation: u32,
    in_use: bool,
}

impl QuerySlot {
    const fn new() -> Self {
        Self {
            iter: QueryIter::new(),
            generation: 0,
            in_use: false,
        }
    }
}

/// A free-list pool of query snapshots.
///
/// Every query, filtered or not, is acquired from the pool and goes back
/// through [`QueryPool::release`]. When every slot is in use the pool
/// doubles; it never shrinks.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use one pool per runtime.
///
/// # Example
///
/// ```rust
/// use tessera_core::{EntityId, QueryPool, Scene};
///
/// let mut scene = Scene::new();
/// let entity = scene.add_entity();
///
/// let mut pool = QueryPool::new(4);
/// let query = pool.acquire_all(&scene);
/// assert_eq!(pool.next(query), entity);
/// assert_eq!(pool.next(query), EntityId::NULL);
/// pool.release(query);
/// ```
pub struct QueryPool {
    /// The storage array.
    slots: Vec<QuerySlot>,
    /// Free list - indices of available slots.
    free_list: Vec<u32>,
    /// Number of slots handed out.
    in_use: usize,
}

impl QueryPool {
    /// Creates a pool with `capacity` pre-allocated slots.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        let mut pool = Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity),
            in_use: 0,
        };
        pool.grow_to(capacity);
        pool
    }

    /// Returns the total number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of slots currently handed out.
    #[inline]
    #[must_use]
    pub const fn in_use(&self) -> usize {
        self.in_use
    }

    /// Returns the number of free slots.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    fn grow_to(&mut self, capacity: usize) {
        let old = self.slots.len();
        self.slots.resize_with(capacity, QuerySlot::new);
        // Lowest index is handed out first.
        #[allow(clippy::cast_possible_truncation)]
        let fresh = (old..capacity).rev().map(|i| i as u32);
        self.free_list.extend(fresh);
    }

    fn allocate(&mut self) -> QueryHandle {
        if self.free_list.is_empty() {
            let capacity = self.slots.len() * 2;
            tracing::debug!(from = self.slots.len(), to = capacity, "growing query pool");
            self.grow_to(capacity);
        }

        // The free list is non-empty after growth.
        let index = self.free_list.pop().unwrap_or_default();
        let slot = &mut self.slots[index as usize];
        slot.in_use = true;
        self.in_use += 1;

        QueryHandle {
            index,
            generation: slot.generation,
        }
    }

    /// Builds a snapshot of `filter` over `scene` in a recycled slot.
    pub fn acquire(&mut self, scene: &Scene, filter: QueryFilter<'_>) -> QueryHandle {
        let handle = self.allocate();
        self.slots[handle.index as usize].iter.refill(scene, filter);
        handle
    }

    /// Snapshot of the live entities carrying every component in `keys`.
    pub fn acquire_filtered(&mut self, scene: &Scene, keys: &[ComponentKey]) -> QueryHandle {
        self.acquire(scene, QueryFilter::With(keys))
    }

    /// Snapshot of every live entity.
    pub fn acquire_all(&mut self, scene: &Scene) -> QueryHandle {
        self.acquire(scene, QueryFilter::All)
    }

    /// Returns the query behind a live handle.
    #[inline]
    pub fn get_mut(&mut self, handle: QueryHandle) -> Option<&mut QueryIter> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.in_use && slot.generation == handle.generation)
            .map(|slot| &mut slot.iter)
    }

    /// Returns the next match, or `EntityId::NULL` when exhausted or when
    /// the handle was released.
    #[inline]
    pub fn next(&mut self, handle: QueryHandle) -> EntityId {
        self.get_mut(handle)
            .map_or(EntityId::NULL, QueryIter::next_entity)
    }

    /// Returns a query to the pool. Its buffer stays allocated.
    ///
    /// # Returns
    ///
    /// `false` if the handle was already released.
    pub fn release(&mut self, handle: QueryHandle) -> bool {
        let Some(slot) = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.in_use && slot.generation == handle.generation)
        else {
            return false;
        };

        slot.iter.reset();
        slot.in_use = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index);
        self.in_use -= 1;
        true
    }

    /// Acquires a query, hands it to `f`, and releases it afterwards.
    ///
    /// The slot is released even if `f` panics.
    pub fn scoped<R>(
        &mut self,
        scene: &Scene,
        filter: QueryFilter<'_>,
        f: impl FnOnce(&mut QueryIter) -> R,
    ) -> R {
        let handle = self.acquire(scene, filter);
        let mut guard = ReleaseOnDrop { pool: self, handle };
        let result = f(&mut guard.pool.slots[handle.index as usize].iter);
        drop(guard);
        result
    }

    /// Collects the matches of `filter` into `out` through a recycled slot.
    pub fn collect_into(&mut self, scene: &Scene, filter: QueryFilter<'_>, out: &mut Vec<EntityId>) {
        self.scoped(scene, filter, |iter| out.extend(iter));
    }
}

/// Releases a handle when dropped, including during unwinding.
struct ReleaseOnDrop<'p> {
    pool: &'p mut QueryPool,
    handle: QueryHandle,
}

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.pool.release(self.handle);
    }
}

impl std::fmt::Debug for QueryPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryPool")
            .field("capacity", &self.slots.len())
            .field("in_use", &self.in_use)
            .finish()
    }
}
