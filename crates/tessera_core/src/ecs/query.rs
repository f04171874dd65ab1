//! # Entity Queries
//!
//! A query selects the live entities whose mask is a superset of a target
//! mask. The match set is computed once, when the query is built: later
//! changes to masks or component data are not reflected in a query that is
//! already running.
//!
//! Queries are handed out by [`QueryPool`](crate::memory::QueryPool), which
//! keeps the match buffers allocated between uses.

use super::component::{ComponentKey, ComponentTag};
use super::entity::EntityId;
use super::mask::ComponentMask;
use super::scene::Scene;

/// Which entities a query selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryFilter<'k> {
    /// Every live entity.
    All,
    /// Live entities carrying every listed component type.
    ///
    /// An empty list matches every live entity. A key the scene has never
    /// seen matches nothing.
    With(&'k [ComponentKey]),
    /// Like [`QueryFilter::With`], naming every component by its tag.
    Tags(&'k [ComponentTag]),
}

/// Forward-only cursor over a snapshot of matching entities.
#[derive(Debug, Default)]
pub struct QueryIter {
    matches: Vec<EntityId>,
    cursor: usize,
}

impl QueryIter {
    /// Creates an empty, exhausted query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            matches: Vec::new(),
            cursor: 0,
        }
    }

    /// Builds a fresh snapshot of `filter` over `scene`.
    #[must_use]
    pub fn build(scene: &Scene, filter: QueryFilter<'_>) -> Self {
        let mut iter = Self::new();
        iter.refill(scene, filter);
        iter
    }

    /// Replaces the snapshot, reusing the match buffer.
    pub fn refill(&mut self, scene: &Scene, filter: QueryFilter<'_>) {
        self.reset();
        let target = match filter {
            QueryFilter::All => Some(ComponentMask::EMPTY),
            QueryFilter::With(keys) => scene.target_mask(keys.iter().copied()),
            QueryFilter::Tags(tags) => {
                scene.target_mask(tags.iter().map(|&tag| ComponentKey::Tag(tag)))
            }
        };
        let Some(target) = target else {
            return;
        };
        self.matches.extend(
            scene
                .entities()
                .filter(|record| record.alive && record.mask.contains_all(&target))
                .map(|record| record.id),
        );
    }

    /// Drops the snapshot but keeps the buffer allocated.
    pub fn reset(&mut self) {
        self.matches.clear();
        self.cursor = 0;
    }

    /// Returns the next match, or [`EntityId::NULL`] once exhausted.
    #[inline]
    pub fn next_entity(&mut self) -> EntityId {
        self.next().unwrap_or(EntityId::NULL)
    }

    /// Total number of matches in the snapshot.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Checks if the snapshot matched nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Number of matches not yet yielded.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.matches.len() - self.cursor
    }

    /// Allocated capacity of the match buffer.
    #[inline]
    #[must_use]
    pub fn buffer_capacity(&self) -> usize {
        self.matches.capacity()
    }
}

impl Iterator for QueryIter {
    type Item = EntityId;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.matches.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(id)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for QueryIter {}
