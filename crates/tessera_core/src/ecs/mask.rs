//! # Component Masks
//!
//! Fixed-width bitset, one bit per internal component type id.
//!
//! 256 bits are stored so the mask is four plain words; only the low
//! [`MAX_COMPONENT_TYPES`](crate::config::MAX_COMPONENT_TYPES) bits are
//! ever set because the type registry never hands out a larger id.

use std::ops::{BitAnd, BitOr};

const WORDS: usize = 4;

/// Bitset of attached component types.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComponentMask([u64; WORDS]);

impl ComponentMask {
    /// Mask with no bits set.
    pub const EMPTY: Self = Self([0; WORDS]);

    /// Number of addressable bits.
    pub const BITS: usize = WORDS * 64;

    /// Sets bit `id`.
    #[inline]
    pub fn insert(&mut self, id: usize) {
        debug_assert!(id < Self::BITS, "component id out of mask range");
        self.0[id / 64] |= 1 << (id % 64);
    }

    /// Clears bit `id`.
    #[inline]
    pub fn remove(&mut self, id: usize) {
        debug_assert!(id < Self::BITS, "component id out of mask range");
        self.0[id / 64] &= !(1 << (id % 64));
    }

    /// Tests bit `id`.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: usize) -> bool {
        id < Self::BITS && (self.0[id / 64] >> (id % 64)) & 1 == 1
    }

    /// Superset test: every bit of `other` is set in `self`.
    #[inline]
    #[must_use]
    pub fn contains_all(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(mine, theirs)| mine & theirs == *theirs)
    }

    /// Checks if no bit is set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|w| *w == 0)
    }

    /// Number of set bits.
    #[inline]
    #[must_use]
    pub fn count(&self) -> u32 {
        self.0.iter().map(|w| w.count_ones()).sum()
    }

    /// Clears every bit.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = [0; WORDS];
    }

    /// Iterates the set bit positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().enumerate().flat_map(|(word_idx, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(word_idx * 64 + bit)
            })
        })
    }
}

impl BitOr for ComponentMask {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        let mut out = self;
        for (word, other) in out.0.iter_mut().zip(rhs.0) {
            *word |= other;
        }
        out
    }
}

impl BitAnd for ComponentMask {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        let mut out = self;
        for (word, other) in out.0.iter_mut().zip(rhs.0) {
            *word &= other;
        }
        out
    }
}

impl FromIterator<usize> for ComponentMask {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut mask = Self::EMPTY;
        for id in iter {
            mask.insert(id);
        }
        mask
    }
}
