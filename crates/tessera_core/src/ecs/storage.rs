//! # Component Pools
//!
//! Pre-allocated, type-erased storage for one component type.
//!
//! The pool uses a dense array strategy:
//! - All slots are pre-allocated at creation, one per entity slot
//! - Access is O(1) via entity slot index (no packed entity list)
//! - The buffer never grows, so slices handed out stay at a fixed address
//!   until the pool is dropped

use bytemuck::Pod;

use super::component::{ComponentInfo, MAX_COMPONENT_ALIGN};
use crate::error::{EcsError, EcsResult};

/// Byte storage for a single component type.
///
/// The backing buffer is made of `u64` words so every slot start is aligned
/// to [`MAX_COMPONENT_ALIGN`] whenever the stride is a multiple of the
/// component's alignment.
pub struct ComponentPool {
    /// The pre-allocated buffer.
    data: Box<[u64]>,
    /// Bytes per element.
    element_size: usize,
    /// Bytes between consecutive slots.
    stride: usize,
    /// Number of slots.
    capacity: usize,
    /// Type name for diagnostics.
    name: &'static str,
}

impl ComponentPool {
    /// Creates a pool of `capacity` zeroed slots laid out per `info`.
    ///
    /// # Errors
    ///
    /// - [`EcsError::UnsupportedAlignment`] if `info.align` exceeds
    ///   [`MAX_COMPONENT_ALIGN`].
    /// - [`EcsError::ComponentTooLarge`] if the buffer size overflows or
    ///   cannot be allocated.
    pub fn new(info: &ComponentInfo, capacity: usize) -> EcsResult<Self> {
        if info.align > MAX_COMPONENT_ALIGN {
            return Err(EcsError::UnsupportedAlignment {
                name: info.name,
                align: info.align,
                max: MAX_COMPONENT_ALIGN,
            });
        }

        let too_large = || EcsError::ComponentTooLarge {
            name: info.name,
            size: info.size,
            capacity,
        };
        let stride = info.stride().ok_or_else(too_large)?;
        let bytes = info.pool_bytes(capacity).ok_or_else(too_large)?;
        let words = bytes.div_ceil(std::mem::size_of::<u64>());

        let mut data = Vec::new();
        data.try_reserve_exact(words).map_err(|_| too_large())?;
        data.resize(words, 0u64);

        Ok(Self {
            data: data.into_boxed_slice(),
            element_size: info.size,
            stride,
            capacity,
            name: info.name,
        })
    }

    /// Returns the number of slots.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the element size in bytes.
    #[inline]
    #[must_use]
    pub const fn element_size(&self) -> usize {
        self.element_size
    }

    /// Returns the type name this pool was registered with.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    fn range(&self, index: usize) -> Option<std::ops::Range<usize>> {
        if index >= self.capacity {
            return None;
        }
        let start = index * self.stride;
        Some(start..start + self.element_size)
    }

    /// Returns the bytes of slot `index`, or None if out of bounds.
    ///
    /// The pool does not know which slots are in use; reading a slot whose
    /// mask bit is clear yields whatever bytes were left there.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        let range = self.range(index)?;
        Some(&bytemuck::cast_slice::<u64, u8>(&self.data)[range])
    }

    /// Returns the mutable bytes of slot `index`, or None if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        let range = self.range(index)?;
        Some(&mut bytemuck::cast_slice_mut::<u64, u8>(&mut self.data)[range])
    }

    /// Views slot `index` as a `C`.
    ///
    /// Returns None if out of bounds or if `C` does not match the element
    /// size (or alignment) of this pool.
    #[inline]
    #[must_use]
    pub fn get_as<C: Pod>(&self, index: usize) -> Option<&C> {
        bytemuck::try_from_bytes(self.get(index)?).ok()
    }

    /// Mutably views slot `index` as a `C`.
    #[inline]
    pub fn get_as_mut<C: Pod>(&mut self, index: usize) -> Option<&mut C> {
        bytemuck::try_from_bytes_mut(self.get_mut(index)?).ok()
    }

    /// Zeroes slot `index`.
    #[inline]
    pub fn zero(&mut self, index: usize) {
        if let Some(slot) = self.get_mut(index) {
            slot.fill(0);
        }
    }

    /// Copies the byte image of slot `src` into slot `dst`.
    ///
    /// Returns `false` if either index is out of bounds.
    pub fn copy_slot(&mut self, src: usize, dst: usize) -> bool {
        let (Some(from), Some(to)) = (self.range(src), self.range(dst)) else {
            return false;
        };
        bytemuck::cast_slice_mut::<u64, u8>(&mut self.data).copy_within(from, to.start);
        true
    }

    /// Zeroes every slot.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

impl std::fmt::Debug for ComponentPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentPool")
            .field("name", &self.name)
            .field("element_size", &self.element_size)
            .field("stride", &self.stride)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
