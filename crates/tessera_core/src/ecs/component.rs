//! # Component Types
//!
//! Components are pure data containers with no behavior. A scene stores
//! them as raw bytes, so every component has a fixed size.
//!
//! Two ways of naming a component type exist:
//!
//! - [`ComponentKey::Type`]: derived from a Rust [`Component`] type. Two
//!   distinct Rust types never share a key.
//! - [`ComponentKey::Tag`]: a [`ComponentTag`] computed from a byte size and
//!   a 16-bit hash of a name. This is what callers across the C boundary
//!   use. Two names with equal size and colliding hash segments produce the
//!   same tag and are therefore the same component type.

use std::any::TypeId;
use std::fmt;

use bytemuck::{Pod, Zeroable};

/// FNV-1a 32-bit offset basis.
const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
/// FNV-1a 32-bit prime.
const FNV_PRIME: u32 = 16_777_619;

/// Alignment guaranteed by every component pool buffer.
pub const MAX_COMPONENT_ALIGN: usize = std::mem::align_of::<u64>();

/// Marker trait for components stored through the typed API.
///
/// Components must be:
/// - `Pod`: Plain old data, any byte image is a valid value
/// - `Zeroable`: The all-zero image is the initial value after assign
///
/// # Example
///
/// ```rust
/// use bytemuck::{Pod, Zeroable};
/// use tessera_core::Component;
///
/// #[derive(Clone, Copy, Default, Pod, Zeroable)]
/// #[repr(C)]
/// struct Position {
///     x: f32,
///     y: f32,
/// }
///
/// impl Component for Position {}
/// ```
pub trait Component: Pod + Zeroable + Send + Sync + 'static {}

/// FNV-1a hash over the bytes of `name`.
#[must_use]
pub fn hash_name(name: &str) -> u32 {
    hash_bytes(name.as_bytes())
}

/// FNV-1a hash over raw bytes.
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// Externally computed component type tag.
///
/// Layout: declared byte size in bits 16 and up, low 16 bits of
/// [`hash_name`] of the type name in bits 0..16.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(transparent)]
pub struct ComponentTag(u64);

impl ComponentTag {
    /// Derives the tag for a named component of `size` bytes.
    #[inline]
    #[must_use]
    pub fn from_name(name: &str, size: usize) -> Self {
        Self::from_hash(hash_name(name), size)
    }

    /// Derives the tag from an already computed name hash.
    #[inline]
    #[must_use]
    pub const fn from_hash(hash: u32, size: usize) -> Self {
        Self(((size as u64) << 16) | (hash & 0xFFFF) as u64)
    }

    /// Wraps a raw tag value.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw tag value.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Byte size encoded in the tag.
    #[inline]
    #[must_use]
    pub const fn size(self) -> usize {
        (self.0 >> 16) as usize
    }
}

/// Identity of a component type inside a scene's type registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKey {
    /// Registered through a Rust type.
    Type(TypeId),
    /// Registered through a size+hash tag.
    Tag(ComponentTag),
}

impl ComponentKey {
    /// Key of the Rust component type `C`.
    #[inline]
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self::Type(TypeId::of::<C>())
    }
}

impl From<ComponentTag> for ComponentKey {
    fn from(tag: ComponentTag) -> Self {
        Self::Tag(tag)
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(id) => write!(f, "{id:?}"),
            Self::Tag(tag) => write!(f, "tag {:#x}", tag.to_bits()),
        }
    }
}

/// Layout description used when a component type is first registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentInfo {
    /// Registry key.
    pub key: ComponentKey,
    /// Element size in bytes.
    pub size: usize,
    /// Element alignment in bytes.
    pub align: usize,
    /// Human readable name for logs and errors.
    pub name: &'static str,
}

impl ComponentInfo {
    /// Layout of the Rust component type `C`.
    #[must_use]
    pub fn of<C: Component>() -> Self {
        Self {
            key: ComponentKey::of::<C>(),
            size: std::mem::size_of::<C>(),
            align: std::mem::align_of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// Layout of a tagged component of `size` caller-declared bytes.
    ///
    /// The real type behind a tag is unknown, so slots get the strictest
    /// alignment a pool offers.
    #[must_use]
    pub const fn tagged(tag: ComponentTag, size: usize) -> Self {
        Self {
            key: ComponentKey::Tag(tag),
            size,
            align: MAX_COMPONENT_ALIGN,
            name: "<tagged>",
        }
    }

    /// Distance in bytes between consecutive slots in a pool.
    ///
    /// Returns None if rounding `size` up to the alignment overflows.
    #[inline]
    #[must_use]
    pub const fn stride(&self) -> Option<usize> {
        let align = if self.align == 0 { 1 } else { self.align };
        match self.size.checked_add(align - 1) {
            Some(padded) => Some(padded / align * align),
            None => None,
        }
    }

    /// Total bytes a pool of `capacity` slots needs, or None on overflow.
    #[inline]
    #[must_use]
    pub const fn pool_bytes(&self, capacity: usize) -> Option<usize> {
        match self.stride() {
            Some(stride) => stride.checked_mul(capacity),
            None => None,
        }
    }
}
