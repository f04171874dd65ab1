//! # Memory Management
//!
//! Recycled allocations for per-frame work.
//!
//! Query buffers are allocated on first use and then kept: releasing a
//! query returns its buffer to a free list instead of the heap.

mod pool;

pub use pool::{QueryHandle, QueryPool};
