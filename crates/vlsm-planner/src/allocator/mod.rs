//! Subnet allocation
//!
//! - [`FreePool`]: ordered first-fit pool of free blocks
//! - [`VlsmAllocator`]: largest-first placement of host demands

mod free_pool;
mod vlsm_allocator;

pub use free_pool::FreePool;
pub use vlsm_allocator::{allocate, VlsmAllocator};
