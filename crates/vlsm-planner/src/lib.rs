//! VLSM Subnet Planner
//!
//! Partitions an IPv4 base network into variable-length subnets sized to a
//! list of host demands plus a number of point-to-point router links:
//! - Demands are placed largest first
//! - Each demand takes the first free block that can hold it
//! - The smallest aligned subnet that fits is carved from that block's low end
//! - Demands that fit nowhere are reported, not fatal
//!
//! ```
//! let plan = vlsm_planner::allocate("169.128.8.0/21", &[380, 61], 3).unwrap();
//! assert_eq!(plan.allocations()[0].network.to_string(), "169.128.8.0");
//! assert!(plan.is_complete());
//! ```

pub mod allocator;
pub mod error;
pub mod models;

// Re-export core types
pub use allocator::{allocate, FreePool, VlsmAllocator};
pub use error::{Error, Result};
pub use models::{
    AddressBlock, AllocationPlan, AllocationRecord, Demand, DemandKind, PlanFormat, PlanRequest,
    PlanSummary, SubnetKind, UnmetDemand,
};
