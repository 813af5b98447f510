//! Largest-first VLSM allocator
//!
//! Demands are sorted by host count (descending, stable) and placed one by
//! one: each takes the first free block large enough, carves the smallest
//! aligned subnet that fits from its low end, and returns the remainder to
//! the pool. There is no backtracking; a demand that fits nowhere is
//! recorded as unmet and the run continues.

use super::FreePool;
use crate::models::{
    expand_demands, AddressBlock, AllocationPlan, AllocationRecord, Demand, PlanRequest,
    UnmetDemand,
};
use crate::Result;
use tracing::{debug, info, instrument, warn};

/// Subnet allocator for one base network
///
/// Holds no state between runs; every call starts from a fresh free pool,
/// so repeated calls with the same input return identical plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VlsmAllocator {
    base: AddressBlock,
}

impl VlsmAllocator {
    pub fn new(base: AddressBlock) -> Self {
        Self { base }
    }

    /// Create an allocator from a CIDR string such as "169.128.8.0/21"
    pub fn from_cidr(cidr: &str) -> Result<Self> {
        Ok(Self::new(cidr.parse()?))
    }

    /// Base network being partitioned
    pub fn base(&self) -> AddressBlock {
        self.base
    }

    /// Allocate subnets for `hosts` plus `router_links` two-host links
    pub fn allocate(&self, hosts: &[u32], router_links: u32) -> Result<AllocationPlan> {
        self.allocate_demands(expand_demands(hosts, router_links)?)
    }

    /// Allocate an already-expanded demand list
    #[instrument(skip(self, demands), fields(base = %self.base, demands = demands.len()))]
    pub fn allocate_demands(&self, mut demands: Vec<Demand>) -> Result<AllocationPlan> {
        for demand in &demands {
            demand.validate()?;
        }

        // Largest first; sort_by is stable so equal demands keep input order
        demands.sort_by(|a, b| b.hosts.cmp(&a.hosts));

        let mut pool = FreePool::new(self.base);
        let mut allocations = Vec::with_capacity(demands.len());
        let mut unmet = Vec::new();

        for (offset, demand) in demands.iter().enumerate() {
            let index = offset + 1;
            let required = demand.required_addresses();

            let placement = pool
                .first_fit(required)
                .zip(AddressBlock::smallest_prefix_for(required));
            let Some((position, prefix_len)) = placement else {
                warn!(
                    index,
                    hosts = demand.hosts,
                    required,
                    "Cannot allocate a subnet for {} hosts",
                    demand.hosts
                );
                unmet.push(UnmetDemand::new(index, demand));
                continue;
            };

            let (block, parent) = pool.carve(position, prefix_len)?;
            debug!(
                index,
                hosts = demand.hosts,
                subnet = %block,
                parent = %parent,
                free_blocks = pool.len(),
                "Allocated subnet"
            );
            allocations.push(AllocationRecord::new(index, demand, block));
        }

        let plan = AllocationPlan::new(self.base, allocations, unmet);
        info!(
            base = %self.base,
            satisfied = plan.summary().satisfied,
            unmet = plan.summary().unmet,
            free_addresses = pool.free_addresses(),
            "Allocation complete"
        );

        Ok(plan)
    }

    /// Run a plan request end to end
    pub fn plan(request: &PlanRequest) -> Result<AllocationPlan> {
        let allocator = Self::new(request.base_block()?);
        allocator.allocate_demands(request.demands()?)
    }
}

/// Partition `base_network` for the given host counts and router links
///
/// Fails only on malformed input; unsatisfiable demands are listed in
/// [`AllocationPlan::unmet`].
pub fn allocate(base_network: &str, hosts: &[u32], router_links: u32) -> Result<AllocationPlan> {
    VlsmAllocator::from_cidr(base_network)?.allocate(hosts, router_links)
}
