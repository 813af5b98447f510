//! Allocation results handed to callers and renderers

use super::{AddressBlock, Demand, DemandKind, SubnetKind};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// One satisfied demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRecord {
    /// 1-based position in the largest-first processing order
    pub index: usize,
    /// Report label ("Router Link" or "Host N")
    pub kind: SubnetKind,
    /// Whether the demand was a host count or a router link
    pub origin: DemandKind,
    /// Usable hosts that were requested
    pub requested_hosts: u32,
    /// Network address
    pub network: Ipv4Addr,
    /// Prefix length
    pub prefix_len: u8,
    /// Subnet mask
    pub netmask: Ipv4Addr,
    /// First usable host
    pub first_usable: Ipv4Addr,
    /// Last usable host
    pub last_usable: Ipv4Addr,
    /// Broadcast address
    pub broadcast: Ipv4Addr,
    /// Usable host capacity (block size minus 2)
    pub usable_hosts: u64,
}

impl AllocationRecord {
    /// Build the record for `demand` placed in `block`
    ///
    /// The allocator never hands out anything smaller than a /30, so the
    /// usable range always exists; a smaller block falls back to the
    /// network address for both ends.
    pub fn new(index: usize, demand: &Demand, block: AddressBlock) -> Self {
        let (first_usable, last_usable) = block
            .host_range()
            .unwrap_or((block.network(), block.network()));

        Self {
            index,
            kind: demand.label(),
            origin: demand.kind,
            requested_hosts: demand.hosts,
            network: block.network(),
            prefix_len: block.prefix_len(),
            netmask: block.netmask(),
            first_usable,
            last_usable,
            broadcast: block.broadcast(),
            usable_hosts: block.usable_hosts(),
        }
    }

    /// The allocated block
    pub fn block(&self) -> Result<AddressBlock> {
        AddressBlock::new(self.network, self.prefix_len)
    }

    /// Total addresses in the allocated block
    pub fn size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix_len))
    }

    /// Prefix in "/p" form
    pub fn prefix_label(&self) -> String {
        format!("/{}", self.prefix_len)
    }

    /// Usable range in "first - last" form
    pub fn usable_range_label(&self) -> String {
        format!("{} - {}", self.first_usable, self.last_usable)
    }
}

/// A demand no remaining free block could hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetDemand {
    /// 1-based position in the processing order
    pub index: usize,
    /// Report label
    pub kind: SubnetKind,
    /// Whether the demand was a host count or a router link
    pub origin: DemandKind,
    /// Usable hosts requested
    pub hosts: u32,
    /// Addresses needed including network and broadcast
    pub required_addresses: u64,
}

impl UnmetDemand {
    pub fn new(index: usize, demand: &Demand) -> Self {
        Self {
            index,
            kind: demand.label(),
            origin: demand.kind,
            hosts: demand.hosts,
            required_addresses: demand.required_addresses(),
        }
    }
}

/// Aggregate figures for a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Addresses in the base network
    pub base_size: u64,
    /// Demands processed (hosts plus router links)
    pub demands: usize,
    /// Demands that received a subnet
    pub satisfied: usize,
    /// Demands left without a subnet
    pub unmet: usize,
    /// Sum of requested hosts over satisfied demands
    pub requested_hosts: u64,
    /// Addresses handed out, including reserved ones
    pub allocated_addresses: u64,
    /// Usable host addresses handed out
    pub usable_addresses: u64,
    /// Addresses of the base network still free
    pub unallocated_addresses: u64,
    /// allocated / base size, in percent
    pub utilization_percent: f64,
}

/// Outcome of one allocation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    base: AddressBlock,
    allocations: Vec<AllocationRecord>,
    unmet: Vec<UnmetDemand>,
    summary: PlanSummary,
}

impl AllocationPlan {
    pub fn new(
        base: AddressBlock,
        allocations: Vec<AllocationRecord>,
        unmet: Vec<UnmetDemand>,
    ) -> Self {
        let summary = Self::summarize(&base, &allocations, &unmet);
        Self {
            base,
            allocations,
            unmet,
            summary,
        }
    }

    fn summarize(
        base: &AddressBlock,
        allocations: &[AllocationRecord],
        unmet: &[UnmetDemand],
    ) -> PlanSummary {
        let base_size = base.size();
        let allocated_addresses: u64 = allocations.iter().map(AllocationRecord::size).sum();
        let utilization_percent = allocated_addresses as f64 / base_size as f64 * 100.0;

        PlanSummary {
            base_size,
            demands: allocations.len() + unmet.len(),
            satisfied: allocations.len(),
            unmet: unmet.len(),
            requested_hosts: allocations
                .iter()
                .map(|r| u64::from(r.requested_hosts))
                .sum(),
            allocated_addresses,
            usable_addresses: allocations.iter().map(|r| r.usable_hosts).sum(),
            unallocated_addresses: base_size.saturating_sub(allocated_addresses),
            utilization_percent,
        }
    }

    /// Base network the plan was carved from
    pub fn base(&self) -> AddressBlock {
        self.base
    }

    /// Satisfied demands in processing order
    pub fn allocations(&self) -> &[AllocationRecord] {
        &self.allocations
    }

    /// Demands that could not be placed, in processing order
    pub fn unmet(&self) -> &[UnmetDemand] {
        &self.unmet
    }

    pub fn summary(&self) -> &PlanSummary {
        &self.summary
    }

    /// True when every demand received a subnet
    pub fn is_complete(&self) -> bool {
        self.unmet.is_empty()
    }

    /// Split into (records, unmet demands)
    pub fn into_parts(self) -> (Vec<AllocationRecord>, Vec<UnmetDemand>) {
        (self.allocations, self.unmet)
    }
}
