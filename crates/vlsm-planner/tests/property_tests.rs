//! Property tests for allocation invariants

use proptest::prelude::*;
use std::net::Ipv4Addr;
use vlsm_planner::{allocate, AddressBlock, AllocationPlan, SubnetKind, VlsmAllocator};

fn base_block() -> impl Strategy<Value = AddressBlock> {
    (any::<u32>(), 16u8..=30).prop_map(|(addr, prefix)| {
        AddressBlock::containing(Ipv4Addr::from(addr), prefix).unwrap()
    })
}

fn host_demands() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..=5000, 0..16)
}

/// Placements and failures with the demand origin left out
fn outcome(plan: &AllocationPlan) -> (Vec<(usize, SubnetKind, AddressBlock)>, Vec<(usize, u32)>) {
    let placed = plan
        .allocations()
        .iter()
        .map(|r| (r.index, r.kind, r.block().unwrap()))
        .collect();
    let unmet = plan.unmet().iter().map(|u| (u.index, u.hosts)).collect();
    (placed, unmet)
}

fn run(base: AddressBlock, hosts: &[u32], router_links: u32) -> AllocationPlan {
    VlsmAllocator::new(base)
        .allocate(hosts, router_links)
        .unwrap()
}

proptest! {
    #[test]
    fn prop_allocations_are_disjoint(base in base_block(), hosts in host_demands(), links in 0u32..6) {
        let plan = run(base, &hosts, links);
        let blocks: Vec<AddressBlock> = plan
            .allocations()
            .iter()
            .map(|r| r.block().unwrap())
            .collect();

        for (i, a) in blocks.iter().enumerate() {
            for b in &blocks[i + 1..] {
                prop_assert!(!a.overlaps(b), "{} overlaps {}", a, b);
            }
        }
    }

    #[test]
    fn prop_allocations_within_base(base in base_block(), hosts in host_demands(), links in 0u32..6) {
        let plan = run(base, &hosts, links);

        for record in plan.allocations() {
            prop_assert!(base.contains(&record.block().unwrap()));
        }
        prop_assert!(plan.summary().allocated_addresses <= base.size());
    }

    #[test]
    fn prop_prefix_is_minimal(base in base_block(), hosts in host_demands(), links in 0u32..6) {
        let plan = run(base, &hosts, links);

        for record in plan.allocations() {
            let hosts = u64::from(record.requested_hosts);
            prop_assert!(record.usable_hosts >= hosts);
            // One prefix longer would be too small
            prop_assert!(record.prefix_len == 32 || (record.size() / 2).saturating_sub(2) < hosts);
        }
    }

    #[test]
    fn prop_every_demand_accounted_for(base in base_block(), hosts in host_demands(), links in 0u32..6) {
        let plan = run(base, &hosts, links);
        let total = hosts.len() + links as usize;

        prop_assert_eq!(plan.allocations().len() + plan.unmet().len(), total);

        let mut indexes: Vec<usize> = plan
            .allocations()
            .iter()
            .map(|r| r.index)
            .chain(plan.unmet().iter().map(|u| u.index))
            .collect();
        indexes.sort_unstable();
        prop_assert_eq!(indexes, (1..=total).collect::<Vec<_>>());
    }

    #[test]
    fn prop_processed_largest_first(base in base_block(), hosts in host_demands(), links in 0u32..6) {
        let plan = run(base, &hosts, links);

        let mut by_index: Vec<(usize, u32)> = plan
            .allocations()
            .iter()
            .map(|r| (r.index, r.requested_hosts))
            .chain(plan.unmet().iter().map(|u| (u.index, u.hosts)))
            .collect();
        by_index.sort_unstable();
        prop_assert!(by_index.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn prop_input_order_irrelevant(base in base_block(), hosts in host_demands(), links in 0u32..6) {
        let mut reversed = hosts.clone();
        reversed.reverse();

        prop_assert_eq!(run(base, &hosts, links), run(base, &reversed, links));
    }

    #[test]
    fn prop_router_links_are_twos(base in base_block(), hosts in host_demands(), links in 0u32..6) {
        let mut literal = hosts.clone();
        literal.extend(std::iter::repeat(2).take(links as usize));

        prop_assert_eq!(
            outcome(&run(base, &hosts, links)),
            outcome(&run(base, &literal, 0))
        );
    }

    #[test]
    fn prop_deterministic(base in base_block(), hosts in host_demands(), links in 0u32..6) {
        let cidr = base.to_string();
        let first = allocate(&cidr, &hosts, links).unwrap();
        let second = allocate(&cidr, &hosts, links).unwrap();

        prop_assert_eq!(first, second);
    }
}
