//! Planner data models

mod block;
mod demand;
mod record;
mod request;

pub use block::{AddressBlock, MAX_PREFIX_LEN};
pub use demand::{
    expand_demands, Demand, DemandKind, SubnetKind, RESERVED_ADDRESSES, ROUTER_LINK_HOSTS,
};
pub use record::{AllocationPlan, AllocationRecord, PlanSummary, UnmetDemand};
pub use request::{PlanFormat, PlanRequest};
