//! Subnet demands and their report labels

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Usable hosts on a point-to-point router link (a /30)
pub const ROUTER_LINK_HOSTS: u32 = 2;

/// Addresses reserved in every subnet (network and broadcast)
pub const RESERVED_ADDRESSES: u64 = 2;

/// Where a demand came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandKind {
    /// A LAN segment sized by host count
    Host,
    /// A point-to-point link between two routers
    RouterLink,
}

/// A request for one subnet with at least `hosts` usable addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Demand {
    /// Usable host addresses requested
    pub hosts: u32,
    /// Origin of the demand
    pub kind: DemandKind,
}

impl Demand {
    /// A host-count demand
    pub fn host(hosts: u32) -> Self {
        Self {
            hosts,
            kind: DemandKind::Host,
        }
    }

    /// A router-link demand (always two usable hosts)
    pub fn router_link() -> Self {
        Self {
            hosts: ROUTER_LINK_HOSTS,
            kind: DemandKind::RouterLink,
        }
    }

    /// Total addresses needed including network and broadcast
    pub fn required_addresses(&self) -> u64 {
        u64::from(self.hosts) + RESERVED_ADDRESSES
    }

    /// Report label for this demand
    pub fn label(&self) -> SubnetKind {
        SubnetKind::for_hosts(self.hosts)
    }

    /// Reject demands the allocator cannot interpret
    pub fn validate(&self) -> Result<()> {
        if self.hosts == 0 {
            return Err(Error::InvalidDemand(
                "host count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand a host list plus router-link count into the full demand list
///
/// Router links are appended after the host demands, before any sorting.
pub fn expand_demands(hosts: &[u32], router_links: u32) -> Result<Vec<Demand>> {
    let demands: Vec<Demand> = hosts
        .iter()
        .map(|&h| Demand::host(h))
        .chain((0..router_links).map(|_| Demand::router_link()))
        .collect();

    for demand in &demands {
        demand.validate()?;
    }

    Ok(demands)
}

/// Type label shown for an allocated subnet
///
/// A two-host demand is always reported as a router link, whichever list it
/// came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SubnetKind {
    /// "Router Link"
    RouterLink,
    /// "Host N"
    Host(u32),
}

impl SubnetKind {
    /// Label for a demand of `hosts` usable addresses
    pub fn for_hosts(hosts: u32) -> Self {
        if hosts == ROUTER_LINK_HOSTS {
            SubnetKind::RouterLink
        } else {
            SubnetKind::Host(hosts)
        }
    }
}

impl fmt::Display for SubnetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubnetKind::RouterLink => write!(f, "Router Link"),
            SubnetKind::Host(hosts) => write!(f, "Host {}", hosts),
        }
    }
}

impl FromStr for SubnetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "Router Link" {
            return Ok(SubnetKind::RouterLink);
        }
        s.strip_prefix("Host ")
            .and_then(|n| n.parse().ok())
            .map(SubnetKind::Host)
            .ok_or_else(|| Error::InvalidDemand(format!("unknown subnet type label: {}", s)))
    }
}

impl From<SubnetKind> for String {
    fn from(kind: SubnetKind) -> Self {
        kind.to_string()
    }
}

impl TryFrom<String> for SubnetKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_addresses() {
        assert_eq!(Demand::host(380).required_addresses(), 382);
        assert_eq!(Demand::router_link().required_addresses(), 4);
        assert_eq!(
            Demand::host(u32::MAX).required_addresses(),
            u64::from(u32::MAX) + 2
        );
    }

    #[test]
    fn test_expand_appends_router_links() {
        let demands = expand_demands(&[5, 380], 2).unwrap();
        assert_eq!(
            demands,
            vec![
                Demand::host(5),
                Demand::host(380),
                Demand::router_link(),
                Demand::router_link(),
            ]
        );
    }

    #[test]
    fn test_expand_rejects_zero_hosts() {
        let result = expand_demands(&[10, 0], 1);
        assert!(matches!(result, Err(Error::InvalidDemand(_))));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Demand::router_link().label().to_string(), "Router Link");
        assert_eq!(Demand::host(61).label().to_string(), "Host 61");
        // A literal two-host LAN is labelled as a link
        assert_eq!(Demand::host(2).label(), SubnetKind::RouterLink);
    }

    #[test]
    fn test_label_parse() {
        assert_eq!("Host 33".parse::<SubnetKind>().unwrap(), SubnetKind::Host(33));
        assert_eq!(
            "Router Link".parse::<SubnetKind>().unwrap(),
            SubnetKind::RouterLink
        );
        assert!("Switch 4".parse::<SubnetKind>().is_err());
    }
}
