//! Power-of-two aligned IPv4 address blocks
//!
//! All block arithmetic is done on the `u32` form of the address. `ipnet` is
//! only used to parse and interoperate at the edges.

use crate::{Error, Result};
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Longest valid IPv4 prefix
pub const MAX_PREFIX_LEN: u8 = 32;

/// A contiguous, aligned range of IPv4 addresses (a CIDR block)
///
/// Invariant: `network` has no bits set below the prefix, so the block spans
/// exactly `2^(32 - prefix_len)` addresses starting at `network`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AddressBlock {
    /// Network address as u32 (for arithmetic and ordering)
    network: u32,
    /// Number of fixed leading bits
    prefix_len: u8,
}

impl AddressBlock {
    /// Create a block, rejecting network addresses with host bits set
    pub fn new(network: Ipv4Addr, prefix_len: u8) -> Result<Self> {
        Self::from_u32(u32::from(network), prefix_len)
    }

    /// Create a block from the u32 form of its network address
    pub fn from_u32(network: u32, prefix_len: u8) -> Result<Self> {
        if prefix_len > MAX_PREFIX_LEN {
            return Err(Error::InvalidPrefix(prefix_len));
        }
        if network & Self::host_mask(prefix_len) != 0 {
            return Err(Error::MisalignedNetwork(
                Ipv4Addr::from(network).to_string(),
                prefix_len,
            ));
        }
        Ok(Self {
            network,
            prefix_len,
        })
    }

    /// Create the block of the given prefix that contains `addr`
    ///
    /// Host bits below the prefix are cleared, so `169.128.9.7/21` becomes
    /// `169.128.8.0/21`.
    pub fn containing(addr: Ipv4Addr, prefix_len: u8) -> Result<Self> {
        if prefix_len > MAX_PREFIX_LEN {
            return Err(Error::InvalidPrefix(prefix_len));
        }
        let network = u32::from(addr) & !Self::host_mask(prefix_len);
        Ok(Self {
            network,
            prefix_len,
        })
    }

    /// Bits below the prefix (the host part)
    const fn host_mask(prefix_len: u8) -> u32 {
        match u32::MAX.checked_shr(prefix_len as u32) {
            Some(mask) => mask,
            None => 0,
        }
    }

    /// Smallest block prefix holding at least `required` addresses
    ///
    /// Returns `None` when even a /0 is too small.
    pub fn smallest_prefix_for(required: u64) -> Option<u8> {
        let bits = u64::BITS - required.saturating_sub(1).leading_zeros();
        if bits > u32::from(MAX_PREFIX_LEN) {
            return None;
        }
        Some(MAX_PREFIX_LEN - bits as u8)
    }

    /// Network address
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.network)
    }

    /// Prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Subnet mask (e.g. 255.255.254.0 for a /23)
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(!Self::host_mask(self.prefix_len))
    }

    /// Broadcast address as u32
    pub fn broadcast_u32(&self) -> u32 {
        self.network | Self::host_mask(self.prefix_len)
    }

    /// Broadcast (last) address
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.broadcast_u32())
    }

    /// Number of addresses in the block
    pub fn size(&self) -> u64 {
        1u64 << (MAX_PREFIX_LEN - self.prefix_len)
    }

    /// Addresses left once network and broadcast are reserved
    pub fn usable_hosts(&self) -> u64 {
        self.size().saturating_sub(2)
    }

    /// First and last usable host address
    ///
    /// `/31` and `/32` blocks have no usable range under the
    /// network/broadcast reservation rule.
    pub fn host_range(&self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        if self.prefix_len > 30 {
            return None;
        }
        Some((
            Ipv4Addr::from(self.network + 1),
            Ipv4Addr::from(self.broadcast_u32() - 1),
        ))
    }

    /// Check if `other` lies entirely within this block
    pub fn contains(&self, other: &AddressBlock) -> bool {
        other.prefix_len >= self.prefix_len
            && other.network & !Self::host_mask(self.prefix_len) == self.network
    }

    /// Check if an address lies within this block
    pub fn contains_addr(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & !Self::host_mask(self.prefix_len) == self.network
    }

    /// Check if two blocks share any address
    ///
    /// Aligned blocks either nest or are disjoint.
    pub fn overlaps(&self, other: &AddressBlock) -> bool {
        self.contains(other) || other.contains(self)
    }

    /// Split into lower and upper halves, or `None` for a /32
    pub fn halves(&self) -> Option<(AddressBlock, AddressBlock)> {
        if self.prefix_len == MAX_PREFIX_LEN {
            return None;
        }
        let prefix_len = self.prefix_len + 1;
        let upper_bit = 1u32 << (MAX_PREFIX_LEN - prefix_len);
        Some((
            AddressBlock {
                network: self.network,
                prefix_len,
            },
            AddressBlock {
                network: self.network | upper_bit,
                prefix_len,
            },
        ))
    }

    /// Lowest-addressed sub-block of the given prefix
    pub fn first_subnet(&self, prefix_len: u8) -> Option<AddressBlock> {
        if prefix_len < self.prefix_len || prefix_len > MAX_PREFIX_LEN {
            return None;
        }
        Some(AddressBlock {
            network: self.network,
            prefix_len,
        })
    }

    /// Blocks covering this block minus `sub`
    ///
    /// Walks down from this block towards `sub`, halving at each level and
    /// keeping the half that is not on the path. Fragments come out largest
    /// first; there are exactly `sub.prefix_len - self.prefix_len` of them.
    pub fn exclude(&self, sub: &AddressBlock) -> Result<Vec<AddressBlock>> {
        if !self.contains(sub) {
            return Err(Error::BlockOutOfRange(sub.to_string(), self.to_string()));
        }

        let mut fragments = Vec::with_capacity(usize::from(sub.prefix_len - self.prefix_len));
        let mut current = *self;
        while current != *sub {
            let Some((lower, upper)) = current.halves() else {
                break;
            };
            if lower.contains(sub) {
                fragments.push(upper);
                current = lower;
            } else {
                fragments.push(lower);
                current = upper;
            }
        }

        Ok(fragments)
    }
}

impl fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix_len)
    }
}

impl FromStr for AddressBlock {
    type Err = Error;

    /// Parse `a.b.c.d/p`, `a.b.c.d/m.m.m.m` or a bare `a.b.c.d` (a /32)
    ///
    /// A dotted mask is read as a netmask first, then as a hostmask
    /// (`0.0.0.255` is a /24). Host bits below the prefix are truncated
    /// rather than rejected.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once('/') {
            None => {
                let addr = Ipv4Addr::from_str(s)?;
                Self::containing(addr, MAX_PREFIX_LEN)
            }
            Some((addr, mask)) if mask.contains('.') => {
                let addr = Ipv4Addr::from_str(addr)?;
                let mask = Ipv4Addr::from_str(mask)?;
                let prefix_len = ipnet::ipv4_mask_to_prefix(mask).or_else(|_| {
                    ipnet::ipv4_mask_to_prefix(Ipv4Addr::from(!u32::from(mask)))
                })?;
                Self::containing(addr, prefix_len)
            }
            Some(_) => Ok(Ipv4Net::from_str(s)?.trunc().into()),
        }
    }
}

impl From<Ipv4Net> for AddressBlock {
    fn from(net: Ipv4Net) -> Self {
        let net = net.trunc();
        Self {
            network: u32::from(net.network()),
            prefix_len: net.prefix_len(),
        }
    }
}

impl From<AddressBlock> for Ipv4Net {
    fn from(block: AddressBlock) -> Self {
        Ipv4Net::new_assert(block.network(), block.prefix_len)
    }
}

impl From<AddressBlock> for String {
    fn from(block: AddressBlock) -> Self {
        block.to_string()
    }
}

impl TryFrom<String> for AddressBlock {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
