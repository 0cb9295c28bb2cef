//! # CIDR Blocks
//!
//! Parsing and enumeration of CIDR blocks. Enumeration walks the block as an
//! unsigned big-endian integer starting at the network address and yields
//! the usable host range only: the network and broadcast addresses are
//! never produced.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use pnet::ipnetwork::IpNetwork;

use crate::error::TargetError;

/// Largest block (in addresses) the expander is willing to enumerate.
pub const MAX_BLOCK_ADDRESSES: u128 = 1 << 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpBlock {
    network: IpNetwork,
}

impl IpBlock {
    /// Parses `addr/prefix`. Host bits in `addr` are allowed and masked off.
    pub fn parse(spec: &str) -> Result<Self, TargetError> {
        let network = spec
            .trim()
            .parse::<IpNetwork>()
            .map_err(|e| TargetError::InvalidCidr {
                spec: spec.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { network })
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// The address with every host bit cleared.
    pub fn network_addr(&self) -> IpAddr {
        self.network.network()
    }

    /// Number of addresses in the block, network and broadcast included.
    /// Saturates at `u128::MAX` for an IPv6 `/0`.
    pub fn size(&self) -> u128 {
        let host_bits: u32 = self.bits() - u32::from(self.prefix());
        1u128.checked_shl(host_bits).unwrap_or(u128::MAX)
    }

    /// Number of addresses [`IpBlock::hosts`] will yield.
    pub fn usable_len(&self) -> u128 {
        self.size().saturating_sub(2)
    }

    /// Iterates the usable host range in ascending order.
    ///
    /// Blocks with fewer than three addresses (`/31`, `/32`, `/127`, `/128`)
    /// have no usable range and yield nothing.
    pub fn hosts(&self) -> impl Iterator<Item = IpAddr> + use<> {
        let first: u128 = addr_to_u128(self.network_addr());
        let size: u128 = self.size();
        let is_v4: bool = self.network.is_ipv4();

        // (1, 0) is an empty range
        let (start, end): (u128, u128) = if size > 2 {
            (first + 1, first.saturating_add(size - 2))
        } else {
            (1, 0)
        };

        (start..=end).map(move |value| u128_to_addr(value, is_v4))
    }

    fn bits(&self) -> u32 {
        match self.network {
            IpNetwork::V4(_) => 32,
            IpNetwork::V6(_) => 128,
        }
    }
}

impl fmt::Display for IpBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_addr(), self.prefix())
    }
}

fn addr_to_u128(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u128::from(u32::from(v4)),
        IpAddr::V6(v6) => u128::from(v6),
    }
}

fn u128_to_addr(value: u128, is_v4: bool) -> IpAddr {
    if is_v4 {
        IpAddr::V4(Ipv4Addr::from(value as u32))
    } else {
        IpAddr::V6(Ipv6Addr::from(value))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
