//! # Host Model
//!
//! A [`Host`] is whatever the user asked us to dial: an IPv4/IPv6 literal or
//! a hostname. The scanner never interprets it beyond handing it to the
//! resolver, so malformed entries surface as dial failures.

use std::cmp::Ordering;
use std::fmt;
use std::net::IpAddr;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Host(String);

impl Host {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the address if the host is an IP literal.
    pub fn ip(&self) -> Option<IpAddr> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<IpAddr> for Host {
    fn from(addr: IpAddr) -> Self {
        Self(addr.to_string())
    }
}

impl From<&str> for Host {
    fn from(addr: &str) -> Self {
        Self(addr.to_string())
    }
}

/// IP literals sort numerically and before hostnames, hostnames sort lexically.
impl Ord for Host {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.ip(), other.ip()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Host {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_literals_sort_numerically() {
        let mut hosts: Vec<Host> = vec!["10.0.0.10".into(), "10.0.0.2".into(), "10.0.0.1".into()];
        hosts.sort();
        let sorted: Vec<&str> = hosts.iter().map(Host::as_str).collect();
        assert_eq!(sorted, vec!["10.0.0.1", "10.0.0.2", "10.0.0.10"]);
    }

    #[test]
    fn hostnames_sort_after_addresses() {
        let mut hosts: Vec<Host> = vec!["example.com".into(), "::1".into(), "192.168.1.1".into()];
        hosts.sort();
        assert_eq!(hosts[0].as_str(), "192.168.1.1");
        assert_eq!(hosts[1].as_str(), "::1");
        assert_eq!(hosts[2].as_str(), "example.com");
    }

    #[test]
    fn ip_is_none_for_hostnames() {
        assert!(Host::from("localhost").ip().is_none());
        assert!(Host::from("127.0.0.1").ip().is_some());
    }
}
