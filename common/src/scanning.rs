//! # Probe Model
//!
//! The values that flow through the scan engine: one [`ProbeTask`] per
//! (host, port) pair, a terminal [`ProbeOutcome`] per task, and a
//! [`ProbeResult`] for every task that found an open port.

use std::fmt;
use std::io;

use crate::network::{host::Host, port::Port};

/// One scheduled connection attempt.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProbeTask {
    pub host: Host,
    pub port: Port,
}

impl ProbeTask {
    pub fn new(host: Host, port: Port) -> Self {
        Self { host, port }
    }
}

impl fmt::Display for ProbeTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Why a probe did not find an open port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Refused,
    TimedOut,
    Unreachable,
    /// The host name did not resolve to any address.
    Resolve,
    /// The scan was cancelled before the probe finished.
    Cancelled,
    Other,
}

impl FailureKind {
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => Self::Refused,
            io::ErrorKind::TimedOut => Self::TimedOut,
            io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
                Self::Unreachable
            }
            _ => Self::Other,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Refused => "refused",
            Self::TimedOut => "timed out",
            Self::Unreachable => "unreachable",
            Self::Resolve => "unresolved",
            Self::Cancelled => "cancelled",
            Self::Other => "failed",
        };
        f.write_str(s)
    }
}

/// Terminal state of a probe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    Open,
    Failed(FailureKind),
}

impl ProbeOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// An open port. Failed probes never produce one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProbeResult {
    pub host: Host,
    pub port: Port,
}

impl From<ProbeTask> for ProbeResult {
    fn from(task: ProbeTask) -> Self {
        Self {
            host: task.host,
            port: task.port,
        }
    }
}

/// Renders the `<host> <port> open` line used for output.
impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} open", self.host, self.port)
    }
}

/// Unordered, append-only collection of open ports.
#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    results: Vec<ProbeResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, result: ProbeResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn contains(&self, host: &Host, port: Port) -> bool {
        self.results
            .iter()
            .any(|result| &result.host == host && result.port == port)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter()
    }

    /// Consumes the set and returns its results ordered by host, then port.
    pub fn into_sorted(self) -> Vec<ProbeResult> {
        let mut results = self.results;
        results.sort();
        results
    }
}

impl IntoIterator for ResultSet {
    type Item = ProbeResult;
    type IntoIter = std::vec::IntoIter<ProbeResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl FromIterator<ProbeResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ProbeResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(host: &str, port: Port) -> ProbeResult {
        ProbeResult {
            host: Host::from(host),
            port,
        }
    }

    #[test]
    fn result_renders_as_output_line() {
        assert_eq!(result("127.0.0.1", 9001).to_string(), "127.0.0.1 9001 open");
    }

    #[test]
    fn into_sorted_orders_by_host_then_port() {
        let set: ResultSet = [
            result("10.0.0.10", 22),
            result("10.0.0.2", 443),
            result("10.0.0.2", 80),
        ]
        .into_iter()
        .collect();

        let lines: Vec<String> = set.into_sorted().iter().map(|r| r.to_string()).collect();
        assert_eq!(
            lines,
            vec!["10.0.0.2 80 open", "10.0.0.2 443 open", "10.0.0.10 22 open"]
        );
    }

    #[test]
    fn result_set_keeps_duplicates() {
        let mut set = ResultSet::new();
        set.insert(result("10.0.0.1", 80));
        set.insert(result("10.0.0.1", 80));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Host::from("10.0.0.1"), 80));
        assert!(!set.contains(&Host::from("10.0.0.1"), 81));
    }

    #[test]
    fn failure_kind_maps_io_errors() {
        let refused = io::Error::from(io::ErrorKind::ConnectionRefused);
        let timed_out = io::Error::from(io::ErrorKind::TimedOut);
        let other = io::Error::other("boom");

        assert_eq!(FailureKind::from_io(&refused), FailureKind::Refused);
        assert_eq!(FailureKind::from_io(&timed_out), FailureKind::TimedOut);
        assert_eq!(FailureKind::from_io(&other), FailureKind::Other);
    }
}
