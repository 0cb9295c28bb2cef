//! # Scan Target Model
//!
//! Defines the possible inputs for a scan and expands them into hosts.
//!
//! A target spec can be:
//! * A path to a text file with one host per line.
//! * A CIDR block (e.g., `192.168.1.0/24`), expanded to its usable hosts.
//! * A comma separated list of addresses or hostnames.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::TargetError;
use crate::network::host::Host;
use crate::network::range::{IpBlock, MAX_BLOCK_ADDRESSES};

/// Represents a parsed, not yet expanded, target spec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Read hosts from a newline delimited file.
    File { path: PathBuf },
    /// Every usable host in a CIDR block.
    Cidr { block: IpBlock },
    /// Literal hosts, passed through untouched.
    List { hosts: Vec<Host> },
}

impl FromStr for Target {
    type Err = TargetError;

    /// Classifies a target spec. The first matching form wins:
    /// * **File**: names an existing file, or ends in `.txt`.
    /// * **CIDR**: contains a `/`.
    /// * **List**: anything else, split on `,`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(target) = parse_file(s) {
            return Ok(target);
        }

        if let Some(target) = parse_cidr(s)? {
            return Ok(target);
        }

        Ok(parse_commas(s))
    }
}

/// Parses and expands a target spec in one step.
pub fn expand(spec: &str) -> Result<Vec<Host>, TargetError> {
    to_hosts(spec.parse::<Target>()?)
}

/// Expands a parsed target into the ordered list of hosts to scan.
///
/// An unreadable host file is reported and treated as an empty target so the
/// scan can proceed. Oversized CIDR blocks are rejected.
pub fn to_hosts(target: Target) -> Result<Vec<Host>, TargetError> {
    let hosts: Vec<Host> = match target {
        Target::File { path } => match read_host_file(&path) {
            Ok(hosts) => hosts,
            Err(e) => {
                warn!("{e}");
                Vec::new()
            }
        },
        Target::Cidr { block } => {
            if block.size() > MAX_BLOCK_ADDRESSES {
                return Err(TargetError::BlockTooLarge {
                    spec: block.to_string(),
                    size: block.size(),
                    limit: MAX_BLOCK_ADDRESSES,
                });
            }
            if block.usable_len() == 0 {
                debug!("{block} has no usable host addresses");
            }
            block.hosts().map(Host::from).collect()
        }
        Target::List { hosts } => hosts,
    };

    debug!("target expanded to {} hosts", hosts.len());
    Ok(hosts)
}

/// Reads a host file. Lines are trimmed and blank lines are dropped.
pub fn read_host_file(path: &Path) -> Result<Vec<Host>, TargetError> {
    let contents: String = fs::read_to_string(path).map_err(|source| TargetError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let hosts: Vec<Host> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Host::from)
        .collect();

    Ok(hosts)
}

fn parse_file(s: &str) -> Option<Target> {
    let path: &Path = Path::new(s);
    if path.is_file() || s.ends_with(".txt") {
        return Some(Target::File {
            path: path.to_path_buf(),
        });
    }
    None
}

/// Parses CIDR notation like "192.168.1.0/24".
fn parse_cidr(s: &str) -> Result<Option<Target>, TargetError> {
    if !s.contains('/') {
        return Ok(None);
    }

    let block: IpBlock = IpBlock::parse(s)?;
    Ok(Some(Target::Cidr { block }))
}

/// Parses a comma separated list like "10.0.0.1, example.com".
fn parse_commas(s: &str) -> Target {
    let hosts: Vec<Host> = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Host::from)
        .collect();

    Target::List { hosts }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
