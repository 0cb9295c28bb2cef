//! # Port Expansion
//!
//! Turns a port spec such as `22,80,8000-8100` into the concrete list of
//! ports to probe. Tokens are emitted in input order, ranges in ascending
//! order. Duplicates are kept.

use std::str::FromStr;

use crate::error::PortError;

pub type Port = u16;

/// An expanded port spec, parseable straight from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortList(pub Vec<Port>);

impl FromStr for PortList {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        expand(s).map(Self)
    }
}

/// Expands a comma separated list of ports and inclusive `start-end` ranges.
///
/// A reversed range such as `8000-7999` yields no ports. Any token that is not
/// an integer in `0..=65535` fails the whole expansion.
pub fn expand(spec: &str) -> Result<Vec<Port>, PortError> {
    let mut ports: Vec<Port> = Vec::new();

    for token in spec.split(',') {
        let token = token.trim();
        match token.split_once('-') {
            Some((start_str, end_str)) => {
                let start: Port = parse_port(start_str, token)?;
                let end: Port = parse_port(end_str, token)?;
                ports.extend(start..=end);
            }
            None => ports.push(parse_port(token, token)?),
        }
    }

    Ok(ports)
}

fn parse_port(s: &str, token: &str) -> Result<Port, PortError> {
    s.trim().parse::<Port>().map_err(|_| PortError::InvalidPort {
        token: token.to_string(),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
