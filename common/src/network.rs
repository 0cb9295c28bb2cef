//! Turning user supplied specs into concrete hosts and ports.

pub mod host;
pub mod port;
pub mod range;
pub mod target;
