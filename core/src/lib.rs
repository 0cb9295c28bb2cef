//! # tinyscan-core
//!
//! The probing side of the scanner: a [`scanner::Prober`] seam with a TCP
//! connect implementation, and the bounded fan-out engine that drives it.

pub mod network;
pub mod scanner;
