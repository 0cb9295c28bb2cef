//! # tinyscan-common
//!
//! Shared building blocks for the scanner workspace: the domain types that
//! travel between crates, the target and port expanders, and configuration.

pub mod config;
pub mod error;
pub mod network;
pub mod scanning;
