//! Cross-crate tests: expansion feeding the real TCP prober against loopback listeners.

#[cfg(test)]
mod scan;
#[cfg(test)]
mod utils;
