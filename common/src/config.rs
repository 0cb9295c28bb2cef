use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 512;
/// Upper bound on in-flight probes; well below any descriptor limit and the
/// semaphore permit limit.
pub const MAX_CONCURRENCY: usize = 65_536;
pub const DEFAULT_TIMEOUT_MS: u64 = 1_500;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);

/// Presentation flags shared by the terminal front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub no_banner: bool,
    /// Only results and errors are printed.
    pub quiet: bool,
    /// Per-probe failures are logged at debug level.
    pub verbose: bool,
    pub no_progress: bool,
}

/// Knobs for the scan engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Maximum number of probes in flight at once, in `1..=MAX_CONCURRENCY`.
    pub concurrency: usize,
    /// Per-probe deadline covering resolution and connect. `None` leaves it
    /// to the operating system.
    pub timeout: Option<Duration>,
}

impl ScanConfig {
    pub fn new(concurrency: usize, timeout: Option<Duration>) -> Self {
        Self {
            concurrency: concurrency.clamp(1, MAX_CONCURRENCY),
            timeout,
        }
    }

    /// Builds a config from CLI style values, where a timeout of `0` disables it.
    pub fn from_millis(concurrency: usize, timeout_ms: u64) -> Self {
        let timeout = (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms));
        Self::new(concurrency, timeout)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY, Some(DEFAULT_TIMEOUT))
    }
}
