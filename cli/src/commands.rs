pub mod scan;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tinyscan_common::config::{Config, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_MS, ScanConfig};
use tinyscan_common::network::port::PortList;
use tinyscan_common::network::target::Target;

#[derive(Parser, Debug)]
#[command(name = "tinyscan", version)]
#[command(about = "A small concurrent TCP connect scanner.")]
pub struct CommandLine {
    /// Target IPs (comma-separated), CIDR notation, or path to a text file with one host per line
    #[arg(short, long)]
    pub target: Option<Target>,

    /// Port(s) to scan (e.g., 80,443 or 1-1024)
    #[arg(short, long)]
    pub ports: Option<PortList>,

    /// Save results to this file instead of printing them
    #[arg(short, long, short_alias = 'c', alias = "csv")]
    pub output: Option<PathBuf>,

    /// Maximum number of connection attempts in flight
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-probe timeout in milliseconds, 0 leaves it to the operating system
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Only print results and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every probe outcome
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long)]
    pub no_banner: bool,

    /// Do not draw the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn print_usage() -> std::io::Result<()> {
        Self::command().print_help()
    }

    pub fn config(&self) -> Config {
        Config {
            no_banner: self.no_banner,
            quiet: self.quiet,
            verbose: self.verbose,
            no_progress: self.no_progress,
        }
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::from_millis(self.concurrency, self.timeout)
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
