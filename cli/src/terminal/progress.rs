use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

pub(crate) static PROGRESS: OnceLock<ProgressBar> = OnceLock::new();

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Creates the probe progress bar and registers it so log lines don't tear it.
/// Returns a hidden bar when `visible` is false.
pub fn start(total: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(
        "{spinner:.blue} [{bar:32.green/bright_black}] {pos}/{len} probes {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .tick_strings(TICK_STRINGS)
    .progress_chars("━╸ ");

    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    let _ = PROGRESS.set(pb.clone());
    pb
}

pub fn report_open(pb: &ProgressBar, open: usize) {
    pb.set_message(format!("{} open", open.to_string().green().bold()));
}

/// Log sink that suspends an active progress bar while writing to stderr.
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match PROGRESS.get() {
            Some(pb) if !pb.is_finished() => pb.suspend(|| io::stderr().write_all(buf))?,
            _ => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
