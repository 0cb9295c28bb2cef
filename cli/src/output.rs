//! Where results end up: stdout, or a file named on the command line.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tinyscan_common::scanning::{ProbeResult, ResultSet};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSink {
    Stdout,
    File(PathBuf),
}

impl ResultSink {
    pub fn new(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::File(path),
            None => Self::Stdout,
        }
    }

    /// Emits one `<host> <port> open` line per result, sorted by host then port.
    ///
    /// A file that cannot be created or written is an error; there is no
    /// fallback to stdout.
    pub fn write(&self, results: ResultSet) -> anyhow::Result<()> {
        let results: Vec<ProbeResult> = results.into_sorted();

        match self {
            Self::Stdout => {
                let stdout = io::stdout();
                write_lines(stdout.lock(), &results).context("failed to write results to stdout")
            }
            Self::File(path) => {
                save_to_file(path, &results)
                    .with_context(|| format!("failed to write results to {}", path.display()))?;
                info!("Results saved to {}", path.display());
                Ok(())
            }
        }
    }
}

fn save_to_file(path: &Path, results: &[ProbeResult]) -> io::Result<()> {
    let file = File::create(path)?;
    write_lines(BufWriter::new(file), results)
}

fn write_lines<W: Write>(mut writer: W, results: &[ProbeResult]) -> io::Result<()> {
    for result in results {
        writeln!(writer, "{result}")?;
    }
    writer.flush()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use tinyscan_common::network::host::Host;

    fn results() -> ResultSet {
        [("10.0.0.9", 443), ("10.0.0.10", 22), ("10.0.0.9", 80)]
            .into_iter()
            .map(|(host, port)| ProbeResult {
                host: Host::from(host),
                port,
            })
            .collect()
    }

    #[test]
    fn write_lines_renders_one_result_per_line() {
        let mut buf: Vec<u8> = Vec::new();
        write_lines(&mut buf, &results().into_sorted()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "10.0.0.9 80 open\n10.0.0.9 443 open\n10.0.0.10 22 open\n"
        );
    }

    #[test]
    fn file_sink_writes_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        ResultSink::new(Some(path.clone())).write(results()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert_eq!(contents.lines().next(), Some("10.0.0.9 80 open"));
    }

    #[test]
    fn file_sink_creates_empty_file_for_empty_results() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");

        ResultSink::new(Some(path.clone())).write(ResultSet::new()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn file_sink_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("results.csv");

        let err = ResultSink::new(Some(path)).write(results()).unwrap_err();
        assert!(err.to_string().contains("failed to write results"));
    }

    #[test]
    fn sink_defaults_to_stdout() {
        assert_eq!(ResultSink::new(None), ResultSink::Stdout);
    }
}
