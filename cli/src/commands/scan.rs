use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use tinyscan_common::config::{Config, ScanConfig};
use tinyscan_common::network::host::Host;
use tinyscan_common::network::port::Port;
use tinyscan_common::network::target::{self, Target};
use tinyscan_common::scanning::{ProbeOutcome, ResultSet};
use tinyscan_core::network::tcp::TcpConnectProber;
use tinyscan_core::scanner::Scanner;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::mprint;
use crate::output::ResultSink;
use crate::terminal::{print, progress};

pub async fn scan(
    target: Target,
    ports: Vec<Port>,
    output: Option<PathBuf>,
    scan_cfg: ScanConfig,
    cfg: &Config,
) -> anyhow::Result<()> {
    let hosts: Vec<Host> = target::to_hosts(target)?;
    let probes: usize = hosts.len() * ports.len();

    let unit: &str = if hosts.len() == 1 { "host" } else { "hosts" };
    info!("{} {unit} and {} ports parsed successfully", hosts.len(), ports.len());
    if probes == 0 {
        warn!("Nothing to scan");
    }

    print::aligned_line("Probes", &probes.to_string());
    print::aligned_line("Concurrency", &scan_cfg.concurrency.to_string());
    let timeout: String = match scan_cfg.timeout {
        Some(limit) => format!("{}ms", limit.as_millis()),
        None => String::from("system default"),
    };
    print::aligned_line("Timeout", &timeout);

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let show_progress: bool = !(cfg.quiet || cfg.no_progress) && probes > 0;
    let pb = progress::start(probes as u64, show_progress);
    let pb_ref = pb.clone();
    let open = Arc::new(AtomicUsize::new(0));

    let scanner = Scanner::new(TcpConnectProber::from_config(&scan_cfg), scan_cfg)
        .with_cancellation(cancel.clone())
        .on_outcome(move |task, outcome| {
            pb_ref.inc(1);
            match outcome {
                ProbeOutcome::Open => {
                    let count = open.fetch_add(1, Ordering::Relaxed) + 1;
                    progress::report_open(&pb_ref, count);
                    debug!("{task} open");
                }
                ProbeOutcome::Failed(kind) => debug!("{task} {kind}"),
            }
        });

    let start_time: Instant = Instant::now();
    let results: ResultSet = scanner.scan(&hosts, &ports).await?;
    let elapsed = start_time.elapsed();

    pb.finish_and_clear();
    interrupt.abort();

    if cancel.is_cancelled() {
        warn!("Scan interrupted, results are partial");
    }

    let open_count: usize = results.len();
    ResultSink::new(output).write(results)?;

    mprint!();
    print::summary(open_count, probes, elapsed);
    Ok(())
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        warn!("Interrupt received, waiting for in-flight probes");
        cancel.cancel();
    }
}
