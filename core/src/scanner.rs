//! The central **scan engine**.
//!
//! Every (host, port) pair of the cross product becomes one [`ProbeTask`].
//! Tasks are spawned onto the tokio runtime, gated by a semaphore so that no
//! more than [`ScanConfig::concurrency`] probes exist at once. Open ports are
//! funneled over a channel to a single collector task which owns the
//! [`ResultSet`].
//!
//! **Completion guarantee:**
//! [`Scanner::scan`] returns only after every spawned probe reached a
//! terminal state and the collector drained the channel. Cancellation stops
//! scheduling new probes and resolves in-flight probes as cancelled, but the
//! engine still joins all of them before returning.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use tinyscan_common::config::ScanConfig;
use tinyscan_common::network::{host::Host, port::Port};
use tinyscan_common::scanning::{FailureKind, ProbeOutcome, ProbeResult, ProbeTask, ResultSet};

const RESULT_CHANNEL_SIZE: usize = 1_024;

/// Strategy for deciding whether a single (host, port) pair is open.
///
/// Implementations absorb every error into [`ProbeOutcome::Failed`]; a probe
/// never aborts the scan.
#[async_trait]
pub trait Prober: Send + Sync + 'static {
    async fn probe(&self, task: &ProbeTask) -> ProbeOutcome;
}

/// Invoked once per task with its terminal outcome.
pub type OutcomeCallback = Arc<dyn Fn(&ProbeTask, &ProbeOutcome) + Send + Sync>;

pub struct Scanner<P: Prober> {
    prober: Arc<P>,
    cfg: ScanConfig,
    cancel: CancellationToken,
    on_outcome: Option<OutcomeCallback>,
}

impl<P: Prober> Scanner<P> {
    pub fn new(prober: P, cfg: ScanConfig) -> Self {
        Self {
            prober: Arc::new(prober),
            cfg,
            cancel: CancellationToken::new(),
            on_outcome: None,
        }
    }

    /// Attaches a token that stops the scan early when cancelled.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Registers a hook that observes every terminal outcome, failures included.
    pub fn on_outcome<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProbeTask, &ProbeOutcome) + Send + Sync + 'static,
    {
        self.on_outcome = Some(Arc::new(callback));
        self
    }

    /// Probes every (host, port) pair, hosts outer and ports inner.
    pub async fn scan(&self, hosts: &[Host], ports: &[Port]) -> anyhow::Result<ResultSet> {
        let total: usize = hosts.len() * ports.len();
        debug!(
            "scheduling {total} probes, at most {} in flight",
            self.cfg.concurrency
        );

        let (result_tx, result_rx) = mpsc::channel::<ProbeResult>(RESULT_CHANNEL_SIZE);
        let collector = tokio::spawn(collect(result_rx));

        let semaphore = Arc::new(Semaphore::new(self.cfg.concurrency));
        let mut probes: JoinSet<()> = JoinSet::new();
        let mut scheduled: usize = 0;

        'schedule: for host in hosts {
            for &port in ports {
                let permit = tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => break 'schedule,
                    permit = Arc::clone(&semaphore).acquire_owned() => {
                        permit.context("probe semaphore closed")?
                    }
                };

                let task = ProbeTask::new(host.clone(), port);
                let prober = Arc::clone(&self.prober);
                let cancel = self.cancel.clone();
                let result_tx = result_tx.clone();
                let on_outcome = self.on_outcome.clone();

                probes.spawn(async move {
                    let _permit = permit;

                    // A panicking prober must still yield a terminal outcome.
                    let mut attempt = {
                        let task = task.clone();
                        tokio::spawn(async move { prober.probe(&task).await })
                    };

                    let outcome: ProbeOutcome = tokio::select! {
                        joined = &mut attempt => joined.unwrap_or_else(|e| {
                            warn!("{task} attempt failed: {e}");
                            ProbeOutcome::Failed(FailureKind::Other)
                        }),
                        _ = cancel.cancelled() => {
                            attempt.abort();
                            ProbeOutcome::Failed(FailureKind::Cancelled)
                        }
                    };

                    if let Some(callback) = &on_outcome {
                        callback(&task, &outcome);
                    }

                    if outcome.is_open() {
                        // The collector outlives every producer.
                        let _ = result_tx.send(ProbeResult::from(task)).await;
                    }
                });
                scheduled += 1;

                while let Some(res) = probes.try_join_next() {
                    reap(res);
                }
            }
        }

        drop(result_tx);

        while let Some(res) = probes.join_next().await {
            reap(res);
        }

        let results: ResultSet = collector.await.context("result collector failed")?;

        if scheduled < total {
            warn!("scan cancelled after scheduling {scheduled} of {total} probes");
        }
        debug!("{scheduled} probes finished, {} open", results.len());

        Ok(results)
    }
}

async fn collect(mut result_rx: mpsc::Receiver<ProbeResult>) -> ResultSet {
    let mut results = ResultSet::new();
    while let Some(result) = result_rx.recv().await {
        results.insert(result);
    }
    results
}

fn reap(res: Result<(), JoinError>) {
    if let Err(e) = res {
        warn!("probe task failed: {e}");
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
