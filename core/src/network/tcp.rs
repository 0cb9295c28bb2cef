use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tinyscan_common::config::ScanConfig;
use tinyscan_common::network::port::Port;
use tinyscan_common::scanning::{FailureKind, ProbeOutcome, ProbeTask};
use tokio::net::{TcpStream, lookup_host};
use tokio::time::timeout;

use crate::scanner::Prober;

/// Full TCP handshake prober. A port is open when `connect` succeeds; the
/// stream is closed right away.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnectProber {
    probe_timeout: Option<Duration>,
}

impl TcpConnectProber {
    pub fn new(probe_timeout: Option<Duration>) -> Self {
        Self { probe_timeout }
    }

    pub fn from_config(cfg: &ScanConfig) -> Self {
        Self::new(cfg.timeout)
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, task: &ProbeTask) -> ProbeOutcome {
        let attempt = handshake(task.host.as_str(), task.port);

        let result: Result<(), FailureKind> = match self.probe_timeout {
            Some(limit) => match timeout(limit, attempt).await {
                Ok(res) => res,
                Err(_elapsed) => Err(FailureKind::TimedOut),
            },
            None => attempt.await,
        };

        match result {
            Ok(()) => ProbeOutcome::Open,
            Err(kind) => ProbeOutcome::Failed(kind),
        }
    }
}

/// Resolves `host` and completes a handshake with the first address that accepts.
pub async fn handshake(host: &str, port: Port) -> Result<(), FailureKind> {
    let addrs: Vec<SocketAddr> = lookup_host((host, port))
        .await
        .map_err(|_| FailureKind::Resolve)?
        .collect();

    if addrs.is_empty() {
        return Err(FailureKind::Resolve);
    }

    let stream: TcpStream = TcpStream::connect(&addrs[..])
        .await
        .map_err(|e| FailureKind::from_io(&e))?;
    drop(stream);

    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
