#![cfg(test)]
use std::io::Write;
use std::time::Duration;

use tinyscan_common::config::ScanConfig;
use tinyscan_common::network::host::Host;
use tinyscan_common::network::{port, target};
use tinyscan_common::scanning::ResultSet;
use tinyscan_core::network::tcp::TcpConnectProber;
use tinyscan_core::scanner::Scanner;

use crate::utils::{FakeService, closed_port};

fn scanner() -> Scanner<TcpConnectProber> {
    let cfg = ScanConfig::new(64, Some(Duration::from_millis(500)));
    Scanner::new(TcpConnectProber::from_config(&cfg), cfg)
}

async fn run(target_spec: &str, port_spec: &str) -> ResultSet {
    let hosts = target::expand(target_spec).expect("target spec should expand");
    let ports = port::expand(port_spec).expect("port spec should expand");
    scanner().scan(&hosts, &ports).await.expect("scan should complete")
}

/// One listener, one closed port: exactly one open record comes back.
#[tokio::test]
async fn scan_reports_single_listener() {
    let service = FakeService::start().await;
    let closed = closed_port().await;

    let results = run("127.0.0.1", &format!("{},{}", service.port, closed)).await;

    let lines: Vec<String> = results.iter().map(|r| r.to_string()).collect();
    assert_eq!(lines, vec![format!("127.0.0.1 {} open", service.port)]);
}

#[tokio::test]
async fn scan_of_closed_ports_is_empty() {
    let first = closed_port().await;
    let second = closed_port().await;

    let results = run("127.0.0.1", &format!("{first},{second}")).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn scan_reads_hosts_from_file() {
    let service = FakeService::start().await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "127.0.0.1").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "localhost").unwrap();

    let results = run(file.path().to_str().unwrap(), &service.port.to_string()).await;

    assert_eq!(results.len(), 2);
    assert!(results.contains(&Host::from("127.0.0.1"), service.port));
    assert!(results.contains(&Host::from("localhost"), service.port));
}

#[tokio::test]
async fn scan_of_missing_host_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts.txt");

    let results = run(path.to_str().unwrap(), "80").await;
    assert!(results.is_empty());
}

#[tokio::test]
#[cfg(target_os = "linux")]
async fn scan_cidr_block_over_loopback() {
    let service = FakeService::start().await;

    // 127.0.0.0/30 expands to 127.0.0.1 and 127.0.0.2; only the first listens.
    let results = run("127.0.0.0/30", &service.port.to_string()).await;

    let lines: Vec<String> = results.iter().map(|r| r.to_string()).collect();
    assert_eq!(lines, vec![format!("127.0.0.1 {} open", service.port)]);
}

#[tokio::test]
async fn scan_range_finds_every_listener() {
    let services = [
        FakeService::start().await,
        FakeService::start().await,
        FakeService::start().await,
    ];
    let spec: String = services
        .iter()
        .map(|s| s.port.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let results = run("127.0.0.1", &spec).await;

    assert_eq!(results.len(), services.len());
    let sorted = results.into_sorted();
    assert!(sorted.windows(2).all(|w| w[0].port <= w[1].port));
}

#[tokio::test]
async fn scan_absorbs_unresolvable_hosts() {
    let service = FakeService::start().await;

    let results = run(
        "does-not-exist.invalid,127.0.0.1",
        &service.port.to_string(),
    )
    .await;

    assert_eq!(results.len(), 1);
    assert!(results.contains(&Host::from("127.0.0.1"), service.port));
}

#[test]
fn invalid_specs_fail_before_scanning() {
    assert!(target::expand("10.0.0.0/99").is_err());
    assert!(port::expand("22,ssh").is_err());
}
