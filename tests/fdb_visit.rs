//! Driver-backed node visits against live sockets: an unreachable store
//! fails the visit as a connect error, inside the configured timeout.

use fdbscan::config::FdbConfig;
use fdbscan::directory::DirectoryClient;
use fdbscan::error::FdbError;
use fdbscan::fdb::{FdbInspector, NodeInspector};
use fdbscan::scan::FleetScanner;
use fdbscan::types::{NodeDescriptor, NodeOutcome};
use std::net::TcpListener;
use std::time::{Duration, Instant};

/// Bind then drop a listener so the returned port refuses connections.
fn refused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn local_node() -> NodeDescriptor {
    NodeDescriptor {
        id: "fdb-instance-1".to_string(),
        address: "127.0.0.1".to_string(),
    }
}

fn short_timeout_config(port: u16) -> FdbConfig {
    FdbConfig {
        port,
        timeout_ms: 300,
        ..FdbConfig::default()
    }
}

#[tokio::test]
async fn refused_connection_fails_the_visit_within_the_timeout() {
    let inspector = FdbInspector::new(short_timeout_config(refused_port()));

    let started = Instant::now();
    let err = inspector.fetch_records(&local_node()).await.unwrap_err();
    let elapsed = started.elapsed();

    match &err {
        FdbError::Connect { address, .. } => assert_eq!(address, "127.0.0.1"),
        other => panic!("expected connect error, got {other:?}"),
    }
    assert!(err.to_string().contains("127.0.0.1"));
    // Well under the process-default TCP timeout; the 300 ms server
    // selection bound is what ends the visit.
    assert!(
        elapsed < Duration::from_secs(5),
        "visit should fail within the timeout, took {elapsed:?}"
    );
}

#[tokio::test]
async fn refused_connection_reports_down_through_the_scanner() {
    let scanner = FleetScanner::new(
        DirectoryClient::new("http://unused.invalid/instances"),
        FdbInspector::new(short_timeout_config(refused_port())),
    );

    let report = scanner.scan_nodes(&[local_node()]).await;

    assert_eq!(report.nodes.len(), 1);
    assert_eq!(report.nodes[0].outcome, NodeOutcome::Down);
}
