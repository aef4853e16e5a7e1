//! Integration test: runtime mode switching.
//!
//! One cluster driven through all three modes mid-life. The same
//! replica state answers reads differently depending on the active
//! mode, and switching modes never touches the logs themselves.

use triad_cluster::ClusterError;
use triad_integration_tests::{cluster_of, fork_one, kill, log_lengths, revive, tail_hashes};
use triad_types::{ConsistencyMode, ReplicaId};

#[tokio::test]
async fn test_writes_survive_mode_switches() {
    let cluster = cluster_of(3).await;

    cluster.write_transaction("w-ap").await.unwrap();
    cluster.set_mode(ConsistencyMode::ConsistencyFirst).await;
    cluster.write_transaction("w-cp").await.unwrap();
    cluster.set_mode(ConsistencyMode::NoPartitionTolerance).await;
    cluster.write_transaction("w-ca").await.unwrap();

    assert_eq!(log_lengths(&cluster).await, vec![4, 4, 4]);
    let tails = tail_hashes(&cluster).await;
    assert!(tails.iter().all(|t| t == &tails[0]));

    // A healthy, agreeing cluster reads the same tail in every mode.
    for mode in ConsistencyMode::ALL {
        cluster.set_mode(mode).await;
        let entry = cluster.read_last_block().await.unwrap();
        assert_eq!(entry.data, "w-ca", "wrong tail under {mode}");
    }
}

#[tokio::test]
async fn test_same_state_reads_differently_per_mode() {
    let cluster = cluster_of(3).await;
    fork_one(&cluster, 0, "ahead").await;

    // Best effort follows the longest log.
    let entry = cluster.read_last_block().await.unwrap();
    assert_eq!(entry.data, "ahead");

    // The majority never saw that write, so consistency-first sides
    // with the shorter history.
    cluster.set_mode(ConsistencyMode::ConsistencyFirst).await;
    let entry = cluster.read_last_block().await.unwrap();
    assert!(entry.is_genesis());

    // With every replica reachable, the strict mode reads the longest.
    cluster.set_mode(ConsistencyMode::NoPartitionTolerance).await;
    let entry = cluster.read_last_block().await.unwrap();
    assert_eq!(entry.data, "ahead");
}

#[tokio::test]
async fn test_switching_to_ca_exposes_a_dead_replica() {
    let cluster = cluster_of(3).await;

    kill(&cluster, &[1]).await;
    cluster.write_transaction("best-effort").await.unwrap();

    cluster.set_mode(ConsistencyMode::NoPartitionTolerance).await;
    let err = cluster.write_transaction("strict").await.unwrap_err();
    assert!(matches!(err, ClusterError::ReplicaUnavailable(id) if id == ReplicaId::new(1)));

    revive(&cluster, &[1]).await;
    cluster.write_transaction("strict").await.unwrap();
    assert_eq!(log_lengths(&cluster).await, vec![3, 2, 3]);
}
