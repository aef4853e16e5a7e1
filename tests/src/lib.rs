//! Shared test harness for triad integration tests.
//!
//! Small builders over the public [`Cluster`] API: clusters of a given
//! shape, aliveness choreography, and log inspection helpers used by
//! the scenario and chaos tests.

use triad_cluster::Cluster;
use triad_types::{ConsistencyMode, ReplicaId};

/// Build a cluster of `n` replicas (ids `0..n`), all alive, in the
/// default availability-first mode.
pub async fn cluster_of(n: u32) -> Cluster {
    let cluster = Cluster::new();
    for _ in 1..n {
        cluster.add_node().await;
    }
    cluster
}

/// Build a cluster of `n` replicas running in `mode`.
pub async fn cluster_in_mode(n: u32, mode: ConsistencyMode) -> Cluster {
    let cluster = cluster_of(n).await;
    cluster.set_mode(mode).await;
    cluster
}

/// Mark every id in `ids` dead.
pub async fn kill(cluster: &Cluster, ids: &[u32]) {
    for &id in ids {
        cluster
            .set_node_alive(ReplicaId::new(id), false)
            .await
            .unwrap();
    }
}

/// Mark every id in `ids` alive again.
pub async fn revive(cluster: &Cluster, ids: &[u32]) {
    for &id in ids {
        cluster
            .set_node_alive(ReplicaId::new(id), true)
            .await
            .unwrap();
    }
}

/// Commit one entry to replica `id` alone, leaving everyone alive after.
///
/// Kills every other replica, writes best-effort, then revives them.
/// The cluster must be in availability-first mode and fully alive when
/// this is called.
pub async fn fork_one(cluster: &Cluster, id: u32, data: &str) {
    let n = cluster.replica_count().await as u32;
    let others: Vec<u32> = (0..n).filter(|&i| i != id).collect();

    kill(cluster, &others).await;
    cluster.write_transaction(data).await.unwrap();
    revive(cluster, &others).await;
}

/// Per-replica log lengths, in id order.
pub async fn log_lengths(cluster: &Cluster) -> Vec<usize> {
    cluster
        .snapshot()
        .await
        .replicas
        .iter()
        .map(|r| r.entries.len())
        .collect()
}

/// Per-replica tail hashes, in id order.
pub async fn tail_hashes(cluster: &Cluster) -> Vec<String> {
    cluster
        .snapshot()
        .await
        .replicas
        .iter()
        .map(|r| r.entries.last().unwrap().hash.clone())
        .collect()
}
