//! Tests for the triad-cluster crate.


use triad_types::{ConsistencyMode, ReplicaId};

use crate::cluster::Cluster;

/// Build a cluster of `n` replicas (ids `0..n`), all alive, in the
/// default availability-first mode.
async fn cluster_of(n: u32) -> Cluster {
    let cluster = Cluster::new();
    for _ in 1..n {
        cluster.add_node().await;
    }
    cluster
}

/// Build a cluster of `n` replicas running in `mode`.
async fn cluster_in_mode(n: u32, mode: ConsistencyMode) -> Cluster {
    let cluster = cluster_of(n).await;
    cluster.set_mode(mode).await;
    cluster
}

/// Mark every id in `ids` dead.
async fn kill(cluster: &Cluster, ids: &[u32]) {
    for &id in ids {
        cluster
            .set_node_alive(ReplicaId::new(id), false)
            .await
            .unwrap();
    }
}

/// Mark every id in `ids` alive again.
async fn revive(cluster: &Cluster, ids: &[u32]) {
    for &id in ids {
        cluster
            .set_node_alive(ReplicaId::new(id), true)
            .await
            .unwrap();
    }
}

/// Per-replica log lengths, in id order.
async fn log_lengths(cluster: &Cluster) -> Vec<usize> {
    cluster
        .snapshot()
        .await
        .replicas
        .iter()
        .map(|r| r.entries.len())
        .collect()
}

/// Per-replica tail hashes, in id order.
async fn tail_hashes(cluster: &Cluster) -> Vec<String> {
    cluster
        .snapshot()
        .await
        .replicas
        .iter()
        .map(|r| r.entries.last().unwrap().hash.clone())
        .collect()
}
