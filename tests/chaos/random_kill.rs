//! Chaos test: rotating replica kills under write pressure.
//!
//! 5-replica cluster in availability-first mode. Background writers
//! push transactions while a churn task repeatedly kills and revives
//! replicas 1 through 4. Replica 0 is never touched, so every write
//! must land there and every read must stay answerable.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time;
use triad_integration_tests::{cluster_of, log_lengths, revive};
use triad_types::ReplicaId;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_rotating_kills_never_stall_best_effort() {
    let cluster = Arc::new(cluster_of(5).await);
    let stop = Arc::new(AtomicBool::new(false));

    // --- Churn task: kill and revive replicas 1..=4 in rotation ---
    let churn = {
        let cluster = Arc::clone(&cluster);
        let stop = Arc::clone(&stop);
        tokio::spawn(async move {
            let mut turn = 0u32;
            while !stop.load(Ordering::Relaxed) {
                let id = ReplicaId::new(1 + turn % 4);
                cluster.set_node_alive(id, false).await.unwrap();
                time::sleep(Duration::from_millis(2)).await;
                cluster.set_node_alive(id, true).await.unwrap();
                turn += 1;
            }
        })
    };

    // --- Writers: 3 tasks, 60 writes each ---
    let mut writers = Vec::new();
    for writer in 0..3u32 {
        let cluster = Arc::clone(&cluster);
        writers.push(tokio::spawn(async move {
            for i in 0..60u32 {
                let label = format!("chaos-w{writer}-{i}");
                // Replica 0 is always alive, so best-effort writes
                // cannot be rejected.
                cluster.write_transaction(&label).await.unwrap();
                let entry = cluster.read_last_block().await.unwrap();
                assert!(entry.index > 0, "read observed an empty history");
                time::sleep(Duration::from_millis(1)).await;
            }
        }));
    }

    for w in writers {
        w.await.unwrap();
    }
    stop.store(true, Ordering::Relaxed);
    churn.await.unwrap();

    // --- Invariants after the dust settles ---
    revive(&cluster, &[1, 2, 3, 4]).await;
    let lengths = log_lengths(&cluster).await;
    assert_eq!(lengths[0], 1 + 180, "replica 0 must hold every write");
    for (id, len) in lengths.iter().enumerate().skip(1) {
        assert!(
            *len <= lengths[0],
            "replica {id} holds more entries than the always-alive replica"
        );
    }
    cluster.verify_chains().await.unwrap();
}
