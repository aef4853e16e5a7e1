//! Point-in-time cluster views for diagnostics and rendering.

use serde::Serialize;
use triad_chain::ChainEntry;
use triad_types::{ConsistencyMode, ReplicaId};

/// A non-mutating view of the whole cluster at one instant.
///
/// Taken under the cluster lock, so the view is internally consistent:
/// no replica appears mid-append and the mode matches the logs shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterSnapshot {
    /// Mode active when the snapshot was taken.
    pub mode: ConsistencyMode,
    /// One view per replica, in id order.
    pub replicas: Vec<ReplicaSnapshot>,
}

/// A view of one replica: id, aliveness, and its full log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplicaSnapshot {
    /// The replica's id.
    pub id: ReplicaId,
    /// Whether the replica was marked alive.
    pub alive: bool,
    /// The replica's entries, genesis first.
    pub entries: Vec<ChainEntry>,
}

impl ClusterSnapshot {
    /// Number of replicas marked alive in this view.
    pub fn alive_count(&self) -> usize {
        self.replicas.iter().filter(|r| r.alive).count()
    }
}
