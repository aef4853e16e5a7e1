//! Error types for cluster operations.

use triad_chain::ChainError;
use triad_types::ReplicaId;

/// Errors produced by cluster configuration and the write/read protocols.
///
/// Every variant is recoverable: a failed call has mutated nothing, so
/// the caller can correct the topology or mode and retry. Write-path
/// errors are raised before any replica append.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// A setup call named a replica id the cluster has never created.
    #[error("unknown replica id {0}")]
    UnknownReplica(ReplicaId),

    /// No replica is alive; availability-first needs at least one.
    #[error("no alive replica in the cluster")]
    NoAliveReplica,

    /// No-partition-tolerance requires every replica, and this one is down.
    #[error("replica {0} is unavailable")]
    ReplicaUnavailable(ReplicaId),

    /// Fewer than `need` replicas are alive, or the largest group of
    /// replicas agreeing on a tail musters only `have` members.
    #[error("quorum not reached: have {have} of {need} required replicas")]
    QuorumNotReached { have: usize, need: usize },

    /// A replica's log failed an integrity audit.
    #[error("replica {id} holds a corrupt chain")]
    CorruptReplica {
        id: ReplicaId,
        #[source]
        source: ChainError,
    },
}
