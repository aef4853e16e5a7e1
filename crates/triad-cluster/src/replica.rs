//! A single replica: one chain log plus an aliveness flag.

use triad_chain::{ChainEntry, ChainLog};
use triad_types::ReplicaId;

/// One member of the cluster.
///
/// A replica owns its log and nothing else. It never refuses an append
/// based on its own state: deciding which replicas participate in a
/// write is the cluster engine's job, and aliveness is only mutated
/// through the cluster's guarded [`set_node_alive`] call.
///
/// [`set_node_alive`]: crate::cluster::Cluster::set_node_alive
#[derive(Debug, Clone)]
pub struct Replica {
    id: ReplicaId,
    alive: bool,
    log: ChainLog,
}

impl Replica {
    /// Create an alive replica whose log is rooted at `genesis`.
    ///
    /// Every replica in a cluster is seeded with the same genesis
    /// entry, so replicas that see the same writes hold identical
    /// chains.
    pub fn new(id: ReplicaId, genesis: ChainEntry) -> Self {
        Self {
            id,
            alive: true,
            log: ChainLog::from_genesis(genesis),
        }
    }

    /// This replica's id.
    pub fn id(&self) -> ReplicaId {
        self.id
    }

    /// Whether the caller currently considers this replica reachable.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// This replica's log.
    pub fn log(&self) -> &ChainLog {
        &self.log
    }

    /// The most recent entry in this replica's log.
    pub fn tip(&self) -> &ChainEntry {
        self.log.tip()
    }

    /// Append to this replica's own log, unconditionally.
    pub fn append_at(&mut self, data: &str, timestamp: String) -> &ChainEntry {
        self.log.append_at(data, timestamp)
    }

    /// Flip the simulated aliveness flag.
    pub(crate) fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    /// Test hook: swap in a rebuilt (possibly corrupt) log.
    #[cfg(test)]
    pub(crate) fn set_log(&mut self, log: ChainLog) {
        self.log = log;
    }
}
