//! The cluster engine: replicas, a mode, and the write/read protocols.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use triad_chain::{ChainEntry, rfc3339_now};
use triad_types::{ConsistencyMode, ReplicaId};

use crate::error::ClusterError;
use crate::quorum::{self, majority};
use crate::replica::Replica;
use crate::snapshot::{ClusterSnapshot, ReplicaSnapshot};

type Result<T> = std::result::Result<T, ClusterError>;

/// A fixed set of in-memory replicas governed by one consistency mode.
///
/// The cluster owns a single lock for its whole lifetime, and every
/// operation (writes, reads, topology and mode changes, diagnostics)
/// serializes on it. A read can therefore never observe a replica
/// mid-append, and an aliveness change can never race an in-flight
/// write. `Cluster` is `Send + Sync`; share it behind an `Arc` to drive
/// it from several tasks.
///
/// A new cluster starts with one alive replica (id 0) in
/// [`ConsistencyMode::AvailabilityFirst`].
#[derive(Debug)]
pub struct Cluster {
    inner: Mutex<ClusterInner>,
}

#[derive(Debug)]
struct ClusterInner {
    mode: ConsistencyMode,
    genesis: ChainEntry,
    replicas: Vec<Replica>,
}

impl Cluster {
    /// Create a cluster with one alive replica in availability-first mode.
    ///
    /// The genesis entry minted here is shared by every replica the
    /// cluster will ever hold, so replicas that see the same writes
    /// hold identical chains.
    pub fn new() -> Self {
        let genesis = ChainEntry::genesis("");
        Self {
            inner: Mutex::new(ClusterInner {
                mode: ConsistencyMode::AvailabilityFirst,
                replicas: vec![Replica::new(ReplicaId::new(0), genesis.clone())],
                genesis,
            }),
        }
    }

    /// Add a replica rooted at the cluster's genesis and return its id.
    ///
    /// Ids follow creation order: the new replica's id equals the
    /// replica count before the call.
    pub async fn add_node(&self) -> ReplicaId {
        let mut inner = self.inner.lock().await;
        let id = ReplicaId::new(inner.replicas.len() as u32);
        let genesis = inner.genesis.clone();
        inner.replicas.push(Replica::new(id, genesis));
        info!(%id, total = inner.replicas.len(), "replica added");
        id
    }

    /// Switch the active consistency mode.
    ///
    /// [`ConsistencyMode`] is a closed enumeration, so there is no
    /// invalid value to reject here; unknown mode names fail earlier, at
    /// parse time.
    pub async fn set_mode(&self, mode: ConsistencyMode) {
        let mut inner = self.inner.lock().await;
        info!(from = %inner.mode, to = %mode, "consistency mode changed");
        inner.mode = mode;
    }

    /// The active consistency mode.
    pub async fn mode(&self) -> ConsistencyMode {
        self.inner.lock().await.mode
    }

    /// Mark a replica alive or dead.
    ///
    /// The flag only affects which replicas the protocols select from
    /// now on; existing log contents are untouched.
    pub async fn set_node_alive(&self, id: ReplicaId, alive: bool) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let replica = inner.replica_mut(id)?;
        replica.set_alive(alive);
        info!(%id, alive, "replica aliveness changed");
        Ok(())
    }

    /// Append `data` according to the active mode's write protocol.
    ///
    /// Eligibility is checked entirely before any replica is mutated, so
    /// a failed write never leaves a partial append.
    pub async fn write_transaction(&self, data: &str) -> Result<()> {
        self.inner.lock().await.write(data)
    }

    /// Resolve the current tail entry according to the active mode's
    /// read protocol.
    pub async fn read_last_block(&self) -> Result<ChainEntry> {
        self.inner.lock().await.read()
    }

    /// Total number of replicas, alive or not.
    pub async fn replica_count(&self) -> usize {
        self.inner.lock().await.replicas.len()
    }

    /// Number of replicas currently marked alive.
    pub async fn alive_count(&self) -> usize {
        self.inner.lock().await.alive_count()
    }

    /// Take a point-in-time view of the mode and every replica's log.
    pub async fn snapshot(&self) -> ClusterSnapshot {
        let inner = self.inner.lock().await;
        ClusterSnapshot {
            mode: inner.mode,
            replicas: inner
                .replicas
                .iter()
                .map(|r| ReplicaSnapshot {
                    id: r.id(),
                    alive: r.is_alive(),
                    entries: r.log().entries().to_vec(),
                })
                .collect(),
        }
    }

    /// Log every replica's aliveness and full chain at info level.
    ///
    /// Purely observational; nothing is mutated.
    pub async fn log_chains(&self) {
        let inner = self.inner.lock().await;
        for replica in &inner.replicas {
            let status = if replica.is_alive() { "up" } else { "down" };
            info!(
                id = %replica.id(),
                status,
                entries = replica.log().len(),
                "replica chain"
            );
            for entry in replica.log().iter() {
                info!(
                    id = %replica.id(),
                    index = entry.index,
                    data = %entry.data,
                    hash = %&entry.hash[..8],
                    "chain entry"
                );
            }
        }
    }

    /// Audit every replica's chain against the integrity invariants.
    ///
    /// Dead replicas are audited too: aliveness is a routing flag, not a
    /// statement about log validity.
    pub async fn verify_chains(&self) -> Result<()> {
        let inner = self.inner.lock().await;
        for replica in &inner.replicas {
            replica
                .log()
                .verify()
                .map_err(|source| ClusterError::CorruptReplica {
                    id: replica.id(),
                    source,
                })?;
        }
        Ok(())
    }
}

impl Default for Cluster {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterInner {
    fn replica_mut(&mut self, id: ReplicaId) -> Result<&mut Replica> {
        self.replicas
            .get_mut(id.index())
            .ok_or(ClusterError::UnknownReplica(id))
    }

    fn alive_count(&self) -> usize {
        self.replicas.iter().filter(|r| r.is_alive()).count()
    }

    fn first_down(&self) -> Option<&Replica> {
        self.replicas.iter().find(|r| !r.is_alive())
    }

    /// The write protocol: check eligibility for the active mode, then
    /// append to every eligible replica with one shared timestamp.
    fn write(&mut self, data: &str) -> Result<()> {
        match self.mode {
            ConsistencyMode::AvailabilityFirst => {
                if self.alive_count() == 0 {
                    warn!("write rejected: no alive replica");
                    return Err(ClusterError::NoAliveReplica);
                }
            }
            ConsistencyMode::ConsistencyFirst => {
                let need = majority(self.replicas.len());
                let have = self.alive_count();
                if have < need {
                    warn!(have, need, "write rejected: quorum not reached");
                    return Err(ClusterError::QuorumNotReached { have, need });
                }
            }
            ConsistencyMode::NoPartitionTolerance => {
                if let Some(down) = self.first_down() {
                    warn!(id = %down.id(), "write rejected: replica unavailable");
                    return Err(ClusterError::ReplicaUnavailable(down.id()));
                }
            }
        }

        // Eligibility settled; stamp the transaction once so replicas
        // sharing a history append identical entries.
        let timestamp = rfc3339_now();
        let mut appended = 0;
        for replica in self.replicas.iter_mut().filter(|r| r.is_alive()) {
            replica.append_at(data, timestamp.clone());
            appended += 1;
        }
        debug!(appended, mode = %self.mode, "write committed");
        Ok(())
    }

    /// The read protocol: resolve "the" tail despite possible replica
    /// disagreement, per the active mode.
    fn read(&self) -> Result<ChainEntry> {
        match self.mode {
            ConsistencyMode::ConsistencyFirst => self.read_majority(),
            ConsistencyMode::AvailabilityFirst => self.read_best_effort(),
            ConsistencyMode::NoPartitionTolerance => self.read_all_replicas(),
        }
    }

    /// Consistency-first read: a majority of replicas must be alive, and
    /// the largest tail-agreement group must itself reach that majority.
    fn read_majority(&self) -> Result<ChainEntry> {
        let need = majority(self.replicas.len());
        let have = self.alive_count();
        if have < need {
            warn!(have, need, "read rejected: quorum not reached");
            return Err(ClusterError::QuorumNotReached { have, need });
        }

        match quorum::winning_tail_group(&self.replicas) {
            Some(group) if group.support >= need => {
                debug!(
                    support = group.support,
                    tail = %&group.hash[..8],
                    "majority tail resolved"
                );
                Ok(group.entry)
            }
            Some(group) => {
                warn!(
                    support = group.support,
                    need, "read rejected: replicas disagree beyond quorum"
                );
                Err(ClusterError::QuorumNotReached {
                    have: group.support,
                    need,
                })
            }
            None => Err(ClusterError::NoAliveReplica),
        }
    }

    /// Availability-first read: best-effort tail from the longest log
    /// among alive replicas.
    fn read_best_effort(&self) -> Result<ChainEntry> {
        match quorum::longest_log(self.replicas.iter().filter(|r| r.is_alive())) {
            Some(replica) => Ok(replica.tip().clone()),
            None => {
                warn!("read rejected: no alive replica");
                Err(ClusterError::NoAliveReplica)
            }
        }
    }

    /// No-partition-tolerance read: every replica must be alive; the
    /// longest log across all of them wins.
    fn read_all_replicas(&self) -> Result<ChainEntry> {
        if let Some(down) = self.first_down() {
            warn!(id = %down.id(), "read rejected: replica unavailable");
            return Err(ClusterError::ReplicaUnavailable(down.id()));
        }
        quorum::longest_log(self.replicas.iter())
            .map(|replica| replica.tip().clone())
            .ok_or(ClusterError::NoAliveReplica)
    }
}

#[cfg(test)]
impl Cluster {
    /// Test hook: swap one replica's log wholesale, bypassing append.
    pub(crate) async fn replace_log(&self, id: ReplicaId, log: triad_chain::ChainLog) {
        let mut inner = self.inner.lock().await;
        inner.replicas[id.index()].set_log(log);
    }
}
