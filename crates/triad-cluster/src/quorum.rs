//! Majority math and tail-agreement tallying.
//!
//! The read protocols need two deterministic selections: the largest
//! group of alive replicas agreeing on a tail hash (consistency-first),
//! and the replica with the longest log (the other two modes). Both
//! break ties by lowest replica id so results are reproducible across
//! runs, never dependent on enumeration order.

use triad_chain::ChainEntry;
use triad_types::ReplicaId;

use crate::replica::Replica;

/// Strict majority threshold for `total` replicas: `total / 2 + 1`.
pub fn majority(total: usize) -> usize {
    total / 2 + 1
}

/// A group of alive replicas agreeing on the same tail hash.
#[derive(Debug, Clone)]
pub(crate) struct TailGroup {
    /// Tail hash the group agrees on.
    pub hash: String,
    /// Number of alive replicas in the group.
    pub support: usize,
    /// Lowest replica id in the group.
    pub first_id: ReplicaId,
    /// The agreed tail entry, taken from the lowest-id member.
    pub entry: ChainEntry,
}

/// Tally alive replicas by tail hash and pick the winning group.
///
/// The winner is the group with the largest support; among equally large
/// groups, the one containing the lowest replica id. Returns `None` when
/// no replica is alive.
pub(crate) fn winning_tail_group(replicas: &[Replica]) -> Option<TailGroup> {
    let mut groups: Vec<TailGroup> = Vec::new();
    for replica in replicas.iter().filter(|r| r.is_alive()) {
        let tip = replica.tip();
        match groups.iter_mut().find(|g| g.hash == tip.hash) {
            Some(group) => group.support += 1,
            None => groups.push(TailGroup {
                hash: tip.hash.clone(),
                support: 1,
                first_id: replica.id(),
                entry: tip.clone(),
            }),
        }
    }
    // Higher support wins; equal support resolves toward the lower
    // first id. First ids are distinct, so the order is total.
    groups.into_iter().max_by(|a, b| {
        a.support
            .cmp(&b.support)
            .then_with(|| b.first_id.cmp(&a.first_id))
    })
}

/// Pick the replica with the longest log, ties broken by lowest id.
///
/// Returns `None` when the iterator yields no replica.
pub(crate) fn longest_log<'a>(
    replicas: impl Iterator<Item = &'a Replica>,
) -> Option<&'a Replica> {
    replicas.max_by(|a, b| {
        a.log()
            .len()
            .cmp(&b.log().len())
            .then_with(|| b.id().cmp(&a.id()))
    })
}
