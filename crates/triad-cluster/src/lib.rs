//! Cluster engine for the triad simulator.
//!
//! A [`Cluster`] holds a small set of in-memory [`Replica`]s, each with
//! its own hash-chained log, plus the active
//! [`ConsistencyMode`](triad_types::ConsistencyMode). The mode decides
//! which replicas must participate in a write and how many must agree
//! for a read to be trusted; flipping replicas dead and alive makes the
//! difference between the modes observable.
//!
//! All operations serialize on one lock the cluster owns for its whole
//! lifetime, so topology changes cannot race in-flight writes.

pub mod cluster;
pub mod error;
pub mod replica;
pub mod snapshot;

mod quorum;

pub use cluster::Cluster;
pub use error::ClusterError;
pub use quorum::majority;
pub use replica::Replica;
pub use snapshot::{ClusterSnapshot, ReplicaSnapshot};

#[cfg(test)]
mod tests;
