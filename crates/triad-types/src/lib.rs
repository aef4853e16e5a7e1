//! Shared types for the triad workspace.
//!
//! This crate defines the two vocabulary types every other crate speaks:
//! [`ReplicaId`], the ordinal identity of a replica within its cluster,
//! and [`ConsistencyMode`], the closed set of CAP trade-off policies the
//! cluster engine can enforce.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Replica identity
// ---------------------------------------------------------------------------

/// Identifier of a replica within a cluster.
///
/// Ids are assigned sequentially at creation time (the first replica is
/// id 0) and are never reused, so an id doubles as the replica's position
/// in the cluster's replica sequence. Ordering follows creation order,
/// which the engine's deterministic tie-breaks rely on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplicaId(u32);

impl ReplicaId {
    /// Create an id from its raw ordinal.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Return the raw ordinal value.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Position of this replica in the cluster's replica sequence.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for ReplicaId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ReplicaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReplicaId({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Consistency modes
// ---------------------------------------------------------------------------

/// The three consistency/availability trade-off policies.
///
/// Each mode picks a different corner of the CAP triangle to sacrifice,
/// and the cluster engine derives its whole write/read protocol from the
/// active mode. The set is closed: there is no way to hold a mode value
/// outside these three, so an engine can match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsistencyMode {
    /// Serve every request the alive replicas can absorb; replicas may
    /// diverge and reads are best-effort (AP).
    AvailabilityFirst,
    /// Writes and reads require a strict majority of replicas; minority
    /// partitions are refused service (CP).
    ConsistencyFirst,
    /// Writes and reads require every replica; any failure stops the
    /// world (CA).
    NoPartitionTolerance,
}

impl ConsistencyMode {
    /// All modes, in the order they are usually demonstrated.
    pub const ALL: [ConsistencyMode; 3] = [
        ConsistencyMode::AvailabilityFirst,
        ConsistencyMode::ConsistencyFirst,
        ConsistencyMode::NoPartitionTolerance,
    ];

    /// Short CAP-style label: "ap", "cp" or "ca".
    pub const fn label(&self) -> &'static str {
        match self {
            ConsistencyMode::AvailabilityFirst => "ap",
            ConsistencyMode::ConsistencyFirst => "cp",
            ConsistencyMode::NoPartitionTolerance => "ca",
        }
    }

    /// Canonical kebab-case name, matching the serialized form.
    pub const fn name(&self) -> &'static str {
        match self {
            ConsistencyMode::AvailabilityFirst => "availability-first",
            ConsistencyMode::ConsistencyFirst => "consistency-first",
            ConsistencyMode::NoPartitionTolerance => "no-partition-tolerance",
        }
    }
}

impl fmt::Display for ConsistencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConsistencyMode {
    type Err = ModeParseError;

    /// Accepts the canonical kebab-case names and the short CAP labels,
    /// case-insensitively. Anything else is a configuration error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "availability-first" | "ap" => Ok(ConsistencyMode::AvailabilityFirst),
            "consistency-first" | "cp" => Ok(ConsistencyMode::ConsistencyFirst),
            "no-partition-tolerance" | "ca" => Ok(ConsistencyMode::NoPartitionTolerance),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}

/// Error returned when a mode name does not parse.
///
/// This is where an invalid mode is rejected: once input has parsed into
/// a [`ConsistencyMode`], no later operation can observe an unknown mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown consistency mode `{0}` (expected availability-first, consistency-first, \
     no-partition-tolerance, or one of ap/cp/ca)"
)]
pub struct ModeParseError(pub String);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
