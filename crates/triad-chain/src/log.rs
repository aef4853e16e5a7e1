//! Append-only hash-chained logs.

use tracing::debug;

use crate::entry::{ChainEntry, rfc3339_now};
use crate::error::ChainError;

type Result<T> = std::result::Result<T, ChainError>;

/// One replica's log: a non-empty, append-only sequence of entries
/// linked by their hashes.
///
/// A log always starts with a genesis entry at index 0 and only grows;
/// stored entries are never rewritten or removed. Indices therefore
/// equal positions, and the tail entry is the most recent append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLog {
    entries: Vec<ChainEntry>,
}

impl ChainLog {
    /// Create a log holding a fresh genesis entry with an empty payload.
    pub fn new() -> Self {
        Self::with_genesis("")
    }

    /// Create a log whose genesis entry carries `data`.
    pub fn with_genesis(data: &str) -> Self {
        Self::from_genesis(ChainEntry::genesis(data))
    }

    /// Create a log rooted at an existing genesis entry.
    ///
    /// Replicas of one cluster share a single genesis record, so
    /// replicas that see the same appends hold identical chains.
    pub fn from_genesis(genesis: ChainEntry) -> Self {
        Self {
            entries: vec![genesis],
        }
    }

    /// Reassemble a log from previously serialized entries.
    ///
    /// Only the non-empty invariant is enforced here; callers wanting
    /// integrity guarantees run [`ChainLog::verify`] on the result.
    pub fn from_entries(entries: Vec<ChainEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ChainError::EmptyLog);
        }
        Ok(Self { entries })
    }

    /// Append a new entry carrying `data`, stamped with the current time.
    pub fn append(&mut self, data: &str) -> &ChainEntry {
        self.append_at(data, rfc3339_now())
    }

    /// Append a new entry carrying `data` with an explicit timestamp.
    ///
    /// The cluster engine stamps a whole write once and passes the same
    /// timestamp to every replica, so replicas sharing a history produce
    /// identical entries.
    pub fn append_at(&mut self, data: &str, timestamp: String) -> &ChainEntry {
        let next = ChainEntry::next_at(self.tip(), data, timestamp);
        debug!(index = next.index, "appending chain entry");
        self.entries.push(next);
        self.tip()
    }

    /// The most recent entry.
    pub fn tip(&self) -> &ChainEntry {
        self.entries.last().expect("log never empty")
    }

    /// Number of entries, genesis included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries. Always `false`: a log is
    /// created with its genesis entry and never shrinks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in append order.
    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    /// Iterate entries from genesis to tip.
    pub fn iter(&self) -> impl Iterator<Item = &ChainEntry> {
        self.entries.iter()
    }

    /// Check every chain invariant: contiguous indices from zero, genesis
    /// linkage, predecessor hashes, and per-entry hash integrity.
    ///
    /// Scans from genesis and reports the first violation found.
    pub fn verify(&self) -> Result<()> {
        for (pos, entry) in self.entries.iter().enumerate() {
            let expected = pos as u64;
            if entry.index != expected {
                return Err(ChainError::IndexGap {
                    expected,
                    found: entry.index,
                });
            }
            if pos == 0 {
                if !entry.previous_hash.is_empty() {
                    return Err(ChainError::MalformedGenesis { index: entry.index });
                }
            } else {
                if entry.previous_hash.is_empty() {
                    return Err(ChainError::MalformedGenesis { index: entry.index });
                }
                if entry.previous_hash != self.entries[pos - 1].hash {
                    return Err(ChainError::BrokenLink { index: entry.index });
                }
            }
            if !entry.verify_hash() {
                return Err(ChainError::HashMismatch { index: entry.index });
            }
        }
        Ok(())
    }
}

impl Default for ChainLog {
    fn default() -> Self {
        Self::new()
    }
}
