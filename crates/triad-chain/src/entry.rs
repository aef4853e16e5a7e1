//! Hash-linked log entries.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A single entry in a replica's hash chain.
///
/// Each entry records one appended payload, carries the hash of its
/// predecessor, and commits to all of its own content through `hash`, so
/// any rewrite of history is detectable by recomputation
/// ([`ChainEntry::verify_hash`]). Entries are immutable once stored in a
/// log.
///
/// The serialized form uses camelCase field names (`previousHash`), with
/// RFC3339 timestamps and lowercase-hex hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEntry {
    /// Position in the log, starting at 0 for the genesis entry.
    pub index: u64,
    /// RFC3339 creation instant (UTC, second precision).
    pub timestamp: String,
    /// Caller-supplied payload.
    pub data: String,
    /// SHA-256 over `(index, timestamp, data, previous_hash)`, lowercase hex.
    pub hash: String,
    /// Hash of the predecessor entry; empty for the genesis entry.
    pub previous_hash: String,
}

impl ChainEntry {
    /// Compute the SHA-256 hash of an entry's content.
    ///
    /// The digest covers the decimal index, the timestamp, the payload
    /// and the predecessor hash, concatenated in that order. The order
    /// is part of the chain format: changing it breaks verification of
    /// previously serialized chains.
    pub fn compute_hash(index: u64, timestamp: &str, data: &str, previous_hash: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(index.to_string().as_bytes());
        hasher.update(timestamp.as_bytes());
        hasher.update(data.as_bytes());
        hasher.update(previous_hash.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Verify that the stored hash matches the entry's content.
    pub fn verify_hash(&self) -> bool {
        let expected =
            Self::compute_hash(self.index, &self.timestamp, &self.data, &self.previous_hash);
        self.hash == expected
    }

    /// Create the genesis entry of a chain, stamped with the current time.
    pub fn genesis(data: &str) -> Self {
        Self::genesis_at(data, rfc3339_now())
    }

    /// Create the genesis entry of a chain with an explicit timestamp.
    pub fn genesis_at(data: &str, timestamp: String) -> Self {
        let hash = Self::compute_hash(0, &timestamp, data, "");
        Self {
            index: 0,
            timestamp,
            data: data.to_string(),
            hash,
            previous_hash: String::new(),
        }
    }

    /// Create the successor of `prev` carrying `data`, stamped with the
    /// current time.
    ///
    /// Construction never fails given a valid predecessor.
    pub fn next(prev: &ChainEntry, data: &str) -> Self {
        Self::next_at(prev, data, rfc3339_now())
    }

    /// Create the successor of `prev` with an explicit timestamp.
    ///
    /// Callers appending the same payload to several chains pass the
    /// same timestamp so that chains sharing a history stay identical.
    pub fn next_at(prev: &ChainEntry, data: &str, timestamp: String) -> Self {
        let index = prev.index + 1;
        let hash = Self::compute_hash(index, &timestamp, data, &prev.hash);
        Self {
            index,
            timestamp,
            data: data.to_string(),
            hash,
            previous_hash: prev.hash.clone(),
        }
    }

    /// Whether this entry is the start of a chain.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash.is_empty()
    }
}

/// The current UTC instant as an RFC3339 string with second precision.
pub fn rfc3339_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
