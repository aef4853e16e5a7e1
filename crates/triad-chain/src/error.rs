//! Error types for chain integrity checks.

/// Violations detected when verifying a chain log.
///
/// Each variant names the first entry at which the chain stops being
/// well-formed; everything before it verified cleanly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    /// Stored hash does not match the hash recomputed from the entry.
    #[error("entry {index}: stored hash does not match recomputed hash")]
    HashMismatch { index: u64 },

    /// An entry's `previous_hash` does not equal its predecessor's hash.
    #[error("entry {index}: broken link to predecessor")]
    BrokenLink { index: u64 },

    /// Indices are not contiguous from zero.
    #[error("entry out of sequence: expected index {expected}, found {found}")]
    IndexGap { expected: u64, found: u64 },

    /// Genesis linkage violated: the genesis entry carries a predecessor
    /// hash, or a later entry carries none.
    #[error("entry {index}: malformed genesis linkage")]
    MalformedGenesis { index: u64 },

    /// A chain log must hold at least its genesis entry.
    #[error("a chain log holds at least a genesis entry")]
    EmptyLog,
}
