//! Tests for the triad-chain crate.


use crate::entry::ChainEntry;
use crate::log::ChainLog;

/// Deterministic RFC3339 timestamp for second `n` of a fixed minute.
fn ts(n: u64) -> String {
    format!("2024-01-01T00:00:{n:02}Z")
}

/// Build a fully deterministic log: genesis stamped at `ts(0)`, then one
/// append per payload stamped at `ts(1)`, `ts(2)`, ...
fn sample_log(payloads: &[&str]) -> ChainLog {
    let mut log =
        ChainLog::from_entries(vec![ChainEntry::genesis_at("", ts(0))]).expect("genesis present");
    for (n, payload) in payloads.iter().enumerate() {
        log.append_at(payload, ts(n as u64 + 1));
    }
    log
}
