//! Text and JSON rendering of cluster snapshots.

use triad_cluster::ClusterSnapshot;

/// Render a snapshot as a text listing, one block per replica.
///
/// Every entry is shown with its index, shortened hash, shortened
/// previous hash, payload, and timestamp.
pub fn render_text(snapshot: &ClusterSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "mode={} replicas={} alive={}\n",
        snapshot.mode,
        snapshot.replicas.len(),
        snapshot.alive_count()
    ));
    for replica in &snapshot.replicas {
        let status = if replica.alive { "up" } else { "down" };
        let tail = replica
            .entries
            .last()
            .map(|e| short(&e.hash))
            .unwrap_or("-");
        out.push_str(&format!(
            "replica {} [{status}] {} entries, tail {tail}\n",
            replica.id,
            replica.entries.len()
        ));
        for entry in &replica.entries {
            out.push_str(&format!(
                "  #{} {} <- {}  {:?} @{}\n",
                entry.index,
                short(&entry.hash),
                short(&entry.previous_hash),
                entry.data,
                entry.timestamp
            ));
        }
    }
    out
}

/// Render a snapshot as pretty-printed JSON.
pub fn render_json(snapshot: &ClusterSnapshot) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// First eight characters of a hash, or `"-"` for the empty genesis link.
pub fn short(hash: &str) -> &str {
    if hash.is_empty() {
        "-"
    } else {
        &hash[..hash.len().min(8)]
    }
}
