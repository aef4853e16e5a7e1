//! `triad`: a CAP trade-off simulator over hash-chained replica logs.
//!
//! Binary entrypoint that drives a small in-memory replica cluster
//! through writes, reads, and failures under each consistency mode.
//!
//! # Usage
//!
//! ```text
//! triad demo                        # walk all three modes through the failure script
//! triad demo -m consistency-first   # demo a single mode
//! triad demo -r 5 --json            # five replicas, JSON snapshots
//! triad demo -c triad.toml          # with a config file
//! triad modes                       # print the write/read rules per mode
//! ```

mod config;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use triad_chain::ChainEntry;
use triad_cluster::{Cluster, ClusterError};
use triad_types::{ConsistencyMode, ReplicaId};

use config::CliConfig;

// -----------------------------------------------------------------------
// CLI definition
// -----------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "triad",
    version,
    about = "CAP trade-off simulator over hash-chained replica logs"
)]
struct Cli {
    /// Path to TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the failure-script walkthrough.
    Demo {
        /// Override the replica count.
        #[arg(short, long)]
        replicas: Option<u32>,

        /// Run a single mode instead of all three.
        ///
        /// Accepts kebab-case names or the short aliases `ap`, `cp`, `ca`.
        #[arg(short, long)]
        mode: Option<ConsistencyMode>,

        /// Print snapshots as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print the write/read rules of each consistency mode.
    Modes,
}

// -----------------------------------------------------------------------
// Entrypoint
// -----------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = CliConfig::load(cli.config.as_deref()).context("failed to load config")?;

    setup_tracing(&config.log.level);

    match cli.command {
        Commands::Demo {
            replicas,
            mode,
            json,
        } => {
            // CLI args override config file values.
            if replicas.is_some() {
                config.cluster.replicas = replicas;
            }
            if mode.is_some() {
                config.cluster.mode = mode;
            }
            cmd_demo(&config, json).await
        }
        Commands::Modes => {
            cmd_modes();
            Ok(())
        }
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set, otherwise uses the config value.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// -----------------------------------------------------------------------
// triad demo
// -----------------------------------------------------------------------

async fn cmd_demo(config: &CliConfig, json: bool) -> Result<()> {
    let modes: Vec<ConsistencyMode> = match config.cluster.mode {
        Some(mode) => vec![mode],
        None => ConsistencyMode::ALL.to_vec(),
    };

    for mode in modes {
        run_mode_demo(mode, config.replicas(), config.writes(), json).await?;
        println!();
    }
    Ok(())
}

/// Walk one mode through the failure script: healthy writes, one
/// replica down, the majority down, then full recovery.
async fn run_mode_demo(
    mode: ConsistencyMode,
    replicas: u32,
    writes: u32,
    json: bool,
) -> Result<()> {
    info!(%mode, replicas, "building demo cluster");
    println!("=== {mode} ===");

    let cluster = Cluster::new();
    for _ in 1..replicas {
        cluster.add_node().await;
    }
    cluster.set_mode(mode).await;

    // Healthy phase: every mode commits these.
    for i in 1..=writes {
        let label = format!("tx-{i}");
        report_write(&label, cluster.write_transaction(&label).await);
    }
    report_read(cluster.read_last_block().await);

    // One replica down. Consistency-first keeps going on its majority;
    // no-partition-tolerance refuses immediately.
    let highest = ReplicaId::new(replicas - 1);
    println!("-- replica {highest} goes down --");
    cluster.set_node_alive(highest, false).await?;
    report_write("tx-degraded", cluster.write_transaction("tx-degraded").await);
    report_read(cluster.read_last_block().await);

    // Majority down. Only availability-first keeps going.
    println!("-- majority of the roster goes down --");
    for id in replicas / 2..replicas {
        cluster.set_node_alive(ReplicaId::new(id), false).await?;
    }
    report_write("tx-minority", cluster.write_transaction("tx-minority").await);
    report_read(cluster.read_last_block().await);

    // Full recovery: every replica back, one closing write.
    println!("-- all replicas recover --");
    for id in 0..replicas {
        cluster.set_node_alive(ReplicaId::new(id), true).await?;
    }
    report_read(cluster.read_last_block().await);
    report_write("tx-final", cluster.write_transaction("tx-final").await);

    let snapshot = cluster.snapshot().await;
    if json {
        println!("{}", render::render_json(&snapshot)?);
    } else {
        print!("{}", render::render_text(&snapshot));
    }

    cluster.log_chains().await;
    cluster.verify_chains().await.context("chain audit failed")?;
    println!("audit: all chains intact");

    Ok(())
}

fn report_write(label: &str, result: Result<(), ClusterError>) {
    match result {
        Ok(()) => println!("  write {label}: committed"),
        Err(e) => println!("  write {label}: rejected ({e})"),
    }
}

fn report_read(result: Result<ChainEntry, ClusterError>) {
    match result {
        Ok(entry) => println!(
            "  read: #{} {:?} tail {}",
            entry.index,
            entry.data,
            render::short(&entry.hash)
        ),
        Err(e) => println!("  read: rejected ({e})"),
    }
}

// -----------------------------------------------------------------------
// triad modes
// -----------------------------------------------------------------------

fn cmd_modes() {
    for mode in ConsistencyMode::ALL {
        println!("{} ({})", mode, mode.label().to_uppercase());
        let (write_rule, read_rule) = match mode {
            ConsistencyMode::AvailabilityFirst => (
                "appends to every alive replica, fails only when none is alive",
                "longest alive log, ties broken by lowest id",
            ),
            ConsistencyMode::ConsistencyFirst => (
                "requires a strict majority of the full roster alive",
                "largest tail-agreement group, which must itself reach the majority",
            ),
            ConsistencyMode::NoPartitionTolerance => (
                "requires every replica alive, appends to all of them",
                "requires every replica alive, longest log wins",
            ),
        };
        println!("  write: {write_rule}");
        println!("  read:  {read_rule}");
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
