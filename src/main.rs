/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{Result, ensure};
use clap::Parser;
use dsi_progress_logger::{ProgressLog, ProgressLogger};
use std::path::PathBuf;

use bellman_rounds::loader;
use bellman_rounds::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "bellman-rounds", version)]
/// Computes a single-source shortest path with a group of round-synchronized
/// workers and prints the distance and the labeled path.
///
/// Node ids are 1-based on the command line and in both input files, matching
/// the file formats.
///
/// Noteworthy environment variables:
///
/// - RUST_LOG: configuration for env_logger
///   <https://docs.rs/env_logger/latest/env_logger/>
struct Cli {
    /// A file with one `<node id> <name>` line per node.
    labels: PathBuf,
    /// A file with one `<u> <v> <weight>` triple per undirected edge.
    edges: PathBuf,
    /// The source node (1-based).
    #[arg(short, long, default_value_t = 1)]
    source: usize,
    /// The destination node (1-based).
    #[arg(short, long)]
    destination: usize,
    /// The number of workers (clamped to the number of nodes).
    #[arg(short = 'w', long, default_value_t = num_cpus::get())]
    workers: usize,
    /// Exchange owned slices only, preserving the reference behavior that
    /// drops cross-partition improvements.
    #[arg(long)]
    inherited: bool,
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let labels = loader::load_labels(&cli.labels)?;
    let graph = loader::load_graph(&cli.edges, labels.len())?;
    ensure!(
        cli.source >= 1 && cli.destination >= 1,
        "Node ids are 1-based"
    );
    let source = cli.source - 1;
    let destination = cli.destination - 1;

    let workers = cli.workers.clamp(1, graph.num_nodes().max(1));
    if workers != cli.workers {
        log::warn!(
            "Clamping {} workers to {workers} for a graph with {} nodes",
            cli.workers,
            graph.num_nodes()
        );
    }

    let mut pl = ProgressLogger::default();
    pl.display_memory(true);

    let mut bellman_ford = BellmanFord::new(&graph);
    bellman_ford
        .source(source)
        .destination(destination)
        .num_workers(workers)
        .labels(&labels);
    if cli.inherited {
        bellman_ford.policy(CrossPartitionPolicy::Inherited);
    }
    let result = bellman_ford.run(&mut pl)?;

    let name = |node: usize| labels.get(node).unwrap_or("");
    print!(
        "Shortest distance from ({}) {} to ({}) {} is: ",
        source + 1,
        name(source),
        destination + 1,
        name(destination)
    );
    match result.distance {
        None => println!("INF (No Path)"),
        Some(distance) => {
            println!("{distance}");
            let path = result
                .path
                .iter()
                .map(|&node| format!("({}) {}", node + 1, name(node)))
                .collect::<Vec<_>>()
                .join(" -> ");
            println!("Path: {path}");
        }
    }
    Ok(())
}
