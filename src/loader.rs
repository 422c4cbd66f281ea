/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Reads the node-label and edge-list artifacts.
//!
//! The label file has one `<node id> <name>` line per node; the edge file has
//! one whitespace-separated `<u> <v> <weight>` triple per undirected edge.
//! Node ids are 1-based in both files; the in-memory graph is 0-based.
//!
//! Any malformed line is an error: the computation must not run on a
//! partially built graph.

use anyhow::{Context, Result, bail, ensure};
use std::io::BufRead;
use std::path::Path;

use crate::graph::{Graph, LabelTable, Weight};

/// Reads a label file and returns the label table.
///
/// The number of nodes of the graph is the largest node id appearing in the
/// file; ids may appear in any order, and the name is the rest of the line,
/// trimmed.
pub fn load_labels(path: impl AsRef<Path>) -> Result<LabelTable> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open label file {}", path.display()))?;
    let mut names: Vec<String> = Vec::new();
    for (line_no, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Could not read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let (id, name) = line
            .trim_start()
            .split_once(char::is_whitespace)
            .unwrap_or((line.trim_start(), ""));
        let id: usize = id.parse().with_context(|| {
            format!("Malformed node id on line {} of {}", line_no + 1, path.display())
        })?;
        ensure!(
            id >= 1,
            "Node ids are 1-based, but line {} of {} has id 0",
            line_no + 1,
            path.display()
        );
        if names.len() < id {
            names.resize(id, String::new());
        }
        names[id - 1] = name.trim().to_owned();
    }
    log::info!("Read {} node labels", names.len());
    Ok(LabelTable::new(names))
}

/// Reads an edge file and returns the graph on `num_nodes` nodes, with each
/// undirected edge expanded into two arcs.
pub fn load_graph(path: impl AsRef<Path>, num_nodes: usize) -> Result<Graph> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open edge file {}", path.display()))?;
    let mut graph = Graph::empty(num_nodes);
    for (line_no, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Could not read {}", path.display()))?;
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        let (Some(second), Some(third), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            bail!(
                "Expected `<u> <v> <weight>` on line {} of {}",
                line_no + 1,
                path.display()
            );
        };
        let context = || {
            format!(
                "Malformed edge on line {} of {}",
                line_no + 1,
                path.display()
            )
        };
        let u: usize = first.parse().with_context(context)?;
        let v: usize = second.parse().with_context(context)?;
        let weight: Weight = third.parse().with_context(context)?;
        for node in [u, v] {
            ensure!(
                (1..=num_nodes).contains(&node),
                "Node {node} on line {} of {} is out of range (ids are 1-based, {num_nodes} nodes)",
                line_no + 1,
                path.display()
            );
        }
        graph.add_arc(u - 1, v - 1, weight);
        graph.add_arc(v - 1, u - 1, weight);
    }
    log::info!(
        "Read {} undirected edges ({} arcs)",
        graph.num_arcs() / 2,
        graph.num_arcs()
    );
    Ok(graph)
}
