/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use bellman_rounds::loader::{load_graph, load_labels};
use bellman_rounds::prelude::*;
use dsi_progress_logger::no_logging;
use std::path::PathBuf;

fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "locations.txt", "1 Airport\n2 City Hall\n3 Museum\n");
    let labels = load_labels(path).unwrap();
    assert_eq!(labels.len(), 3);
    assert_eq!(labels.get(0), Some("Airport"));
    assert_eq!(labels.get(1), Some("City Hall"));
    assert_eq!(labels.get(2), Some("Museum"));
    assert_eq!(labels.get(3), None);
}

#[test]
fn test_load_labels_out_of_order_and_sparse() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "locations.txt", "3 Museum\n1 Airport\n");
    let labels = load_labels(path).unwrap();
    // The number of nodes is the largest id; unnamed nodes get empty names.
    assert_eq!(labels.len(), 3);
    assert_eq!(labels.get(0), Some("Airport"));
    assert_eq!(labels.get(1), Some(""));
    assert_eq!(labels.get(2), Some("Museum"));
}

#[test]
fn test_load_labels_rejects_malformed_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "locations.txt", "1 Airport\nx City Hall\n");
    assert!(load_labels(&path).is_err());
    let path = write_fixture(&dir, "zero.txt", "0 Airport\n");
    assert!(load_labels(&path).is_err());
}

#[test]
fn test_load_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "dist_matrix.txt", "1 2 7\n2 3 1\n");
    let graph = load_graph(path, 3).unwrap();
    assert_eq!(graph.num_nodes(), 3);
    // Each undirected edge becomes two arcs, converted to 0-based.
    assert_eq!(graph.num_arcs(), 4);
    assert_eq!(
        graph,
        Graph::from_undirected(3, [(0, 1, 7), (1, 2, 1)])
    );
}

#[test]
fn test_load_graph_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in [
        ("non-numeric.txt", "1 x 3\n"),
        ("missing-field.txt", "1 2\n"),
        ("extra-field.txt", "1 2 3 4\n"),
        ("out-of-range.txt", "1 9 3\n"),
        ("zero-id.txt", "0 1 3\n"),
    ] {
        let path = write_fixture(&dir, name, contents);
        assert!(load_graph(&path, 3).is_err(), "{name} should be rejected");
    }
}

#[test]
fn test_missing_files() {
    assert!(load_labels("/nonexistent/locations.txt").is_err());
    assert!(load_graph("/nonexistent/dist_matrix.txt", 3).is_err());
}

#[test]
fn test_end_to_end_from_files() {
    // Labeled locations and undirected weighted edges, with 1-based ids.
    let dir = tempfile::tempdir().unwrap();
    let labels_path = write_fixture(
        &dir,
        "locations.txt",
        "1 Airport\n2 City Hall\n3 Museum\n4 Harbor\n",
    );
    let edges_path = write_fixture(&dir, "dist_matrix.txt", "1 2 4\n2 3 5\n1 3 12\n3 4 1\n");

    let labels = load_labels(labels_path).unwrap();
    let graph = load_graph(edges_path, labels.len()).unwrap();

    let result = BellmanFord::new(&graph)
        .source(0)
        .destination(3)
        .num_workers(2)
        .labels(&labels)
        .run(no_logging![])
        .unwrap();

    assert_eq!(result.distance, Some(10));
    assert_eq!(result.path, vec![0, 1, 2, 3]);
    let names = result
        .path
        .iter()
        .map(|&node| labels.get(node).unwrap())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Airport", "City Hall", "Museum", "Harbor"]);
}
