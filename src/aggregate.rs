/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Final aggregation of the per-worker slices and path reconstruction.
//!
//! After the round loop terminates every worker sends its owned distance and
//! predecessor slices to the coordinator, which assembles the two complete
//! vectors and walks the predecessor chain backwards from the destination.

use crate::collective::Collective;
use crate::graph::Weight;
use crate::relax::{Distance, Predecessor, RelaxationEngine};

/// The outcome of a shortest-path computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    /// The distance from the source to the destination, or `None` if the
    /// destination is unreachable.
    pub distance: Option<Weight>,
    /// The node indices from the source to the destination inclusive; empty
    /// if the destination is unreachable.
    pub path: Vec<usize>,
    /// The number of relaxation passes executed.
    pub rounds: usize,
    /// Whether the loop exited because no worker changed a value, rather
    /// than by exhausting the `V − 1` round budget.
    pub converged: bool,
}

impl ShortestPath {
    pub fn is_unreachable(&self) -> bool {
        self.distance.is_none()
    }
}

/// Gathers the owned slices to the coordinator and reconstructs the path.
///
/// This is a collective operation: every worker takes part, but only the
/// coordinator receives `Some` outcome.
pub fn gather_result<C: Collective>(
    comm: &C,
    engine: &RelaxationEngine,
    source: usize,
    destination: usize,
    rounds: usize,
    converged: bool,
) -> Option<ShortestPath> {
    let num_nodes = engine.dist().len();
    let start = engine.range().start;
    let dist = comm.gather(start, engine.owned_dist(), num_nodes);
    let pred = comm.gather(start, engine.owned_pred(), num_nodes);
    match (dist, pred) {
        (Some(dist), Some(pred)) => {
            let (distance, path) = reconstruct_path(&dist, &pred, source, destination);
            Some(ShortestPath {
                distance,
                path,
                rounds,
                converged,
            })
        }
        _ => None,
    }
}

/// Walks the predecessor chain backwards from the destination and returns the
/// distance and the path in source-to-destination order.
///
/// Returns `(None, vec![])` if the destination is unreachable.
pub fn reconstruct_path(
    dist: &[Distance],
    pred: &[Predecessor],
    source: usize,
    destination: usize,
) -> (Option<Weight>, Vec<usize>) {
    let Some(distance) = dist[destination] else {
        return (None, Vec::new());
    };
    let mut path = Vec::new();
    let mut current = Some(destination);
    while let Some(node) = current {
        path.push(node);
        if node == source {
            break;
        }
        current = pred[node];
    }
    path.reverse();
    (Some(distance), path)
}
