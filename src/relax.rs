/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The per-round relaxation pass executed by each worker.
//!
//! Every worker keeps a full-length local view of the tentative distances and
//! predecessors, but only the slice it owns is authoritative: it is the only
//! part the worker ever publishes to the group. During a pass the worker
//! scans the arcs whose source it owns and lowers the local distance of the
//! target whenever the path through the arc is shorter, reading source
//! distances from the global view refreshed at the start of the round.
//!
//! Per-node distances are monotonically non-increasing across rounds: a pass
//! only ever lowers values, and the [merge
//! refresh](crate::rounds::CrossPartitionPolicy::Merge) only ever replaces a
//! value with a minimum it participates in.

use std::ops::Range;

use crate::graph::{Graph, Weight};

/// A tentative distance; `None` means the node has not been reached yet.
pub type Distance = Option<Weight>;

/// A predecessor on the shortest-path tree; `None` means no predecessor has
/// been recorded yet.
pub type Predecessor = Option<usize>;

/// The relaxation state of one worker: full-length distance and predecessor
/// views plus the owned range.
pub struct RelaxationEngine<'a> {
    graph: &'a Graph,
    range: Range<usize>,
    dist: Vec<Distance>,
    pred: Vec<Predecessor>,
}

impl<'a> RelaxationEngine<'a> {
    /// Creates the engine for the worker owning `range`.
    ///
    /// All distances start as unreached, except that the owner of `source`
    /// sets its distance to zero.
    pub fn new(graph: &'a Graph, range: Range<usize>, source: usize) -> Self {
        let mut dist = vec![None; graph.num_nodes()];
        if range.contains(&source) {
            dist[source] = Some(0);
        }
        Self {
            graph,
            range,
            dist,
            pred: vec![None; graph.num_nodes()],
        }
    }

    /// Runs one relaxation pass against the given global distance view and
    /// returns whether any local value changed.
    ///
    /// Only arcs whose source lies in the owned range are considered. Updates
    /// may target nodes outside the owned range; such updates are kept in the
    /// local view but are not authoritative (see the [round
    /// protocol](crate::rounds)).
    pub fn relax_round(&mut self, global: &[Distance]) -> bool {
        debug_assert_eq!(global.len(), self.graph.num_nodes());
        let mut changed = false;
        for arc in self.graph.arcs() {
            if !self.range.contains(&arc.src) {
                continue;
            }
            if let Some(dist_src) = global[arc.src] {
                let candidate = dist_src + arc.weight;
                if self.dist[arc.dst].is_none_or(|current| candidate < current) {
                    self.dist[arc.dst] = Some(candidate);
                    self.pred[arc.dst] = Some(arc.src);
                    changed = true;
                }
            }
        }
        changed
    }

    /// Replaces the local views with an agreed global view.
    ///
    /// Used by the merge refresh; the agreed values are element-wise minima
    /// the local values participate in, so monotonicity is preserved.
    pub fn adopt(&mut self, dist: &[Distance], pred: &[Predecessor]) {
        self.dist.copy_from_slice(dist);
        self.pred.copy_from_slice(pred);
    }

    /// Returns the owned range.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns the full-length local distance view.
    pub fn dist(&self) -> &[Distance] {
        &self.dist
    }

    /// Returns the full-length local predecessor view.
    pub fn pred(&self) -> &[Predecessor] {
        &self.pred
    }

    /// Returns the authoritative (owned) slice of the distance view.
    pub fn owned_dist(&self) -> &[Distance] {
        &self.dist[self.range.clone()]
    }

    /// Returns the authoritative (owned) slice of the predecessor view.
    pub fn owned_pred(&self) -> &[Predecessor] {
        &self.pred[self.range.clone()]
    }
}
