/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! One-time replication of the immutable inputs to every worker.
//!
//! The coordinator builds the graph, the label table and the validated
//! endpoints once; [`GraphReplica::distribute`] then leaves an identical,
//! read-only copy on every member of the group. Nothing mutates the replica
//! afterwards, so in the thread realization the copy is an [`Arc`] clone and
//! costs `O(1)` per worker; a message-passing realization would pay `O(E)`
//! per worker, which is the price of evaluating relaxations from any owned
//! source node without an extra request round.

use std::sync::Arc;

use crate::collective::Collective;
use crate::graph::{Graph, LabelTable};

/// The immutable inputs shared identically by every worker: the graph, the
/// node labels, and the source and destination node indices.
#[derive(Debug, Clone)]
pub struct GraphReplica {
    pub graph: Arc<Graph>,
    pub labels: Arc<LabelTable>,
    pub source: usize,
    pub destination: usize,
}

impl GraphReplica {
    /// Distributes the coordinator's payload to every member of the group.
    ///
    /// The coordinator passes `Some`; every other member passes `None` and
    /// receives the coordinator's replica. This is a collective operation.
    pub fn distribute<C: Collective>(comm: &C, payload: Option<GraphReplica>) -> GraphReplica {
        comm.broadcast(payload)
    }
}
