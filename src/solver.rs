/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The solver driving a fixed SPMD worker group.
//!
//! [`BellmanFord`] validates the configuration, replicates the inputs, starts
//! one thread per worker and runs the identical [worker
//! body](crate::rounds::run_worker) on each, with the coordinator (rank 0)
//! running on the calling thread. The threads coordinate exclusively through
//! the [collective operations](crate::collective): there is no shared mutable
//! state, no dynamic worker creation, and no cancellation — a worker that
//! fails mid-protocol blocks the whole group, by design of the collective
//! contract.
//!
//! # Limitations
//!
//! Negative-weight cycles are not detected: the loop is bounded by `V − 1`
//! rounds and, if a negative cycle exists, the last computed (possibly
//! non-optimal) values are returned without any signal, with
//! [`converged`](crate::aggregate::ShortestPath::converged) false.

use dsi_progress_logger::{ProgressLog, no_logging};
use std::sync::Arc;

use crate::aggregate::ShortestPath;
use crate::collective::ThreadGroup;
use crate::graph::{Graph, LabelTable};
use crate::partition::{ConfigError, NodeRanges};
use crate::replica::GraphReplica;
use crate::rounds::{self, CrossPartitionPolicy};

/// Computes single-source shortest paths with a round-synchronized worker
/// group.
///
/// The struct is configured via setters and then executed via
/// [`run`](Self::run).
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use bellman_rounds::graph::Graph;
/// use bellman_rounds::solver::BellmanFord;
/// use dsi_progress_logger::no_logging;
///
/// let g = Graph::from_undirected(3, [(0, 1, 2), (1, 2, 3)]);
///
/// let mut bf = BellmanFord::new(&g);
/// let result = bf.destination(2).num_workers(2).run(no_logging![])?;
///
/// assert_eq!(result.distance, Some(5));
/// assert_eq!(result.path, vec![0, 1, 2]);
/// #     Ok(())
/// # }
/// ```
///
/// An unreachable destination is a normal outcome, not an error:
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use bellman_rounds::graph::Graph;
/// use bellman_rounds::solver::BellmanFord;
/// use dsi_progress_logger::no_logging;
///
/// let g = Graph::from_undirected(3, [(0, 1, 2)]);
///
/// let result = BellmanFord::new(&g).destination(2).run(no_logging![])?;
///
/// assert!(result.is_unreachable());
/// assert!(result.path.is_empty());
/// #     Ok(())
/// # }
/// ```
pub struct BellmanFord<'a> {
    graph: &'a Graph,
    labels: Option<&'a LabelTable>,
    source: usize,
    destination: usize,
    num_workers: usize,
    policy: CrossPartitionPolicy,
}

impl<'a> BellmanFord<'a> {
    /// Creates a new computation on the given graph.
    ///
    /// The source defaults to node 0, the destination to the last node, the
    /// group to a single worker, and the policy to
    /// [`Merge`](CrossPartitionPolicy::Merge).
    pub fn new(graph: &'a Graph) -> Self {
        Self {
            graph,
            labels: None,
            source: 0,
            destination: graph.num_nodes().saturating_sub(1),
            num_workers: 1,
            policy: CrossPartitionPolicy::default(),
        }
    }

    /// Sets the source node.
    pub fn source(&mut self, source: usize) -> &mut Self {
        self.source = source;
        self
    }

    /// Sets the destination node.
    pub fn destination(&mut self, destination: usize) -> &mut Self {
        self.destination = destination;
        self
    }

    /// Sets the number of workers.
    ///
    /// Must be at least one and at most the number of nodes; violations are
    /// reported by [`run`](Self::run), not here.
    pub fn num_workers(&mut self, num_workers: usize) -> &mut Self {
        self.num_workers = num_workers;
        self
    }

    /// Sets the [cross-partition refresh policy](CrossPartitionPolicy).
    pub fn policy(&mut self, policy: CrossPartitionPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    /// Sets the node labels to replicate alongside the graph.
    pub fn labels(&mut self, labels: &'a LabelTable) -> &mut Self {
        self.labels = Some(labels);
        self
    }

    /// Runs the computation and returns the aggregated outcome.
    ///
    /// Progress of the round loop is reported on `pl` (pass
    /// [`no_logging![]`](dsi_progress_logger::no_logging) to disable it).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] — before any worker is started — if the
    /// group is empty, if there are more workers than nodes, or if the source
    /// or destination is out of range.
    pub fn run(&mut self, pl: &mut impl ProgressLog) -> Result<ShortestPath, ConfigError> {
        let num_nodes = self.graph.num_nodes();
        // Fail fast: every configuration error is detected here, while the
        // group does not exist yet.
        NodeRanges::new(num_nodes, self.num_workers)?;
        for (kind, node) in [("source", self.source), ("destination", self.destination)] {
            if node >= num_nodes {
                return Err(ConfigError::EndpointOutOfRange {
                    kind,
                    node,
                    num_nodes,
                });
            }
        }

        log::info!("Workers: {}", self.num_workers);
        log::info!("Cross-partition policy: {}", self.policy);
        log::info!(
            "Source: {}, destination: {}, nodes: {num_nodes}, arcs: {}",
            self.source,
            self.destination,
            self.graph.num_arcs()
        );

        let replica = GraphReplica {
            graph: Arc::new(self.graph.clone()),
            labels: Arc::new(self.labels.cloned().unwrap_or_default()),
            source: self.source,
            destination: self.destination,
        };
        let policy = self.policy;

        let mut comms = ThreadGroup::new_group(self.num_workers).into_iter();
        let coordinator = comms.next().expect("The group contains at least one worker");

        let result = std::thread::scope(|s| {
            for comm in comms {
                s.spawn(move || {
                    rounds::run_worker(&comm, None, policy, no_logging![]);
                });
            }
            rounds::run_worker(&coordinator, Some(replica), policy, pl)
        });

        Ok(result.expect("The coordinator always receives the gathered result"))
    }
}
