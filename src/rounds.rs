/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The round-synchronized relaxation loop.
//!
//! Each round is a two-phase collective protocol:
//!
//! - **Phase A (refresh)**: the workers exchange distance information and
//!   every worker ends the phase holding the same complete global distance
//!   view for the next relaxation pass.
//! - **Phase B (convergence)**: the workers combine their per-round changed
//!   flags with logical OR; every worker receives the same combined flag.
//!
//! Both phases are synchronization barriers: no worker starts round `k + 1`
//! before every worker has completed both phases of round `k`. The loop stops
//! after a round whose combined flag is false, or after `V − 1` rounds, the
//! classic bound guaranteeing correctness in the absence of negative-weight
//! cycles.
//!
//! # Cross-partition refresh policies
//!
//! What phase A exchanges is governed by [`CrossPartitionPolicy`]:
//! exchanging owned slices only silently discards improvements a worker
//! computed for nodes it does not own, so the default policy merges full
//! local views instead, letting owners absorb foreign improvements. See the
//! variant documentation for details.

use dsi_progress_logger::ProgressLog;

use crate::aggregate;
use crate::aggregate::ShortestPath;
use crate::collective::Collective;
use crate::partition::NodeRanges;
use crate::relax::{Distance, Predecessor, RelaxationEngine};
use crate::replica::GraphReplica;

/// How phase A treats relaxations that targeted nodes outside the owned
/// range of the worker that computed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossPartitionPolicy {
    /// Phase A exchanges each worker's full local distance and predecessor
    /// views and every worker adopts the element-wise minimum (ties broken by
    /// lowest rank), so the owner of a node authoritatively absorbs
    /// improvements discovered by other workers. This yields exact shortest
    /// paths for every group size and is the default.
    #[default]
    Merge,
    /// Phase A exchanges owned slices only. An improvement computed for a
    /// non-owned node stays in the local view of the worker that computed
    /// it, is never published, and is shadowed in the global view by the
    /// owner's value, so shortest paths crossing a partition boundary are
    /// generally lost when more than one worker runs. Kept for compatibility
    /// with runs that depend on the historical owned-slice-only protocol.
    Inherited,
}

impl std::fmt::Display for CrossPartitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrossPartitionPolicy::Merge => f.write_str("merge"),
            CrossPartitionPolicy::Inherited => f.write_str("inherited"),
        }
    }
}

/// The per-round collective protocol of one worker.
pub struct RoundSynchronizer<'a, C: Collective> {
    comm: &'a C,
    ranges: NodeRanges,
    policy: CrossPartitionPolicy,
}

impl<'a, C: Collective> RoundSynchronizer<'a, C> {
    pub fn new(comm: &'a C, ranges: NodeRanges, policy: CrossPartitionPolicy) -> Self {
        Self {
            comm,
            ranges,
            policy,
        }
    }

    /// Phase A: refreshes `global` with the agreed distance view for the next
    /// pass.
    ///
    /// Under [`Merge`](CrossPartitionPolicy::Merge) the engine's local views
    /// are also replaced with the agreed minima.
    pub fn refresh(&self, engine: &mut RelaxationEngine, global: &mut [Distance]) {
        let num_nodes = self.ranges.num_nodes();
        debug_assert_eq!(global.len(), num_nodes);
        match self.policy {
            CrossPartitionPolicy::Inherited => {
                self.comm
                    .exchange(engine.range().start, engine.owned_dist(), global);
            }
            CrossPartitionPolicy::Merge => {
                let num_workers = self.comm.num_workers();
                let local: Vec<(Distance, Predecessor)> = engine
                    .dist()
                    .iter()
                    .zip(engine.pred())
                    .map(|(&d, &p)| (d, p))
                    .collect();
                let mut all = vec![(None, None); num_workers * num_nodes];
                self.comm
                    .exchange(self.comm.rank() * num_nodes, &local, &mut all);

                let mut dist = vec![None; num_nodes];
                let mut pred = vec![None; num_nodes];
                for node in 0..num_nodes {
                    for rank in 0..num_workers {
                        let (d, p) = all[rank * num_nodes + node];
                        if let Some(d) = d {
                            // Strict comparison: the lowest rank wins ties.
                            if dist[node].is_none_or(|best| d < best) {
                                dist[node] = Some(d);
                                pred[node] = p;
                            }
                        }
                    }
                }
                global.copy_from_slice(&dist);
                engine.adopt(&dist, &pred);
            }
        }
    }

    /// Phase B: returns whether the group has converged, that is, whether no
    /// worker changed a value in the pass that just ended.
    pub fn converged(&self, changed: bool) -> bool {
        !self.comm.agree_or(changed)
    }

    /// Folds the local views one last time under
    /// [`Merge`](CrossPartitionPolicy::Merge); a no-op under
    /// [`Inherited`](CrossPartitionPolicy::Inherited).
    ///
    /// Needed when the round budget is exhausted while the last pass still
    /// changed values: those changes have not been through a refresh yet, so
    /// without this fold the owners would publish stale slices to the final
    /// gather. After a converged round the last pass changed nothing and the
    /// fold would be idempotent, so it is skipped.
    pub fn final_merge(&self, engine: &mut RelaxationEngine) {
        if self.policy == CrossPartitionPolicy::Merge {
            let mut global = vec![None; self.ranges.num_nodes()];
            self.refresh(engine, &mut global);
        }
    }
}

/// Runs the relaxation loop and returns the number of passes executed and
/// whether the loop exited by convergence (as opposed to exhausting the
/// `V − 1` round budget).
///
/// The count includes the final pass that made no change when the loop exits
/// by convergence.
pub fn run_rounds<C: Collective>(
    sync: &RoundSynchronizer<C>,
    engine: &mut RelaxationEngine,
    pl: &mut impl ProgressLog,
) -> (usize, bool) {
    let num_nodes = engine.dist().len();
    let mut global = vec![None; num_nodes];
    let max_rounds = num_nodes.saturating_sub(1);

    pl.item_name("round");
    pl.expected_updates(None);
    pl.start(format!("Relaxing (at most {max_rounds} rounds)..."));

    let mut rounds = 0;
    let mut converged = false;
    for _ in 0..max_rounds {
        sync.refresh(engine, &mut global);
        let changed = engine.relax_round(&global);
        rounds += 1;
        pl.update();
        if sync.converged(changed) {
            converged = true;
            break;
        }
    }
    pl.done();
    if converged {
        log::info!("Converged after {rounds} rounds");
    } else {
        log::info!("Round budget of {max_rounds} rounds exhausted without convergence");
    }
    (rounds, converged)
}

/// The SPMD worker body: receives the replica, computes the owned range, runs
/// the round loop, and takes part in the final gather.
///
/// Every member of the group must call this with the same policy; the
/// coordinator passes the replica payload and receives `Some` result, every
/// other member passes `None` and receives `None`.
///
/// The inputs must have been validated (see
/// [`NodeRanges::new`](crate::partition::NodeRanges::new)) before the group
/// was started.
pub fn run_worker<C: Collective>(
    comm: &C,
    payload: Option<GraphReplica>,
    policy: CrossPartitionPolicy,
    pl: &mut impl ProgressLog,
) -> Option<ShortestPath> {
    let replica = GraphReplica::distribute(comm, payload);
    let ranges = NodeRanges::new(replica.graph.num_nodes(), comm.num_workers())
        .expect("The partition was validated before the group started");
    let range = ranges.range(comm.rank());
    log::debug!(
        "Worker {}/{} owns nodes [{}..{})",
        comm.rank(),
        comm.num_workers(),
        range.start,
        range.end
    );

    let mut engine = RelaxationEngine::new(&replica.graph, range, replica.source);
    let sync = RoundSynchronizer::new(comm, ranges, policy);
    let (rounds, converged) = run_rounds(&sync, &mut engine, pl);
    if !converged {
        // All workers agree on `converged`, so they all take part.
        sync.final_merge(&mut engine);
    }

    aggregate::gather_result(
        comm,
        &engine,
        replica.source,
        replica.destination,
        rounds,
        converged,
    )
}
