/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Round-synchronized SPMD Bellman–Ford single-source shortest paths.
//!
//! A fixed group of workers cooperatively computes shortest paths over a
//! weighted graph. Each worker owns a contiguous slice of the nodes; rounds
//! alternate a local [relaxation pass](relax) over the arcs whose source the
//! worker owns with a [collective exchange](rounds) that rebuilds the global
//! distance view and agrees on convergence. The loop stops when no worker
//! changed a value, or after `V − 1` rounds. The final owned slices are
//! [gathered](aggregate) to the coordinator, which reconstructs the path by
//! walking the predecessor chain.
//!
//! The [`solver::BellmanFord`] driver realizes the group with one thread per
//! worker over the [`collective::ThreadGroup`] barrier-based collectives; the
//! worker body only depends on the [`collective::Collective`] trait, so other
//! transports can drive it unchanged.
//!
//! # Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bellman_rounds::prelude::*;
//! use dsi_progress_logger::no_logging;
//!
//! let g = Graph::from_undirected(4, [(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1)]);
//!
//! let result = BellmanFord::new(&g)
//!     .source(0)
//!     .destination(2)
//!     .num_workers(2)
//!     .run(no_logging![])?;
//!
//! assert_eq!(result.distance, Some(2));
//! assert!(result.converged);
//! #     Ok(())
//! # }
//! ```
//!
//! # Limitations
//!
//! Negative-weight cycles are not detected: the `V − 1` round budget bounds
//! the loop, and the last computed values are returned without any signal.

pub mod aggregate;
pub mod collective;
pub mod graph;
pub mod loader;
pub mod partition;
pub mod relax;
pub mod replica;
pub mod rounds;
pub mod solver;

pub mod prelude {
    pub use crate::aggregate::ShortestPath;
    pub use crate::collective::{Collective, ThreadGroup};
    pub use crate::graph::{Graph, LabelTable, Weight};
    pub use crate::partition::{ConfigError, NodeRanges};
    pub use crate::relax::{Distance, Predecessor, RelaxationEngine};
    pub use crate::replica::GraphReplica;
    pub use crate::rounds::{CrossPartitionPolicy, RoundSynchronizer};
    pub use crate::solver::BellmanFord;
}
