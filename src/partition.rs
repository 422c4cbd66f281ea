/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Contiguous node-ownership ranges for a fixed worker group.
//!
//! Worker `r` of `P` owns the half-open range starting at `r · ⌊V/P⌋`; the
//! last worker absorbs the remainder `V mod P`, so ranges are contiguous,
//! pairwise disjoint, ordered by rank, and tile `[0, V)` exactly. The sizing
//! is deliberately unbalanced (the last range can be up to `P − 1` nodes
//! larger than the others) but deterministic.

use std::ops::Range;
use thiserror::Error;

/// Configuration errors detected before the worker group starts.
///
/// All of these are fatal to the whole run: the collective protocol cannot
/// proceed with mismatched participants, so no worker is spawned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The worker group must contain at least one worker.
    #[error("The worker group is empty")]
    EmptyGroup,
    /// More workers than nodes would leave some workers with an empty range.
    #[error("{num_workers} workers cannot partition {num_nodes} nodes: every worker must own a nonempty range")]
    TooManyWorkers {
        num_workers: usize,
        num_nodes: usize,
    },
    /// The source or destination node is outside `[0, V)`.
    #[error("The {kind} node {node} is out of range for a graph with {num_nodes} nodes")]
    EndpointOutOfRange {
        kind: &'static str,
        node: usize,
        num_nodes: usize,
    },
}

/// The partition of `[0, V)` into one contiguous range per worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRanges {
    num_nodes: usize,
    num_workers: usize,
}

impl NodeRanges {
    /// Creates the partition of `num_nodes` nodes among `num_workers`
    /// workers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyGroup`] if `num_workers` is zero and
    /// [`ConfigError::TooManyWorkers`] if `num_workers > num_nodes`, as the
    /// latter would assign empty ranges to some workers.
    pub fn new(num_nodes: usize, num_workers: usize) -> Result<Self, ConfigError> {
        if num_workers == 0 {
            return Err(ConfigError::EmptyGroup);
        }
        if num_workers > num_nodes {
            return Err(ConfigError::TooManyWorkers {
                num_workers,
                num_nodes,
            });
        }
        Ok(Self {
            num_nodes,
            num_workers,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the range of nodes owned by the given worker.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is not smaller than the number of workers.
    pub fn range(&self, rank: usize) -> Range<usize> {
        assert!(
            rank < self.num_workers,
            "Rank {rank} out of range for a group of {} workers",
            self.num_workers
        );
        let chunk = self.num_nodes / self.num_workers;
        let start = rank * chunk;
        let end = if rank == self.num_workers - 1 {
            self.num_nodes
        } else {
            (rank + 1) * chunk
        };
        start..end
    }

    /// Returns the rank of the worker owning the given node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not smaller than the number of nodes.
    pub fn owner(&self, node: usize) -> usize {
        assert!(
            node < self.num_nodes,
            "Node {node} out of range for a graph with {} nodes",
            self.num_nodes
        );
        let chunk = self.num_nodes / self.num_workers;
        (node / chunk).min(self.num_workers - 1)
    }

    /// Returns an iterator over the ranges, in rank order.
    pub fn iter(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.num_workers).map(|rank| self.range(rank))
    }
}
