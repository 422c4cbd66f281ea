/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use bellman_rounds::partition::{ConfigError, NodeRanges};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Checks that the ranges are contiguous, ordered by rank, pairwise disjoint,
/// and tile `[0, num_nodes)` exactly.
fn assert_tiling(ranges: &NodeRanges) {
    let mut next = 0;
    for (rank, range) in ranges.iter().enumerate() {
        assert_eq!(range.start, next, "Rank {rank} does not start where rank {} ended", rank.wrapping_sub(1));
        assert!(range.start < range.end, "Rank {rank} owns an empty range");
        next = range.end;
    }
    assert_eq!(next, ranges.num_nodes());
}

#[test]
fn test_tiling_grid() {
    for num_nodes in 1..40 {
        for num_workers in 1..=num_nodes {
            let ranges = NodeRanges::new(num_nodes, num_workers).unwrap();
            assert_tiling(&ranges);
        }
    }
}

#[test]
fn test_tiling_random() {
    let mut rng = SmallRng::seed_from_u64(0x5005);
    for _ in 0..100 {
        let num_nodes = rng.random_range(1..10_000);
        let num_workers = rng.random_range(1..=num_nodes);
        let ranges = NodeRanges::new(num_nodes, num_workers).unwrap();
        assert_tiling(&ranges);
    }
}

#[test]
fn test_even_ranks_share_size() {
    // All ranks but the last own exactly ⌊V/P⌋ nodes; the last absorbs the
    // remainder.
    let ranges = NodeRanges::new(14, 4).unwrap();
    assert_eq!(ranges.range(0), 0..3);
    assert_eq!(ranges.range(1), 3..6);
    assert_eq!(ranges.range(2), 6..9);
    assert_eq!(ranges.range(3), 9..14);
}

#[test]
fn test_owner() {
    for num_nodes in 1..30 {
        for num_workers in 1..=num_nodes {
            let ranges = NodeRanges::new(num_nodes, num_workers).unwrap();
            for node in 0..num_nodes {
                let owner = ranges.owner(node);
                assert!(
                    ranges.range(owner).contains(&node),
                    "Node {node} not owned by its owner {owner} ({num_nodes} nodes, {num_workers} workers)"
                );
            }
        }
    }
}

#[test]
fn test_empty_group_rejected() {
    assert_eq!(NodeRanges::new(5, 0), Err(ConfigError::EmptyGroup));
}

#[test]
fn test_too_many_workers_rejected() {
    assert_eq!(
        NodeRanges::new(3, 4),
        Err(ConfigError::TooManyWorkers {
            num_workers: 4,
            num_nodes: 3
        })
    );
    assert_eq!(
        NodeRanges::new(0, 1),
        Err(ConfigError::TooManyWorkers {
            num_workers: 1,
            num_nodes: 0
        })
    );
}
