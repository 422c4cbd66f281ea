/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use bellman_rounds::collective::{Collective, ThreadGroup};
use bellman_rounds::partition::NodeRanges;

/// Runs `body` on every rank of a group of the given size and returns the
/// per-rank results, in rank order.
fn on_group<R: Send>(
    num_workers: usize,
    body: impl Fn(ThreadGroup) -> R + Sync,
) -> Vec<R> {
    std::thread::scope(|s| {
        let body = &body;
        let handles = ThreadGroup::new_group(num_workers)
            .into_iter()
            .map(|comm| s.spawn(move || body(comm)))
            .collect::<Vec<_>>();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

#[test]
fn test_broadcast() {
    let results = on_group(4, |comm| {
        let payload = (comm.rank() == 0).then(|| vec!["a".to_owned(), "b".to_owned()]);
        comm.broadcast(payload)
    });
    assert_eq!(results, vec![vec!["a".to_owned(), "b".to_owned()]; 4]);
}

#[test]
fn test_exchange_assembles_the_same_vector_everywhere() {
    let ranges = NodeRanges::new(10, 4).unwrap();
    let results = on_group(4, |comm| {
        let range = ranges.range(comm.rank());
        // Each rank contributes values stamped with its own rank.
        let owned = range.clone().map(|node| (comm.rank(), node)).collect::<Vec<_>>();
        let mut out = vec![(usize::MAX, usize::MAX); 10];
        comm.exchange(range.start, &owned, &mut out);
        out
    });
    let expected = (0..10)
        .map(|node| (ranges.owner(node), node))
        .collect::<Vec<_>>();
    for out in results {
        assert_eq!(out, expected);
    }
}

#[test]
fn test_agree_or() {
    // No rank raises the flag.
    let results = on_group(3, |comm| comm.agree_or(false));
    assert_eq!(results, vec![false; 3]);
    // A single rank raising the flag is enough.
    let results = on_group(3, |comm| comm.agree_or(comm.rank() == 2));
    assert_eq!(results, vec![true; 3]);
}

#[test]
fn test_gather_is_root_only() {
    let ranges = NodeRanges::new(7, 3).unwrap();
    let results = on_group(3, |comm| {
        let range = ranges.range(comm.rank());
        let owned = range.clone().collect::<Vec<_>>();
        comm.gather(range.start, &owned, 7)
    });
    assert_eq!(results[0], Some((0..7).collect::<Vec<_>>()));
    assert_eq!(results[1], None);
    assert_eq!(results[2], None);
}

#[test]
fn test_back_to_back_collectives() {
    // The shared buffer must be reset correctly between consecutive
    // collectives of different types, over many rounds.
    let ranges = NodeRanges::new(8, 4).unwrap();
    let results = on_group(4, |comm| {
        let range = ranges.range(comm.rank());
        let mut log = Vec::new();
        for round in 0..100 {
            let owned = vec![round * 10 + comm.rank(); range.len()];
            let mut out = vec![usize::MAX; 8];
            comm.exchange(range.start, &owned, &mut out);
            log.push(out);
            let combined = comm.agree_or(comm.rank() == round % 4);
            assert!(combined, "Round {round}: exactly one rank raised the flag");
        }
        log
    });
    for (rank, log) in results.iter().enumerate() {
        assert_eq!(log.len(), 100, "Rank {rank} dropped rounds");
        for (round, out) in log.iter().enumerate() {
            let expected = (0..8)
                .map(|node| round * 10 + ranges.owner(node))
                .collect::<Vec<_>>();
            assert_eq!(out, &expected, "Rank {rank}, round {round}");
        }
    }
}

#[test]
fn test_singleton_group() {
    let results = on_group(1, |comm| {
        let value = comm.broadcast(Some(7));
        let mut out = vec![0; 3];
        comm.exchange(0, &[1, 2, 3], &mut out);
        let flag = comm.agree_or(true);
        let gathered = comm.gather(0, &[9, 9], 2);
        (value, out, flag, gathered)
    });
    assert_eq!(results, vec![(7, vec![1, 2, 3], true, Some(vec![9, 9]))]);
}
