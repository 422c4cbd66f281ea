/*
 * SPDX-FileCopyrightText: 2026 Tommaso Fontana
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Collective operations for a fixed group of SPMD workers.
//!
//! The [`Collective`] trait is the only communication surface of the
//! computation: a one-time broadcast for graph distribution, an all-to-all
//! slice exchange and an OR agreement for the round protocol, and a gather to
//! the coordinator for the final result.
//!
//! Every operation is a _collective_: all members of the group must call it,
//! in the same order and with compatible arguments, and no member returns
//! from it before every member has entered it. This lockstep contract is what
//! gives the round loop its ordering guarantees, so implementations must not
//! replace it with polling or eventual consistency.
//!
//! [`ThreadGroup`] realizes the trait for a group of threads in a single
//! process with a barrier and a shared, type-erased buffer. Other
//! realizations (for example, over a message-passing library) only need to
//! preserve the blocking contracts above.
//!
//! # Examples
//!
//! ```
//! use bellman_rounds::collective::{Collective, ThreadGroup};
//!
//! let mut out = Vec::new();
//! std::thread::scope(|s| {
//!     let mut handles = Vec::new();
//!     for comm in ThreadGroup::new_group(3) {
//!         handles.push(s.spawn(move || {
//!             // Rank 0 provides the value, everyone receives it.
//!             let value = comm.broadcast((comm.rank() == 0).then_some(42));
//!             // Everyone agrees on the OR of the local flags.
//!             let any_odd = comm.agree_or(comm.rank() % 2 == 1);
//!             (value, any_odd)
//!         }));
//!     }
//!     out = handles.into_iter().map(|h| h.join().unwrap()).collect();
//! });
//! assert_eq!(out, vec![(42, true); 3]);
//! ```

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier, Mutex};

/// The collective operations shared by all members of a worker group.
///
/// All methods block until every member of the group has called them; see the
/// [module documentation](self) for the exact contracts.
pub trait Collective {
    /// Returns the rank of this member, in `[0, num_workers)`.
    ///
    /// Rank 0 is the coordinator: it is the root of [`broadcast`](Self::broadcast)
    /// and the only member receiving the result of [`gather`](Self::gather).
    fn rank(&self) -> usize;

    /// Returns the number of members of the group.
    fn num_workers(&self) -> usize;

    /// Replicates the root's value on every member.
    ///
    /// The root (rank 0) must pass `Some`; the value passed by any other
    /// member is ignored.
    ///
    /// # Panics
    ///
    /// Panics if the root passes `None`.
    fn broadcast<T: Clone + Send + 'static>(&self, value: Option<T>) -> T;

    /// All-to-all slice exchange: each member contributes the slice of the
    /// output starting at `offset`, and every member receives the complete
    /// assembled vector in `out`.
    ///
    /// The contributed slices must be pairwise disjoint and tile
    /// `[0, out.len())`; all members must pass the same `out` length.
    fn exchange<T: Copy + Default + Send + 'static>(
        &self,
        offset: usize,
        owned: &[T],
        out: &mut [T],
    );

    /// Combines the members' flags with logical OR; every member receives the
    /// same combined result.
    fn agree_or(&self, flag: bool) -> bool;

    /// Like [`exchange`](Self::exchange), but only the coordinator receives
    /// the assembled vector (of length `total_len`); all other members
    /// receive `None`.
    fn gather<T: Copy + Default + Send + 'static>(
        &self,
        offset: usize,
        owned: &[T],
        total_len: usize,
    ) -> Option<Vec<T>>;
}

struct Shared {
    barrier: Barrier,
    // One collective is in flight at a time, so a single slot suffices; it is
    // type-erased because different collectives move different element types.
    slot: Mutex<Option<Box<dyn Any + Send>>>,
    flag: AtomicBool,
}

/// A thread-based realization of [`Collective`].
///
/// [`new_group`](ThreadGroup::new_group) returns one handle per rank; each
/// handle is moved into its worker thread. The handles share a
/// [`Barrier`]-protected buffer: every collective writes under a mutex,
/// crosses the barrier, reads, and crosses the barrier again before the
/// buffer is reset for the next collective. A member that never reaches a
/// collective (for example because it panicked) therefore blocks the whole
/// group, which matches the all-or-nothing failure model of the computation.
pub struct ThreadGroup {
    rank: usize,
    num_workers: usize,
    shared: Arc<Shared>,
}

impl ThreadGroup {
    /// Creates a group of the given size and returns the handles, in rank
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if `num_workers` is zero.
    pub fn new_group(num_workers: usize) -> Vec<Self> {
        assert!(num_workers > 0, "The group must contain at least one worker");
        let shared = Arc::new(Shared {
            barrier: Barrier::new(num_workers),
            slot: Mutex::new(None),
            flag: AtomicBool::new(false),
        });
        (0..num_workers)
            .map(|rank| Self {
                rank,
                num_workers,
                shared: shared.clone(),
            })
            .collect()
    }

    // Second half of every collective: wait for all readers, let one member
    // reset the buffer, and hold everyone until the reset is visible. Without
    // the last wait a member could start writing the next collective into a
    // buffer that is about to be cleared.
    fn release(&self) {
        if self.shared.barrier.wait().is_leader() {
            self.shared.slot.lock().unwrap().take();
            self.shared.flag.store(false, Ordering::Relaxed);
        }
        self.shared.barrier.wait();
    }
}

impl Collective for ThreadGroup {
    fn rank(&self) -> usize {
        self.rank
    }

    fn num_workers(&self) -> usize {
        self.num_workers
    }

    fn broadcast<T: Clone + Send + 'static>(&self, value: Option<T>) -> T {
        if self.rank == 0 {
            let value = value.expect("The root rank must provide a value to broadcast");
            *self.shared.slot.lock().unwrap() = Some(Box::new(value));
        }
        self.shared.barrier.wait();
        let result = {
            let slot = self.shared.slot.lock().unwrap();
            slot.as_ref()
                .expect("Broadcast slot is empty")
                .downcast_ref::<T>()
                .expect("Broadcast element type mismatch across ranks")
                .clone()
        };
        self.release();
        result
    }

    fn exchange<T: Copy + Default + Send + 'static>(
        &self,
        offset: usize,
        owned: &[T],
        out: &mut [T],
    ) {
        {
            let mut slot = self.shared.slot.lock().unwrap();
            let buf = slot
                .get_or_insert_with(|| Box::new(vec![T::default(); out.len()]))
                .downcast_mut::<Vec<T>>()
                .expect("Exchange element type mismatch across ranks");
            assert_eq!(buf.len(), out.len(), "Exchange length mismatch across ranks");
            buf[offset..offset + owned.len()].copy_from_slice(owned);
        }
        self.shared.barrier.wait();
        {
            let slot = self.shared.slot.lock().unwrap();
            let buf = slot
                .as_ref()
                .expect("Exchange slot is empty")
                .downcast_ref::<Vec<T>>()
                .expect("Exchange element type mismatch across ranks");
            out.copy_from_slice(buf);
        }
        self.release();
    }

    fn agree_or(&self, flag: bool) -> bool {
        if flag {
            // The barrier orders this store before every load below.
            self.shared.flag.store(true, Ordering::Relaxed);
        }
        self.shared.barrier.wait();
        let combined = self.shared.flag.load(Ordering::Relaxed);
        self.release();
        combined
    }

    fn gather<T: Copy + Default + Send + 'static>(
        &self,
        offset: usize,
        owned: &[T],
        total_len: usize,
    ) -> Option<Vec<T>> {
        {
            let mut slot = self.shared.slot.lock().unwrap();
            let buf = slot
                .get_or_insert_with(|| Box::new(vec![T::default(); total_len]))
                .downcast_mut::<Vec<T>>()
                .expect("Gather element type mismatch across ranks");
            assert_eq!(buf.len(), total_len, "Gather length mismatch across ranks");
            buf[offset..offset + owned.len()].copy_from_slice(owned);
        }
        self.shared.barrier.wait();
        let result = if self.rank == 0 {
            let slot = self.shared.slot.lock().unwrap();
            Some(
                slot.as_ref()
                    .expect("Gather slot is empty")
                    .downcast_ref::<Vec<T>>()
                    .expect("Gather element type mismatch across ranks")
                    .clone(),
            )
        } else {
            None
        };
        self.release();
        result
    }
}
