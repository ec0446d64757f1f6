//! Simulation time and deferred continuations
//!
//! Timed transitions never sleep. They are queued with a due time on the
//! simulation clock and fired by the tick loop once the clock reaches them.
//! Time is kept in whole microseconds so that due times are exact whatever
//! fixed step drives the clock.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A point (or span) on the simulation clock, in microseconds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SimTime(u64);

impl SimTime {
    pub const ZERO: Self = SimTime(0);

    /// Convert seconds to clock units, rounding to the nearest microsecond
    pub fn from_secs(secs: f32) -> Self {
        let micros = (secs as f64 * 1_000_000.0).round();
        SimTime(micros.max(0.0) as u64)
    }

    pub fn from_micros(micros: u64) -> Self {
        SimTime(micros)
    }

    pub fn as_micros(self) -> u64 {
        self.0
    }

    pub fn as_secs(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

impl Add for SimTime {
    type Output = SimTime;

    fn add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

/// A queued continuation
#[derive(Debug)]
struct Pending<E> {
    due: SimTime,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    event: E,
}

impl<E> PartialEq for Pending<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<E> Eq for Pending<E> {}

impl<E> PartialOrd for Pending<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Pending<E> {
    // Reversed: BinaryHeap is a max-heap, we want the earliest due first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Deferred-continuation queue keyed by simulation time
#[derive(Debug)]
pub struct Scheduler<E> {
    now: SimTime,
    queue: BinaryHeap<Pending<E>>,
    next_seq: u64,
    /// Round generation; bumped on every reset
    generation: u32,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: SimTime::ZERO,
            queue: BinaryHeap::new(),
            next_seq: 0,
            generation: 0,
        }
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of continuations still waiting
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queue `event` to fire `delay` after the current time. Returns the due time.
    pub fn schedule_after(&mut self, delay: SimTime, event: E) -> SimTime {
        self.schedule_at(self.now + delay, event)
    }

    /// Queue `event` at an absolute due time. A due time already in the past
    /// fires on the next `pop_due`.
    pub fn schedule_at(&mut self, due: SimTime, event: E) -> SimTime {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Pending { due, seq, event });
        due
    }

    /// Pop the earliest continuation whose due time has been reached
    pub fn pop_due(&mut self) -> Option<(SimTime, E)> {
        if self.queue.peek().is_some_and(|p| p.due <= self.now) {
            self.queue.pop().map(|p| (p.due, p.event))
        } else {
            None
        }
    }

    /// Move the clock forward by one step
    pub fn advance(&mut self, step: SimTime) {
        self.now = self.now + step;
    }

    /// Drop every pending continuation and rewind the clock for a new round
    pub fn reset(&mut self) {
        let dropped = self.queue.len();
        self.queue.clear();
        self.now = SimTime::ZERO;
        self.next_seq = 0;
        self.generation = self.generation.wrapping_add(1);
        if dropped > 0 {
            log::debug!(
                "Scheduler reset to generation {}, dropped {} pending",
                self.generation,
                dropped
            );
        }
    }
}
